use typed_builder::TypedBuilder;

use crate::{BaudRate, ConfigError};

/// Host tick frequency used when none is given: one tick per microsecond.
pub const DEFAULT_TIME_BASE: u32 = 1_000_000;
/// Start bit, eight data bits, one stop bit.
pub const DEFAULT_BITS_PER_FRAME: u32 = 10;

/// How long the receiver stays deaf after latching a byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeadTime {
    /// A fixed number of ticks, independent of the line speed.
    Ticks(u32),
    /// A number of whole frames at the baud rate in effect when the byte is
    /// latched.
    Frames(u32),
}

impl Default for DeadTime {
    fn default() -> Self {
        DeadTime::Frames(1)
    }
}

impl DeadTime {
    pub fn ticks(self, frame_ticks: u32) -> u32 {
        match self {
            DeadTime::Ticks(ticks) => ticks,
            DeadTime::Frames(frames) => frames.saturating_mul(frame_ticks),
        }
    }
}

/// Construction parameters for a [`crate::Uart`].
///
/// ```
/// use uartty_device::{BaudRate, DeadTime, UartConfig};
///
/// let config = UartConfig::builder()
///     .baud_rate(BaudRate::new(9600).unwrap())
///     .dead_time(DeadTime::Ticks(100))
///     .build();
/// assert_eq!(config.time_base, 1_000_000);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct UartConfig {
    pub baud_rate: BaudRate,
    /// Host ticks per second.
    #[builder(default = DEFAULT_TIME_BASE)]
    pub time_base: u32,
    /// Bits shifted per byte, used for the transmit delay and for
    /// [`DeadTime::Frames`].
    #[builder(default = DEFAULT_BITS_PER_FRAME)]
    pub bits_per_frame: u32,
    #[builder(default)]
    pub dead_time: DeadTime,
}

impl UartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_base == 0 {
            return Err(ConfigError::InvalidTimeBase(self.time_base));
        }
        if self.bits_per_frame == 0 {
            return Err(ConfigError::InvalidFrameLength(self.bits_per_frame));
        }
        Ok(())
    }
}
