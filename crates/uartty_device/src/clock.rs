use std::fmt;
use std::str::FromStr;

use uartty_common::Tick;

use crate::ConfigError;

/// Line speed in bits per second. Always non-zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BaudRate(u32);

impl BaudRate {
    pub fn new(bps: i64) -> Result<Self, ConfigError> {
        match u32::try_from(bps) {
            Ok(bps) if bps > 0 => Ok(Self(bps)),
            _ => Err(ConfigError::InvalidBaudRate(bps)),
        }
    }

    #[inline]
    pub const fn bps(self) -> u32 {
        self.0
    }
}

impl FromStr for BaudRate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bps = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::UnparsableBaudRate(s.to_string()))?;
        Self::new(bps)
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

/// Number of host ticks in half a bit cell at `baud`.
///
/// Baud rates faster than half the time base would round down to zero; those
/// are clamped to a single tick so every countdown still makes progress.
pub fn ticks_for(time_base: u32, baud: BaudRate) -> u32 {
    let ticks = u64::from(time_base) / (2 * u64::from(baud.bps()));
    if ticks == 0 {
        log::warn!(
            "{} is too fast for a {} Hz time base, clamping half-bit to 1 tick",
            baud,
            time_base
        );
        return 1;
    }
    // time_base / 2 always fits
    ticks as u32
}

/// Emulated time source for one device.
///
/// `now` only moves forward through [`TickClock::advance`], which the device
/// calls once per tick; the host decides how ticks map onto real time.
pub struct TickClock {
    time_base: u32,
    baud: BaudRate,
    half_bit: u32,
    now: Tick,
}

impl TickClock {
    pub fn new(time_base: u32, baud: BaudRate) -> Result<Self, ConfigError> {
        if time_base == 0 {
            return Err(ConfigError::InvalidTimeBase(time_base));
        }
        Ok(Self {
            time_base,
            baud,
            half_bit: ticks_for(time_base, baud),
            now: 0,
        })
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    #[inline]
    pub fn time_base(&self) -> u32 {
        self.time_base
    }

    #[inline]
    pub fn baud_rate(&self) -> BaudRate {
        self.baud
    }

    /// Ticks per half bit cell at the current baud rate.
    #[inline]
    pub fn half_bit(&self) -> u32 {
        self.half_bit
    }

    /// Ticks needed to shift a whole frame of `bits_per_frame` bits.
    #[inline]
    pub fn frame_ticks(&self, bits_per_frame: u32) -> u32 {
        self.half_bit.saturating_mul(2).saturating_mul(bits_per_frame)
    }

    /// Switch line speed. Countdowns that are already running keep the
    /// remaining ticks they were armed with.
    pub fn set_baud_rate(&mut self, baud: BaudRate) {
        self.baud = baud;
        self.half_bit = ticks_for(self.time_base, baud);
    }

    pub(crate) fn advance(&mut self) {
        self.now += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.now = 0;
    }
}
