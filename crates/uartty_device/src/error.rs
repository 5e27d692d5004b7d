use thiserror::Error;

/// Misconfiguration detected while building a [`crate::Uart`].
///
/// This is the only error the device ever returns; everything that can go
/// wrong at run time is reported through the status register instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid baud rate {0}: expected a positive number of bits per second")]
    InvalidBaudRate(i64),
    #[error("baud rate {0:?} is not a number")]
    UnparsableBaudRate(String),
    #[error("invalid time base {0}: the host tick frequency must be non-zero")]
    InvalidTimeBase(u32),
    #[error("invalid frame length {0}: a frame needs at least one bit")]
    InvalidFrameLength(u32),
}
