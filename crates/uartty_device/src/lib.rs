//! Generic UART / tty device.
//!
//! A byte-wide serial port with one data register and one status/control
//! register, driven entirely by emulated ticks. Bytes come from and go to a
//! [`uartty_common::Terminal`]; the host owns the passage of time.
mod clock;
mod config;
mod error;
mod rx;
mod status;
mod tx;
mod uart;

pub use clock::{ticks_for, BaudRate, TickClock};
pub use config::{DeadTime, UartConfig, DEFAULT_BITS_PER_FRAME, DEFAULT_TIME_BASE};
pub use error::ConfigError;
pub use rx::ReceivePhase;
pub use status::{Generic, Intel8251, Status, StatusPolicy};
pub use tx::TransmitPhase;
pub use uart::{Control, Uart, REG_CONTROL, REG_DATA, REG_STATUS};
