use uartty_common::Terminal;

use crate::status::{Status, StatusRegister};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum TransmitPhase {
    #[default]
    Idle,
    /// A byte is latched and its frame is being shifted out.
    Sending,
}

/// Transmit half of the UART: one-byte data-out latch plus its countdown.
#[derive(Default)]
pub(crate) struct Transmitter {
    phase: TransmitPhase,
    data: u8,
    remaining: u32,
}

impl Transmitter {
    #[inline]
    pub(crate) fn phase(&self) -> TransmitPhase {
        self.phase
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// CPU write of the data-out latch.
    ///
    /// There is no FIFO. Writing while a frame is still in flight replaces
    /// the pending byte without touching the countdown, so only the last
    /// byte written goes out.
    pub(crate) fn write(&mut self, byte: u8, status: &mut StatusRegister, frame_ticks: u32) {
        self.data = byte;
        match self.phase {
            TransmitPhase::Idle => {
                status.remove(Status::TX_READY | Status::TX_EMPTY);
                self.remaining = frame_ticks.max(1);
                self.phase = TransmitPhase::Sending;
            }
            TransmitPhase::Sending => {
                log::debug!(
                    "TX busy, {:#04x} replaces pending byte ({} ticks left)",
                    byte,
                    self.remaining
                );
            }
        }
    }

    pub(crate) fn tick<T: Terminal>(&mut self, status: &mut StatusRegister, terminal: &mut T) {
        if self.phase != TransmitPhase::Sending {
            return;
        }
        self.remaining -= 1;
        if self.remaining > 0 {
            return;
        }

        log::debug!("TX {:#04x}", self.data);
        if let Err(err) = terminal.write_byte(self.data) {
            log::warn!("TX {:#04x} lost: {}", self.data, err);
        }
        status.insert(Status::TX_READY | Status::TX_EMPTY);
        self.phase = TransmitPhase::Idle;
    }
}
