use uartty_common::Terminal;

use crate::status::{Status, StatusRegister};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ReceivePhase {
    /// Not polling. Either waiting to prime after reset, or parked for good
    /// because the input source ran dry.
    #[default]
    Idle,
    /// A byte was just latched; the line is ignored until the window closes.
    DeadTime,
    /// Polling the terminal once per tick.
    Active,
}

/// Receive half of the UART: one-byte data-in latch plus its timing.
#[derive(Default)]
pub(crate) struct Receiver {
    phase: ReceivePhase,
    /// Data-in latch. Holds the last received byte even after the CPU has
    /// consumed it.
    data: u8,
    dead_remaining: u32,
    exhausted: bool,
}

impl Receiver {
    #[inline]
    pub(crate) fn phase(&self) -> ReceivePhase {
        self.phase
    }

    #[inline]
    pub(crate) fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the receiver by one tick. `dead_ticks` is the length of the
    /// window to open if a byte gets latched on this tick.
    pub(crate) fn tick<T: Terminal>(
        &mut self,
        status: &mut StatusRegister,
        terminal: &mut T,
        dead_ticks: u32,
    ) {
        match self.phase {
            ReceivePhase::Idle => {
                if !self.exhausted {
                    // First tick after reset: drop the power-on overrun
                    // sentinel and start listening.
                    status.remove(Status::OVERRUN_ERROR);
                    self.phase = ReceivePhase::Active;
                }
            }
            ReceivePhase::DeadTime => {
                self.dead_remaining = self.dead_remaining.saturating_sub(1);
                if self.dead_remaining == 0 {
                    self.phase = ReceivePhase::Active;
                }
            }
            ReceivePhase::Active => self.poll(status, terminal, dead_ticks),
        }
    }

    fn poll<T: Terminal>(
        &mut self,
        status: &mut StatusRegister,
        terminal: &mut T,
        dead_ticks: u32,
    ) {
        if terminal.is_exhausted() {
            log::info!("Input source exhausted, receiver going idle");
            self.exhausted = true;
            self.phase = ReceivePhase::Idle;
            return;
        }
        if !terminal.has_input() {
            return;
        }
        let Some(byte) = terminal.read_byte() else {
            return;
        };
        status.insert(Status::from(terminal.line_errors()));

        if status.contains(Status::RX_READY) {
            log::debug!(
                "RX overrun: dropped {:#04x}, {:#04x} still unread",
                byte,
                self.data
            );
            status.insert(Status::OVERRUN_ERROR);
            return;
        }

        log::debug!("RX {:#04x}", byte);
        self.data = byte;
        status.insert(Status::RX_READY);
        if dead_ticks > 0 {
            self.dead_remaining = dead_ticks;
            self.phase = ReceivePhase::DeadTime;
        }
    }

    /// CPU read of the data-in latch.
    pub(crate) fn take(&mut self, status: &mut StatusRegister) -> u8 {
        status.remove(Status::RX_READY);
        self.data
    }
}
