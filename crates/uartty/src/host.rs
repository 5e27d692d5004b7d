use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use uartty_common::{Terminal, Tick};
use uartty_device::{
    ConfigError, Control, Status, TransmitPhase, Uart, UartConfig, REG_CONTROL, REG_DATA,
    REG_STATUS,
};

/// How long the real-time loop sleeps between catch-up bursts.
const SLICE: Duration = Duration::from_millis(2);

/// Minimal host CPU: a monitor that echoes every received byte back out.
///
/// It takes received bytes on the interrupt line, the way a ROM monitor
/// hooked to INT0 would, and polls the status register for transmit
/// readiness.
pub struct EchoHost<T: Terminal> {
    uart: Uart<T>,
    irq: Rc<Cell<bool>>,
    pending: Option<u8>,
}

impl<T: Terminal> EchoHost<T> {
    pub fn new(config: UartConfig, terminal: T) -> Result<Self, ConfigError> {
        let mut uart = Uart::new(config, terminal)?;
        let irq = Rc::new(Cell::new(false));
        let line = Rc::clone(&irq);
        uart.set_rx_ready_handler(move |level| line.set(level));
        Ok(Self {
            uart,
            irq,
            pending: None,
        })
    }

    pub fn uart(&self) -> &Uart<T> {
        &self.uart
    }

    /// One tick of emulated time followed by one pass of the monitor.
    pub fn step(&mut self) {
        self.uart.tick();
        self.service();
    }

    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Step until [`EchoHost::is_drained`] or `max_ticks` elapse. Returns
    /// whether the host drained.
    pub fn run_until_drained(&mut self, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            if self.is_drained() {
                return true;
            }
            self.step();
        }
        self.is_drained()
    }

    /// Nothing left to receive and nothing left to send.
    pub fn is_drained(&self) -> bool {
        self.uart.receiver_exhausted()
            && self.uart.tx_phase() == TransmitPhase::Idle
            && self.pending.is_none()
            && !self.irq.get()
    }

    /// Pace emulated ticks against wall-clock time until drained.
    pub fn run_realtime(&mut self) {
        let time_base = u128::from(self.uart.config().time_base);
        let start = Instant::now();
        while !self.is_drained() {
            let due = start.elapsed().as_nanos() * time_base / 1_000_000_000;
            let due = Tick::try_from(due).unwrap_or(Tick::MAX);
            while self.uart.now() < due && !self.is_drained() {
                self.step();
            }
            thread::sleep(SLICE);
        }
        log::info!("Input drained after {} ticks", self.uart.now());
    }

    fn service(&mut self) {
        let status = Status::from_bits_retain(self.uart.read(REG_STATUS));
        if status.contains(Status::OVERRUN_ERROR) {
            log::warn!("Receive overrun at tick {}, input was dropped", self.uart.now());
            self.uart.write(REG_CONTROL, Control::ERROR_RESET.bits());
        }

        if self.pending.is_none() && self.irq.get() {
            self.pending = Some(self.uart.read(REG_DATA));
        }
        if let Some(byte) = self.pending {
            if status.contains(Status::TX_READY) {
                self.uart.write(REG_DATA, byte);
                self.pending = None;
            }
        }
    }
}
