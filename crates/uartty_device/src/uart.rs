use std::marker::PhantomData;

use bitflags::bitflags;
use uartty_common::{Terminal, Tick};

use crate::rx::{ReceivePhase, Receiver};
use crate::status::{Generic, Status, StatusPolicy, StatusRegister};
use crate::tx::{TransmitPhase, Transmitter};
use crate::{BaudRate, ConfigError, TickClock, UartConfig};

/// Data register: read = received byte, write = byte to send.
pub const REG_DATA: u8 = 0;
/// Status register on read, control register on write.
pub const REG_STATUS: u8 = 1;
pub const REG_CONTROL: u8 = 1;

bitflags! {
    /// Control register (offset 1, write). Only the two reset bits have an
    /// effect; the rest are latched for inspection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Control: u8 {
        const TX_ENABLE = 1 << 0;
        const DTR = 1 << 1;
        const RX_ENABLE = 1 << 2;
        const SEND_BREAK = 1 << 3;
        /// Clear the framing, overrun and parity error flags.
        const ERROR_RESET = 1 << 4;
        const RTS = 1 << 5;
        /// Full device reset.
        const INTERNAL_RESET = 1 << 6;
        const HUNT = 1 << 7;
    }
}

type LineHandler = Box<dyn FnMut(bool)>;

/// Generic UART / tty device.
///
/// Time only moves when the host calls [`Uart::tick`] or [`Uart::advance`];
/// each tick runs one receive pass and one transmit pass. `P` picks the
/// chip-specific status composition.
pub struct Uart<T: Terminal, P: StatusPolicy = Generic> {
    config: UartConfig,
    clock: TickClock,
    status: StatusRegister,
    rx: Receiver,
    tx: Transmitter,
    control: Control,
    terminal: T,
    rx_ready_line: bool,
    rx_ready_handler: Option<LineHandler>,
    _policy: PhantomData<P>,
}

impl<T: Terminal, P: StatusPolicy> Uart<T, P> {
    pub fn new(config: UartConfig, terminal: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let clock = TickClock::new(config.time_base, config.baud_rate)?;
        log::info!(
            "UART at {} on a {} Hz time base: {} ticks per half bit, {} ticks per frame",
            config.baud_rate,
            config.time_base,
            clock.half_bit(),
            clock.frame_ticks(config.bits_per_frame)
        );
        Ok(Self {
            config,
            clock,
            status: StatusRegister::power_on(),
            rx: Receiver::default(),
            tx: Transmitter::default(),
            control: Control::empty(),
            terminal,
            rx_ready_line: false,
            rx_ready_handler: None,
            _policy: PhantomData,
        })
    }

    /// Return to power-on state. Pending transmit and dead-time countdowns
    /// are dropped; the terminal is left as it is. DSR and SYNDET follow
    /// their input pins, so their levels survive the reset.
    pub fn reset(&mut self) {
        log::info!("UART reset");
        let pins = self.status.flags() & Status::INPUT_PINS;
        self.clock.reset();
        self.status = StatusRegister::power_on();
        self.status.insert(pins);
        self.rx.reset();
        self.tx.reset();
        self.control = Control::empty();
        self.update_rx_ready_line();
    }

    /// Advance emulated time by one tick.
    pub fn tick(&mut self) {
        self.clock.advance();
        let dead_ticks = self.dead_ticks();
        self.rx.tick(&mut self.status, &mut self.terminal, dead_ticks);
        self.tx.tick(&mut self.status, &mut self.terminal);
        self.update_rx_ready_line();
    }

    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Ticks since the last reset.
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn read_status(&self) -> u8 {
        self.status.read::<P>()
    }

    /// Read the data-in latch and mark it consumed. Reading with nothing
    /// pending returns the previous byte again.
    pub fn read_data(&mut self) -> u8 {
        let byte = self.rx.take(&mut self.status);
        self.update_rx_ready_line();
        byte
    }

    pub fn write_data(&mut self, byte: u8) {
        let frame_ticks = self.frame_ticks();
        self.tx.write(byte, &mut self.status, frame_ticks);
    }

    pub fn write_control(&mut self, value: u8) {
        let control = Control::from_bits_retain(value);
        if control.contains(Control::INTERNAL_RESET) {
            self.reset();
            return;
        }
        if control.contains(Control::ERROR_RESET) {
            self.status.clear_errors();
        }
        self.control = control;
    }

    /// Bus read. Only address bit 0 is decoded.
    pub fn read(&mut self, offset: u8) -> u8 {
        match offset & 1 {
            REG_DATA => self.read_data(),
            _ => self.read_status(),
        }
    }

    /// Bus write. Only address bit 0 is decoded.
    pub fn write(&mut self, offset: u8, value: u8) {
        match offset & 1 {
            REG_DATA => self.write_data(value),
            _ => self.write_control(value),
        }
    }

    /// Change line speed. Affects countdowns armed from now on only.
    pub fn set_baud_rate(&mut self, baud: BaudRate) {
        self.clock.set_baud_rate(baud);
        self.config.baud_rate = baud;
        log::info!(
            "UART baud rate now {} ({} ticks per half bit)",
            baud,
            self.clock.half_bit()
        );
    }

    /// Register the receive-ready output, usually wired to a CPU interrupt
    /// input. Called with the new level whenever it changes.
    pub fn set_rx_ready_handler(&mut self, handler: impl FnMut(bool) + 'static) {
        self.rx_ready_handler = Some(Box::new(handler));
    }

    /// Current level of the receive-ready output.
    #[inline]
    pub fn rx_ready_line(&self) -> bool {
        self.rx_ready_line
    }

    pub fn set_dsr(&mut self, asserted: bool) {
        self.status.set(Status::DSR, asserted);
    }

    pub fn set_syndet(&mut self, asserted: bool) {
        self.status.set(Status::SYNDET, asserted);
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status.flags()
    }

    #[inline]
    pub fn control(&self) -> Control {
        self.control
    }

    #[inline]
    pub fn rx_phase(&self) -> ReceivePhase {
        self.rx.phase()
    }

    #[inline]
    pub fn tx_phase(&self) -> TransmitPhase {
        self.tx.phase()
    }

    /// `true` once the receiver has seen the end of its input source.
    #[inline]
    pub fn receiver_exhausted(&self) -> bool {
        self.rx.exhausted()
    }

    #[inline]
    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    #[inline]
    pub fn ticks_per_half_bit(&self) -> u32 {
        self.clock.half_bit()
    }

    /// Ticks from a data write to the byte reaching the terminal.
    #[inline]
    pub fn frame_ticks(&self) -> u32 {
        self.clock.frame_ticks(self.config.bits_per_frame)
    }

    pub fn dead_ticks(&self) -> u32 {
        self.config.dead_time.ticks(self.frame_ticks())
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    fn update_rx_ready_line(&mut self) {
        let level = self.status.contains(Status::RX_READY);
        if level == self.rx_ready_line {
            return;
        }
        self.rx_ready_line = level;
        if let Some(handler) = self.rx_ready_handler.as_mut() {
            handler(level);
        }
    }
}
