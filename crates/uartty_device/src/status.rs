use bitflags::bitflags;
use uartty_common::LineErrors;

bitflags! {
    /// Status register (offset 1, read). 1 = asserted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        const DSR = 1 << 7;
        const SYNDET = 1 << 6;
        const FRAMING_ERROR = 1 << 5;
        const OVERRUN_ERROR = 1 << 4;
        const PARITY_ERROR = 1 << 3;
        const TX_EMPTY = 1 << 2;
        const RX_READY = 1 << 1;
        const TX_READY = 1 << 0;
    }
}

impl Status {
    /// Sticky receive error bits, cleared only by an error reset or a device
    /// reset.
    pub const ERRORS: Status = Status::FRAMING_ERROR
        .union(Status::OVERRUN_ERROR)
        .union(Status::PARITY_ERROR);

    /// Bits driven from outside the chip rather than latched by it.
    pub const INPUT_PINS: Status = Status::DSR.union(Status::SYNDET);

    /// Value after reset. OVERRUN_ERROR starts set and stays set until the
    /// receiver primes on its first tick.
    pub const POWER_ON: Status = Status::TX_READY
        .union(Status::TX_EMPTY)
        .union(Status::OVERRUN_ERROR);
}

impl From<LineErrors> for Status {
    fn from(errors: LineErrors) -> Self {
        let mut status = Status::empty();
        status.set(Status::FRAMING_ERROR, errors.contains(LineErrors::FRAMING));
        status.set(Status::PARITY_ERROR, errors.contains(LineErrors::PARITY));
        status
    }
}

/// Chip-specific rule for turning the internal flags into the byte the CPU
/// sees at the status register.
pub trait StatusPolicy {
    fn compose(flags: Status) -> u8;
}

/// Flags map one-to-one onto the register bits.
#[derive(Copy, Clone, Debug, Default)]
pub struct Generic;

impl StatusPolicy for Generic {
    #[inline]
    fn compose(flags: Status) -> u8 {
        flags.bits()
    }
}

/// 8251-style USART. The DSR bit reports the inverted DSR pin, and boards
/// built around the part normally tie that pin active, so it reads as 1.
#[derive(Copy, Clone, Debug, Default)]
pub struct Intel8251;

impl StatusPolicy for Intel8251 {
    #[inline]
    fn compose(flags: Status) -> u8 {
        (flags | Status::DSR).bits()
    }
}

/// Live status flags. Written by the receive and transmit state machines
/// only; the CPU side reads it through a [`StatusPolicy`].
pub(crate) struct StatusRegister {
    flags: Status,
}

impl StatusRegister {
    pub(crate) fn power_on() -> Self {
        Self {
            flags: Status::POWER_ON,
        }
    }

    #[inline]
    pub(crate) fn flags(&self) -> Status {
        self.flags
    }

    #[inline]
    pub(crate) fn contains(&self, flags: Status) -> bool {
        self.flags.contains(flags)
    }

    #[inline]
    pub(crate) fn insert(&mut self, flags: Status) {
        self.flags.insert(flags);
    }

    #[inline]
    pub(crate) fn remove(&mut self, flags: Status) {
        self.flags.remove(flags);
    }

    #[inline]
    pub(crate) fn set(&mut self, flags: Status, value: bool) {
        self.flags.set(flags, value);
    }

    pub(crate) fn clear_errors(&mut self) {
        self.flags.remove(Status::ERRORS);
    }

    #[inline]
    pub(crate) fn read<P: StatusPolicy>(&self) -> u8 {
        P::compose(self.flags)
    }
}
