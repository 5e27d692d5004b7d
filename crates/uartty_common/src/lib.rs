pub mod terminal;

pub use terminal::Terminal;

use bitflags::bitflags;

/// Emulated time, counted in half-bit-cell ticks since the last device reset.
pub type Tick = i64;

bitflags! {
    /// Per-byte line conditions a backend may report alongside a received byte.
    ///
    /// Plain byte streams (consoles, files) have no notion of framing or
    /// parity, so most backends never report anything here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LineErrors: u8 {
        const FRAMING = 1 << 0;
        const PARITY = 1 << 1;
    }
}
