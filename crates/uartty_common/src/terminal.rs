use std::io;

use crate::LineErrors;

/// Lower layer of a UART: the thing bytes come from and go to.
///
/// Every method must return immediately. The device calls these from inside
/// its tick loop, so a blocking read would stall emulated time.
pub trait Terminal {
    /// Is at least one byte ready to be read?
    fn has_input(&mut self) -> bool;

    /// Take the next available byte, if any.
    fn read_byte(&mut self) -> Option<u8>;

    /// Push one byte to the output sink.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// `true` once the input source has ended and will never produce another
    /// byte (e.g. a redirect file was consumed to the end).
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Framing/parity conditions for the byte most recently returned by
    /// [`Terminal::read_byte`].
    fn line_errors(&mut self) -> LineErrors {
        LineErrors::empty()
    }
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn has_input(&mut self) -> bool {
        (**self).has_input()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }

    fn line_errors(&mut self) -> LineErrors {
        (**self).line_errors()
    }
}
