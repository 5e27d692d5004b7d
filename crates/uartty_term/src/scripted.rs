use std::collections::VecDeque;
use std::io;

use uartty_common::{LineErrors, Terminal};

/// In-memory terminal. Input is queued up front (or between ticks), output
/// is collected for inspection.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<(u8, LineErrors)>,
    output: Vec<u8>,
    closed: bool,
    fail_writes: bool,
    last_errors: LineErrors,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that holds `bytes` and ends after them, like a redirect file.
    pub fn from_source(bytes: &[u8]) -> Self {
        let mut term = Self::new();
        term.push_input(bytes);
        term.close_input();
        term
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input
            .extend(bytes.iter().map(|&b| (b, LineErrors::empty())));
    }

    /// Queue a byte that arrives with the given line errors.
    pub fn push_with_errors(&mut self, byte: u8, errors: LineErrors) {
        self.input.push_back((byte, errors));
    }

    /// Mark the end of input. Once the queue drains, the terminal reports
    /// itself exhausted.
    pub fn close_input(&mut self) {
        self.closed = true;
    }

    /// Make every subsequent write fail with `BrokenPipe`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn has_input(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let (byte, errors) = self.input.pop_front()?;
        self.last_errors = errors;
        Some(byte)
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted output closed",
            ));
        }
        self.output.push(byte);
        Ok(())
    }

    fn is_exhausted(&self) -> bool {
        self.closed && self.input.is_empty()
    }

    fn line_errors(&mut self) -> LineErrors {
        std::mem::take(&mut self.last_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ends_after_its_bytes() {
        let mut term = ScriptedTerminal::from_source(b"ab");
        assert!(!term.is_exhausted());
        assert_eq!(term.read_byte(), Some(b'a'));
        assert_eq!(term.read_byte(), Some(b'b'));
        assert!(!term.has_input());
        assert!(term.is_exhausted());
        assert_eq!(term.read_byte(), None);
    }

    #[test]
    fn open_terminal_never_exhausts() {
        let mut term = ScriptedTerminal::new();
        assert!(!term.has_input());
        assert!(!term.is_exhausted());
        term.push_input(b"x");
        assert_eq!(term.read_byte(), Some(b'x'));
        assert!(!term.is_exhausted());
    }

    #[test]
    fn line_errors_belong_to_the_last_byte() {
        let mut term = ScriptedTerminal::new();
        term.push_with_errors(0x55, LineErrors::PARITY);
        term.push_input(&[0x56]);
        assert_eq!(term.read_byte(), Some(0x55));
        assert_eq!(term.line_errors(), LineErrors::PARITY);
        assert_eq!(term.read_byte(), Some(0x56));
        assert_eq!(term.line_errors(), LineErrors::empty());
    }

    #[test]
    fn failing_writes_are_reported() {
        let mut term = ScriptedTerminal::new();
        term.set_fail_writes(true);
        let err = term.write_byte(b'x').unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(term.output().is_empty());
    }
}
