use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use uartty_common::Terminal;

/// Replays a fixed byte source (typically a text file) as receive input and
/// writes transmitted bytes to `W`.
///
/// The whole source is loaded at startup so polling never touches the
/// filesystem.
pub struct RedirectTerminal<W: Write> {
    input: VecDeque<u8>,
    output: W,
}

impl<W: Write> RedirectTerminal<W> {
    pub fn open(path: impl AsRef<Path>, output: W) -> io::Result<Self> {
        let data = fs::read(path.as_ref())?;
        log::debug!(
            "Loaded {} bytes of redirected input from '{}'",
            data.len(),
            path.as_ref().display()
        );
        Ok(Self::from_bytes(data, output))
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>, output: W) -> Self {
        Self {
            input: data.into().into(),
            output,
        }
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<W: Write> Terminal for RedirectTerminal<W> {
    fn has_input(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])?;
        self.output.flush()
    }

    fn is_exhausted(&self) -> bool {
        self.input.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_bytes_then_exhausts() {
        let mut term = RedirectTerminal::from_bytes(b"10 PRINT".to_vec(), Vec::new());
        let mut read = Vec::new();
        while term.has_input() {
            read.extend(term.read_byte());
        }
        assert_eq!(read, b"10 PRINT");
        assert!(term.is_exhausted());
    }

    #[test]
    fn writes_reach_the_sink() {
        let mut term = RedirectTerminal::from_bytes(Vec::new(), Vec::new());
        term.write_byte(b'O').unwrap();
        term.write_byte(b'K').unwrap();
        assert_eq!(term.output().as_slice(), b"OK");
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!(
            "uartty_redirect_{}.bas",
            std::process::id()
        ));
        fs::write(&path, b"RUN\r").unwrap();
        let term = RedirectTerminal::open(&path, Vec::new());
        fs::remove_file(&path).unwrap();
        assert_eq!(term.unwrap().remaining(), 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("uartty_redirect_does_not_exist.bas");
        let err = RedirectTerminal::open(&path, Vec::new()).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
