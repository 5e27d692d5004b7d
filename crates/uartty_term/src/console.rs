use std::collections::VecDeque;
use std::io::{self, Read, Stdout, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use uartty_common::Terminal;

/// Interactive console: stdin in, stdout out.
///
/// Standard input only offers blocking reads, so a background thread does
/// the reading and hands bytes over a channel. The UART side only ever calls
/// `try_recv`.
pub struct ConsoleTerminal {
    rx: Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
    closed: bool,
    stdout: Stdout,
}

impl ConsoleTerminal {
    pub fn spawn() -> io::Result<Self> {
        Self::from_reader(io::stdin())
    }

    /// Read input from `reader` on a background thread instead of stdin.
    pub fn from_reader<R: Read + Send + 'static>(mut reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("uartty-console-input".to_string())
            .spawn(move || {
                let mut buf = [0u8; 256];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => {
                            if tx.send(buf[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => {
                            log::warn!("console input read failed: {}", err);
                            break;
                        }
                    }
                }
                log::debug!("console input closed");
            })?;
        Ok(Self {
            rx,
            pending: VecDeque::new(),
            closed: false,
            stdout: io::stdout(),
        })
    }

    fn drain_channel(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => self.pending.extend(chunk),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
    }
}

impl Terminal for ConsoleTerminal {
    fn has_input(&mut self) -> bool {
        if self.pending.is_empty() && !self.closed {
            self.drain_channel();
        }
        !self.pending.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(&[byte])?;
        out.flush()
    }

    /// Goes true after stdin hits end of file (e.g. Ctrl-D) and every byte
    /// read before that has been consumed.
    fn is_exhausted(&self) -> bool {
        self.closed && self.pending.is_empty()
    }
}
