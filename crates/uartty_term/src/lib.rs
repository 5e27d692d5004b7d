//! Terminal backends for the UART: where received bytes come from and where
//! transmitted bytes go.
mod console;
mod redirect;
mod scripted;

pub use console::ConsoleTerminal;
pub use redirect::RedirectTerminal;
pub use scripted::ScriptedTerminal;

use std::io::{self, Stdout};
use std::path::PathBuf;

use uartty_common::{LineErrors, Terminal};

/// Where the receive side reads from. Output always goes to stdout.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Interactive standard input.
    #[default]
    Console,
    /// Replay the contents of a file, then go quiet.
    Redirect(PathBuf),
}

/// The backend selected at startup from an [`InputSource`].
pub enum HostTerminal {
    Console(ConsoleTerminal),
    Redirect(RedirectTerminal<Stdout>),
}

impl HostTerminal {
    pub fn open(source: &InputSource) -> io::Result<Self> {
        match source {
            InputSource::Console => {
                log::info!("Reading input from the console");
                Ok(HostTerminal::Console(ConsoleTerminal::spawn()?))
            }
            InputSource::Redirect(path) => {
                log::info!("Reading input from '{}'", path.display());
                Ok(HostTerminal::Redirect(RedirectTerminal::open(
                    path,
                    io::stdout(),
                )?))
            }
        }
    }

    fn inner(&mut self) -> &mut dyn Terminal {
        match self {
            HostTerminal::Console(console) => console,
            HostTerminal::Redirect(redirect) => redirect,
        }
    }
}

impl Terminal for HostTerminal {
    fn has_input(&mut self) -> bool {
        self.inner().has_input()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.inner().read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.inner().write_byte(byte)
    }

    fn is_exhausted(&self) -> bool {
        match self {
            HostTerminal::Console(console) => console.is_exhausted(),
            HostTerminal::Redirect(redirect) => redirect.is_exhausted(),
        }
    }

    fn line_errors(&mut self) -> LineErrors {
        self.inner().line_errors()
    }
}
