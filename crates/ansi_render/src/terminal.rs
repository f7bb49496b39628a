use std::io::{self, IsTerminal};

use log::debug;

use crate::AnsiError;

/// Source of the output column count.
pub trait TerminalSize {
    fn columns(&self) -> Result<u32, AnsiError>;
}

/// Queries the terminal attached to standard output.
///
/// Fails when stdout is redirected instead of falling back to a default width.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutTerminal;

impl TerminalSize for StdoutTerminal {
    fn columns(&self) -> Result<u32, AnsiError> {
        if !io::stdout().is_terminal() {
            return Err(AnsiError::TerminalSize(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard output is not a terminal",
            )));
        }

        let (columns, rows) = crossterm::terminal::size().map_err(AnsiError::TerminalSize)?;
        if columns == 0 {
            return Err(AnsiError::TerminalSize(io::Error::new(
                io::ErrorKind::InvalidData,
                "terminal reported zero columns",
            )));
        }

        debug!("terminal size {}x{}", columns, rows);
        Ok(u32::from(columns))
    }
}

/// Always reports the same width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidth(pub u32);

impl TerminalSize for FixedWidth {
    fn columns(&self) -> Result<u32, AnsiError> {
        Ok(self.0)
    }
}
