//! Low-level writing logic for output routing

use super::config::OutputMode;
use std::io::{self, Write};

/// Write display output for the current mode
pub fn write_output(mode: OutputMode, args: std::fmt::Arguments) -> io::Result<()> {
    match mode {
        OutputMode::Normal => {
            let mut stdout = io::stdout().lock();
            stdout.write_fmt(args)?;
            stdout.flush()
        }
        OutputMode::Quiet => Ok(()),
    }
}

/// Write display output with newline for the current mode
pub fn writeln_output(mode: OutputMode, args: std::fmt::Arguments) -> io::Result<()> {
    match mode {
        OutputMode::Normal => {
            let mut stdout = io::stdout().lock();
            stdout.write_fmt(args)?;
            stdout.write_all(b"\n")?;
            stdout.flush()
        }
        OutputMode::Quiet => Ok(()),
    }
}
