//! Leveled status messages for the diagnostic stream.
//!
//! Status chatter goes to standard error so standard output carries only
//! the program's real output. Warnings and errors are bracketed by a
//! foreground color and the foreground reset, so each call leaves the
//! terminal exactly as it found it.

use crate::{Color, ColorChoice, StandardStream, WriteColor, ansi};
use std::fmt;
use std::io::{self, Write};

/// Severity of a status message.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Level {
    /// Written verbatim.
    Info,
    /// Written in yellow.
    Warning,
    /// Written in red, followed by an audible alert.
    Error,
}

impl Level {
    /// The foreground color used for this level, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Level::Info => None,
            Level::Warning => Some(Color::Yellow),
            Level::Error => Some(Color::Red),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        })
    }
}

/// Something that gets the user's attention after an error.
pub trait Alert {
    /// Trigger the alert.
    fn alert(&mut self) -> io::Result<()>;
}

/// Rings the terminal bell by writing `BEL` to standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bell;

impl Alert for Bell {
    fn alert(&mut self) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(ansi::BEL.as_bytes())?;
        stderr.flush()
    }
}

/// An alert that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Alert for Silent {
    fn alert(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes info, warning and error lines to a colored writer.
#[derive(Debug)]
pub struct Printer<W, A = Bell> {
    wtr: W,
    alert: A,
}

impl Printer<StandardStream, Bell> {
    /// A printer for standard error that always emits colors and rings the
    /// bell on errors.
    ///
    /// Colors are emitted whether or not stderr is a terminal, so the bytes
    /// written are the same under any redirection.
    pub fn stderr() -> Printer<StandardStream, Bell> {
        Printer::new(StandardStream::stderr(ColorChoice::Always), Bell)
    }
}

impl<W: WriteColor, A: Alert> Printer<W, A> {
    /// Create a printer from a writer and an alert.
    pub fn new(wtr: W, alert: A) -> Printer<W, A> {
        Printer { wtr, alert }
    }

    /// Write `message` as a line with the given level.
    pub fn print(&mut self, level: Level, message: &str) -> io::Result<()> {
        match level.color() {
            Some(color) => {
                self.wtr.set_fg(color)?;
                // Reset even if the message failed, so the color can't
                // bleed into whatever is written next.
                let written = writeln!(self.wtr, "{message}");
                let reset = self.wtr.set_fg(Color::Default);
                written?;
                reset?;
            }
            None => writeln!(self.wtr, "{message}")?,
        }
        self.wtr.flush()?;
        if level == Level::Error {
            self.alert.alert()?;
        }
        Ok(())
    }

    /// Write an uncolored status line.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.print(Level::Info, message)
    }

    /// Write a yellow status line.
    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.print(Level::Warning, message)
    }

    /// Write a red status line, then trigger the alert.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.print(Level::Error, message)
    }

    /// Consume the printer, returning the writer and the alert.
    pub fn into_parts(self) -> (W, A) {
        (self.wtr, self.alert)
    }
}
