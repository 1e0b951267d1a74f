//! Attribute-based console coloring behind a small capability trait.
//!
//! Some consoles color text by mutating a character attribute on the
//! console object instead of reading escape sequences from the byte stream.
//! That attribute belongs to the console, not to a stream: changing it
//! through stdout also recolors text written to stderr, and a stream that
//! has been redirected to a file has no attribute at all.
//!
//! The [`Console`] trait exposes the four operations such a strategy needs,
//! so the real backend can be swapped for a fake in tests. Every operation
//! reports failure as a [`ConsoleError`] value; callers log it and carry on.

use crate::Color;
use std::fmt;
use std::io::{self, IsTerminal, Write};

/// One of the two standard output streams of a process.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stream {
    /// Primary output.
    Stdout,
    /// Diagnostic output.
    Stderr,
}

impl Stream {
    /// The other stream.
    pub fn other(self) -> Stream {
        match self {
            Stream::Stdout => Stream::Stderr,
            Stream::Stderr => Stream::Stdout,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        })
    }
}

/// A console character attribute.
///
/// The low nibble is the foreground, the next nibble the background. Within
/// a nibble, bit 0 is blue, bit 1 green, bit 2 red and bit 3 intensity,
/// which makes a nibble equal to the console index of a [`Color`]. Bits above
/// the background nibble are carried through untouched.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Attribute(u16);

impl Attribute {
    /// Gray on black.
    pub const DEFAULT: Attribute = Attribute(0x07);

    /// Bits selecting the foreground color.
    pub const FOREGROUND_MASK: u16 = 0x0F;

    /// Bits selecting the background color.
    pub const BACKGROUND_MASK: u16 = 0xF0;

    /// Wrap raw attribute bits.
    pub fn from_bits(bits: u16) -> Attribute {
        Attribute(bits)
    }

    /// The raw attribute bits.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Build an attribute from a foreground and a background color.
    ///
    /// `Color::Default` takes the corresponding nibble of
    /// [`Attribute::DEFAULT`].
    pub fn from_colors(fg: Color, bg: Color) -> Attribute {
        Attribute::DEFAULT.with_fg(fg).with_bg(bg)
    }

    /// Replace the foreground nibble. `Color::Default` leaves it unchanged.
    #[must_use]
    pub fn with_fg(self, color: Color) -> Attribute {
        match color.index() {
            Some(i) => {
                Attribute((self.0 & !Self::FOREGROUND_MASK) | u16::from(i))
            }
            None => self,
        }
    }

    /// Replace the background nibble. `Color::Default` leaves it unchanged.
    #[must_use]
    pub fn with_bg(self, color: Color) -> Attribute {
        match color.index() {
            Some(i) => {
                Attribute((self.0 & !Self::BACKGROUND_MASK) | (u16::from(i) << 4))
            }
            None => self,
        }
    }

    /// The foreground color.
    pub fn fg(self) -> Color {
        Color::from_index(i32::from(self.0 & Self::FOREGROUND_MASK))
    }

    /// The background color.
    pub fn bg(self) -> Color {
        Color::from_index(i32::from((self.0 & Self::BACKGROUND_MASK) >> 4))
    }
}

impl Default for Attribute {
    fn default() -> Attribute {
        Attribute::DEFAULT
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x} ({} on {})", self.0, self.fg(), self.bg())
    }
}

/// Errors reported by a [`Console`] backend.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{stream} is not attached to a console: {source}")]
    NotAConsole {
        stream: Stream,
        #[source]
        source: io::Error,
    },

    #[error("console attributes are not available for {stream} on this platform")]
    Unsupported { stream: Stream },

    #[error("writing to {stream} failed: {source}")]
    Io {
        stream: Stream,
        #[source]
        source: io::Error,
    },

    #[error("{stream} accepted no bytes")]
    WriteZero { stream: Stream },
}

impl ConsoleError {
    /// The stream the failed operation targeted.
    pub fn stream(&self) -> Stream {
        match *self {
            ConsoleError::NotAConsole { stream, .. }
            | ConsoleError::Unsupported { stream }
            | ConsoleError::Io { stream, .. }
            | ConsoleError::WriteZero { stream } => stream,
        }
    }
}

/// The platform operations attribute-based coloring needs.
pub trait Console {
    /// Returns true if `stream` is an interactive terminal.
    fn is_terminal(&self, stream: Stream) -> bool;

    /// Read the current attribute of `stream`.
    fn attribute(&self, stream: Stream) -> Result<Attribute, ConsoleError>;

    /// Change the attribute of `stream`.
    fn set_attribute(
        &mut self,
        stream: Stream,
        attr: Attribute,
    ) -> Result<(), ConsoleError>;

    /// Write some prefix of `buf` to `stream`, returning how many bytes were
    /// written. The bytes must have reached the stream when this returns.
    fn write_raw(
        &mut self,
        stream: Stream,
        buf: &[u8],
    ) -> Result<usize, ConsoleError>;
}

impl<C: ?Sized + Console> Console for &mut C {
    fn is_terminal(&self, stream: Stream) -> bool {
        (**self).is_terminal(stream)
    }
    fn attribute(&self, stream: Stream) -> Result<Attribute, ConsoleError> {
        (**self).attribute(stream)
    }
    fn set_attribute(
        &mut self,
        stream: Stream,
        attr: Attribute,
    ) -> Result<(), ConsoleError> {
        (**self).set_attribute(stream, attr)
    }
    fn write_raw(
        &mut self,
        stream: Stream,
        buf: &[u8],
    ) -> Result<usize, ConsoleError> {
        (**self).write_raw(stream, buf)
    }
}

/// Write all of `buf` to `stream`, re-issuing partial writes.
///
/// Interrupted writes are retried. A write that accepts zero bytes is an
/// error, since retrying it would loop forever.
pub fn write_all<C: ?Sized + Console>(
    console: &mut C,
    stream: Stream,
    mut buf: &[u8],
) -> Result<(), ConsoleError> {
    while !buf.is_empty() {
        match console.write_raw(stream, buf) {
            Ok(0) => return Err(ConsoleError::WriteZero { stream }),
            Ok(n) => buf = &buf[n.min(buf.len())..],
            Err(ConsoleError::Io { ref source, .. })
                if source.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// The console of the current process.
///
/// On Windows, attributes are read and written through the console screen
/// buffer of each standard handle. Elsewhere there is no such thing and the
/// attribute operations return [`ConsoleError::Unsupported`].
#[derive(Debug, Default)]
pub struct SystemConsole {
    _priv: (),
}

impl SystemConsole {
    /// Create a handle to the process console.
    pub fn new() -> SystemConsole {
        SystemConsole::default()
    }
}

#[cfg(windows)]
fn handle(stream: Stream) -> winapi_util::HandleRef {
    match stream {
        Stream::Stdout => winapi_util::HandleRef::stdout(),
        Stream::Stderr => winapi_util::HandleRef::stderr(),
    }
}

impl Console for SystemConsole {
    fn is_terminal(&self, stream: Stream) -> bool {
        match stream {
            Stream::Stdout => io::stdout().is_terminal(),
            Stream::Stderr => io::stderr().is_terminal(),
        }
    }

    #[cfg(windows)]
    fn attribute(&self, stream: Stream) -> Result<Attribute, ConsoleError> {
        winapi_util::console::screen_buffer_info(handle(stream))
            .map(|info| Attribute::from_bits(info.attributes()))
            .map_err(|source| ConsoleError::NotAConsole { stream, source })
    }

    #[cfg(not(windows))]
    fn attribute(&self, stream: Stream) -> Result<Attribute, ConsoleError> {
        Err(ConsoleError::Unsupported { stream })
    }

    #[cfg(windows)]
    fn set_attribute(
        &mut self,
        stream: Stream,
        attr: Attribute,
    ) -> Result<(), ConsoleError> {
        // A redirected handle has no screen buffer; leave it alone.
        self.attribute(stream)?;
        winapi_util::console::set_text_attributes(handle(stream), attr.bits())
            .map_err(|source| ConsoleError::Io { stream, source })
    }

    #[cfg(not(windows))]
    fn set_attribute(
        &mut self,
        stream: Stream,
        _attr: Attribute,
    ) -> Result<(), ConsoleError> {
        Err(ConsoleError::Unsupported { stream })
    }

    fn write_raw(
        &mut self,
        stream: Stream,
        buf: &[u8],
    ) -> Result<usize, ConsoleError> {
        let result = match stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write(buf).and_then(|n| out.flush().map(|()| n))
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write(buf).and_then(|n| err.flush().map(|()| n))
            }
        };
        result.map_err(|source| ConsoleError::Io { stream, source })
    }
}

/// What happened to a line written by [`AttributePainter::line`].
#[derive(Debug)]
#[must_use]
pub enum Outcome {
    /// The line was written in the requested color and the attribute was
    /// restored afterwards.
    Colored,
    /// The attribute could not be changed, so the line was written without
    /// color. The error explains why.
    Plain(ConsoleError),
}

impl Outcome {
    /// Returns true if the line was colored.
    pub fn is_colored(&self) -> bool {
        matches!(*self, Outcome::Colored)
    }
}

/// Colors lines by changing the console attribute around each write.
///
/// There is no shared "current color": every call saves the attribute it
/// found, changes it, writes, and puts the saved value back.
#[derive(Debug)]
pub struct AttributePainter<C> {
    console: C,
}

impl<C: Console> AttributePainter<C> {
    /// Create a painter on top of a console backend.
    pub fn new(console: C) -> AttributePainter<C> {
        AttributePainter { console }
    }

    /// Write `text` and a newline to `stream` with the given foreground.
    ///
    /// Failing to read or change the attribute is not an error: the line is
    /// written plainly and the failure is returned in [`Outcome::Plain`].
    /// Failing to write the line, or to restore the attribute, is.
    pub fn line(
        &mut self,
        stream: Stream,
        color: Color,
        text: &str,
    ) -> Result<Outcome, ConsoleError> {
        let saved = match self.console.attribute(stream) {
            Ok(attr) => attr,
            Err(err) => {
                tracing::debug!(%stream, error = %err, "writing line without color");
                self.plain(stream, text)?;
                return Ok(Outcome::Plain(err));
            }
        };
        if let Err(err) = self.console.set_attribute(stream, saved.with_fg(color)) {
            tracing::debug!(%stream, error = %err, "writing line without color");
            self.plain(stream, text)?;
            return Ok(Outcome::Plain(err));
        }
        let written = self.plain(stream, text);
        let restored = self.console.set_attribute(stream, saved);
        written?;
        restored?;
        Ok(Outcome::Colored)
    }

    /// Write `text` and a newline to `stream` without touching attributes.
    pub fn plain(&mut self, stream: Stream, text: &str) -> Result<(), ConsoleError> {
        write_all(&mut self.console, stream, text.as_bytes())?;
        write_all(&mut self.console, stream, b"\n")
    }

    /// Return a reference to the console backend.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Consume the painter and return the console backend.
    pub fn into_inner(self) -> C {
        self.console
    }
}

/// Findings of one [`cross_stream_check`] run.
#[derive(Debug)]
pub struct CrossStreamReport {
    /// The stream whose attribute was changed.
    pub target: Stream,
    /// The requested foreground.
    pub color: Color,
    /// The attribute found on `target` before the change.
    pub original: Result<Attribute, ConsoleError>,
    /// The result of changing the attribute, or `None` if the original
    /// could not be read and no change was attempted.
    pub changed: Option<Result<(), ConsoleError>>,
    /// The attribute `target` reported while changed, if readable.
    pub observed: Option<Result<Attribute, ConsoleError>>,
    /// The result of restoring the original, if a change took place.
    pub restored: Option<Result<(), ConsoleError>>,
}

impl CrossStreamReport {
    /// Returns true if every attempted console operation succeeded.
    pub fn is_clean(&self) -> bool {
        self.original.is_ok()
            && matches!(self.changed, Some(Ok(())))
            && matches!(self.observed, Some(Ok(_)))
            && matches!(self.restored, Some(Ok(())))
    }
}

/// Change the foreground attribute of `target`, write a line to each stream,
/// then restore the attribute.
///
/// This shows whether an attribute set through one stream shows up on the
/// other, and what happens when a stream is redirected. Console failures are
/// captured in the report; only failing to write the lines aborts.
pub fn cross_stream_check<C: ?Sized + Console>(
    console: &mut C,
    target: Stream,
    color: Color,
) -> Result<CrossStreamReport, ConsoleError> {
    let original = console.attribute(target);
    let changed = match original {
        Ok(attr) => Some(console.set_attribute(target, attr.with_fg(color))),
        Err(ref err) => {
            tracing::warn!(
                stream = %target,
                error = %err,
                "cannot read console attribute"
            );
            None
        }
    };
    let observed = match changed {
        Some(Ok(())) => Some(console.attribute(target)),
        _ => None,
    };

    let written =
        [Stream::Stdout, Stream::Stderr].into_iter().try_for_each(|stream| {
            let line = format!(
                "This line was written to {stream} after {target} was set \
                 to {color}.\n"
            );
            write_all(&mut *console, stream, line.as_bytes())
        });

    // Restore before reporting a write failure.
    let restored = match (&original, &changed) {
        (Ok(attr), Some(Ok(()))) => Some(console.set_attribute(target, *attr)),
        _ => None,
    };
    written?;
    Ok(CrossStreamReport { target, color, original, changed, observed, restored })
}
