use crate::{Channel, Color, ColorChoice, WriteColor, ansi};
use std::io::{self, Write};

#[cfg(windows)]
use winapi_util::console as wincon;

/// `std::io` implements `Stdout` and `Stderr` (and their `Lock` variants) as
/// separate types, which makes it difficult to abstract over them. We use
/// some simple internal enum types to work around this.
#[derive(Clone, Copy, Debug)]
enum StandardStreamType {
    Stdout,
    Stderr,
}

#[derive(Debug)]
enum IoStandardStream {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
}

impl IoStandardStream {
    fn new(sty: StandardStreamType) -> IoStandardStream {
        match sty {
            StandardStreamType::Stdout => IoStandardStream::Stdout(io::stdout()),
            StandardStreamType::Stderr => IoStandardStream::Stderr(io::stderr()),
        }
    }
}

impl io::Write for IoStandardStream {
    #[inline(always)]
    fn write(&mut self, b: &[u8]) -> io::Result<usize> {
        match *self {
            IoStandardStream::Stdout(ref mut s) => s.write(b),
            IoStandardStream::Stderr(ref mut s) => s.write(b),
        }
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        match *self {
            IoStandardStream::Stdout(ref mut s) => s.flush(),
            IoStandardStream::Stderr(ref mut s) => s.flush(),
        }
    }
}

/// A standard stream for writing to stdout or stderr.
///
/// This satisfies both `io::Write` and `WriteColor`. Colors are written as
/// escape sequences into the stream itself, so they follow the bytes through
/// any redirection.
#[derive(Debug)]
pub struct StandardStream {
    wtr: WriterInner<IoStandardStream>,
}

/// WriterInner is a (limited) generic representation of a writer.
#[derive(Debug)]
enum WriterInner<W> {
    NoColor(NoColor<W>),
    Ansi(Ansi<W>),
}

impl StandardStream {
    /// Create a new `StandardStream` with the given color preferences that
    /// writes to standard output.
    pub fn stdout(choice: ColorChoice) -> StandardStream {
        StandardStream { wtr: create(StandardStreamType::Stdout, choice) }
    }

    /// Create a new `StandardStream` with the given color preferences that
    /// writes to standard error.
    pub fn stderr(choice: ColorChoice) -> StandardStream {
        StandardStream { wtr: create(StandardStreamType::Stderr, choice) }
    }
}

#[cfg(not(windows))]
fn create(
    sty: StandardStreamType,
    choice: ColorChoice,
) -> WriterInner<IoStandardStream> {
    if choice.should_attempt_color() {
        WriterInner::Ansi(Ansi(IoStandardStream::new(sty)))
    } else {
        WriterInner::NoColor(NoColor(IoStandardStream::new(sty)))
    }
}

#[cfg(windows)]
fn create(
    sty: StandardStreamType,
    choice: ColorChoice,
) -> WriterInner<IoStandardStream> {
    let enabled_virtual = choice.should_attempt_color() && {
        let con_res = match sty {
            StandardStreamType::Stdout => wincon::Console::stdout(),
            StandardStreamType::Stderr => wincon::Console::stderr(),
        };
        match con_res {
            Ok(mut con) => match con.set_virtual_terminal_processing(true) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!(
                        stream = ?sty,
                        error = %err,
                        "could not enable virtual terminal processing"
                    );
                    false
                }
            },
            // Redirected: no console to configure.
            Err(_) => false,
        }
    };
    // `Always` keeps emitting escapes even without a console, so the bytes
    // stay the same whatever the destination.
    let use_ansi = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            choice.should_attempt_color()
                && (enabled_virtual || term_forces_ansi())
        }
    };
    if use_ansi {
        WriterInner::Ansi(Ansi(IoStandardStream::new(sty)))
    } else {
        WriterInner::NoColor(NoColor(IoStandardStream::new(sty)))
    }
}

/// A `TERM` other than `dumb` or `cygwin` on Windows means an emulator that
/// understands escapes, e.g. mintty or a remote session.
#[cfg(windows)]
fn term_forces_ansi() -> bool {
    match std::env::var("TERM") {
        Ok(term) => term != "dumb" && term != "cygwin",
        Err(_) => false,
    }
}

impl io::Write for StandardStream {
    #[inline]
    fn write(&mut self, b: &[u8]) -> io::Result<usize> {
        self.wtr.write(b)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.wtr.flush()
    }
}

impl WriteColor for StandardStream {
    #[inline]
    fn supports_color(&self) -> bool {
        self.wtr.supports_color()
    }

    #[inline]
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        self.wtr.set_fg(color)
    }

    #[inline]
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        self.wtr.set_bg(color)
    }
}

impl<W: io::Write> io::Write for WriterInner<W> {
    #[inline(always)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match *self {
            WriterInner::NoColor(ref mut wtr) => wtr.write(buf),
            WriterInner::Ansi(ref mut wtr) => wtr.write(buf),
        }
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        match *self {
            WriterInner::NoColor(ref mut wtr) => wtr.flush(),
            WriterInner::Ansi(ref mut wtr) => wtr.flush(),
        }
    }
}

impl<W: io::Write> WriteColor for WriterInner<W> {
    fn supports_color(&self) -> bool {
        match *self {
            WriterInner::NoColor(_) => false,
            WriterInner::Ansi(_) => true,
        }
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        match *self {
            WriterInner::NoColor(ref mut wtr) => wtr.set_fg(color),
            WriterInner::Ansi(ref mut wtr) => wtr.set_fg(color),
        }
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        match *self {
            WriterInner::NoColor(ref mut wtr) => wtr.set_bg(color),
            WriterInner::Ansi(ref mut wtr) => wtr.set_bg(color),
        }
    }
}

/// Satisfies `WriteColor` but ignores all color options.
#[derive(Clone, Debug)]
pub struct NoColor<W>(pub W);

impl<W: Write> NoColor<W> {
    /// Create a new writer that satisfies `WriteColor` but drops all color
    /// information.
    pub fn new(wtr: W) -> NoColor<W> {
        NoColor(wtr)
    }

    /// Consume this `NoColor` value and return the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Return a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.0
    }
}

impl<W: io::Write> io::Write for NoColor<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: io::Write> WriteColor for NoColor<W> {
    #[inline]
    fn supports_color(&self) -> bool {
        false
    }

    #[inline]
    fn set_fg(&mut self, _: Color) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn set_bg(&mut self, _: Color) -> io::Result<()> {
        Ok(())
    }
}

/// Satisfies `WriteColor` using standard ANSI escape sequences.
#[derive(Clone, Debug)]
pub struct Ansi<W>(pub W);

impl<W: Write> Ansi<W> {
    /// Create a new writer that satisfies `WriteColor` using standard ANSI
    /// escape sequences.
    pub fn new(wtr: W) -> Ansi<W> {
        Ansi(wtr)
    }

    /// Consume this `Ansi` value and return the inner writer.
    pub fn into_inner(self) -> W {
        self.0
    }

    /// Return a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.0
    }
}

impl<W: io::Write> io::Write for Ansi<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: io::Write> WriteColor for Ansi<W> {
    #[inline]
    fn supports_color(&self) -> bool {
        true
    }

    #[inline]
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        ansi::write_sequence(&mut self.0, color, Channel::Foreground)
    }

    #[inline]
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        ansi::write_sequence(&mut self.0, color, Channel::Background)
    }
}

impl WriteColor for io::Sink {
    fn supports_color(&self) -> bool {
        false
    }

    fn set_fg(&mut self, _: Color) -> io::Result<()> {
        Ok(())
    }

    fn set_bg(&mut self, _: Color) -> io::Result<()> {
        Ok(())
    }
}
