//! Attribute-based coloring against a fake console.
//!
//! The fake behaves like a classic console: one attribute shared by every
//! stream that is attached to it, and no attribute at all for a stream that
//! has been redirected.

use errcolor::Color;
use errcolor::console::{
    self, Attribute, AttributePainter, Console, ConsoleError, Outcome, Stream,
};
use std::io;

#[derive(Debug, Default)]
struct FakeConsole {
    attr: Attribute,
    redirected: Vec<Stream>,
    /// Largest number of bytes a single write accepts.
    chunk: Option<usize>,
    /// Number of upcoming writes that fail with `Interrupted`.
    interruptions: usize,
    /// Every write accepts zero bytes.
    stalled: bool,
    writes: Vec<Write>,
    attribute_calls: usize,
}

/// One accepted write, with the attribute in effect for its stream.
#[derive(Debug)]
struct Write {
    stream: Stream,
    bytes: Vec<u8>,
    attr: Option<Attribute>,
}

impl FakeConsole {
    fn redirecting(streams: &[Stream]) -> FakeConsole {
        FakeConsole { redirected: streams.to_vec(), ..FakeConsole::default() }
    }

    fn is_redirected(&self, stream: Stream) -> bool {
        self.redirected.contains(&stream)
    }

    fn text(&self, stream: Stream) -> String {
        let bytes: Vec<u8> = self
            .writes
            .iter()
            .filter(|w| w.stream == stream)
            .flat_map(|w| w.bytes.iter().copied())
            .collect();
        String::from_utf8(bytes).unwrap()
    }

    fn not_a_console(stream: Stream) -> ConsoleError {
        ConsoleError::NotAConsole {
            stream,
            source: io::Error::new(io::ErrorKind::InvalidInput, "invalid handle"),
        }
    }
}

impl Console for FakeConsole {
    fn is_terminal(&self, stream: Stream) -> bool {
        !self.is_redirected(stream)
    }

    fn attribute(&self, stream: Stream) -> Result<Attribute, ConsoleError> {
        if self.is_redirected(stream) {
            return Err(FakeConsole::not_a_console(stream));
        }
        Ok(self.attr)
    }

    fn set_attribute(
        &mut self,
        stream: Stream,
        attr: Attribute,
    ) -> Result<(), ConsoleError> {
        self.attribute_calls += 1;
        if self.is_redirected(stream) {
            return Err(FakeConsole::not_a_console(stream));
        }
        self.attr = attr;
        Ok(())
    }

    fn write_raw(
        &mut self,
        stream: Stream,
        buf: &[u8],
    ) -> Result<usize, ConsoleError> {
        if self.interruptions > 0 {
            self.interruptions -= 1;
            return Err(ConsoleError::Io {
                stream,
                source: io::ErrorKind::Interrupted.into(),
            });
        }
        if self.stalled {
            return Ok(0);
        }
        let n = self.chunk.map_or(buf.len(), |c| c.min(buf.len()));
        let attr = if self.is_redirected(stream) { None } else { Some(self.attr) };
        self.writes.push(Write { stream, bytes: buf[..n].to_vec(), attr });
        Ok(n)
    }
}

// ============================================================================
// Partial writes
// ============================================================================

#[test]
fn write_all_reissues_partial_writes() {
    let mut con = FakeConsole { chunk: Some(3), ..FakeConsole::default() };
    console::write_all(&mut con, Stream::Stdout, b"partial write").unwrap();

    assert_eq!(con.text(Stream::Stdout), "partial write");
    assert_eq!(con.writes.len(), 5);
}

#[test]
fn write_all_retries_interrupted_writes() {
    let mut con = FakeConsole { interruptions: 2, ..FakeConsole::default() };
    console::write_all(&mut con, Stream::Stderr, b"again").unwrap();

    assert_eq!(con.text(Stream::Stderr), "again");
}

#[test]
fn write_all_gives_up_on_zero_length_writes() {
    let mut con = FakeConsole { stalled: true, ..FakeConsole::default() };
    let err = console::write_all(&mut con, Stream::Stdout, b"stuck").unwrap_err();

    assert!(matches!(err, ConsoleError::WriteZero { stream: Stream::Stdout }));
    assert_eq!(err.to_string(), "stdout accepted no bytes");
}

#[test]
fn write_all_with_nothing_to_write_does_not_call_backend() {
    let mut con = FakeConsole { stalled: true, ..FakeConsole::default() };
    console::write_all(&mut con, Stream::Stdout, b"").unwrap();

    assert!(con.writes.is_empty());
}

// ============================================================================
// AttributePainter
// ============================================================================

#[test]
fn painter_colors_line_and_restores_attribute() {
    let original = Attribute::from_colors(Color::Gray, Color::DarkBlue);
    let con = FakeConsole { attr: original, ..FakeConsole::default() };
    let mut painter = AttributePainter::new(con);

    let outcome = painter.line(Stream::Stderr, Color::Yellow, "warning").unwrap();
    assert!(outcome.is_colored());

    let con = painter.into_inner();
    assert_eq!(con.attr, original);
    assert_eq!(con.text(Stream::Stderr), "warning\n");
    for write in &con.writes {
        let attr = write.attr.unwrap();
        assert_eq!(attr.fg(), Color::Yellow);
        assert_eq!(attr.bg(), Color::DarkBlue);
    }
}

#[test]
fn painter_writes_plain_on_redirected_stream() {
    let con = FakeConsole::redirecting(&[Stream::Stderr]);
    let mut painter = AttributePainter::new(con);

    let outcome = painter.line(Stream::Stderr, Color::Red, "error").unwrap();
    match outcome {
        Outcome::Plain(ConsoleError::NotAConsole { stream, .. }) => {
            assert_eq!(stream, Stream::Stderr)
        }
        other => panic!("expected a plain line, got {other:?}"),
    }

    let con = painter.console();
    assert_eq!(con.text(Stream::Stderr), "error\n");
    assert_eq!(con.attribute_calls, 0);
    assert_eq!(con.attr, Attribute::DEFAULT);
}

#[test]
fn painter_on_one_stream_leaves_the_other_alone() {
    // stdout redirected, stderr a console: the stderr line is colored and
    // the shared attribute is back to normal before stdout is written to.
    let con = FakeConsole::redirecting(&[Stream::Stdout]);
    let mut painter = AttributePainter::new(con);

    let outcome = painter.line(Stream::Stderr, Color::Red, "sunk").unwrap();
    assert!(outcome.is_colored());
    painter.plain(Stream::Stdout, "output").unwrap();

    let con = painter.into_inner();
    assert_eq!(con.text(Stream::Stdout), "output\n");
    assert!(con.writes.iter().filter(|w| w.stream == Stream::Stdout).all(|w| w.attr.is_none()));
    assert_eq!(con.attr, Attribute::DEFAULT);
}

#[test]
fn painter_with_default_color_keeps_attribute() {
    let attr = Attribute::from_colors(Color::Green, Color::Black);
    let con = FakeConsole { attr, ..FakeConsole::default() };
    let mut painter = AttributePainter::new(con);

    let outcome =
        painter.line(Stream::Stdout, Color::Default, "as is").unwrap();
    assert!(outcome.is_colored());
    let con = painter.into_inner();
    assert!(con.writes.iter().all(|w| w.attr == Some(attr)));
}

// ============================================================================
// Cross-stream check
// ============================================================================

#[test]
fn check_shows_shared_attribute() {
    let mut con = FakeConsole::default();
    let report = console::cross_stream_check(&mut con, Stream::Stdout, Color::Blue).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.original.as_ref().unwrap(), &Attribute::DEFAULT);
    assert_eq!(report.observed.as_ref().unwrap().as_ref().unwrap().fg(), Color::Blue);

    // The attribute was set through stdout, yet the stderr line is blue.
    let stderr_write = con.writes.iter().find(|w| w.stream == Stream::Stderr).unwrap();
    assert_eq!(stderr_write.attr.map(Attribute::fg), Some(Color::Blue));
    assert_eq!(con.attr, Attribute::DEFAULT);
}

#[test]
fn check_on_redirected_target_changes_nothing() {
    let mut con = FakeConsole::redirecting(&[Stream::Stdout]);
    let report = console::cross_stream_check(&mut con, Stream::Stdout, Color::Blue).unwrap();

    assert!(!report.is_clean());
    assert!(matches!(report.original, Err(ConsoleError::NotAConsole { .. })));
    assert!(report.changed.is_none());
    assert!(report.observed.is_none());
    assert!(report.restored.is_none());
    assert_eq!(con.attribute_calls, 0);
    assert_eq!(
        con.text(Stream::Stdout),
        "This line was written to stdout after stdout was set to blue.\n"
    );
    assert_eq!(
        con.text(Stream::Stderr),
        "This line was written to stderr after stdout was set to blue.\n"
    );
}

#[test]
fn check_propagates_write_failures() {
    let mut con = FakeConsole { stalled: true, ..FakeConsole::default() };
    let err = console::cross_stream_check(&mut con, Stream::Stderr, Color::Red).unwrap_err();

    assert!(matches!(err, ConsoleError::WriteZero { stream: Stream::Stdout }));
    assert_eq!(con.attr, Attribute::DEFAULT);
    assert_eq!(con.attribute_calls, 2);
}
