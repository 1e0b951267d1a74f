//! Shows how a console attribute set through one standard stream affects
//! the other, with and without redirection.
//!
//! It first describes both streams, then turns stdout blue and
//! writes a line to each stream, then does the same to stderr with red.
//! Every console failure is reported on stderr and the run carries on.

use errcolor::Color;
use errcolor::console::{
    self, Console, CrossStreamReport, Stream, SystemConsole,
};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let mut con = SystemConsole::new();
    let mut report = io::stderr();

    for stream in [Stream::Stdout, Stream::Stderr] {
        let terminal = if con.is_terminal(stream) { "a terminal" } else { "redirected" };
        match con.attribute(stream) {
            Ok(attr) => writeln!(report, "{stream} is {terminal}, attribute {attr}")?,
            Err(err) => writeln!(report, "{stream} is {terminal}, {err}")?,
        }
    }

    for (target, color) in [(Stream::Stdout, Color::Blue), (Stream::Stderr, Color::Red)] {
        let findings = console::cross_stream_check(&mut con, target, color)?;
        describe(&mut report, &findings)?;
    }
    Ok(())
}

fn describe<W: Write>(mut wtr: W, report: &CrossStreamReport) -> io::Result<()> {
    let target = report.target;
    match report.original {
        Ok(attr) => writeln!(wtr, "{target} started as {attr}")?,
        Err(ref err) => writeln!(wtr, "{target} left unchanged: {err}")?,
    }
    match report.changed {
        Some(Ok(())) => writeln!(wtr, "{target} was set to {}", report.color)?,
        Some(Err(ref err)) => writeln!(wtr, "setting {target} failed: {err}")?,
        None => {}
    }
    match report.observed {
        Some(Ok(attr)) => writeln!(wtr, "{target} then reported {attr}")?,
        Some(Err(ref err)) => writeln!(wtr, "re-reading {target} failed: {err}")?,
        None => {}
    }
    match report.restored {
        Some(Ok(())) => writeln!(wtr, "{target} was restored")?,
        Some(Err(ref err)) => writeln!(wtr, "restoring {target} failed: {err}")?,
        None => {}
    }
    Ok(())
}
