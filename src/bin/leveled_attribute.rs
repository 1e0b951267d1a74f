//! Plays the transcript with warnings and errors colored by changing the
//! console attribute of standard error around each line.
//!
//! When stderr is redirected, the lines come out uncolored. When only
//! stdout is redirected, stderr is still colored, because the attribute is
//! read and restored per line instead of being tracked globally.

use anyhow::Context;
use errcolor::console::{AttributePainter, Stream, SystemConsole};
use errcolor::script::{SCRIPT, Step};
use errcolor::{Alert, Bell};

fn main() -> anyhow::Result<()> {
    let mut painter = AttributePainter::new(SystemConsole::new());
    let mut bell = Bell;
    for step in SCRIPT {
        match *step {
            Step::Output(line) => painter.plain(Stream::Stdout, line)?,
            Step::Status(level, message) => {
                match level.color() {
                    Some(color) => {
                        // A plain fallback is still the right transcript, and
                        // a note about it would land in the stderr bytes.
                        // The painter already logs the reason.
                        let _outcome =
                            painter.line(Stream::Stderr, color, message)?;
                    }
                    None => painter.plain(Stream::Stderr, message)?,
                }
                if level == errcolor::Level::Error {
                    bell.alert().context("ringing the bell")?;
                }
            }
        }
    }
    Ok(())
}
