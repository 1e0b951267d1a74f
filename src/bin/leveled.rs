//! Plays the transcript with warnings and errors colored by escape
//! sequences written into standard error.
//!
//! Redirect either stream, or both, and the bytes written to each stay the
//! same.

use errcolor::{Printer, script};
use std::io;

fn main() -> anyhow::Result<()> {
    let mut printer = Printer::stderr();
    let mut stdout = io::stdout().lock();
    script::run(&mut printer, &mut stdout)?;
    Ok(())
}
