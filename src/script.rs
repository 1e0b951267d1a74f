//! The fixed transcript the experiment binaries print.
//!
//! Progress updates go to the diagnostic stream while a rhyme goes to the
//! primary stream, one line of each at a time. A warning interrupts near
//! the middle and an error ends it.

use crate::printer::{Alert, Level, Printer};
use crate::WriteColor;
use std::io::{self, Write};

/// One line of the transcript.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// A status message for the diagnostic stream.
    Status(Level, &'static str),
    /// A line of primary output.
    Output(&'static str),
}

/// The transcript, in order.
pub const SCRIPT: &[Step] = &[
    Step::Status(Level::Info, "Main cannon charge at 0%..."),
    Step::Output("One, two, buckle my shoe;"),
    Step::Status(Level::Info, "Charge at 20%..."),
    Step::Output("Three, four, knock at the door;"),
    Step::Status(Level::Info, "Charge at 40%..."),
    Step::Output("Five, six, pick up sticks;"),
    Step::Status(Level::Info, "Charge at 60%..."),
    Step::Output("Seven, eight, lay them straight;"),
    Step::Status(Level::Info, "Charge at 80%..."),
    Step::Output("Nine, ten, a big fat hen;"),
    Step::Status(Level::Info, "Charge at 100%..."),
    Step::Output("Eleven, twelve, dig and delve;"),
    Step::Status(Level::Info, "Charge at 120%..."),
    Step::Status(Level::Warning, "Captain, this is getting dangerous!"),
    Step::Status(Level::Info, "Charge at 140%..."),
    Step::Output("Thirteen, fourteen, maids a-courting;"),
    Step::Status(Level::Info, "Charge at 160%..."),
    Step::Output("Fifteen, sixteen, maids in the kitchen;"),
    Step::Status(Level::Info, "Charge at 180%..."),
    Step::Output("Seventeen, eighteen, maids in waiting;"),
    Step::Status(Level::Info, "Charge at 200%..."),
    Step::Output("Nineteen, twenty, my plate's empty."),
    Step::Status(Level::Error, "The ship has been sunk."),
];

/// Play the transcript: status lines through `printer`, output lines to
/// `out`. `out` is flushed after every line so the two streams interleave
/// in script order when they share a terminal.
pub fn run<W, A, O>(printer: &mut Printer<W, A>, out: &mut O) -> io::Result<()>
where
    W: WriteColor,
    A: Alert,
    O: Write + ?Sized,
{
    for step in SCRIPT {
        match *step {
            Step::Status(level, message) => printer.print(level, message)?,
            Step::Output(line) => {
                writeln!(out, "{line}")?;
                out.flush()?;
            }
        }
    }
    Ok(())
}

/// The lines `run` writes to the primary stream, joined.
pub fn expected_output() -> String {
    SCRIPT
        .iter()
        .filter_map(|step| match *step {
            Step::Output(line) => Some(format!("{line}\n")),
            Step::Status(..) => None,
        })
        .collect()
}
