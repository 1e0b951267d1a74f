/*!
This crate colors terminal output with ANSI escape sequences that survive
redirection, and shows the alternative: coloring through a console
attribute.

A console attribute is state held by the console, shared by every stream
attached to it. Set it through stdout and text written to stderr changes
color too. Redirect stdout to a file and the same call does nothing at all.
An escape sequence, on the other hand, is just bytes in the stream. It goes
wherever the stream goes and affects nothing else.

# Organization

The `ansi` module maps each [`Color`] to the fixed escape sequence that sets
it as a foreground or background color. `Color::Default` maps to the reset
sequence of the channel.

The [`WriteColor`] trait extends `io::Write` with methods for setting
colors. [`Ansi`] and [`NoColor`] satisfy it for arbitrary writers, and
[`StandardStream`] for stdout and stderr.

[`Printer`] writes info, warning and error lines to a colored writer, in the
default color, yellow and red respectively, and rings the bell after an
error.

The `console` module holds the attribute-based approach behind the
[`Console`](console::Console) trait, so it can be studied on a real console
and exercised with a fake one.

# Example: a warning on standard error

```rust,no_run
# fn test() -> std::io::Result<()> {
use errcolor::Printer;

let mut printer = Printer::stderr();
printer.info("loading configuration")?;
printer.warning("no configuration found, using defaults")?;
# Ok(()) }
```

The warning is written as `ESC[93m`, the message and a newline, then
`ESC[39m`, whether stderr is a terminal, a pipe or a file.
*/

pub mod ansi;
mod choice;
mod color;
pub mod console;
pub mod printer;
pub mod script;
mod traits;
mod writers;

pub use choice::{ColorChoice, ColorChoiceParseError};
pub use color::{Channel, Color, ParseColorError};
pub use printer::{Alert, Bell, Level, Printer, Silent};
pub use traits::WriteColor;
pub use writers::{Ansi, NoColor, StandardStream};
