use std::fmt;
use std::str::FromStr;

/// The closed set of colors a console can display, plus `Default`.
///
/// The sixteen real colors follow the classic console palette order, so a
/// color's position in [`Color::ALL`] is also its console index and its
/// Win32 attribute nibble. `Default` is the "no color" sentinel: every
/// encoder maps it to the reset sequence of the requested channel.
///
/// This type has a `FromStr` impl that parses names case insensitively.
/// The dark variants may be written as `dark-blue`, `dark_blue` or
/// `darkblue`. The names `default`, `reset` and `none` all produce
/// `Color::Default`.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
    #[default]
    Default,
}

impl Color {
    /// Every real color, in console index order. `Default` is excluded.
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkCyan,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::DarkYellow,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Cyan,
        Color::Red,
        Color::Magenta,
        Color::Yellow,
        Color::White,
    ];

    /// Convert a numeric console color index into a color.
    ///
    /// Indices `0..=15` select a real color. Anything else, including the
    /// conventional `-1` "no color" marker, yields `Color::Default`.
    pub fn from_index(index: i32) -> Color {
        usize::try_from(index)
            .ok()
            .and_then(|i| Color::ALL.get(i).copied())
            .unwrap_or(Color::Default)
    }

    /// Return this color's console index, or `None` for `Default`.
    pub fn index(self) -> Option<u8> {
        Color::ALL.iter().position(|&c| c == self).map(|i| i as u8)
    }

    fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::DarkBlue => "dark-blue",
            Color::DarkGreen => "dark-green",
            Color::DarkCyan => "dark-cyan",
            Color::DarkRed => "dark-red",
            Color::DarkMagenta => "dark-magenta",
            Color::DarkYellow => "dark-yellow",
            Color::Gray => "gray",
            Color::DarkGray => "dark-gray",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Red => "red",
            Color::Magenta => "magenta",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Default => "default",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error from parsing an unrecognized color name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error(
    "unrecognized color name '{given}'. Choose from: black, dark-blue, \
     dark-green, dark-cyan, dark-red, dark-magenta, dark-yellow, gray, \
     dark-gray, blue, green, cyan, red, magenta, yellow, white, default"
)]
pub struct ParseColorError {
    given: String,
}

impl ParseColorError {
    /// Return the string that couldn't be parsed as a valid color.
    pub fn invalid(&self) -> &str {
        &self.given
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        let name = s.trim().to_lowercase();
        let color = match name.strip_prefix("dark") {
            Some(rest) => {
                let rest = rest.strip_prefix(['-', '_']).unwrap_or(rest);
                match rest {
                    "blue" => Color::DarkBlue,
                    "green" => Color::DarkGreen,
                    "cyan" => Color::DarkCyan,
                    "red" => Color::DarkRed,
                    "magenta" => Color::DarkMagenta,
                    "yellow" => Color::DarkYellow,
                    "gray" | "grey" => Color::DarkGray,
                    _ => return Err(ParseColorError { given: s.to_string() }),
                }
            }
            None => match name.as_str() {
                "black" => Color::Black,
                "gray" | "grey" => Color::Gray,
                "blue" => Color::Blue,
                "green" => Color::Green,
                "cyan" => Color::Cyan,
                "red" => Color::Red,
                "magenta" => Color::Magenta,
                "yellow" => Color::Yellow,
                "white" => Color::White,
                "default" | "reset" | "none" => Color::Default,
                _ => return Err(ParseColorError { given: s.to_string() }),
            },
        };
        Ok(color)
    }
}

/// Which half of a character cell a sequence or attribute applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channel {
    /// The glyph color.
    Foreground,
    /// The cell color behind the glyph.
    Background,
}
