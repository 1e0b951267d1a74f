//! ANSI escape sequences for console colors.
//!
//! Every function here is a pure lookup: a [`Color`] and a [`Channel`] select
//! one fixed `&'static str`. Nothing is built from caller supplied text, so
//! the result can be written to any byte sink. A sink that does not
//! understand the sequences simply shows or drops them; the color intent
//! never depends on whether the sink is a real console.

use crate::{Channel, Color};
use std::fmt;
use std::io;

/// Restores the terminal's default foreground color.
pub const FG_RESET: &str = "\x1B[39m";

/// Restores the terminal's default background color.
pub const BG_RESET: &str = "\x1B[49m";

/// The bell control character.
pub const BEL: &str = "\x07";

/// Returns the sequence that switches the foreground to `color`.
///
/// `Color::Default` yields [`FG_RESET`].
pub fn fg_sequence(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1B[30m",
        Color::DarkBlue => "\x1B[34m",
        Color::DarkGreen => "\x1B[32m",
        Color::DarkCyan => "\x1B[36m",
        Color::DarkRed => "\x1B[31m",
        Color::DarkMagenta => "\x1B[35m",
        Color::DarkYellow => "\x1B[33m",
        Color::Gray => "\x1B[37m",
        Color::DarkGray => "\x1B[90m",
        Color::Blue => "\x1B[94m",
        Color::Green => "\x1B[92m",
        Color::Cyan => "\x1B[96m",
        Color::Red => "\x1B[91m",
        Color::Magenta => "\x1B[95m",
        Color::Yellow => "\x1B[93m",
        Color::White => "\x1B[97m",
        Color::Default => FG_RESET,
    }
}

/// Returns the sequence that switches the background to `color`.
///
/// `Color::Default` yields [`BG_RESET`].
pub fn bg_sequence(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1B[40m",
        Color::DarkBlue => "\x1B[44m",
        Color::DarkGreen => "\x1B[42m",
        Color::DarkCyan => "\x1B[46m",
        Color::DarkRed => "\x1B[41m",
        Color::DarkMagenta => "\x1B[45m",
        Color::DarkYellow => "\x1B[43m",
        Color::Gray => "\x1B[47m",
        Color::DarkGray => "\x1B[100m",
        Color::Blue => "\x1B[104m",
        Color::Green => "\x1B[102m",
        Color::Cyan => "\x1B[106m",
        Color::Red => "\x1B[101m",
        Color::Magenta => "\x1B[105m",
        Color::Yellow => "\x1B[103m",
        Color::White => "\x1B[107m",
        Color::Default => BG_RESET,
    }
}

/// Returns the sequence for `color` on the given channel.
pub fn sequence(color: Color, channel: Channel) -> &'static str {
    match channel {
        Channel::Foreground => fg_sequence(color),
        Channel::Background => bg_sequence(color),
    }
}

/// Writes the sequence for `color` on the given channel.
///
/// The caller must provide their own `io::Write` to write to. Callers should
/// prefer higher level types in this crate, such as `StandardStream` or
/// `Printer`.
pub fn write_sequence<W: io::Write>(
    mut wtr: W,
    color: Color,
    channel: Channel,
) -> io::Result<()> {
    wtr.write_all(sequence(color, channel).as_bytes())
}

/// Bracket `text` with a foreground color and the foreground reset.
///
/// The returned value renders as `fg_sequence(fg) + text + FG_RESET`.
pub fn paint(text: &str, fg: Color) -> Painted<'_> {
    Painted { text, fg }
}

/// A piece of text that renders wrapped in a foreground color.
///
/// This is created by the `paint` function.
#[derive(Clone, Copy, Debug)]
pub struct Painted<'a> {
    text: &'a str,
    fg: Color,
}

impl fmt::Display for Painted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(fg_sequence(self.fg))?;
        f.write_str(self.text)?;
        f.write_str(FG_RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_color() -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().chain(std::iter::once(Color::Default))
    }

    #[test]
    fn every_sequence_is_a_well_formed_sgr() {
        for color in every_color() {
            for seq in [fg_sequence(color), bg_sequence(color)] {
                assert!(seq.starts_with("\x1B["), "{color}: {seq:?}");
                assert!(seq.ends_with('m'), "{color}: {seq:?}");
                let code = &seq[2..seq.len() - 1];
                assert!(
                    code.parse::<u8>().is_ok(),
                    "{color}: {seq:?} should carry a single numeric code"
                );
            }
        }
    }

    #[test]
    fn lookups_are_deterministic() {
        for color in every_color() {
            assert_eq!(fg_sequence(color), fg_sequence(color));
            assert_eq!(bg_sequence(color), bg_sequence(color));
        }
    }

    #[test]
    fn background_codes_are_foreground_codes_plus_ten() {
        for color in every_color() {
            let code = |s: &str| s[2..s.len() - 1].parse::<u16>().unwrap();
            assert_eq!(
                code(bg_sequence(color)),
                code(fg_sequence(color)) + 10,
                "{color}"
            );
        }
    }

    #[test]
    fn real_colors_are_distinct_per_channel() {
        let mut fg: Vec<_> = Color::ALL.iter().map(|&c| fg_sequence(c)).collect();
        fg.sort_unstable();
        fg.dedup();
        assert_eq!(fg.len(), 16);
        assert!(!fg.contains(&FG_RESET));

        let mut bg: Vec<_> = Color::ALL.iter().map(|&c| bg_sequence(c)).collect();
        bg.sort_unstable();
        bg.dedup();
        assert_eq!(bg.len(), 16);
        assert!(!bg.contains(&BG_RESET));
    }

    #[test]
    fn sentinel_maps_to_reset() {
        assert_eq!(fg_sequence(Color::Default), FG_RESET);
        assert_eq!(bg_sequence(Color::Default), BG_RESET);
        assert_eq!(fg_sequence(Color::from_index(-1)), "\x1B[39m");
        assert_eq!(bg_sequence(Color::from_index(99)), "\x1B[49m");
    }

    #[test]
    fn sequence_dispatches_on_channel() {
        assert_eq!(sequence(Color::Red, Channel::Foreground), "\x1B[91m");
        assert_eq!(sequence(Color::Red, Channel::Background), "\x1B[101m");
        assert_eq!(sequence(Color::DarkRed, Channel::Foreground), "\x1B[31m");
    }

    #[test]
    fn yellow_warning_is_exact() {
        let mut out = Vec::new();
        write_sequence(&mut out, Color::Yellow, Channel::Foreground).unwrap();
        out.extend_from_slice(b"warning");
        write_sequence(&mut out, Color::Default, Channel::Foreground).unwrap();
        assert_eq!(out, b"\x1B[93mwarning\x1B[39m");
    }

    #[test]
    fn paint_leaves_no_residual_styling() {
        for color in every_color() {
            let painted = paint("text", color).to_string();
            assert!(painted.ends_with(FG_RESET));
            let stripped = painted
                .strip_prefix(fg_sequence(color))
                .and_then(|rest| rest.strip_suffix(FG_RESET));
            assert_eq!(stripped, Some("text"));
        }
        assert_eq!(paint("", Color::Blue).to_string(), "\x1B[94m\x1B[39m");
    }
}
