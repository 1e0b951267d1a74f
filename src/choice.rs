use std::env;
use std::ffi::OsString;
use std::str::FromStr;

/// ColorChoice represents when a writer should emit color escape sequences.
///
/// The `Default` implementation for this type will select `Auto`, which tries
/// to do the right thing based on the current environment.
///
/// Note that none of the choices look at whether the destination is a
/// terminal. Escape sequences are written the same way to a console, a pipe
/// or a file. Callers that want byte-identical output regardless of
/// redirection should use `Always`.
///
/// The `FromStr` implementation for this type converts a lowercase kebab-case
/// string of the variant name to the corresponding variant. Any other string
/// results in an error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorChoice {
    /// Always emit escape sequences.
    Always,
    /// Emit escape sequences unless the environment asks not to: `TERM=dumb`,
    /// `NO_COLOR` set, or (outside Windows) `TERM` unset.
    #[default]
    Auto,
    /// Never emit escape sequences.
    Never,
}

impl FromStr for ColorChoice {
    type Err = ColorChoiceParseError;

    fn from_str(s: &str) -> Result<ColorChoice, ColorChoiceParseError> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            "auto" => Ok(ColorChoice::Auto),
            unknown => Err(ColorChoiceParseError {
                unknown_choice: unknown.to_string(),
            }),
        }
    }
}

impl ColorChoice {
    /// Returns true if we should attempt to write colored output.
    pub fn should_attempt_color(&self) -> bool {
        match *self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => env_allows_color(
                env::var_os("TERM"),
                env::var_os("NO_COLOR"),
            ),
        }
    }
}

#[cfg(not(windows))]
fn env_allows_color(term: Option<OsString>, no_color: Option<OsString>) -> bool {
    match term {
        // If TERM isn't set, then we are in a weird environment that
        // probably doesn't support colors.
        None => return false,
        Some(k) => {
            if k == "dumb" {
                return false;
            }
        }
    }
    no_color.is_none()
}

#[cfg(windows)]
fn env_allows_color(term: Option<OsString>, no_color: Option<OsString>) -> bool {
    // On Windows, TERM is rarely set, so its absence says nothing.
    if let Some(k) = term {
        if k == "dumb" {
            return false;
        }
    }
    no_color.is_none()
}

/// An error that occurs when parsing a `ColorChoice` fails.
#[derive(Clone, Debug, thiserror::Error)]
#[error(
    "unrecognized color choice '{unknown_choice}': valid choices are: \
     always, never, auto"
)]
pub struct ColorChoiceParseError {
    unknown_choice: String,
}

impl ColorChoiceParseError {
    /// Return the string that couldn't be parsed as a valid color choice.
    pub fn invalid_choice(&self) -> &str {
        &self.unknown_choice
    }
}
