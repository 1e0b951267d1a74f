use crate::Color;
use std::io;

/// This trait describes the behavior of writers that support colored output.
///
/// Colors are expressed as in-band escape sequences, never as console
/// state, so a color set on one writer can't leak into another.
pub trait WriteColor: io::Write {
    /// Returns true if and only if the underlying writer emits colors.
    fn supports_color(&self) -> bool;

    /// Set the foreground color of subsequent writes.
    ///
    /// `Color::Default` restores the terminal's default foreground.
    fn set_fg(&mut self, color: Color) -> io::Result<()>;

    /// Set the background color of subsequent writes.
    ///
    /// `Color::Default` restores the terminal's default background.
    fn set_bg(&mut self, color: Color) -> io::Result<()>;

    /// Restore both the default foreground and the default background.
    fn reset(&mut self) -> io::Result<()> {
        self.set_fg(Color::Default)?;
        self.set_bg(Color::Default)
    }
}

impl<T: ?Sized + WriteColor> WriteColor for &mut T {
    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_fg(color)
    }
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_bg(color)
    }
    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}

impl<T: ?Sized + WriteColor> WriteColor for Box<T> {
    fn supports_color(&self) -> bool {
        (**self).supports_color()
    }
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_fg(color)
    }
    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_bg(color)
    }
    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}
