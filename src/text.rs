//! Text sources
//!
//! A [`TextSource`] hands the renderer one [`Glyph`] per character and says
//! how the glyphs should be spaced. Two sources ship with the crate:
//!
//! - [`BmfFont`](crate::bmf::BmfFont) - proportional BMF v3 bitmap fonts
//! - [`AsciiFont`](crate::ascii::AsciiFont) - the built-in 6x8 ASCII cell font

use crate::glyph::Glyph;

/// How consecutive glyphs are advanced along a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spacing {
    /// Advance by the glyph's inked width plus one pixel
    ///
    /// Leading blank columns are trimmed; a glyph with nothing set (a space)
    /// advances by half its cell.
    Tight,
    /// Draw the whole cell and advance by its full width
    Fixed,
}

/// Something that can produce glyphs for characters
pub trait TextSource {
    /// Error type of the underlying storage
    type Error: core::fmt::Debug;

    /// Spacing rule for glyphs from this source
    fn spacing(&self) -> Spacing;

    /// Produce the glyph for `ch`
    ///
    /// A source that cannot represent `ch` returns a placeholder (or a blank
    /// cell) rather than an error; errors are reserved for storage failures.
    fn glyph(&mut self, ch: char) -> Result<Glyph, Self::Error>;
}

impl<T: TextSource + ?Sized> TextSource for &mut T {
    type Error = T::Error;

    fn spacing(&self) -> Spacing {
        (**self).spacing()
    }

    fn glyph(&mut self, ch: char) -> Result<Glyph, Self::Error> {
        (**self).glyph(ch)
    }
}
