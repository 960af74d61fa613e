//! Pixel colors for bi-level e-paper panels
//!
//! The framebuffer stores one bit per pixel with the convention
//! **set bit = black, clear bit = white**. The panel's electrical convention
//! is the complement; the inversion happens when the framebuffer is pushed to
//! the controller (see [`Display::push_framebuffer`](crate::Display::push_framebuffer)),
//! never in the framebuffer itself.
//!
//! | Color | Framebuffer bit | Byte fill |
//! |-------|-----------------|-----------|
//! | Black | 1               | 0xFF      |
//! | White | 0               | 0x00      |
//!
//! ## Example
//!
//! ```
//! use il0373::Color;
//!
//! assert_eq!(Color::Black.fill_byte(), 0xFF);
//! assert_eq!(Color::White.fill_byte(), 0x00);
//! ```

/// Colors supported by a bi-level panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black pixels (bit set in the framebuffer)
    Black,
    /// White pixels (bit clear in the framebuffer)
    #[default]
    White,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU1;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Self::Black,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Self::White,
        }
    }
}

impl Color {
    /// Byte value that paints eight pixels of this color
    ///
    /// ## Example
    ///
    /// ```
    /// use il0373::Color;
    ///
    /// assert_eq!(Color::Black.fill_byte(), 0xFF);
    /// assert_eq!(Color::White.fill_byte(), 0x00);
    /// ```
    pub fn fill_byte(self) -> u8 {
        match self {
            Self::Black => 0xFF,
            Self::White => 0x00,
        }
    }

    /// The other color
    pub fn inverse(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}
