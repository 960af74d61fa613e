//! Graphics support via embedded-graphics
//!
//! [`Canvas`] implements the [`DrawTarget`] trait from the embedded-graphics
//! ecosystem, so its primitives, fonts and image formats can draw into the
//! same framebuffer as the built-in rasterizer. Coordinates are logical
//! (rotated), and off-canvas pixels are dropped.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     mono_font::{MonoTextStyle, ascii::FONT_6X10},
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use il0373::ascii::AsciiFont;
//! use il0373::canvas::Canvas;
//! use il0373::framebuffer::Framebuffer;
//! use il0373::{Color, Dimensions, Rotation};
//!
//! let Ok(dims) = Dimensions::new(152, 152) else {
//!     return;
//! };
//! let Ok(framebuffer) = Framebuffer::new([0u8; 2888], dims, Rotation::Rotate90) else {
//!     return;
//! };
//! let mut canvas: Canvas<_, AsciiFont> = Canvas::new(framebuffer, None);
//! canvas.clear(Color::White);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Black))
//!     .draw(&mut canvas);
//!
//! let _ = Circle::new(Point::new(80, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::Black, 2))
//!     .draw(&mut canvas);
//!
//! let _ = Text::new(
//!     "Hello, E-Paper!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Color::Black),
//! )
//! .draw(&mut canvas);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::text::TextSource;

impl<B, T> DrawTarget for Canvas<B, T>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    T: TextSource,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_point(x, y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer_mut().clear(color);
        Ok(())
    }
}

impl<B, T> OriginDimensions for Canvas<B, T>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    T: TextSource,
{
    fn size(&self) -> Size {
        let (width, height) = Canvas::size(self);
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::AsciiFont;
    use crate::config::{Dimensions, Rotation};
    use crate::framebuffer::Framebuffer;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    fn canvas(width: u16, height: u16, rotation: Rotation) -> Canvas<Vec<u8>, AsciiFont> {
        let dims = Dimensions::new(width, height).unwrap();
        let fb = Framebuffer::new(vec![0u8; dims.buffer_size()], dims, rotation).unwrap();
        let mut canvas = Canvas::new(fb, None);
        Canvas::clear(&mut canvas, Color::White);
        canvas
    }

    #[test]
    fn test_size_is_logical() {
        let c = canvas(40, 16, Rotation::Rotate90);
        assert_eq!(OriginDimensions::size(&c), Size::new(16, 40));
        let c = canvas(40, 16, Rotation::Rotate180);
        assert_eq!(OriginDimensions::size(&c), Size::new(40, 16));
    }

    #[test]
    fn test_filled_rectangle() {
        let mut c = canvas(32, 32, Rotation::Rotate0);
        Rectangle::new(Point::new(4, 4), Size::new(8, 2))
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(&mut c)
            .unwrap();
        let fb = c.framebuffer();
        // row 4 covers columns 4..12, i.e. the low nibble of byte 0 and the high one of byte 1
        assert_eq!(fb.as_bytes()[4 * 4], 0x0F);
        assert_eq!(fb.as_bytes()[4 * 4 + 1], 0xF0);
        assert_eq!(fb.pixel(4, 6), Some(Color::White));
    }

    #[test]
    fn test_matches_native_line() {
        let mut native = canvas(24, 24, Rotation::Rotate270);
        let mut graphics = canvas(24, 24, Rotation::Rotate270);
        native.draw_line(0, 5, 23, 5, Color::Black);
        Line::new(Point::new(0, 5), Point::new(23, 5))
            .into_styled(PrimitiveStyle::with_stroke(Color::Black, 1))
            .draw(&mut graphics)
            .unwrap();
        assert_eq!(
            native.framebuffer().as_bytes(),
            graphics.framebuffer().as_bytes()
        );
    }

    #[test]
    fn test_off_canvas_pixels_dropped() {
        let mut c = canvas(16, 16, Rotation::Rotate0);
        c.draw_iter([
            Pixel(Point::new(-1, 0), Color::Black),
            Pixel(Point::new(0, 16), Color::Black),
            Pixel(Point::new(15, 15), Color::Black),
        ])
        .unwrap();
        let set: u32 = c.framebuffer().as_bytes().iter().map(|b| b.count_ones()).sum();
        assert_eq!(set, 1);
    }

    #[test]
    fn test_clear_and_binary_color() {
        let mut c = canvas(16, 8, Rotation::Rotate0);
        DrawTarget::clear(&mut c, Color::from(BinaryColor::On)).unwrap();
        assert!(c.framebuffer().as_bytes().iter().all(|b| *b == 0xFF));
        assert_eq!(c.framebuffer().background(), Color::Black);
    }
}
