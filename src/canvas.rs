//! Drawing primitives
//!
//! [`Canvas`] rasterizes shapes, bitmaps and text into a [`Framebuffer`].
//! All coordinates are logical (after rotation) and signed; anything that
//! falls outside the canvas is clipped pixel by pixel, so shapes may start
//! or end off-screen.
//!
//! Text goes through an optional [`TextSource`]. Without one, text calls
//! draw nothing and report a zero advance.
//!
//! ## Example
//!
//! ```
//! use il0373::ascii::AsciiFont;
//! use il0373::canvas::Canvas;
//! use il0373::framebuffer::Framebuffer;
//! use il0373::{Color, Dimensions, Rotation};
//!
//! let Ok(dims) = Dimensions::new(152, 152) else {
//!     return;
//! };
//! let Ok(framebuffer) = Framebuffer::new([0u8; 2888], dims, Rotation::Rotate0) else {
//!     return;
//! };
//! let mut canvas = Canvas::new(framebuffer, Some(AsciiFont));
//!
//! canvas.clear(Color::White);
//! canvas.draw_rect(0, 0, 151, 151, Color::Black, false);
//! canvas.draw_circle(76, 76, 30, Color::Black, true);
//!
//! // Center a line of text
//! let Ok(width) = canvas.measure_string("Hello", 2);
//! let _ = canvas.draw_string("Hello", (152 - width) / 2, 10, 2, Color::Black);
//! ```

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::glyph::Glyph;
use crate::text::{Spacing, TextSource};

/// Rasterizer over a framebuffer and an optional text source
pub struct Canvas<B, T> {
    framebuffer: Framebuffer<B>,
    text: Option<T>,
}

impl<B, T> Canvas<B, T>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    T: TextSource,
{
    /// Create a canvas drawing into `framebuffer`
    pub fn new(framebuffer: Framebuffer<B>, text: Option<T>) -> Self {
        Self { framebuffer, text }
    }

    /// Fill the whole canvas with `color`
    pub fn clear(&mut self, color: Color) {
        self.framebuffer.clear(color);
    }

    /// Set a single pixel
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Draw a one pixel wide line, both endpoints included
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Walk from the lexicographically smaller endpoint so that a line and
        // its reverse cover the same pixels
        let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
            ((x0, y0), (x1, y1))
        } else {
            ((x1, y1), (x0, y0))
        };
        let (x1, y1) = (i64::from(x1), i64::from(y1));
        let (mut x, mut y) = (i64::from(x0), i64::from(y0));

        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.framebuffer.set_pixel(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a rectangle spanning the two corners, inclusive
    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, filled: bool) {
        if filled {
            let (_, height) = self.framebuffer.size();
            let (left, right) = (x0.min(x1), x0.max(x1));
            let top = i64::from(y0.min(y1)).max(0);
            let bottom = i64::from(y0.max(y1)).min(i64::from(height) - 1);
            for y in top..=bottom {
                self.draw_span(i64::from(left), i64::from(right), y, color);
            }
        } else {
            self.draw_line(x0, y0, x1, y0, color);
            self.draw_line(x1, y0, x1, y1, color);
            self.draw_line(x1, y1, x0, y1, color);
            self.draw_line(x0, y1, x0, y0, color);
        }
    }

    /// Draw a circle of radius `r` around `(cx, cy)`
    ///
    /// A negative radius draws nothing; a radius of zero draws the center.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color, filled: bool) {
        if r < 0 {
            return;
        }
        let (width, height) = self.framebuffer.size();
        let (width, height) = (i64::from(width), i64::from(height));
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));

        if cx + r < 0 || cx - r >= width || cy + r < 0 || cy - r >= height {
            return;
        }
        // Canvas entirely inside the circle, with a margin for the
        // rasterized outline
        let corner_dx = i128::from(cx.abs().max((cx - width + 1).abs()));
        let corner_dy = i128::from(cy.abs().max((cy - height + 1).abs()));
        let reach = i128::from(r) - 2;
        if reach > 0 && corner_dx * corner_dx + corner_dy * corner_dy < reach * reach {
            if filled {
                for y in 0..height {
                    self.draw_span(0, width - 1, y, color);
                }
            }
            return;
        }

        let mut x = 0;
        let mut y = r;
        let mut d = 3 - 2 * r;

        while x <= y {
            if filled {
                self.draw_span(cx - x, cx + x, cy + y, color);
                self.draw_span(cx - x, cx + x, cy - y, color);
                self.draw_span(cx - y, cx + y, cy + x, color);
                self.draw_span(cx - y, cx + y, cy - x, color);
            } else {
                for (px, py) in [
                    (cx + x, cy + y),
                    (cx - x, cy + y),
                    (cx + x, cy - y),
                    (cx - x, cy - y),
                    (cx + y, cy + x),
                    (cx - y, cy + x),
                    (cx + y, cy - x),
                    (cx - y, cy - x),
                ] {
                    self.plot(px, py, color);
                }
            }

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Draw a grid of `0`/`1` cells, each `1` as a `scale x scale` block
    ///
    /// Rows may differ in length. A scale of zero draws nothing.
    pub fn draw_bitmap<R>(&mut self, grid: &[R], x: i32, y: i32, scale: u32, color: Color)
    where
        R: AsRef<[u8]>,
    {
        if scale == 0 {
            return;
        }
        let scale = scale_i32(scale);
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.as_ref().iter().enumerate() {
                if *cell == 1 {
                    let bx = x.saturating_add((col as i32).saturating_mul(scale));
                    let by = y.saturating_add((row as i32).saturating_mul(scale));
                    self.fill_block(bx, by, scale, color);
                }
            }
        }
    }

    /// Draw one character with its top-left at `(x, y)`
    ///
    /// Returns the horizontal advance, or 0 when there is no text source.
    pub fn draw_char(
        &mut self,
        ch: char,
        x: i32,
        y: i32,
        scale: u32,
        color: Color,
    ) -> Result<i32, T::Error> {
        let Some(text) = self.text.as_mut() else {
            return Ok(0);
        };
        let spacing = text.spacing();
        let glyph = text.glyph(ch)?;
        let scale = scale_i32(scale);

        let shift = match spacing {
            Spacing::Tight => glyph.content_bounds().map_or(0, |(min, _)| min),
            Spacing::Fixed => 0,
        };
        for (col, row) in glyph.set_pixels() {
            let bx = x.saturating_add(i32::from(col - shift).saturating_mul(scale));
            let by = y.saturating_add(i32::from(row).saturating_mul(scale));
            self.fill_block(bx, by, scale, color);
        }

        Ok(advance(&glyph, spacing, scale))
    }

    /// Draw `text` left to right starting at `(x, y)`
    ///
    /// Returns the total advance, equal to [`measure_string`](Self::measure_string).
    pub fn draw_string(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        scale: u32,
        color: Color,
    ) -> Result<i32, T::Error> {
        let mut cursor = x;
        for ch in text.chars() {
            let step = self.draw_char(ch, cursor, y, scale, color)?;
            cursor = cursor.saturating_add(step);
        }
        Ok(cursor.saturating_sub(x))
    }

    /// Width `text` would occupy at `scale`, without drawing
    pub fn measure_string(&mut self, text: &str, scale: u32) -> Result<i32, T::Error> {
        let Some(source) = self.text.as_mut() else {
            return Ok(0);
        };
        let spacing = source.spacing();
        let scale = scale_i32(scale);
        let mut width = 0i32;
        for ch in text.chars() {
            let glyph = source.glyph(ch)?;
            width = width.saturating_add(advance(&glyph, spacing, scale));
        }
        Ok(width)
    }

    /// Logical `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        self.framebuffer.size()
    }

    /// The framebuffer being drawn into
    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.framebuffer
    }

    /// Mutable access to the framebuffer
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<B> {
        &mut self.framebuffer
    }

    /// The text source, if any
    pub fn text_source(&self) -> Option<&T> {
        self.text.as_ref()
    }

    /// Mutable access to the text source
    pub fn text_source_mut(&mut self) -> Option<&mut T> {
        self.text.as_mut()
    }

    /// Replace the text source, returning the previous one
    pub fn set_text_source(&mut self, text: Option<T>) -> Option<T> {
        core::mem::replace(&mut self.text, text)
    }

    /// Split into framebuffer and text source
    pub fn into_parts(self) -> (Framebuffer<B>, Option<T>) {
        (self.framebuffer, self.text)
    }

    /// Set a pixel given in widened coordinates, dropping anything off-canvas
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.framebuffer.set_pixel(x, y, color);
        }
    }

    /// Horizontal run from `x0` to `x1` inclusive, clipped to the canvas
    fn draw_span(&mut self, x0: i64, x1: i64, y: i64, color: Color) {
        let (width, height) = self.framebuffer.size();
        if y < 0 || y >= i64::from(height) {
            return;
        }
        let left = x0.min(x1).max(0);
        let right = x0.max(x1).min(i64::from(width) - 1);
        for x in left..=right {
            self.plot(x, y, color);
        }
    }

    /// A `size x size` square at `(x, y)`, clipped to the canvas
    fn fill_block(&mut self, x: i32, y: i32, size: i32, color: Color) {
        if size == 1 {
            self.framebuffer.set_pixel(x, y, color);
            return;
        }
        let (x, y, size) = (i64::from(x), i64::from(y), i64::from(size));
        let (_, height) = self.framebuffer.size();
        let top = y.max(0);
        let bottom = (y + size - 1).min(i64::from(height) - 1);
        for row in top..=bottom {
            self.draw_span(x, x + size - 1, row, color);
        }
    }
}

fn scale_i32(scale: u32) -> i32 {
    i32::try_from(scale).unwrap_or(i32::MAX)
}

/// Pen advance after drawing `glyph`
fn advance(glyph: &Glyph, spacing: Spacing, scale: i32) -> i32 {
    match spacing {
        Spacing::Tight => {
            let content = glyph.content_bounds().map_or_else(
                || i32::from(glyph.width() / 2).max(1),
                |(min, max)| i32::from(max - min) + 1,
            );
            (content + 1).saturating_mul(scale).max(scale)
        }
        Spacing::Fixed => i32::from(glyph.width()).saturating_mul(scale),
    }
}
