//! Packed 1-bit framebuffer
//!
//! [`Framebuffer`] owns the pixel storage for one panel. Storage is any
//! byte container (`[u8; N]`, `Vec<u8>`, `&mut [u8]`) of at least
//! [`Dimensions::buffer_size`] bytes; it is never reallocated. Pixels are
//! addressed through the [rotation](crate::rotation) transform and anything
//! off-canvas is silently ignored, so drawing algorithms can produce
//! transient out-of-range points freely.

use crate::color::Color;
use crate::config::{Dimensions, Rotation};
use crate::error::BufferSizeError;
use crate::rotation::apply_rotation;

/// Packed framebuffer with rotation-aware pixel access
pub struct Framebuffer<B> {
    buffer: B,
    dimensions: Dimensions,
    rotation: Rotation,
    background: Color,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap a buffer
    ///
    /// The buffer contents are kept as-is; call [`clear`](Self::clear) to
    /// start from a known background.
    ///
    /// # Errors
    ///
    /// Returns [`BufferSizeError`] if the buffer is shorter than
    /// `dimensions.buffer_size()`.
    pub fn new(
        buffer: B,
        dimensions: Dimensions,
        rotation: Rotation,
    ) -> Result<Self, BufferSizeError> {
        let required = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BufferSizeError { required, provided });
        }
        Ok(Self {
            buffer,
            dimensions,
            rotation,
            background: Color::White,
        })
    }

    /// Fill every byte with `color` and remember it as the background
    pub fn clear(&mut self, color: Color) {
        self.background = color;
        let size = self.dimensions.buffer_size();
        self.buffer.as_mut()[..size].fill(color.fill_byte());
    }

    /// Set one logical pixel; off-canvas coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, mask)) = apply_rotation(x, y, self.dimensions, self.rotation) else {
            return;
        };
        let byte = &mut self.buffer.as_mut()[index];
        match color {
            Color::Black => *byte |= mask,
            Color::White => *byte &= !mask,
        }
    }

    /// Read one logical pixel, or `None` if it is off-canvas
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let (index, mask) = apply_rotation(x, y, self.dimensions, self.rotation)?;
        if self.buffer.as_ref()[index] & mask != 0 {
            Some(Color::Black)
        } else {
            Some(Color::White)
        }
    }

    /// Logical `(width, height)` as seen by drawing calls
    pub fn size(&self) -> (u32, u32) {
        let Dimensions { width, height } = self.dimensions;
        if self.rotation.is_transposed() {
            (u32::from(height), u32::from(width))
        } else {
            (u32::from(width), u32::from(height))
        }
    }

    /// Physical panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Rotation applied to drawing calls
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Color of the last [`clear`](Self::clear)
    pub fn background(&self) -> Color {
        self.background
    }

    /// The packed framebuffer, exactly `buffer_size` bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.dimensions.buffer_size()]
    }

    /// Give back the underlying buffer
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn framebuffer(width: u16, height: u16, rotation: Rotation) -> Framebuffer<Vec<u8>> {
        let dims = Dimensions::new(width, height).unwrap();
        let mut fb = Framebuffer::new(vec![0u8; dims.buffer_size()], dims, rotation).unwrap();
        fb.clear(Color::White);
        fb
    }

    #[test]
    fn test_short_buffer_rejected() {
        let dims = Dimensions::new(16, 4).unwrap();
        let result = Framebuffer::new([0u8; 7], dims, Rotation::Rotate0);
        assert!(matches!(
            result,
            Err(BufferSizeError {
                required: 8,
                provided: 7
            })
        ));
    }

    #[test]
    fn test_set_then_read_back() {
        for rotation in [
            Rotation::Rotate0,
            Rotation::Rotate90,
            Rotation::Rotate180,
            Rotation::Rotate270,
        ] {
            let mut fb = framebuffer(20, 12, rotation);
            let (w, h) = fb.size();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    fb.set_pixel(x, y, Color::Black);
                    assert_eq!(fb.pixel(x, y), Some(Color::Black));
                    fb.set_pixel(x, y, Color::White);
                    assert_eq!(fb.pixel(x, y), Some(Color::White));
                }
            }
        }
    }

    #[test]
    fn test_set_touches_exactly_one_bit() {
        let mut fb = framebuffer(24, 3, Rotation::Rotate0);
        fb.set_pixel(9, 1, Color::Black);
        let set: u32 = fb.as_bytes().iter().map(|b| b.count_ones()).sum();
        assert_eq!(set, 1);
        assert_eq!(fb.as_bytes()[3 + 1], 0x40);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut fb = framebuffer(16, 16, Rotation::Rotate90);
        fb.set_pixel(3, 3, Color::Black);
        let before = fb.as_bytes().to_vec();
        for (x, y) in [(-1, 0), (0, -1), (16, 0), (0, 16), (i32::MIN, i32::MAX)] {
            fb.set_pixel(x, y, Color::Black);
            fb.set_pixel(x, y, Color::White);
            assert_eq!(fb.pixel(x, y), None);
        }
        assert_eq!(fb.as_bytes(), &before[..]);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut fb = framebuffer(13, 5, Rotation::Rotate0);
        fb.set_pixel(2, 2, Color::Black);
        fb.clear(Color::White);
        let first = fb.as_bytes().to_vec();
        fb.clear(Color::White);
        assert_eq!(fb.as_bytes(), &first[..]);
        assert!(first.iter().all(|b| *b == 0x00));

        fb.clear(Color::Black);
        assert!(fb.as_bytes().iter().all(|b| *b == 0xFF));
        assert_eq!(fb.background(), Color::Black);
    }

    #[test]
    fn test_rotated_size_swaps() {
        let fb = framebuffer(40, 16, Rotation::Rotate270);
        assert_eq!(fb.size(), (16, 40));
        let fb = framebuffer(40, 16, Rotation::Rotate180);
        assert_eq!(fb.size(), (40, 16));
    }

    #[test]
    fn test_oversized_buffer_is_trimmed_in_view() {
        let dims = Dimensions::new(8, 2).unwrap();
        let fb = Framebuffer::new([0u8; 5], dims, Rotation::Rotate0).unwrap();
        assert_eq!(fb.as_bytes().len(), 2);
    }
}
