//! Coordinate rotation utilities
//!
//! Drawing calls work in *logical* coordinates: the canvas as the viewer
//! sees it after rotation. The framebuffer is always stored in *physical*
//! panel order, eight horizontal pixels per byte, MSB first.
//!
//! ## Rotation Modes
//!
//! With `W`, `H` the physical width and height:
//!
//! | Rotation  | Physical `(px, py)`        | Logical size |
//! |-----------|----------------------------|--------------|
//! | Rotate0   | `(x, y)`                   | `W x H`      |
//! | Rotate90  | `(W - y - 1, x)`           | `H x W`      |
//! | Rotate180 | `(W - x - 1, H - y - 1)`   | `W x H`      |
//! | Rotate270 | `(y, H - x - 1)`           | `H x W`      |
//!
//! ## Example
//!
//! ```
//! use il0373::{rotation::apply_rotation, Dimensions, Rotation};
//!
//! let dims = Dimensions { width: 16, height: 16 };
//!
//! // Logical origin is the physical origin at 0 degrees
//! assert_eq!(apply_rotation(0, 0, dims, Rotation::Rotate0), Some((0, 0x80)));
//!
//! // ...and the top-right pixel at 90 degrees
//! assert_eq!(apply_rotation(0, 0, dims, Rotation::Rotate90), Some((1, 0x01)));
//!
//! // Off-canvas coordinates have no address
//! assert_eq!(apply_rotation(-1, 0, dims, Rotation::Rotate0), None);
//! ```

use crate::config::{Dimensions, Rotation};

/// Map a logical coordinate to a physical panel coordinate
///
/// Returns `None` if the logical coordinate lies outside the rotated canvas
/// or the mapped coordinate lies outside the panel.
pub fn to_physical(x: i32, y: i32, dims: Dimensions, rotation: Rotation) -> Option<(u32, u32)> {
    let width = i32::from(dims.width);
    let height = i32::from(dims.height);
    let (logical_w, logical_h) = if rotation.is_transposed() {
        (height, width)
    } else {
        (width, height)
    };

    if x < 0 || y < 0 || x >= logical_w || y >= logical_h {
        return None;
    }

    let (px, py) = match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - y - 1, x),
        Rotation::Rotate180 => (width - x - 1, height - y - 1),
        Rotation::Rotate270 => (y, height - x - 1),
    };

    if px < 0 || py < 0 || px >= width || py >= height {
        return None;
    }

    Some((px as u32, py as u32))
}

/// Byte index and bit mask of a physical pixel
///
/// `width_bytes` is the row stride of the framebuffer.
pub fn pixel_address(px: u32, py: u32, width_bytes: usize) -> (usize, u8) {
    let index = px as usize / 8 + py as usize * width_bytes;
    let mask = 1u8 << (7 - (px % 8));
    (index, mask)
}

/// Apply rotation transformation to get buffer index and bit mask
///
/// Converts logical (x, y) coordinates to a physical buffer location
/// `(byte_index, bit_mask)`, or `None` when the pixel is off-canvas.
pub fn apply_rotation(
    x: i32,
    y: i32,
    dims: Dimensions,
    rotation: Rotation,
) -> Option<(usize, u8)> {
    let (px, py) = to_physical(x, y, dims, rotation)?;
    Some(pixel_address(px, py, dims.width_bytes()))
}
