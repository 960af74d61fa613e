//! 1-bit glyph grids
//!
//! A [`Glyph`] is the unpacked form of one character: a `width x height`
//! grid of bits, produced on demand and never stored by the fonts. Font
//! records are turned into glyphs with [`unpack`] (row-major BMF records) or
//! [`Glyph::from_columns`] (column-major fixed-cell tables).

/// Largest glyph edge supported, in pixels
pub const MAX_GLYPH_EDGE: usize = 64;

/// An immutable grid of glyph pixels
///
/// Each row is a bit set, bit `n` holding column `n`.
#[derive(Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: [u64; MAX_GLYPH_EDGE],
    width: u8,
    height: u8,
}

impl core::fmt::Debug for Glyph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Glyph {}x{}", self.width, self.height)?;
        for row in 0..self.height {
            for col in 0..self.width {
                let c = if self.pixel(col, row) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Glyph {
    /// An all-clear glyph; sides are clamped to [`MAX_GLYPH_EDGE`]
    pub fn blank(width: u8, height: u8) -> Self {
        Self {
            rows: [0; MAX_GLYPH_EDGE],
            width: width.min(MAX_GLYPH_EDGE as u8),
            height: height.min(MAX_GLYPH_EDGE as u8),
        }
    }

    /// Build a glyph from column bytes, least significant bit at the top
    ///
    /// Each byte is one column of up to eight pixels; `height` above 8 is
    /// clamped to 8.
    pub fn from_columns(columns: &[u8], height: u8) -> Self {
        let width = columns.len().min(MAX_GLYPH_EDGE) as u8;
        let mut glyph = Self::blank(width, height.min(8));
        for (col, bits) in columns.iter().take(width as usize).enumerate() {
            for row in 0..glyph.height {
                if bits >> row & 0x01 != 0 {
                    glyph.rows[row as usize] |= 1 << col;
                }
            }
        }
        glyph
    }

    /// Width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the pixel at `(col, row)` is set; out-of-range reads are clear
    pub fn pixel(&self, col: u8, row: u8) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.rows[row as usize] >> col & 0x01 != 0
    }

    /// Pixel value as `0`/`1`, addressed row first like a nested array
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row >= MAX_GLYPH_EDGE || col >= MAX_GLYPH_EDGE {
            return 0;
        }
        u8::from(self.pixel(col as u8, row as u8))
    }

    /// Whether no pixel is set
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| *row == 0)
    }

    /// Leftmost and rightmost columns containing a set pixel
    ///
    /// `None` for blank glyphs.
    pub fn content_bounds(&self) -> Option<(u8, u8)> {
        let occupied = self.rows[..self.height as usize]
            .iter()
            .fold(0u64, |acc, row| acc | row);
        if occupied == 0 {
            return None;
        }
        let min = occupied.trailing_zeros() as u8;
        let max = (63 - occupied.leading_zeros()) as u8;
        Some((min, max))
    }

    /// Iterate over the `(col, row)` of every set pixel, row by row
    pub fn set_pixels(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).filter_map(move |col| self.pixel(col, row).then_some((col, row)))
        })
    }
}

/// Expand a row-major, byte-padded bit array into an `edge x edge` glyph
///
/// Each row occupies `ceil(edge / 8)` bytes, most significant bit first.
/// Bytes missing from a short record read as zero, so a truncated record
/// yields blank trailing rows rather than an error. `edge` is clamped to
/// [`MAX_GLYPH_EDGE`].
pub fn unpack(bytes: &[u8], edge: u8) -> Glyph {
    let mut glyph = Glyph::blank(edge, edge);
    let edge = glyph.width as usize;
    let bytes_per_row = edge.div_ceil(8);

    for row in 0..edge {
        let row_start = row * bytes_per_row;
        let mut bits = 0u64;
        for col in 0..edge {
            let byte = bytes.get(row_start + col / 8).copied().unwrap_or(0);
            if byte & (0x80 >> (col % 8)) != 0 {
                bits |= 1 << col;
            }
        }
        glyph.rows[row] = bits;
    }

    glyph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_msb_first_with_row_padding() {
        // 12px rows take two bytes; the low nibble of the second byte is padding
        let bytes = [0x80, 0x1F, 0x00, 0x10];
        let glyph = unpack(&bytes, 12);
        assert_eq!(glyph.get(0, 0), 1);
        assert_eq!(glyph.get(0, 1), 0);
        assert_eq!(glyph.get(0, 11), 1);
        assert_eq!(glyph.get(1, 11), 1);
        assert_eq!(glyph.get(1, 10), 0);
        // padding bits 12..16 never leak into the grid
        assert_eq!(glyph.get(0, 12), 0);
    }

    #[test]
    fn test_unpack_short_record_zero_fills() {
        let glyph = unpack(&[0xFF], 8);
        assert_eq!(glyph.width(), 8);
        assert_eq!(glyph.height(), 8);
        for col in 0..8 {
            assert_eq!(glyph.get(0, col), 1);
        }
        for row in 1..8 {
            for col in 0..8 {
                assert_eq!(glyph.get(row, col), 0);
            }
        }
    }

    #[test]
    fn test_unpack_empty_is_blank() {
        let glyph = unpack(&[], 12);
        assert!(glyph.is_blank());
        assert_eq!(glyph.content_bounds(), None);
    }

    #[test]
    fn test_content_bounds() {
        // columns 3..=6 occupied across two rows
        let glyph = unpack(&[0b0001_1000, 0b0000_0110], 8);
        assert_eq!(glyph.content_bounds(), Some((3, 6)));
    }

    #[test]
    fn test_from_columns_lsb_is_top() {
        let glyph = Glyph::from_columns(&[0x00, 0x01, 0x80], 8);
        assert_eq!(glyph.width(), 3);
        assert!(glyph.pixel(1, 0));
        assert!(glyph.pixel(2, 7));
        assert!(!glyph.pixel(0, 0));
        assert_eq!(glyph.set_pixels().count(), 2);
    }

    #[test]
    fn test_edge_clamped() {
        let glyph = unpack(&[0xFF; 16], 200);
        assert_eq!(glyph.width() as usize, MAX_GLYPH_EDGE);
        assert_eq!(glyph.get(0, 63), 1);
    }
}
