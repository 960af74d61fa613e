//! BMF v3 bitmap fonts
//!
//! A BMF file is a fixed 16-byte header, a sorted index of 16-bit character
//! codes, and a table of fixed-size glyph records:
//!
//! | Offset            | Size | Field                                   |
//! |-------------------|------|-----------------------------------------|
//! | `0x00`            | 2    | signature `BM`                          |
//! | `0x02`            | 1    | version, must be 3                      |
//! | `0x03`            | 1    | map mode                                |
//! | `0x04`            | 3    | bitmap table start (big-endian)         |
//! | `0x07`            | 1    | font size (glyph edge in pixels)        |
//! | `0x08`            | 1    | bytes per glyph record                  |
//! | `0x10`            | 2n   | index: big-endian codes, ascending      |
//! | bitmap start      | ...  | records, in index order                 |
//!
//! The index is never loaded: each lookup binary-searches it through
//! [`FontSource::read_at`], two bytes per probe, and then reads a single
//! record. Fonts can therefore stay in flash or on disk.
//!
//! ## Example
//!
//! ```
//! use il0373::bmf::BmfFont;
//!
//! // 8px font holding 'A' (0x0041) only
//! let mut blob = [0u8; 0x12 + 8];
//! blob[..9].copy_from_slice(&[b'B', b'M', 3, 0, 0x00, 0x00, 0x12, 8, 8]);
//! blob[0x10..0x12].copy_from_slice(&[0x00, 0x41]);
//! blob[0x12] = 0xFF;
//!
//! let Ok(mut font) = BmfFont::new(&blob[..]) else {
//!     return;
//! };
//! assert_eq!(font.glyph_count(), 1);
//! assert_eq!(font.glyph_bytes('A').map(|g| g[0]), Ok(0xFF));
//!
//! // Unknown characters resolve to the placeholder
//! assert_eq!(font.glyph_bytes('B').map(|g| g.len()), Ok(8));
//! ```

use core::fmt::Debug;
use core::ops::Deref;

use crate::error::FontError;
use crate::glyph::{Glyph, unpack};
use crate::text::{Spacing, TextSource};

/// Size of the fixed header; the index starts here
pub const HEADER_LEN: u32 = 0x10;

/// Supported format version
pub const BMF_VERSION: u8 = 3;

/// Largest glyph edge a font may declare
pub const MAX_FONT_SIZE: u8 = 64;

/// Glyph shown for characters missing from the font
///
/// A small question mark laid out for the 12x12, 24-byte record format.
pub const DEFAULT_PLACEHOLDER: [u8; 24] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x03, 0x0C, 0x03, 0x0C, 0x03, 0x0C, 0x03, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Random-access, read-only byte storage holding a font
pub trait FontSource {
    /// Error type of the storage
    type Error: Debug;

    /// Read up to `buf.len()` bytes starting at `offset`
    ///
    /// Returns the number of bytes read, which is only short at the end of
    /// the data.
    fn read_at(&mut self, offset: u32, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl FontSource for &[u8] {
    type Error = core::convert::Infallible;

    fn read_at(&mut self, offset: u32, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some(tail) = self.get(offset as usize..) else {
            return Ok(0);
        };
        let len = tail.len().min(buf.len());
        buf[..len].copy_from_slice(&tail[..len]);
        Ok(len)
    }
}

#[cfg(feature = "std")]
impl FontSource for std::fs::File {
    type Error = std::io::Error;

    fn read_at(&mut self, offset: u32, buf: &mut [u8]) -> Result<usize, Self::Error> {
        use std::io::{ErrorKind, Read, Seek, SeekFrom};

        self.seek(SeekFrom::Start(u64::from(offset)))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

/// One glyph record, exactly `bytes_per_glyph` long
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphBytes {
    bytes: [u8; u8::MAX as usize],
    len: u8,
}

impl GlyphBytes {
    /// Copy `data` into a record of `len` bytes, truncating or zero-padding
    pub fn from_slice(data: &[u8], len: u8) -> Self {
        let mut bytes = [0; u8::MAX as usize];
        let copied = data.len().min(len as usize);
        bytes[..copied].copy_from_slice(&data[..copied]);
        Self { bytes, len }
    }

    /// The record bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Deref for GlyphBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Debug for GlyphBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A BMF v3 font read lazily from a [`FontSource`]
pub struct BmfFont<S> {
    source: S,
    version: u8,
    map_mode: u8,
    bitmap_start: u32,
    font_size: u8,
    bytes_per_glyph: u8,
    placeholder: GlyphBytes,
}

impl<S: FontSource> BmfFont<S> {
    /// Read and validate the header of `source`
    ///
    /// On failure the source is dropped before the error is returned.
    pub fn new(mut source: S) -> Result<Self, FontError<S::Error>> {
        let mut header = [0u8; HEADER_LEN as usize];
        let read = source.read_at(0, &mut header).map_err(FontError::Source)?;
        if read < 2 || header[..2] != *b"BM" {
            return Err(FontError::BadSignature);
        }
        if read < 9 {
            return Err(FontError::InvalidHeader);
        }
        if header[2] != BMF_VERSION {
            return Err(FontError::UnsupportedVersion(header[2]));
        }

        let bitmap_start = u32::from_be_bytes([0, header[4], header[5], header[6]]);
        let font_size = header[7];
        let bytes_per_glyph = header[8];
        if font_size == 0
            || font_size > MAX_FONT_SIZE
            || bytes_per_glyph == 0
            || bitmap_start < HEADER_LEN + 2
        {
            return Err(FontError::InvalidHeader);
        }

        let font = Self {
            source,
            version: header[2],
            map_mode: header[3],
            bitmap_start,
            font_size,
            bytes_per_glyph,
            placeholder: GlyphBytes::from_slice(&DEFAULT_PLACEHOLDER, bytes_per_glyph),
        };
        log::info!(
            "loaded BMF font: {}px, {} bytes per glyph, {} glyphs",
            font.font_size,
            font.bytes_per_glyph,
            font.glyph_count()
        );
        Ok(font)
    }

    /// Replace the glyph shown for missing characters
    pub fn with_placeholder(mut self, bytes: &[u8]) -> Self {
        self.set_placeholder(bytes);
        self
    }

    /// Replace the glyph shown for missing characters
    ///
    /// `bytes` is truncated or zero-padded to `bytes_per_glyph`.
    pub fn set_placeholder(&mut self, bytes: &[u8]) {
        self.placeholder = GlyphBytes::from_slice(bytes, self.bytes_per_glyph);
    }

    /// Position of `ch` in the index, or `None` if the font lacks it
    pub fn lookup(&mut self, ch: char) -> Result<Option<u32>, FontError<S::Error>> {
        let Ok(code) = u16::try_from(u32::from(ch)) else {
            return Ok(None);
        };

        let mut start = i64::from(HEADER_LEN);
        let mut end = i64::from(self.bitmap_start) - 2;
        while start <= end {
            let mid = start + (end - start) / 4 * 2;
            let mut probe = [0u8; 2];
            self.source
                .read_at(mid as u32, &mut probe)
                .map_err(FontError::Source)?;
            let probe = u16::from_be_bytes(probe);

            if probe == code {
                return Ok(Some((mid as u32 - HEADER_LEN) / 2));
            } else if code < probe {
                end = mid - 2;
            } else {
                start = mid + 2;
            }
        }
        Ok(None)
    }

    /// Record bytes for `ch`, or the placeholder if the font lacks it
    ///
    /// A record cut short by the end of the data is zero-padded.
    pub fn glyph_bytes(&mut self, ch: char) -> Result<GlyphBytes, FontError<S::Error>> {
        let Some(index) = self.lookup(ch)? else {
            log::trace!("no glyph for {ch:?}, using placeholder");
            return Ok(self.placeholder.clone());
        };

        let offset = self.bitmap_start + index * u32::from(self.bytes_per_glyph);
        let mut record = GlyphBytes::from_slice(&[], self.bytes_per_glyph);
        let len = record.len as usize;
        self.source
            .read_at(offset, &mut record.bytes[..len])
            .map_err(FontError::Source)?;
        Ok(record)
    }

    /// Glyph edge in pixels
    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    /// Size of one glyph record
    pub fn bytes_per_glyph(&self) -> u8 {
        self.bytes_per_glyph
    }

    /// Offset of the first glyph record
    pub fn bitmap_start(&self) -> u32 {
        self.bitmap_start
    }

    /// Map mode byte from the header
    pub fn map_mode(&self) -> u8 {
        self.map_mode
    }

    /// Format version from the header
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Number of index entries
    pub fn glyph_count(&self) -> u32 {
        (self.bitmap_start - HEADER_LEN) / 2
    }

    /// Give back the byte source
    pub fn into_source(self) -> S {
        self.source
    }
}

#[cfg(feature = "std")]
impl BmfFont<std::fs::File> {
    /// Open a font file
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, FontError<std::io::Error>> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FontError::Missing,
            _ => FontError::Source(e),
        })?;
        Self::new(file)
    }
}

impl<S: FontSource> TextSource for BmfFont<S> {
    type Error = FontError<S::Error>;

    fn spacing(&self) -> Spacing {
        Spacing::Tight
    }

    fn glyph(&mut self, ch: char) -> Result<Glyph, Self::Error> {
        let bytes = self.glyph_bytes(ch)?;
        Ok(unpack(&bytes, self.font_size))
    }
}
