//! Error types for the driver
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during panel operations
//! - [`BufferSizeError`] - A framebuffer shorter than the panel
//! - [`FontError`] - Errors loading or reading a BMF font
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware
//!   communication errors, including busy timeouts
//!
//! Drawing never fails: coordinates outside the canvas are clipped, and a
//! character missing from a font renders as the font's placeholder glyph.
//!
//! ## Example
//!
//! ```
//! use il0373::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Width does not fit the resolution command
//! let result = Dimensions::new(300, 100);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum panel width in pixels
///
/// The resolution setting command carries the width in a single byte.
pub const MAX_WIDTH: u16 = 255;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO/busy timeout)
    ///
    /// Wraps the underlying error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Buffer is too small for the display
    ///
    /// The framebuffer must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// The operation needs a powered panel
    ///
    /// Memory transfer and refresh are only valid after a wake.
    NotAwake,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::NotAwake => write!(f, "Panel is not awake"),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
            Self::NotAwake => f.write_str("NotAwake"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// A framebuffer is shorter than the panel needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSizeError {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferSizeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferSizeError {}

impl<I: DisplayInterface> From<BufferSizeError> for Error<I> {
    fn from(e: BufferSizeError) -> Self {
        Self::BufferTooSmall {
            required: e.required,
            provided: e.provided,
        }
    }
}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Requested width in pixels
        width: u16,
        /// Requested height in pixels
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (both sides non-zero, width at most {MAX_WIDTH})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when loading or reading a BMF font
///
/// `E` is the error type of the underlying [`FontSource`](crate::bmf::FontSource).
#[derive(Debug, PartialEq, Eq)]
pub enum FontError<E> {
    /// The byte source failed
    Source(E),
    /// The font resource does not exist
    Missing,
    /// The header does not start with `BM`
    BadSignature,
    /// The header carries a version other than the supported one
    UnsupportedVersion(u8),
    /// The header is truncated or its geometry fields are unusable
    InvalidHeader,
}

impl<E: core::fmt::Debug> core::fmt::Display for FontError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Source(e) => write!(f, "Font source error: {e:?}"),
            Self::Missing => write!(f, "Font not found"),
            Self::BadSignature => write!(f, "Not a BMF font (bad signature)"),
            Self::UnsupportedVersion(v) => write!(f, "Unsupported BMF version {v}"),
            Self::InvalidHeader => write!(f, "Invalid BMF header"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for FontError<E> {}

impl<E> FontError<E> {
    /// Whether the font is missing or unusable, as opposed to a failing source
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Self::Source(_))
    }
}
