//! IL0373 E-Paper Display Driver
//!
//! A driver for black/white e-paper panels built on the IL0373 controller,
//! such as the 1.54" 152x152 module. It keeps a packed 1-bit framebuffer,
//! rasterizes shapes and text into it, and runs the panel's wake, transfer,
//! refresh and sleep sequence.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Rotation support
//! - Lines, rectangles, circles, bitmaps and scaled text
//! - BMF v3 bitmap fonts read lazily from flash, memory or (with `std`) files
//! - Built-in 6x8 ASCII font
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use il0373::bmf::BmfFont;
//! use il0373::{Builder, Color, Dimensions, Driver, Interface, Rotation};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let cs = MockPin;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! # static FONT: [u8; 0] = [];
//! let interface = Interface::new(spi, cs, dc, rst, busy);
//! let dims = match Dimensions::new(152, 152) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! // A font that fails to load leaves text disabled
//! let font = BmfFont::new(&FONT[..]).ok();
//! let mut driver = match Driver::new(interface, config, [0u8; 2888], font) {
//!     Ok(driver) => driver,
//!     Err(_) => return,
//! };
//!
//! driver.clear(Color::White);
//! driver.draw_rect(0, 0, 151, 151, Color::Black, false);
//! if let Ok(width) = driver.measure_string("12:30", 2) {
//!     let _ = driver.draw_string("12:30", (152 - width) / 2, 60, 2, Color::Black);
//! }
//! let _ = driver.update(&mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Built-in 6x8 ASCII font
pub mod ascii;
/// BMF v3 bitmap fonts
pub mod bmf;
/// Drawing primitives
pub mod canvas;
/// Color types for bi-level e-paper displays
pub mod color;
/// IL0373 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Panel protocol
pub mod display;
/// Panel protocol and canvas in one value
pub mod driver;
/// Error types for the driver
pub mod error;
/// Packed 1-bit framebuffer
pub mod framebuffer;
/// Glyph bit grids
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;
/// Waveform look-up tables
pub mod lut;
/// Coordinate rotation utilities
pub mod rotation;
/// Text sources
pub mod text;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use canvas::Canvas;
pub use color::Color;
pub use config::{Builder, Config, Dimensions, MAX_WIDTH, Rotation};
pub use display::{Display, PowerState};
pub use driver::Driver;
pub use error::{BufferSizeError, BuilderError, Error, FontError};
pub use framebuffer::Framebuffer;
pub use interface::InterfaceError;
pub use interface::{DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, Interface};
pub use text::{Spacing, TextSource};
