//! All-in-one driver
//!
//! [`Driver`] bundles the panel protocol with a canvas so an application
//! only deals with one value: draw, then [`update`](Driver::update).
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use il0373::ascii::AsciiFont;
//! use il0373::{Builder, Color, Dimensions, Driver, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::SpiBus;
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
//! # let mut delay = MockDelay;
//! let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//! let Ok(dims) = Dimensions::new(152, 152) else {
//!     return;
//! };
//! let Ok(config) = Builder::new().dimensions(dims).build() else {
//!     return;
//! };
//!
//! let Ok(mut driver) = Driver::new(interface, config, [0u8; 2888], Some(AsciiFont)) else {
//!     return;
//! };
//! driver.draw_rect(0, 0, 151, 151, Color::Black, false);
//! let _ = driver.draw_string("Hello", 4, 4, 2, Color::Black);
//! let _ = driver.update(&mut delay);
//! ```

use embedded_hal::delay::DelayNs;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::Config;
use crate::display::Display;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;
use crate::text::TextSource;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Panel protocol and canvas in one value
pub struct Driver<I, B, T>
where
    I: DisplayInterface,
{
    display: Display<I>,
    canvas: Canvas<B, T>,
}

impl<I, B, T> Driver<I, B, T>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
    T: TextSource,
{
    /// Create a driver drawing into `buffer`
    ///
    /// The canvas starts cleared to white. Pass `None` as the text source to
    /// run without text, e.g. when the font failed to load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `buffer` cannot hold the panel.
    pub fn new(interface: I, config: Config, buffer: B, text: Option<T>) -> Result<Self, Error<I>> {
        let framebuffer = Framebuffer::new(buffer, config.dimensions, config.rotation)?;
        let mut canvas = Canvas::new(framebuffer, text);
        canvas.clear(Color::White);
        Ok(Self {
            display: Display::new(interface, config),
            canvas,
        })
    }

    /// Wake the panel
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.display.init(delay)
    }

    /// Show the canvas on the panel
    pub fn update<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.display
            .update(self.canvas.framebuffer().as_bytes(), delay)
    }

    /// Put the panel to sleep if it is awake
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.display.sleep(delay)
    }

    /// Fill the canvas with `color`
    pub fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    /// See [`Canvas::draw_point`]
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.canvas.draw_point(x, y, color);
    }

    /// See [`Canvas::draw_line`]
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.canvas.draw_line(x0, y0, x1, y1, color);
    }

    /// See [`Canvas::draw_rect`]
    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, filled: bool) {
        self.canvas.draw_rect(x0, y0, x1, y1, color, filled);
    }

    /// See [`Canvas::draw_circle`]
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color, filled: bool) {
        self.canvas.draw_circle(cx, cy, r, color, filled);
    }

    /// See [`Canvas::draw_bitmap`]
    pub fn draw_bitmap<R>(&mut self, grid: &[R], x: i32, y: i32, scale: u32, color: Color)
    where
        R: AsRef<[u8]>,
    {
        self.canvas.draw_bitmap(grid, x, y, scale, color);
    }

    /// See [`Canvas::draw_char`]
    pub fn draw_char(
        &mut self,
        ch: char,
        x: i32,
        y: i32,
        scale: u32,
        color: Color,
    ) -> Result<i32, T::Error> {
        self.canvas.draw_char(ch, x, y, scale, color)
    }

    /// See [`Canvas::draw_string`]
    pub fn draw_string(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        scale: u32,
        color: Color,
    ) -> Result<i32, T::Error> {
        self.canvas.draw_string(text, x, y, scale, color)
    }

    /// See [`Canvas::measure_string`]
    pub fn measure_string(&mut self, text: &str, scale: u32) -> Result<i32, T::Error> {
        self.canvas.measure_string(text, scale)
    }

    /// The canvas
    pub fn canvas(&self) -> &Canvas<B, T> {
        &self.canvas
    }

    /// Mutable access to the canvas
    pub fn canvas_mut(&mut self) -> &mut Canvas<B, T> {
        &mut self.canvas
    }

    /// The panel protocol
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Mutable access to the panel protocol
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Take the driver apart
    pub fn release(self) -> (I, B, Option<T>) {
        let (framebuffer, text) = self.canvas.into_parts();
        (self.display.release(), framebuffer.into_inner(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::AsciiFont;
    use crate::config::{Builder, Dimensions};
    use crate::display::PowerState;
    use crate::interface::tests::{CountingDelay, Event, mock_interface};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    /// Decode the pin/SPI log into `(is_data, byte)` pairs, one per frame
    fn frames(log: &[Event]) -> Vec<(bool, u8)> {
        let mut dc = true;
        let mut out = Vec::new();
        for event in log {
            match event {
                Event::Dc(level) => dc = *level,
                Event::Byte(byte) => out.push((dc, *byte)),
                _ => {}
            }
        }
        out
    }

    fn config() -> Config {
        Builder::new()
            .dimensions(Dimensions::new(152, 152).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_short_buffer_rejected() {
        let (interface, _) = mock_interface(0, false);
        let result = Driver::new(interface, config(), vec![0u8; 10], Some(AsciiFont));
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 2888,
                provided: 10
            })
        ));
    }

    #[test]
    fn test_error_debug_and_boxing() {
        let (interface, _) = mock_interface(0, false);
        let err = Driver::new(interface, config(), vec![0u8; 10], Some(AsciiFont))
            .err()
            .unwrap();
        assert_eq!(
            format!("{err:?}"),
            "BufferTooSmall { required: 2888, provided: 10 }"
        );
        let boxed: Box<dyn core::error::Error> = Box::new(err);
        assert_eq!(
            boxed.to_string(),
            "Buffer too small: required 2888 bytes, provided 10"
        );
    }

    #[test]
    fn test_new_clears_to_white() {
        let (interface, _) = mock_interface(0, false);
        let driver = Driver::new(interface, config(), vec![0xAAu8; 2888], Some(AsciiFont)).unwrap();
        assert!(
            driver
                .canvas()
                .framebuffer()
                .as_bytes()
                .iter()
                .all(|b| *b == 0x00)
        );
    }

    #[test]
    fn test_update_twice_leaves_chip_deselected() {
        let (interface, log) = mock_interface(0, false);
        let mut driver = Driver::new(interface, config(), vec![0u8; 2888], Some(AsciiFont)).unwrap();
        let mut delay = CountingDelay { total_ms: 0 };

        driver.draw_rect(0, 0, 151, 151, Color::Black, false);
        for _ in 0..2 {
            log.borrow_mut().clear();
            driver.update(&mut delay).unwrap();
            assert_eq!(driver.display().state(), PowerState::Asleep);

            let log = log.borrow();
            assert_eq!(log.last(), Some(&Event::Cs(true)));
            let selects = log.iter().filter(|e| **e == Event::Cs(false)).count();
            let releases = log.iter().filter(|e| **e == Event::Cs(true)).count();
            assert_eq!(selects, releases);
            // reset pulse first, then every byte framed
            assert_eq!(log[0], Event::Rst(false));
            assert_eq!(selects, frames(&log).len());
        }
    }

    #[test]
    fn test_update_byte_stream() {
        let (interface, log) = mock_interface(0, false);
        let mut driver = Driver::new(interface, config(), vec![0u8; 2888], Some(AsciiFont)).unwrap();
        let mut delay = CountingDelay { total_ms: 0 };
        driver.draw_point(0, 0, Color::Black);
        log.borrow_mut().clear();
        driver.update(&mut delay).unwrap();

        let frames = frames(&log.borrow());
        let commands: Vec<u8> = frames
            .iter()
            .filter(|(is_data, _)| !is_data)
            .map(|(_, byte)| *byte)
            .collect();
        assert_eq!(
            commands,
            [
                0x01, 0x06, 0x04, 0x00, 0x30, 0x61, 0x82, 0x50, 0x20, 0x21, 0x22, 0x23, 0x24,
                0x10, 0x13, 0x12, 0x02, 0x07
            ]
        );

        let start = frames.iter().position(|f| *f == (false, 0x13)).unwrap() + 1;
        let new_data = &frames[start..start + 2888];
        assert!(new_data.iter().all(|(is_data, _)| *is_data));
        assert_eq!(new_data[0].1, 0x7F);
        assert!(new_data[1..].iter().all(|(_, byte)| *byte == 0xFF));
        assert_eq!(frames.last(), Some(&(true, 0xA5)));
    }

    #[test]
    fn test_busy_timeout_surfaces_and_resets_state() {
        let (interface, _) = mock_interface(u32::MAX, false);
        let mut driver = Driver::new(interface, config(), vec![0u8; 2888], Some(AsciiFont)).unwrap();
        driver
            .display_mut()
            .interface_mut()
            .set_busy_timeout(50);
        let mut delay = CountingDelay { total_ms: 0 };

        let result = driver.update(&mut delay);
        assert!(matches!(
            result,
            Err(Error::Interface(crate::InterfaceError::Timeout))
        ));
        assert_eq!(driver.display().state(), PowerState::Uninitialized);
        assert_eq!(delay.total_ms, 2 * 10 + 50);
    }

    #[test]
    fn test_text_without_source_is_noop() {
        let (interface, _) = mock_interface(0, false);
        let mut driver: Driver<_, _, AsciiFont> =
            Driver::new(interface, config(), vec![0u8; 2888], None).unwrap();
        assert_eq!(driver.draw_string("AB", 0, 0, 1, Color::Black).unwrap(), 0);
        assert_eq!(driver.measure_string("AB", 1).unwrap(), 0);
        assert!(
            driver
                .canvas()
                .framebuffer()
                .as_bytes()
                .iter()
                .all(|b| *b == 0)
        );
    }

    #[test]
    fn test_draw_string_matches_measure() {
        let (interface, _) = mock_interface(0, false);
        let mut driver = Driver::new(interface, config(), vec![0u8; 2888], Some(AsciiFont)).unwrap();
        let drawn = driver.draw_string("AB", 0, 0, 1, Color::Black).unwrap();
        assert_eq!(driver.measure_string("AB", 1).unwrap(), drawn);
    }

    #[test]
    fn test_release_returns_parts() {
        let (interface, _) = mock_interface(0, false);
        let mut driver = Driver::new(interface, config(), vec![0u8; 2888], Some(AsciiFont)).unwrap();
        driver.clear(Color::Black);
        let (_interface, buffer, text) = driver.release();
        assert!(buffer.iter().all(|b| *b == 0xFF));
        assert_eq!(text, Some(AsciiFont));
    }
}
