//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the IL0373 controller over a write-only SPI bus.
//!
//! ## Hardware Requirements
//!
//! The IL0373 requires:
//! - SPI bus (MOSI + SCK), mode 0
//! - 4 GPIO pins:
//!   - **CS**: Chip select (output, active low)
//!   - **DC**: Data/Command select (output, low = command)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, low while busy on IL0373 panels)
//!
//! ## Framing
//!
//! Every byte travels in its own chip-select frame:
//!
//! 1. CS low
//! 2. DC low for a command, high for data
//! 3. One byte over SPI, bus flushed
//! 4. CS high
//!
//! After a command byte DC is left high (data mode). CS is released even when
//! the SPI write fails, so an error never leaves the controller selected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use il0373::{DisplayInterface, Interface};
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
//! // SPI bus, then CS, DC, RST and BUSY
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//!
//! // Power on, then wait for the panel
//! let _ = interface.send_command(0x04);
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the IL0373 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation, and tests to record the exact byte stream.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implementations
/// must keep the per-byte chip-select framing described in the
/// [module documentation](self).
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller, each in its own frame
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send a stream of data bytes without staging them in memory
    ///
    /// Used for whole-framebuffer transfers, where the bytes are produced on
    /// the fly (constant fill, inverted framebuffer).
    ///
    /// # Errors
    ///
    /// Stops at the first byte that fails and returns its error.
    fn send_data_iter<It>(&mut self, data: It) -> InterfaceResult<(), Self::Error>
    where
        It: IntoIterator<Item = u8>,
    {
        for byte in data {
            self.send_data(&[byte])?;
        }
        Ok(())
    }

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST pin low
    /// 2. Wait at least 10ms
    /// 3. Set RST pin high
    /// 4. Wait at least 10ms
    fn reset<D: DelayNs>(&mut self, delay: &mut D);

    /// Wait for the panel to report idle (with timeout)
    ///
    /// # Errors
    ///
    /// Returns a timeout error if the panel does not go idle within the
    /// implementation-specific timeout period.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Timeout waiting for busy pin
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 10_000;

/// Interval between busy pin samples in milliseconds
pub const BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Hold time of each reset phase in milliseconds
pub const RESET_DELAY_MS: u32 = 10;

/// Hardware interface implementation for IL0373
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`SpiBus`] with a
/// dedicated chip-select pin. The bus is used exclusively: chip select is
/// toggled around every byte, which the panel needs to latch the DC level.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, CS, DC, RST, BUSY> {
    /// SPI bus for communication
    spi: SPI,
    /// Chip select pin (active low)
    cs: CS,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin
    busy: BUSY,
    /// Timeout for busy-wait in milliseconds
    busy_timeout_ms: u32,
    /// Busy pin polarity (true = active high, false = active low)
    busy_active_high: bool,
}

impl<SPI, CS, DC, RST, BUSY> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// Chip select is driven high immediately so the controller starts
    /// deselected. The busy pin defaults to active-low, as on IL0373 panels.
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus (must implement [`SpiBus`])
    /// * `cs` - Chip select pin (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input)
    pub fn new(spi: SPI, mut cs: CS, dc: DC, rst: RST, busy: BUSY) -> Self {
        let _ = cs.set_high();
        Self {
            spi,
            cs,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_active_high: false,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 10,000ms (10 seconds). Set to 0 to disable timeout.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-low. Set to true for panels that hold BUSY high
    /// while working.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC, RST, BUSY) {
        (self.spi, self.cs, self.dc, self.rst, self.busy)
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Clock one byte out inside its own chip-select frame
    fn write_framed(
        &mut self,
        byte: u8,
        is_command: bool,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let written = self.write_selected(byte, is_command);
        // Release CS even if the write failed.
        let released = self.cs.set_high().map_err(InterfaceError::Pin);
        written.and(released)
    }

    fn write_selected(
        &mut self,
        byte: u8,
        is_command: bool,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        if is_command {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
        } else {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
        }
        self.spi.write(&[byte]).map_err(InterfaceError::Spi)?;
        self.spi.flush().map_err(InterfaceError::Spi)?;
        if is_command {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
        }
        Ok(())
    }

    fn is_busy(&mut self) -> InterfaceResult<bool, InterfaceError<SPI::Error, PinErr>> {
        let level = if self.busy_active_high {
            self.busy.is_high()
        } else {
            self.busy.is_low()
        };
        level.map_err(InterfaceError::Pin)
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.write_framed(command, true)
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        for &byte in data {
            self.write_framed(byte, false)?;
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        log::debug!("hardware reset");
        let _ = self.rst.set_low();
        delay.delay_ms(RESET_DELAY_MS);
        let _ = self.rst.set_high();
        delay.delay_ms(RESET_DELAY_MS);
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let timeout_ms = self.busy_timeout_ms;
        let mut waited_ms = 0u32;

        while self.is_busy()? {
            if timeout_ms > 0 && waited_ms >= timeout_ms {
                log::warn!("busy timeout after {waited_ms}ms");
                return Err(InterfaceError::Timeout);
            }
            delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
        }

        log::debug!("panel idle after {waited_ms}ms");
        Ok(())
    }
}
