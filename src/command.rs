//! IL0373 command definitions
//!
//! Command bytes understood by the IL0373 controller. Every byte on the wire
//! is framed individually: chip select is asserted, the DC line selects
//! command (low) or data (high), one byte is clocked out and chip select is
//! released again. The controller latches the DC level on the falling edge of
//! chip select, so the framing is part of the protocol.
//!
//! ## Example
//!
//! ```rust,no_run
//! use il0373::{command, DisplayInterface, Interface};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//! let _ = interface.send_command(command::PLL_CONTROL);
//! let _ = interface.send_data(&[0x3A]);
//! ```

// Power and panel setup

/// Panel setting (0x00)
///
/// Requires 2 bytes: resolution/LUT source/scan direction, then VCOM behavior.
pub const PANEL_SETTING: u8 = 0x00;

/// Power setting (0x01)
///
/// Requires 5 bytes: source/gate power enable, VCOM level, VDH, VDL, VDHR.
pub const POWER_SETTING: u8 = 0x01;

/// Power off (0x02)
///
/// BUSY is held while the charge pumps discharge.
pub const POWER_OFF: u8 = 0x02;

/// Power on (0x04)
///
/// BUSY is held until the booster is up.
pub const POWER_ON: u8 = 0x04;

/// Booster soft start (0x06)
///
/// Requires 3 bytes: phase A, B and C soft-start timing.
pub const BOOSTER_SOFT_START: u8 = 0x06;

/// Deep sleep (0x07)
///
/// Requires 1 check byte ([`DEEP_SLEEP_CHECK`]). Only a hardware reset wakes
/// the controller again.
pub const DEEP_SLEEP: u8 = 0x07;

/// Check code that must follow [`DEEP_SLEEP`]
pub const DEEP_SLEEP_CHECK: u8 = 0xA5;

// Display RAM

/// Data start transmission 1 (0x10)
///
/// Writes the "old" image plane, one bit per pixel.
pub const DATA_START_TRANSMISSION_1: u8 = 0x10;

/// Display refresh (0x12)
///
/// Runs the waveform over the whole panel. BUSY is held for the duration.
pub const DISPLAY_REFRESH: u8 = 0x12;

/// Data start transmission 2 (0x13)
///
/// Writes the "new" image plane, one bit per pixel (bit=1 white).
pub const DATA_START_TRANSMISSION_2: u8 = 0x13;

// Waveform look-up tables

/// VCOM LUT (0x20), 44 bytes
pub const LUT_VCOM_DC: u8 = 0x20;
/// White-to-white LUT (0x21), 42 bytes
pub const LUT_WW: u8 = 0x21;
/// Black-to-white LUT (0x22), 42 bytes
pub const LUT_BW: u8 = 0x22;
/// White-to-black LUT (0x23), 42 bytes
pub const LUT_WB: u8 = 0x23;
/// Black-to-black LUT (0x24), 42 bytes
pub const LUT_BB: u8 = 0x24;

// Timing and voltages

/// PLL control (0x30)
///
/// Requires 1 byte selecting the frame rate (0x3A = 100 Hz).
pub const PLL_CONTROL: u8 = 0x30;

/// VCOM and data interval setting (0x50)
///
/// Requires 1 byte: border data and VCOM/data interval.
pub const VCOM_AND_DATA_INTERVAL: u8 = 0x50;

/// Resolution setting (0x61)
///
/// Requires 3 bytes: horizontal resolution, vertical resolution high byte,
/// vertical resolution low byte.
pub const RESOLUTION_SETTING: u8 = 0x61;

/// VCOM DC setting (0x82)
///
/// Requires 1 byte.
pub const VCM_DC_SETTING: u8 = 0x82;
