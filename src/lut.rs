//! Full-refresh waveform tables
//!
//! Register-based look-up tables for the 1.54" 152x152 IL0373 panel
//! (GDEW0154T8). They are programmed on every wake because deep sleep loses
//! the LUT registers. Each phase row is six bytes: level selection, four
//! frame counts and a repeat count.

/// Length of the VCOM LUT
pub const LUT_VCOM_LEN: usize = 44;
/// Length of each of the four pixel-transition LUTs
pub const LUT_PIXEL_LEN: usize = 42;

/// VCOM waveform (command 0x20)
pub const LUT_VCOM_DC: [u8; LUT_VCOM_LEN] = [
    0x00, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x60, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x00, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0x00, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00,
];

/// White-to-white waveform (command 0x21)
pub const LUT_WW: [u8; LUT_PIXEL_LEN] = [
    0x40, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x40, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0xA0, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Black-to-white waveform (command 0x22)
pub const LUT_BW: [u8; LUT_PIXEL_LEN] = LUT_WW;

/// White-to-black waveform (command 0x23)
pub const LUT_WB: [u8; LUT_PIXEL_LEN] = [
    0x80, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x80, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0x50, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Black-to-black waveform (command 0x24)
pub const LUT_BB: [u8; LUT_PIXEL_LEN] = LUT_WB;
