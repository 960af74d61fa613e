//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_WIDTH};

/// Physical panel geometry
///
/// Width and height are in pixels, in the panel's native (unrotated)
/// orientation. Rows are packed eight pixels per byte, MSB first, so each row
/// occupies `ceil(width / 8)` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Horizontal resolution (source outputs)
    pub width: u16,
    /// Vertical resolution (gate outputs)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// `width` exceeds [`MAX_WIDTH`] (the resolution command carries the
    /// width in a single byte).
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bytes per framebuffer row
    pub fn width_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Framebuffer rows
    pub fn height_bytes(&self) -> usize {
        self.height as usize
    }

    /// Exact framebuffer length in bytes
    pub fn buffer_size(&self) -> usize {
        self.width_bytes() * self.height_bytes()
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

impl Rotation {
    /// Whether logical width and height are swapped relative to the panel
    pub fn is_transposed(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Display configuration
///
/// Parameter bytes for the wake sequence. Defaults are the values for the
/// 1.54" 152x152 panel. Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Display rotation
    pub rotation: Rotation,
    /// Power setting (5 bytes for command 0x01)
    pub power_setting: [u8; 5],
    /// Booster soft-start settings (3 bytes for command 0x06)
    pub booster_soft_start: [u8; 3],
    /// Panel setting (2 bytes for command 0x00)
    pub panel_setting: [u8; 2],
    /// PLL / frame rate byte (command 0x30)
    pub pll_control: u8,
    /// VCOM DC level (command 0x82)
    pub vcom_dc: u8,
    /// VCOM and data interval (command 0x50)
    pub vcom_data_interval: u8,
    /// Check byte sent with deep sleep (command 0x07)
    pub deep_sleep_check: u8,
}

impl Config {
    /// Get the logical dimensions seen by drawing calls
    pub fn rotated_dimensions(&self) -> Dimensions {
        if self.rotation.is_transposed() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }

    /// Resolution setting bytes: width, height high byte, height low byte
    pub fn resolution_bytes(&self) -> [u8; 3] {
        let height = self.dimensions.height;
        [
            self.dimensions.width as u8,
            (height >> 8) as u8,
            (height & 0xFF) as u8,
        ]
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use il0373::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(152, 152) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate90).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.resolution_bytes(), [152, 0, 152]);
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    rotation: Rotation,
    power_setting: [u8; 5],
    booster_soft_start: [u8; 3],
    panel_setting: [u8; 2],
    pll_control: u8,
    vcom_dc: u8,
    vcom_data_interval: u8,
    deep_sleep_check: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            // Internal DC/DC for source and gate, VGH/VGL 16V, VDH/VDL 11V, VDHR 3V
            power_setting: [0x03, 0x00, 0x2B, 0x2B, 0x03],
            booster_soft_start: [0x17, 0x17, 0x17],
            // LUT from registers, VCOM to 0V fast
            panel_setting: [0xBF, 0x0D],
            // 100 Hz
            pll_control: 0x3A,
            vcom_dc: 0x08,
            vcom_data_interval: 0x97,
            deep_sleep_check: crate::command::DEEP_SLEEP_CHECK,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set power setting parameters
    pub fn power_setting(mut self, values: [u8; 5]) -> Self {
        self.power_setting = values;
        self
    }

    /// Set booster soft-start parameters
    pub fn booster_soft_start(mut self, values: [u8; 3]) -> Self {
        self.booster_soft_start = values;
        self
    }

    /// Set panel setting parameters
    pub fn panel_setting(mut self, values: [u8; 2]) -> Self {
        self.panel_setting = values;
        self
    }

    /// Set the PLL (frame rate) byte
    pub fn pll_control(mut self, value: u8) -> Self {
        self.pll_control = value;
        self
    }

    /// Set VCOM DC level
    pub fn vcom_dc(mut self, value: u8) -> Self {
        self.vcom_dc = value;
        self
    }

    /// Set VCOM and data interval
    pub fn vcom_data_interval(mut self, value: u8) -> Self {
        self.vcom_data_interval = value;
        self
    }

    /// Set the deep sleep check byte
    pub fn deep_sleep_check(mut self, value: u8) -> Self {
        self.deep_sleep_check = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            power_setting: self.power_setting,
            booster_soft_start: self.booster_soft_start,
            panel_setting: self.panel_setting,
            pll_control: self.pll_control,
            vcom_dc: self.vcom_dc,
            vcom_data_interval: self.vcom_data_interval,
            deep_sleep_check: self.deep_sleep_check,
        })
    }
}
