//! Panel protocol
//!
//! [`Display`] drives the IL0373 through its power states:
//!
//! ```text
//! Uninitialized --wake--> Awake --sleep--> Asleep
//!                           ^                |
//!                           +------wake------+
//! ```
//!
//! A refresh always ends with the panel back in deep sleep, so each
//! [`update`](Display::update) is a full wake, transfer, refresh and sleep
//! cycle. Any failure drops the state back to `Uninitialized`; the next
//! update then starts over from a hardware reset.

use embedded_hal::delay::DelayNs;

use crate::command;
use crate::config::{Config, Dimensions, Rotation};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::lut;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Power state of the panel as tracked by the driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Not initialized since power-up, a reset or a failed operation
    #[default]
    Uninitialized,
    /// Powered and configured; memory transfer and refresh are allowed
    Awake,
    /// In deep sleep; a wake (with hardware reset) is needed
    Asleep,
}

/// Core display driver for IL0373
///
/// Owns the hardware interface and sequences the controller commands. For
/// drawing, pair it with a [`Canvas`](crate::canvas::Canvas) or use the
/// [`Driver`](crate::driver::Driver) that bundles both.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Tracked power state
    state: PowerState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// No bus traffic happens until the first [`wake`](Self::wake).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: PowerState::Uninitialized,
        }
    }

    /// Pulse the reset line
    ///
    /// The controller comes out of reset unconfigured.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        self.interface.reset(delay);
        self.state = PowerState::Uninitialized;
    }

    /// Reset, power up and load the full-update waveform
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let result = self.wake_sequence(delay);
        self.settle(result, PowerState::Awake)
    }

    /// Alias of [`wake`](Self::wake)
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.wake(delay)
    }

    /// Send the framebuffer to panel memory
    ///
    /// The old-data plane is filled with white and the new-data plane gets
    /// the framebuffer inverted, the controller treating a set bit as white.
    pub fn push_framebuffer(&mut self, buffer: &[u8]) -> DisplayResult<I> {
        let result = self.push_sequence(buffer);
        self.settle(result, self.state)
    }

    /// Refresh the panel from its memory, then put it to sleep
    pub fn refresh<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let result = self.refresh_sequence(delay);
        self.settle(result, PowerState::Asleep)
    }

    /// Power down and enter deep sleep
    ///
    /// Does nothing unless the panel is awake.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if self.state != PowerState::Awake {
            return Ok(());
        }
        let result = self.sleep_sequence(delay);
        self.settle(result, PowerState::Asleep)
    }

    /// Show `buffer`: wake if needed, transfer, refresh and sleep
    pub fn update<D: DelayNs>(&mut self, buffer: &[u8], delay: &mut D) -> DisplayResult<I> {
        if self.state != PowerState::Awake {
            self.wake(delay)?;
        }
        self.push_framebuffer(buffer)?;
        self.refresh(delay)
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Whether memory transfer and refresh are currently allowed
    pub fn is_awake(&self) -> bool {
        self.state == PowerState::Awake
    }

    /// Get the physical panel dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Get the configured rotation
    pub fn rotation(&self) -> Rotation {
        self.config.rotation
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the interface, e.g. to adjust busy handling
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Record the state an operation leaves behind
    fn settle(&mut self, result: DisplayResult<I>, next: PowerState) -> DisplayResult<I> {
        self.state = if result.is_ok() {
            next
        } else {
            PowerState::Uninitialized
        };
        result
    }

    fn wake_sequence<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("wake");
        self.interface.reset(delay);

        self.send_command(command::POWER_SETTING)?;
        let power_setting = self.config.power_setting;
        self.send_data(&power_setting)?;

        self.send_command(command::BOOSTER_SOFT_START)?;
        let booster_soft_start = self.config.booster_soft_start;
        self.send_data(&booster_soft_start)?;

        self.send_command(command::POWER_ON)?;
        self.busy_wait(delay)?;

        self.send_command(command::PANEL_SETTING)?;
        let panel_setting = self.config.panel_setting;
        self.send_data(&panel_setting)?;

        self.send_command(command::PLL_CONTROL)?;
        self.send_data(&[self.config.pll_control])?;

        self.send_command(command::RESOLUTION_SETTING)?;
        self.send_data(&self.config.resolution_bytes())?;

        self.load_full_update_waveform()
    }

    fn load_full_update_waveform(&mut self) -> DisplayResult<I> {
        self.send_command(command::VCM_DC_SETTING)?;
        self.send_data(&[self.config.vcom_dc])?;

        self.send_command(command::VCOM_AND_DATA_INTERVAL)?;
        self.send_data(&[self.config.vcom_data_interval])?;

        self.send_command(command::LUT_VCOM_DC)?;
        self.send_data(&lut::LUT_VCOM_DC)?;
        self.send_command(command::LUT_WW)?;
        self.send_data(&lut::LUT_WW)?;
        self.send_command(command::LUT_BW)?;
        self.send_data(&lut::LUT_BW)?;
        self.send_command(command::LUT_WB)?;
        self.send_data(&lut::LUT_WB)?;
        self.send_command(command::LUT_BB)?;
        self.send_data(&lut::LUT_BB)
    }

    fn push_sequence(&mut self, buffer: &[u8]) -> DisplayResult<I> {
        if self.state != PowerState::Awake {
            return Err(Error::NotAwake);
        }
        let size = self.config.dimensions.buffer_size();
        let Some(frame) = buffer.get(..size) else {
            return Err(Error::BufferTooSmall {
                required: size,
                provided: buffer.len(),
            });
        };

        log::debug!("writing {size} bytes to panel memory");
        self.send_command(command::DATA_START_TRANSMISSION_1)?;
        self.interface
            .send_data_iter(core::iter::repeat_n(0xFF, size))
            .map_err(Error::Interface)?;

        self.send_command(command::DATA_START_TRANSMISSION_2)?;
        self.interface
            .send_data_iter(frame.iter().map(|byte| !byte))
            .map_err(Error::Interface)
    }

    fn refresh_sequence<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if self.state != PowerState::Awake {
            return Err(Error::NotAwake);
        }
        log::debug!("refresh");
        self.send_command(command::DISPLAY_REFRESH)?;
        self.busy_wait(delay)?;
        self.sleep_sequence(delay)
    }

    fn sleep_sequence<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("deep sleep");
        self.send_command(command::POWER_OFF)?;
        self.busy_wait(delay)?;
        self.send_command(command::DEEP_SLEEP)?;
        self.send_data(&[self.config.deep_sleep_check])
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.busy_wait(delay).map_err(Error::Interface)
    }

    /// Send command via interface
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data via interface
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Dimensions};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    #[derive(Debug)]
    struct MockInterface {
        commands: Vec<u8>,
        command_data: Vec<(u8, Vec<u8>)>,
        resets: u32,
        busy_waits: u32,
        fail_on_command: Option<u8>,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                commands: Vec::new(),
                command_data: Vec::new(),
                resets: 0,
                busy_waits: 0,
                fail_on_command: None,
            }
        }

        fn data_for(&self, command: u8) -> &[u8] {
            self.command_data
                .iter()
                .rev()
                .find(|(cmd, _)| *cmd == command)
                .map(|(_, data)| data.as_slice())
                .unwrap_or(&[])
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = MockError;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            if self.fail_on_command == Some(command) {
                return Err(MockError);
            }
            self.commands.push(command);
            self.command_data.push((command, Vec::new()));
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some((_, bytes)) = self.command_data.last_mut() {
                bytes.extend_from_slice(data);
            }
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
            self.resets += 1;
        }

        fn busy_wait<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            self.busy_waits += 1;
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display() -> Display<MockInterface> {
        let config = Builder::new()
            .dimensions(Dimensions::new(152, 152).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface::new(), config)
    }

    const WAKE_COMMANDS: [u8; 13] = [
        0x01, 0x06, 0x04, 0x00, 0x30, 0x61, 0x82, 0x50, 0x20, 0x21, 0x22, 0x23, 0x24,
    ];

    #[test]
    fn test_new_display_is_uninitialized() {
        let display = test_display();
        assert_eq!(display.state(), PowerState::Uninitialized);
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_wake_sequence() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        assert_eq!(display.state(), PowerState::Awake);

        let interface = &display.interface;
        assert_eq!(interface.resets, 1);
        assert_eq!(interface.busy_waits, 1);
        assert_eq!(interface.commands, WAKE_COMMANDS);
        assert_eq!(interface.data_for(0x01), [0x03, 0x00, 0x2B, 0x2B, 0x03]);
        assert_eq!(interface.data_for(0x06), [0x17, 0x17, 0x17]);
        assert!(interface.data_for(0x04).is_empty());
        assert_eq!(interface.data_for(0x00), [0xBF, 0x0D]);
        assert_eq!(interface.data_for(0x30), [0x3A]);
        assert_eq!(interface.data_for(0x61), [152, 0x00, 152]);
        assert_eq!(interface.data_for(0x82), [0x08]);
        assert_eq!(interface.data_for(0x50), [0x97]);
        assert_eq!(interface.data_for(0x20), lut::LUT_VCOM_DC);
        assert_eq!(interface.data_for(0x21), lut::LUT_WW);
        assert_eq!(interface.data_for(0x22), lut::LUT_BW);
        assert_eq!(interface.data_for(0x23), lut::LUT_WB);
        assert_eq!(interface.data_for(0x24), lut::LUT_BB);
    }

    #[test]
    fn test_init_is_wake() {
        let mut display = test_display();
        display.init(&mut MockDelay).unwrap();
        assert!(display.is_awake());
        assert_eq!(display.interface.commands, WAKE_COMMANDS);
    }

    #[test]
    fn test_resolution_uses_high_byte_of_height() {
        let config = Builder::new()
            .dimensions(Dimensions::new(128, 296).unwrap())
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display.wake(&mut MockDelay).unwrap();
        assert_eq!(display.interface.data_for(0x61), [128, 0x01, 0x28]);
    }

    #[test]
    fn test_push_requires_awake() {
        let mut display = test_display();
        let buffer = vec![0u8; 2888];
        let result = display.push_framebuffer(&buffer);
        assert!(matches!(result, Err(Error::NotAwake)));
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_push_rejects_short_buffer() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        let result = display.push_framebuffer(&[0u8; 100]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                required: 2888,
                provided: 100
            })
        ));
        assert_eq!(display.state(), PowerState::Uninitialized);
    }

    #[test]
    fn test_push_writes_white_then_inverted_frame() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();

        let mut buffer = vec![0u8; 2888];
        buffer[0] = 0x80;
        buffer[2887] = 0x0F;
        display.push_framebuffer(&buffer).unwrap();
        assert!(display.is_awake());

        let old = display.interface.data_for(0x10);
        assert_eq!(old.len(), 2888);
        assert!(old.iter().all(|b| *b == 0xFF));

        let new = display.interface.data_for(0x13);
        assert_eq!(new.len(), 2888);
        assert_eq!(new[0], 0x7F);
        assert_eq!(new[1], 0xFF);
        assert_eq!(new[2887], 0xF0);
    }

    #[test]
    fn test_push_ignores_bytes_past_frame() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        display.push_framebuffer(&[0u8; 3000]).unwrap();
        assert_eq!(display.interface.data_for(0x13).len(), 2888);
    }

    #[test]
    fn test_refresh_ends_asleep() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        display.interface.commands.clear();
        display.refresh(&mut MockDelay).unwrap();

        assert_eq!(display.state(), PowerState::Asleep);
        assert_eq!(display.interface.commands, [0x12, 0x02, 0x07]);
        assert_eq!(display.interface.data_for(0x07), [0xA5]);
        // wake, refresh and power off each wait once
        assert_eq!(display.interface.busy_waits, 3);
    }

    #[test]
    fn test_refresh_requires_awake() {
        let mut display = test_display();
        assert!(matches!(
            display.refresh(&mut MockDelay),
            Err(Error::NotAwake)
        ));
    }

    #[test]
    fn test_sleep_only_when_awake() {
        let mut display = test_display();
        display.sleep(&mut MockDelay).unwrap();
        assert!(display.interface.commands.is_empty());
        assert_eq!(display.state(), PowerState::Uninitialized);

        display.wake(&mut MockDelay).unwrap();
        display.sleep(&mut MockDelay).unwrap();
        assert_eq!(display.state(), PowerState::Asleep);
        let count = display.interface.commands.len();
        display.sleep(&mut MockDelay).unwrap();
        assert_eq!(display.interface.commands.len(), count);
    }

    #[test]
    fn test_update_runs_full_cycle_each_time() {
        let mut display = test_display();
        let buffer = vec![0u8; 2888];

        display.update(&buffer, &mut MockDelay).unwrap();
        assert_eq!(display.state(), PowerState::Asleep);
        let first = display.interface.commands.clone();
        let mut expected = WAKE_COMMANDS.to_vec();
        expected.extend_from_slice(&[0x10, 0x13, 0x12, 0x02, 0x07]);
        assert_eq!(first, expected);

        display.update(&buffer, &mut MockDelay).unwrap();
        assert_eq!(display.state(), PowerState::Asleep);
        assert_eq!(display.interface.commands[first.len()..], first[..]);
        assert_eq!(display.interface.resets, 2);
    }

    #[test]
    fn test_update_when_awake_skips_wake() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        display.interface.commands.clear();
        display.update(&[0u8; 2888], &mut MockDelay).unwrap();
        assert_eq!(display.interface.commands, [0x10, 0x13, 0x12, 0x02, 0x07]);
        assert_eq!(display.interface.resets, 1);
    }

    #[test]
    fn test_failure_resets_state() {
        let mut display = test_display();
        display.interface.fail_on_command = Some(command::DISPLAY_REFRESH);
        let result = display.update(&[0u8; 2888], &mut MockDelay);
        assert!(matches!(result, Err(Error::Interface(MockError))));
        assert_eq!(display.state(), PowerState::Uninitialized);

        // the next update starts again from a reset
        display.interface.fail_on_command = None;
        display.update(&[0u8; 2888], &mut MockDelay).unwrap();
        assert_eq!(display.interface.resets, 2);
        assert_eq!(display.state(), PowerState::Asleep);
    }

    #[test]
    fn test_custom_wake_parameters() {
        let config = Builder::new()
            .dimensions(Dimensions::new(104, 212).unwrap())
            .panel_setting([0x1F, 0x0D])
            .vcom_data_interval(0x17)
            .deep_sleep_check(0xA5)
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display.update(&[0u8; 13 * 212], &mut MockDelay).unwrap();
        assert_eq!(display.interface.data_for(0x00), [0x1F, 0x0D]);
        assert_eq!(display.interface.data_for(0x50), [0x17]);
        assert_eq!(display.interface.data_for(0x13).len(), 13 * 212);
    }

    #[test]
    fn test_reset_returns_to_uninitialized() {
        let mut display = test_display();
        display.wake(&mut MockDelay).unwrap();
        display.reset(&mut MockDelay);
        assert_eq!(display.state(), PowerState::Uninitialized);
        assert_eq!(display.interface.resets, 2);
    }
}
