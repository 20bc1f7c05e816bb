//! LT24 panel driver.

use tracing::{debug, info, trace};

use super::framebuffer::Framebuffer;
use super::interface::DeviceInterface;
use super::protocol::{address_range, Command, INIT_SEQUENCE};
use super::window::{Window, WindowWriter};
use crate::colour::{self, map_magnitude_to_colour, MAGNITUDE_MAX};
use crate::graph::GraphGeometry;
use crate::{Error, Result, LCD_HEIGHT, LCD_WIDTH};

/// Colour bars across the top of the test pattern, left to right.
const TEST_PATTERN_BARS: [u16; 8] = [
    colour::WHITE,
    colour::YELLOW,
    colour::CYAN,
    colour::GREEN,
    colour::MAGENTA,
    colour::RED,
    colour::BLUE,
    colour::BLACK,
];

/// LT24 panel controller.
///
/// Owns the bus interface. A new handle is uninitialised; every drawing
/// call fails with [`Error::NotInitialized`] without touching the bus until
/// [`initialise`](Self::initialise) has succeeded.
pub struct Lt24<I: DeviceInterface> {
    interface: I,
    initialised: bool,
    pub(crate) geometry: Option<GraphGeometry>,
}

impl<I: DeviceInterface> Lt24<I> {
    /// Wraps a bus interface. No device I/O happens until
    /// [`initialise`](Self::initialise).
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            initialised: false,
            geometry: None,
        }
    }

    /// Brings the panel up: checks the bus, power-cycles the panel, sends
    /// the controller configuration, and clears the display to black.
    pub fn initialise(&mut self) -> Result<()> {
        self.initialised = false;

        if !self.interface.bring_up() {
            debug!("LCD bus did not respond to bring-up");
            return Err(Error::NotInitialized);
        }

        self.interface.power_config(false);
        self.interface.delay_ms(10);
        self.interface.power_config(true);
        self.interface.delay_ms(120);

        for step in INIT_SEQUENCE {
            self.command(step.command, step.params);
            if step.delay_ms > 0 {
                self.interface.delay_ms(step.delay_ms);
            }
        }

        self.initialised = true;
        info!("LCD initialised ({}x{})", LCD_WIDTH, LCD_HEIGHT);

        self.clear_display(colour::BLACK)
    }

    /// Returns true once [`initialise`](Self::initialise) has succeeded.
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Returns a reference to the bus interface.
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Returns a mutable reference to the bus interface.
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Releases the bus interface.
    pub fn into_inner(self) -> I {
        self.interface
    }

    /// Drives the panel reset/power lines.
    pub fn power_config(&mut self, on: bool) -> Result<()> {
        self.ensure_initialised()?;
        self.interface.power_config(on);
        debug!("LCD power {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Addresses a drawing window and returns a writer for its pixels.
    ///
    /// Nothing is written to the bus if the driver is uninitialised or the
    /// rectangle is empty or off the panel.
    pub fn set_window(
        &mut self,
        left: u16,
        top: u16,
        width: u16,
        height: u16,
    ) -> Result<WindowWriter<'_, I>> {
        self.ensure_initialised()?;
        let window = Window::new(left, top, width, height)?;
        Ok(self.open_window(window))
    }

    /// Addresses an already validated window.
    pub(crate) fn open_window(&mut self, window: Window) -> WindowWriter<'_, I> {
        trace!(
            "Window {}x{} at ({}, {})",
            window.width(),
            window.height(),
            window.left(),
            window.top()
        );

        self.command(
            Command::ColumnAddressSet,
            &address_range(window.left(), window.right()),
        );
        self.command(
            Command::PageAddressSet,
            &address_range(window.top(), window.bottom()),
        );
        self.command(Command::MemoryWrite, &[]);

        WindowWriter::new(&mut self.interface, window)
    }

    /// Plots a single pixel.
    pub fn draw_pixel(&mut self, colour: u16, x: u16, y: u16) -> Result<()> {
        self.ensure_initialised()?;
        if x >= LCD_WIDTH || y >= LCD_HEIGHT {
            return Err(Error::invalid_size(x.into(), y.into(), 1, 1));
        }

        let mut writer = self.set_window(x, y, 1, 1)?;
        writer.write(colour);
        Ok(())
    }

    /// Copies `width * height` pixels from `buffer` into a window, row by row.
    ///
    /// Extra words past `width * height` are ignored; a shorter buffer is
    /// rejected before anything is written.
    pub fn copy_frame_buffer(
        &mut self,
        buffer: &[u16],
        left: u16,
        top: u16,
        width: u16,
        height: u16,
    ) -> Result<()> {
        self.ensure_initialised()?;
        let window = Window::new(left, top, width, height)?;
        let expected = window.area();
        if buffer.len() < expected {
            return Err(Error::FramebufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        let mut writer = self.open_window(window);
        writer.write_all(&buffer[..expected]);
        Ok(())
    }

    /// Blits a framebuffer with its top-left corner at `(left, top)`.
    pub fn draw_framebuffer(
        &mut self,
        framebuffer: &Framebuffer,
        left: u16,
        top: u16,
    ) -> Result<()> {
        self.copy_frame_buffer(
            framebuffer.data(),
            left,
            top,
            framebuffer.width(),
            framebuffer.height(),
        )
    }

    /// Fills the whole panel with one colour.
    pub fn clear_display(&mut self, colour: u16) -> Result<()> {
        self.ensure_initialised()?;
        self.open_window(Window::full_panel()).fill_remaining(colour);
        debug!("Display cleared to {:#06X}", colour);
        Ok(())
    }

    /// Draws the diagnostic pattern: eight vertical colour bars over the
    /// top three quarters, and the magnitude heat scale across the bottom
    /// quarter.
    pub fn test_pattern(&mut self) -> Result<()> {
        self.ensure_initialised()?;

        let bar_width = LCD_WIDTH / TEST_PATTERN_BARS.len() as u16;
        let bars_height = LCD_HEIGHT * 3 / 4;
        let gradient: Vec<u16> = (0..LCD_WIDTH)
            .map(|x| {
                let mag = u32::from(x) * u32::from(MAGNITUDE_MAX) / u32::from(LCD_WIDTH - 1);
                map_magnitude_to_colour(mag as u16)
            })
            .collect();

        let mut writer = self.open_window(Window::full_panel());
        for y in 0..LCD_HEIGHT {
            if y < bars_height {
                writer.write_iter(
                    (0..LCD_WIDTH).map(|x| TEST_PATTERN_BARS[(x / bar_width) as usize]),
                );
            } else {
                writer.write_all(&gradient);
            }
        }

        debug!("Test pattern drawn");
        Ok(())
    }

    /// Sends a command followed by its parameter words.
    fn command(&mut self, command: Command, params: &[u16]) {
        self.interface.write(false, command.word());
        for &param in params {
            self.interface.write(true, param);
        }
    }

    pub(crate) fn ensure_initialised(&self) -> Result<()> {
        if self.initialised {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedPanel;
    use crate::PIXEL_COUNT;

    fn panel() -> Lt24<SimulatedPanel> {
        let mut lcd = Lt24::new(SimulatedPanel::new());
        lcd.initialise().unwrap();
        lcd.interface_mut().clear_log();
        lcd
    }

    #[test]
    fn test_initialise() {
        let mut lcd = Lt24::new(SimulatedPanel::new());
        assert!(!lcd.is_initialised());
        lcd.initialise().unwrap();
        assert!(lcd.is_initialised());

        let sim = lcd.interface();
        assert_eq!(sim.power_events(), &[false, true]);
        assert!(sim.commands().any(|c| c == Command::DisplayOn.word()));
        assert!(sim.framebuffer().data().iter().all(|&p| p == colour::BLACK));
    }

    #[test]
    fn test_initialise_failure() {
        let mut lcd = Lt24::new(SimulatedPanel::failing());
        assert_eq!(lcd.initialise(), Err(Error::NotInitialized));
        assert!(!lcd.is_initialised());
        assert!(lcd.interface().writes().is_empty());
        assert!(lcd.interface().power_events().is_empty());
    }

    #[test]
    fn test_uninitialised_calls_touch_nothing() {
        let mut lcd = Lt24::new(SimulatedPanel::new());
        assert_eq!(lcd.clear_display(colour::RED), Err(Error::NotInitialized));
        assert!(matches!(lcd.set_window(0, 0, 1, 1), Err(Error::NotInitialized)));
        assert_eq!(lcd.draw_pixel(colour::RED, 0, 0), Err(Error::NotInitialized));
        assert_eq!(
            lcd.copy_frame_buffer(&[0; 4], 0, 0, 2, 2),
            Err(Error::NotInitialized)
        );
        assert_eq!(lcd.test_pattern(), Err(Error::NotInitialized));
        assert_eq!(lcd.power_config(false), Err(Error::NotInitialized));

        assert!(lcd.interface().writes().is_empty());
        assert!(lcd.interface().power_events().is_empty());
    }

    #[test]
    fn test_set_window_traffic() {
        let mut lcd = panel();
        {
            let mut writer = lcd.set_window(10, 300, 20, 20).unwrap();
            assert_eq!(writer.remaining(), 400);
            writer.write(colour::RED);
        }

        let expected = [
            (false, 0x2A),
            (true, 0x00),
            (true, 10),
            (true, 0x00),
            (true, 29),
            (false, 0x2B),
            (true, 0x01),
            (true, 300 & 0xFF),
            (true, 0x01),
            (true, 319 & 0xFF),
            (false, 0x2C),
            (true, colour::RED),
        ];
        assert_eq!(lcd.interface().writes(), &expected);
        assert_eq!(lcd.interface().pixel(10, 300), Some(colour::RED));
    }

    #[test]
    fn test_set_window_out_of_bounds_writes_nothing() {
        let mut lcd = panel();
        assert!(matches!(
            lcd.set_window(200, 0, 41, 1),
            Err(Error::InvalidSize { .. })
        ));
        assert!(matches!(
            lcd.set_window(0, 300, 1, 21),
            Err(Error::InvalidSize { .. })
        ));
        assert!(matches!(
            lcd.set_window(0, 0, 0, 5),
            Err(Error::InvalidSize { .. })
        ));
        assert!(lcd.interface().writes().is_empty());
    }

    #[test]
    fn test_writer_clamps_to_window() {
        let mut lcd = panel();
        {
            let mut writer = lcd.set_window(0, 0, 2, 2).unwrap();
            assert_eq!(writer.write_all(&[1, 2, 3, 4, 5, 6]), 4);
            assert!(writer.is_complete());
            writer.write(7);
        }
        assert_eq!(lcd.interface().data_after_memory_write(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_draw_pixel() {
        let mut lcd = panel();
        lcd.draw_pixel(colour::GREEN, 239, 319).unwrap();
        assert_eq!(lcd.interface().pixel(239, 319), Some(colour::GREEN));
        assert_eq!(lcd.interface().data_after_memory_write(), vec![colour::GREEN]);
    }

    #[test]
    fn test_draw_pixel_right_edge() {
        let mut lcd = panel();
        assert!(matches!(
            lcd.draw_pixel(colour::RED, LCD_WIDTH, 0),
            Err(Error::InvalidSize { .. })
        ));
        assert!(matches!(
            lcd.draw_pixel(colour::RED, 0, LCD_HEIGHT),
            Err(Error::InvalidSize { .. })
        ));
        assert!(lcd.interface().writes().is_empty());
    }

    #[test]
    fn test_copy_full_frame_buffer() {
        let mut lcd = panel();
        let buffer = vec![colour::MAGENTA; PIXEL_COUNT];
        lcd.copy_frame_buffer(&buffer, 0, 0, LCD_WIDTH, LCD_HEIGHT).unwrap();

        let data = lcd.interface().data_after_memory_write();
        assert_eq!(data.len(), PIXEL_COUNT);
        assert!(data.iter().all(|&p| p == colour::MAGENTA));
    }

    #[test]
    fn test_copy_frame_buffer_row_major() {
        let mut lcd = panel();
        let buffer: Vec<u16> = (0..12).collect();
        lcd.copy_frame_buffer(&buffer, 100, 50, 4, 3).unwrap();

        let sim = lcd.interface();
        assert_eq!(sim.data_after_memory_write(), buffer);
        assert_eq!(sim.pixel(100, 50), Some(0));
        assert_eq!(sim.pixel(103, 50), Some(3));
        assert_eq!(sim.pixel(100, 51), Some(4));
        assert_eq!(sim.pixel(103, 52), Some(11));
        assert_eq!(sim.pixel(104, 50), Some(colour::BLACK));
    }

    #[test]
    fn test_copy_frame_buffer_short_buffer() {
        let mut lcd = panel();
        assert_eq!(
            lcd.copy_frame_buffer(&[0; 5], 0, 0, 3, 2),
            Err(Error::FramebufferSize {
                expected: 6,
                actual: 5
            })
        );
        assert!(lcd.interface().writes().is_empty());
    }

    #[test]
    fn test_draw_framebuffer() {
        let mut lcd = panel();
        let mut sprite = Framebuffer::with_dimensions(3, 3);
        sprite.fill_rect(1, 1, 1, 1, colour::CYAN);
        lcd.draw_framebuffer(&sprite, 5, 5).unwrap();
        assert_eq!(lcd.interface().pixel(6, 6), Some(colour::CYAN));
        assert_eq!(lcd.interface().pixel(5, 5), Some(colour::BLACK));
    }

    #[test]
    fn test_clear_display() {
        let mut lcd = panel();
        lcd.clear_display(colour::YELLOW).unwrap();

        let data = lcd.interface().data_after_memory_write();
        assert_eq!(data.len(), PIXEL_COUNT);
        assert!(lcd
            .interface()
            .framebuffer()
            .data()
            .iter()
            .all(|&p| p == colour::YELLOW));
    }

    #[test]
    fn test_test_pattern() {
        let mut lcd = panel();
        lcd.test_pattern().unwrap();

        let sim = lcd.interface();
        assert_eq!(sim.data_after_memory_write().len(), PIXEL_COUNT);
        assert_eq!(sim.pixel(0, 0), Some(colour::WHITE));
        assert_eq!(sim.pixel(30, 100), Some(colour::YELLOW));
        assert_eq!(sim.pixel(239, 239), Some(colour::BLACK));
        assert_eq!(sim.pixel(0, 240), Some(colour::BLUE));
        assert_eq!(sim.pixel(239, 319), Some(colour::RED));
    }

    #[test]
    fn test_test_pattern_is_deterministic() {
        let mut lcd = panel();
        lcd.test_pattern().unwrap();
        let first = lcd.interface().framebuffer().clone();
        lcd.clear_display(colour::BLACK).unwrap();
        lcd.test_pattern().unwrap();
        assert_eq!(lcd.interface().framebuffer(), &first);
    }
}
