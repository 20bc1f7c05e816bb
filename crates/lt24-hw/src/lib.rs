//! LT24 Panel Hardware Library
//!
//! Driver for the LT24 240x320 colour LCD (ILI9341 controller on a 16-bit
//! register-mapped bus). Provides window addressing, RGB565 colour encoding,
//! frame transfer, and a column/band geometry layer for bar-graph displays.

pub mod colour;
pub mod error;
pub mod graph;
pub mod lcd;
pub mod sim;

pub use colour::{make_colour, map_magnitude_to_colour, try_make_colour};
pub use error::{Error, Result};
pub use graph::GraphGeometry;
pub use lcd::{DeviceInterface, Framebuffer, Lt24, Window, WindowWriter};
pub use sim::SimulatedPanel;

/// LCD display dimensions
pub const LCD_WIDTH: u16 = 240;
pub const LCD_HEIGHT: u16 = 320;

/// Total pixel count for the display.
pub const PIXEL_COUNT: usize = LCD_WIDTH as usize * LCD_HEIGHT as usize;
