//! In-memory panel that stands in for the hardware.
//!
//! Decodes the controller command stream into a [`Framebuffer`] the same way
//! the ILI9341 does, and keeps a log of every bus write for inspection.

use tracing::trace;

use crate::lcd::protocol::parse_address_range;
use crate::lcd::{Command, DeviceInterface, Framebuffer};
use crate::{LCD_HEIGHT, LCD_WIDTH};

/// Simulated LT24 panel.
#[derive(Debug, Clone)]
pub struct SimulatedPanel {
    framebuffer: Framebuffer,
    writes: Vec<(bool, u16)>,
    power_events: Vec<bool>,
    responsive: bool,
    command: Option<u16>,
    params: Vec<u16>,
    columns: (u16, u16),
    pages: (u16, u16),
    cursor: Option<(u16, u16)>,
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPanel {
    /// Creates a responsive panel with black memory and a full-panel window.
    pub fn new() -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            writes: Vec::new(),
            power_events: Vec::new(),
            responsive: true,
            command: None,
            params: Vec::new(),
            columns: (0, LCD_WIDTH - 1),
            pages: (0, LCD_HEIGHT - 1),
            cursor: None,
        }
    }

    /// Creates a panel whose bus never answers bring-up.
    pub fn failing() -> Self {
        Self {
            responsive: false,
            ..Self::new()
        }
    }

    /// Panel memory as written so far.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Reads one pixel of panel memory.
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        self.framebuffer.get_pixel(x, y)
    }

    /// Every `(is_data, value)` bus write, oldest first.
    pub fn writes(&self) -> &[(bool, u16)] {
        &self.writes
    }

    /// Power line transitions, oldest first.
    pub fn power_events(&self) -> &[bool] {
        &self.power_events
    }

    /// Command words written, oldest first.
    pub fn commands(&self) -> impl Iterator<Item = u16> + '_ {
        self.writes
            .iter()
            .filter(|(is_data, _)| !is_data)
            .map(|&(_, value)| value)
    }

    /// Data words following the most recent memory write command.
    pub fn data_after_memory_write(&self) -> Vec<u16> {
        let start = self
            .writes
            .iter()
            .rposition(|&(is_data, value)| !is_data && value == Command::MemoryWrite.word())
            .map_or(self.writes.len(), |i| i + 1);
        self.writes[start..]
            .iter()
            .take_while(|(is_data, _)| *is_data)
            .map(|&(_, value)| value)
            .collect()
    }

    /// Forgets the bus log and power history; panel memory is kept.
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.power_events.clear();
    }

    fn on_command(&mut self, value: u16) {
        self.command = Some(value);
        self.params.clear();
        if value == Command::MemoryWrite.word() {
            self.cursor = Some((self.columns.0, self.pages.0));
        } else {
            self.cursor = None;
        }
    }

    fn on_data(&mut self, value: u16) {
        match self.command {
            Some(c) if c == Command::ColumnAddressSet.word() => {
                self.params.push(value);
                if let Some(range) = parse_address_range(&self.params) {
                    self.columns = range;
                }
            }
            Some(c) if c == Command::PageAddressSet.word() => {
                self.params.push(value);
                if let Some(range) = parse_address_range(&self.params) {
                    self.pages = range;
                }
            }
            Some(c) if c == Command::MemoryWrite.word() => self.write_pixel(value),
            _ => {}
        }
    }

    fn write_pixel(&mut self, colour: u16) {
        let Some((x, y)) = self.cursor else {
            return;
        };
        self.framebuffer.set_pixel(x, y, colour);

        // Advance in raster order, wrapping inside the window
        let (x0, x1) = self.columns;
        let (y0, y1) = self.pages;
        self.cursor = Some(if x < x1 {
            (x + 1, y)
        } else if y < y1 {
            (x0, y + 1)
        } else {
            (x0, y0)
        });
    }
}

impl DeviceInterface for SimulatedPanel {
    fn write(&mut self, is_data: bool, value: u16) {
        self.writes.push((is_data, value));
        if is_data {
            self.on_data(value);
        } else {
            trace!("Command {:#04X}", value);
            self.on_command(value);
        }
    }

    fn power_config(&mut self, on: bool) {
        self.power_events.push(on);
    }

    fn bring_up(&mut self) -> bool {
        self.responsive
    }
}
