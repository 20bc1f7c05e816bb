//! Drawing windows and the writer that streams pixels into them.

use tracing::debug;

use super::interface::DeviceInterface;
use crate::{Error, Result, LCD_HEIGHT, LCD_WIDTH};

/// A validated rectangle on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
}

impl Window {
    /// Creates a window, rejecting empty rectangles and any that extend past
    /// the panel edge.
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Result<Self> {
        let right = u32::from(left) + u32::from(width);
        let bottom = u32::from(top) + u32::from(height);

        if width == 0
            || height == 0
            || right > u32::from(LCD_WIDTH)
            || bottom > u32::from(LCD_HEIGHT)
        {
            return Err(Error::invalid_size(
                left.into(),
                top.into(),
                width.into(),
                height.into(),
            ));
        }

        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// The whole panel.
    pub fn full_panel() -> Self {
        Self {
            left: 0,
            top: 0,
            width: LCD_WIDTH,
            height: LCD_HEIGHT,
        }
    }

    pub fn left(&self) -> u16 {
        self.left
    }

    pub fn top(&self) -> u16 {
        self.top
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Last column inside the window.
    pub fn right(&self) -> u16 {
        self.left + self.width - 1
    }

    /// Last row inside the window.
    pub fn bottom(&self) -> u16 {
        self.top + self.height - 1
    }

    /// Number of pixels in the window.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An open write window on the panel.
///
/// Returned by [`Lt24::set_window`](super::Lt24::set_window) once the
/// controller has been addressed. It holds the driver's bus borrow, so
/// nothing else can reach the device until the writer is dropped. Pixels
/// land left-to-right, top-to-bottom; anything beyond the window's area is
/// discarded rather than sent.
pub struct WindowWriter<'a, I: DeviceInterface> {
    interface: &'a mut I,
    window: Window,
    remaining: usize,
}

impl<'a, I: DeviceInterface> WindowWriter<'a, I> {
    pub(crate) fn new(interface: &'a mut I, window: Window) -> Self {
        Self {
            interface,
            window,
            remaining: window.area(),
        }
    }

    /// The window being written.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Pixels still to be written before the window is full.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns true once every pixel of the window has been written.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Writes a single pixel.
    pub fn write(&mut self, colour: u16) {
        if self.remaining > 0 {
            self.interface.write(true, colour);
            self.remaining -= 1;
        }
    }

    /// Writes up to `remaining()` pixels from a slice, returning how many
    /// were sent.
    pub fn write_all(&mut self, colours: &[u16]) -> usize {
        self.write_iter(colours.iter().copied())
    }

    /// Writes pixels from an iterator until it ends or the window is full.
    pub fn write_iter<It: IntoIterator<Item = u16>>(&mut self, colours: It) -> usize {
        let mut sent = 0;
        for colour in colours.into_iter().take(self.remaining) {
            self.interface.write(true, colour);
            sent += 1;
        }
        self.remaining -= sent;
        sent
    }

    /// Writes `count` copies of one colour.
    pub fn fill(&mut self, colour: u16, count: usize) -> usize {
        self.write_iter(std::iter::repeat(colour).take(count))
    }

    /// Fills the rest of the window with one colour.
    pub fn fill_remaining(mut self, colour: u16) {
        let count = self.remaining;
        self.fill(colour, count);
    }
}

impl<I: DeviceInterface> Drop for WindowWriter<'_, I> {
    fn drop(&mut self) {
        if self.remaining > 0 {
            debug!(
                "Window {}x{} at ({}, {}) closed with {} pixels unwritten",
                self.window.width,
                self.window.height,
                self.window.left,
                self.window.top,
                self.remaining
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let w = Window::new(10, 20, 30, 40).unwrap();
        assert_eq!(w.right(), 39);
        assert_eq!(w.bottom(), 59);
        assert_eq!(w.area(), 1200);

        assert!(Window::new(0, 0, LCD_WIDTH, LCD_HEIGHT).is_ok());
        assert_eq!(
            Window::new(1, 0, LCD_WIDTH, 1),
            Err(Error::InvalidSize {
                left: 1,
                top: 0,
                width: 240,
                height: 1
            })
        );
        assert!(Window::new(0, 1, 1, LCD_HEIGHT).is_err());
    }

    #[test]
    fn test_window_rejects_empty() {
        assert!(Window::new(0, 0, 0, 1).is_err());
        assert!(Window::new(0, 0, 1, 0).is_err());
    }

    #[test]
    fn test_window_does_not_overflow() {
        assert!(Window::new(u16::MAX, 0, 2, 1).is_err());
        assert!(Window::new(0, u16::MAX, 1, u16::MAX).is_err());
    }

    #[test]
    fn test_full_panel() {
        assert_eq!(
            Window::full_panel(),
            Window::new(0, 0, LCD_WIDTH, LCD_HEIGHT).unwrap()
        );
        assert_eq!(Window::full_panel().area(), crate::PIXEL_COUNT);
    }
}
