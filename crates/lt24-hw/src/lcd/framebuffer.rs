//! Host-side RGB565 framebuffer.

use crate::colour::colour_to_rgb;
use crate::{Error, Result, LCD_HEIGHT, LCD_WIDTH, PIXEL_COUNT};

/// RGB565 pixel buffer in panel raster order.
///
/// Defaults to the full 240x320 panel. Smaller buffers can be blitted to any
/// position with [`Lt24::draw_framebuffer`](super::Lt24::draw_framebuffer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    /// Pixel data in RGB565 format.
    data: Vec<u16>,
    width: u16,
    height: u16,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Creates a full-panel framebuffer initialized to black.
    pub fn new() -> Self {
        Self {
            data: vec![0; PIXEL_COUNT],
            width: LCD_WIDTH,
            height: LCD_HEIGHT,
        }
    }

    /// Creates a framebuffer with custom dimensions.
    pub fn with_dimensions(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            data: vec![0; size],
            width,
            height,
        }
    }

    /// Wraps existing pixel data, which must be exactly `width * height` words.
    pub fn from_pixels(width: u16, height: u16, data: Vec<u16>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::FramebufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns a reference to the raw pixel data.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Returns a mutable reference to the raw pixel data.
    pub fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }

    /// Clears the framebuffer to a solid colour.
    pub fn clear(&mut self, colour: u16) {
        self.data.fill(colour);
    }

    /// Sets a pixel; coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, colour: u16) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.data[idx] = colour;
        }
    }

    /// Gets a pixel at the given coordinates.
    pub fn get_pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            Some(self.data[idx])
        } else {
            None
        }
    }

    /// Fills a rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, colour: u16) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, colour);
            }
        }
    }

    /// Extracts a rectangular region; pixels outside the buffer read as black.
    pub fn extract_region(&self, x: u16, y: u16, width: u16, height: u16) -> Vec<u16> {
        let mut region = Vec::with_capacity(width as usize * height as usize);
        for dy in 0..height {
            for dx in 0..width {
                let pixel = match (x.checked_add(dx), y.checked_add(dy)) {
                    (Some(px), Some(py)) => self.get_pixel(px, py).unwrap_or(0),
                    _ => 0,
                };
                region.push(pixel);
            }
        }
        region
    }

    /// Converts the framebuffer to RGBA8 bytes for PNG encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.data.len() * 4);
        for &pixel in &self.data {
            let (r, g, b) = colour_to_rgb(pixel);
            rgba.extend_from_slice(&[r, g, b, 0xFF]);
        }
        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{BLUE, RED, WHITE};

    #[test]
    fn test_framebuffer_ops() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.width(), 240);
        assert_eq!(fb.height(), 320);

        fb.set_pixel(10, 20, RED);
        assert_eq!(fb.get_pixel(10, 20), Some(RED));
        assert_eq!(fb.get_pixel(240, 0), None);

        fb.clear(WHITE);
        assert_eq!(fb.get_pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::with_dimensions(4, 4);
        fb.fill_rect(2, 2, 10, 10, BLUE);
        assert_eq!(fb.data().iter().filter(|&&p| p == BLUE).count(), 4);
        assert_eq!(fb.get_pixel(3, 3), Some(BLUE));
        assert_eq!(fb.get_pixel(1, 3), Some(0));
    }

    #[test]
    fn test_extract_region() {
        let mut fb = Framebuffer::with_dimensions(3, 2);
        fb.set_pixel(2, 1, RED);
        assert_eq!(fb.extract_region(1, 0, 3, 2), vec![0, 0, 0, 0, RED, 0]);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Framebuffer::from_pixels(2, 2, vec![0; 4]).is_ok());
        assert_eq!(
            Framebuffer::from_pixels(2, 2, vec![0; 3]),
            Err(Error::FramebufferSize {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_to_rgba8() {
        let mut fb = Framebuffer::with_dimensions(2, 1);
        fb.set_pixel(0, 0, RED);
        assert_eq!(fb.to_rgba8(), vec![0xFF, 0, 0, 0xFF, 0, 0, 0, 0xFF]);
    }
}
