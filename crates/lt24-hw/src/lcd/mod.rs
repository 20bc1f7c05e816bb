//! LCD display module.
//!
//! Drives the 240x320 RGB565 panel through a [`DeviceInterface`].

mod device;
mod interface;
mod window;

pub mod framebuffer;
pub mod protocol;

pub use device::Lt24;
pub use framebuffer::Framebuffer;
pub use interface::DeviceInterface;
pub use protocol::Command;
pub use window::{Window, WindowWriter};
