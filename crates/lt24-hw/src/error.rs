//! Error types for the LT24 panel driver.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the panel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation attempted before the panel completed bring-up.
    #[error("LCD not initialised")]
    NotInitialized,

    /// Rectangle or coordinate is zero-sized or falls outside the panel.
    #[error("Invalid size: {width}x{height} at ({left}, {top})")]
    InvalidSize {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    },

    /// Graph geometry configuration cannot be laid out.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// A column or band was drawn before any graph geometry was set.
    #[error("Graph geometry not initialised")]
    GeometryNotSet,

    /// Framebuffer size mismatch.
    #[error("Framebuffer size mismatch: expected {expected}, got {actual}")]
    FramebufferSize { expected: usize, actual: usize },

    /// Colour channel above the 8-bit range (strict encoding only).
    #[error("Colour channel {channel} out of range: {value}")]
    ChannelRange { channel: char, value: u32 },
}

impl Error {
    pub(crate) fn invalid_size(left: u32, top: u32, width: u32, height: u32) -> Self {
        Error::InvalidSize {
            left,
            top,
            width,
            height,
        }
    }
}
