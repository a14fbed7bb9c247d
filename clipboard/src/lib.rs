//! Clipboard writes for QuickQR.
//!
//! # Architecture
//!
//! The crate uses a trait-based design for testability:
//! - [`ClipboardProvider`]: generic interface for writing images and text
//! - [`SystemClipboard`]: production implementation using the arboard crate
//! - [`MockClipboard`]: records writes and can be told to reject them
//!
//! # Example
//!
//! ```rust,no_run
//! use quickqr_clipboard::{ClipboardImage, ClipboardProvider, SystemClipboard};
//!
//! # let png_bytes: Vec<u8> = Vec::new();
//! let clipboard = SystemClipboard;
//! match ClipboardImage::from_encoded(&png_bytes) {
//!     Ok(image) => clipboard.set_image(&image).ok(),
//!     Err(_) => clipboard.set_text("https://example.com").ok(),
//! };
//! ```

mod mock;
mod system;

pub use mock::{ClipboardWrite, MockClipboard};
pub use system::SystemClipboard;

/// Decoded image ready to be placed on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Raw RGBA bytes, row-major.
    pub bytes: Vec<u8>,
}

impl ClipboardImage {
    /// Decode PNG, JPEG or any other format the `image` crate recognises.
    pub fn from_encoded(encoded: &[u8]) -> Result<Self, ClipboardError> {
        let decoded = image::load_from_memory(encoded)
            .map_err(|e| ClipboardError::ImageError(format!("Failed to decode image: {e}")))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            bytes: rgba.into_raw(),
        })
    }
}

/// Error types for clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// Failed to access the clipboard.
    #[error("Clipboard access error: {0}")]
    AccessError(String),
    /// Image decoding failed.
    #[error("Image processing error: {0}")]
    ImageError(String),
    /// The clipboard cannot hold images on this platform.
    #[error("Clipboard does not accept images")]
    ImageUnsupported,
}

/// Trait for clipboard writes, enabling mock implementations for testing.
pub trait ClipboardProvider: Send + Sync {
    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError>;

    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
