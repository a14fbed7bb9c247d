use std::sync::Mutex;

use crate::{ClipboardError, ClipboardImage, ClipboardProvider};

/// A successful write recorded by [`MockClipboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardWrite {
    Image { width: usize, height: usize },
    Text(String),
}

/// In-memory clipboard for tests.
#[derive(Debug, Default)]
pub struct MockClipboard {
    writes: Mutex<Vec<ClipboardWrite>>,
    reject_images: bool,
    reject_text: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `set_image` with [`ClipboardError::ImageUnsupported`].
    pub fn rejecting_images() -> Self {
        Self {
            reject_images: true,
            ..Self::default()
        }
    }

    /// Fail every write.
    pub fn rejecting_all() -> Self {
        Self {
            reject_images: true,
            reject_text: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<ClipboardWrite> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    pub fn last_write(&self) -> Option<ClipboardWrite> {
        self.writes().pop()
    }

    fn record(&self, write: ClipboardWrite) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .map_err(|e| ClipboardError::AccessError(e.to_string()))?
            .push(write);
        Ok(())
    }
}

impl ClipboardProvider for MockClipboard {
    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError> {
        if self.reject_images {
            return Err(ClipboardError::ImageUnsupported);
        }
        self.record(ClipboardWrite::Image {
            width: image.width,
            height: image.height,
        })
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.reject_text {
            return Err(ClipboardError::AccessError("Mock error".to_owned()));
        }
        self.record(ClipboardWrite::Text(text.to_owned()))
    }
}
