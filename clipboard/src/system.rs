use crate::{ClipboardError, ClipboardImage, ClipboardProvider};

/// System clipboard implementation using the `arboard` crate.
///
/// A fresh `arboard::Clipboard` is opened per write.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardProvider for SystemClipboard {
    fn set_image(&self, image: &ClipboardImage) -> Result<(), ClipboardError> {
        use std::borrow::Cow;

        use arboard::{Clipboard, ImageData};

        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;

        clipboard
            .set_image(ImageData {
                width: image.width,
                height: image.height,
                bytes: Cow::Borrowed(&image.bytes),
            })
            .map_err(|e| match e {
                arboard::Error::ConversionFailure => ClipboardError::ImageUnsupported,
                other => ClipboardError::AccessError(other.to_string()),
            })?;

        log::debug!(
            "Copied {}x{} image to the clipboard",
            image.width,
            image.height
        );
        Ok(())
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        use arboard::Clipboard;

        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::AccessError(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::AccessError(e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ClipboardProvider for SystemClipboard {
    fn set_image(&self, _image: &ClipboardImage) -> Result<(), ClipboardError> {
        Err(ClipboardError::ImageUnsupported)
    }

    fn set_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::AccessError(
            "Clipboard is not available on this platform".to_owned(),
        ))
    }
}
