//! Download and copy actions for a generated QR code.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use quickqr_clipboard::{ClipboardImage, ClipboardProvider};
use quickqr_states::{Command, CommandFuture, CommandSnapshot, State, Updater};
use tokio_util::sync::CancellationToken;

use crate::config::GeneratorConfig;
use crate::error::ActionError;
use crate::generation::QrCodeCompute;
use crate::page::QrPageInput;
use crate::qr_api::fetch_image_bytes;
use crate::toast::{Toast, ToastQueue};

/// Name of the saved file inside the download directory.
pub const QR_CODE_FILENAME: &str = "qr-code.png";

pub const DOWNLOADED_TITLE: &str = "QR Code Downloaded";
pub const DOWNLOADED_DESCRIPTION: &str = "Your QR code has been saved successfully.";
pub const COPIED_IMAGE_TITLE: &str = "Copied to Clipboard";
pub const COPIED_IMAGE_DESCRIPTION: &str = "QR code image copied successfully.";
pub const COPIED_TEXT_TITLE: &str = "Text Copied";
pub const COPIED_TEXT_DESCRIPTION: &str = "Input text copied to clipboard.";

/// The clipboard commands write to.
#[derive(Clone)]
pub struct ClipboardState {
    inner: Arc<dyn ClipboardProvider>,
}

impl ClipboardState {
    pub fn new(provider: impl ClipboardProvider + 'static) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    pub fn from_arc(provider: Arc<dyn ClipboardProvider>) -> Self {
        Self { inner: provider }
    }

    pub fn provider(&self) -> Arc<dyn ClipboardProvider> {
        Arc::clone(&self.inner)
    }
}

impl std::fmt::Debug for ClipboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardState").finish_non_exhaustive()
    }
}

impl State for ClipboardState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

fn current_image_url(snap: &CommandSnapshot) -> Option<String> {
    snap.try_compute::<QrCodeCompute>()
        .ok()
        .and_then(|qr| qr.image_url.clone())
}

fn push_toast(updater: &Updater, toast: Toast) {
    updater.update::<ToastQueue>(move |queue| queue.push(toast));
}

/// Saves the current QR image as [`QR_CODE_FILENAME`] in the download directory.
#[derive(Debug, Default)]
pub struct DownloadQrCommand;

impl DownloadQrCommand {
    async fn save(
        config: &GeneratorConfig,
        image_url: Option<&str>,
    ) -> Result<PathBuf, ActionError> {
        let image_url = image_url.ok_or(ActionError::NoImage)?;
        let bytes = fetch_image_bytes(config, image_url).await?;

        let dir = config.download_dir();
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(QR_CODE_FILENAME);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

impl Command for DownloadQrCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = match snap.try_state::<GeneratorConfig>() {
            Ok(config) => config.clone(),
            Err(e) => {
                error!("DownloadQrCommand: {e}");
                return Box::pin(async {});
            }
        };
        let image_url = current_image_url(&snap);

        Box::pin(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = Self::save(&config, image_url.as_deref()) => result,
            };

            match result {
                Ok(path) => {
                    info!("Saved QR code to {}", path.display());
                    push_toast(
                        &updater,
                        Toast::new(DOWNLOADED_TITLE, DOWNLOADED_DESCRIPTION),
                    );
                }
                Err(e) => error!("Failed to download QR code: {e}"),
            }
        })
    }
}

/// Copies the current QR image to the clipboard, falling back to the input text.
#[derive(Debug, Default)]
pub struct CopyQrCommand;

impl CopyQrCommand {
    async fn copy_image(
        config: &GeneratorConfig,
        image_url: Option<&str>,
        clipboard: Arc<dyn ClipboardProvider>,
    ) -> Result<(), ActionError> {
        let image_url = image_url.ok_or(ActionError::NoImage)?;
        let bytes = fetch_image_bytes(config, image_url).await?;

        tokio::task::spawn_blocking(move || {
            let image = ClipboardImage::from_encoded(&bytes)?;
            clipboard.set_image(&image)
        })
        .await??;
        Ok(())
    }

    async fn copy_text(
        text: String,
        clipboard: Arc<dyn ClipboardProvider>,
    ) -> Result<(), ActionError> {
        tokio::task::spawn_blocking(move || clipboard.set_text(&text)).await??;
        Ok(())
    }
}

impl Command for CopyQrCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (config, clipboard, text) = match (
            snap.try_state::<GeneratorConfig>(),
            snap.try_state::<ClipboardState>(),
            snap.try_state::<QrPageInput>(),
        ) {
            (Ok(config), Ok(clipboard), Ok(page)) => {
                (config.clone(), clipboard.provider(), page.value.clone())
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                error!("CopyQrCommand: {e}");
                return Box::pin(async {});
            }
        };
        let image_url = current_image_url(&snap);

        Box::pin(async move {
            let copied = tokio::select! {
                _ = cancel.cancelled() => return,
                copied = Self::copy_image(&config, image_url.as_deref(), Arc::clone(&clipboard)) => copied,
            };

            match copied {
                Ok(()) => {
                    info!("Copied QR code image to the clipboard");
                    push_toast(
                        &updater,
                        Toast::new(COPIED_IMAGE_TITLE, COPIED_IMAGE_DESCRIPTION),
                    );
                }
                Err(e) => {
                    warn!("Copying the QR image failed, copying the input text instead: {e}");
                    match Self::copy_text(text, clipboard).await {
                        Ok(()) => push_toast(
                            &updater,
                            Toast::new(COPIED_TEXT_TITLE, COPIED_TEXT_DESCRIPTION),
                        ),
                        Err(e) => error!("Failed to copy to the clipboard: {e}"),
                    }
                }
            }
        })
    }
}
