//! Business layer of QuickQR.
//!
//! States hold what the user typed, computes hold what commands produced, and
//! commands do the IO:
//!
//! - [`QrPageInput`] with the [`set_input_value`], [`request_generation`] and
//!   [`clear`] mutators
//! - [`GenerateQrCommand`] filling [`QrCodeCompute`]
//! - [`DownloadQrCommand`] and [`CopyQrCommand`] for the generated image
//! - [`ToastQueue`] for one-shot notifications

use log::info;
use quickqr_states::StateCtx;

mod actions;
mod config;
mod error;
mod generation;
pub mod http;
mod page;
pub mod qr_api;
mod toast;

#[cfg(test)]
mod test_utils;

pub use actions::{
    COPIED_IMAGE_DESCRIPTION, COPIED_IMAGE_TITLE, COPIED_TEXT_DESCRIPTION, COPIED_TEXT_TITLE,
    ClipboardState, CopyQrCommand, DOWNLOADED_DESCRIPTION, DOWNLOADED_TITLE, DownloadQrCommand,
    QR_CODE_FILENAME,
};
pub use config::{DEFAULT_ENDPOINT_URL, GeneratorConfig};
pub use error::{
    ActionError, GENERIC_ERROR_MESSAGE, GenerateError, INVALID_INPUT_MESSAGE,
    NETWORK_ERROR_MESSAGE, SERVER_ERROR_MESSAGE, TIMEOUT_MESSAGE,
};
pub use generation::{GENERATE_ERROR_TITLE, GenerateQrCommand, GenerationStatus, QrCodeCompute};
pub use page::{QrPageInput, clear, is_submittable, request_generation, set_input_value};
pub use toast::{TOAST_LIFETIME, Toast, ToastQueue, ToastVariant};

/// Register every state, compute and command of the generator page.
pub fn register(
    ctx: &mut StateCtx,
    config: GeneratorConfig,
    clipboard: ClipboardState,
) {
    info!(
        "Registering QR generator against {}",
        config.endpoint_url()
    );

    ctx.add_state(config);
    ctx.add_state(QrPageInput::default());
    ctx.add_state(clipboard);

    ctx.record_compute(QrCodeCompute::default());
    ctx.record_compute(ToastQueue::default());

    ctx.record_command(GenerateQrCommand);
    ctx.record_command(DownloadQrCommand);
    ctx.record_command(CopyQrCommand);
}
