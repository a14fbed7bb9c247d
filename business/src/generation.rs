//! QR generation: the displayed result and the command that produces it.

use std::any::Any;

use log::{error, info};
use quickqr_states::{
    Command, CommandFuture, CommandSnapshot, Compute, State, Updater, assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::page::QrPageInput;
use crate::qr_api::request_qr_code;
use crate::toast::{Toast, ToastQueue};

pub const GENERATE_ERROR_TITLE: &str = "Error generating QR code";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Idle,
    Loading,
    Ready,
}

/// What the display surface shows.
///
/// A failed attempt keeps `image_url` from the previous success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeCompute {
    pub image_url: Option<String>,
    pub is_loading: bool,
    pub is_visible: bool,
}

impl QrCodeCompute {
    pub fn status(&self) -> GenerationStatus {
        if self.is_loading {
            GenerationStatus::Loading
        } else if self.image_url.is_some() {
            GenerationStatus::Ready
        } else {
            GenerationStatus::Idle
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn start_loading(&mut self) {
        self.is_loading = true;
        self.is_visible = true;
    }

    fn finish(&mut self, result: &Result<String, GenerateError>) {
        self.is_loading = false;
        if let Ok(url) = result {
            self.image_url = Some(url.clone());
            self.is_visible = true;
        }
    }
}

impl State for QrCodeCompute {
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

impl Compute for QrCodeCompute {
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Reacts to the page's `(should_generate, value)` pair.
///
/// Blank input resets to idle. A triggered, non-blank input enters loading right
/// away and posts the value to the endpoint. Re-dispatching replaces the previous
/// attempt, whose result is then discarded.
#[derive(Debug, Default)]
pub struct GenerateQrCommand;

impl Command for GenerateQrCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let (page, config) = match (
            snap.try_state::<QrPageInput>(),
            snap.try_state::<GeneratorConfig>(),
        ) {
            (Ok(page), Ok(config)) => (page.clone(), config.clone()),
            (Err(e), _) | (_, Err(e)) => {
                error!("GenerateQrCommand: {e}");
                return Box::pin(async {});
            }
        };

        if !page.is_submittable() {
            updater.set(QrCodeCompute::default());
            return Box::pin(async {});
        }
        if !page.should_generate {
            return Box::pin(async {});
        }

        updater.update::<QrCodeCompute>(QrCodeCompute::start_loading);

        Box::pin(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Generation for {:?} was replaced", page.value);
                    return;
                }
                result = request_qr_code(&config, &page.value) => result,
            };

            match &result {
                Ok(url) => info!("QR code ready at {url}"),
                Err(e) => {
                    error!("Failed to generate QR code: {e}");
                    let toast = Toast::destructive(GENERATE_ERROR_TITLE, e.user_message());
                    updater.update::<ToastQueue>(move |queue| queue.push(toast));
                }
            }
            updater.update::<QrCodeCompute>(move |qr| qr.finish(&result));
        })
    }
}
