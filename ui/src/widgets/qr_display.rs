//! The generated QR code with its loading state and actions.

use egui::{Button, Image, Response, RichText, Ui, WidgetInfo, WidgetType, vec2};
use quickqr_business::{
    CopyQrCommand, DownloadQrCommand, QrCodeCompute, QrPageInput, clear, is_submittable,
};
use quickqr_states::StateCtx;

pub const DISPLAY_HEADING: &str = "Generated QR Code";
pub const CLEAR_QR_LABEL: &str = "Clear QR code";
pub const LOADING_TEXT: &str = "Generating QR code...";
pub const QR_IMAGE_ALT: &str = "Generated QR code";
pub const DOWNLOAD_LABEL: &str = "Download";
pub const COPY_LABEL: &str = "Copy";

const QR_IMAGE_SIZE: f32 = 256.0;

/// Renders nothing unless there is input to show or an attempt in flight.
pub fn qr_display(ctx: &mut StateCtx, ui: &mut Ui) -> Option<Response> {
    let value = ctx.state::<QrPageInput>().value.clone();
    let qr = ctx.cached::<QrCodeCompute>().cloned().unwrap_or_default();

    if !is_submittable(&value) && !qr.is_loading {
        return None;
    }

    let mut on_clear = false;
    let mut download = false;
    let mut copy = false;

    let response = egui::Frame::group(ui.style())
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(DISPLAY_HEADING);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let close = ui.add(Button::new("✕").frame(false));
                    close.widget_info(|| {
                        WidgetInfo::labeled(WidgetType::Button, true, CLEAR_QR_LABEL)
                    });
                    on_clear = close.on_hover_text(CLEAR_QR_LABEL).clicked();
                });
            });

            ui.add_space(12.0);

            ui.vertical_centered(|ui| {
                if qr.is_loading {
                    ui.add_space(QR_IMAGE_SIZE / 3.0);
                    ui.spinner();
                    ui.label(LOADING_TEXT);
                    ui.add_space(QR_IMAGE_SIZE / 3.0);
                } else if let Some(url) = qr.image_url() {
                    ui.add(
                        Image::from_uri(url.to_owned())
                            .alt_text(QR_IMAGE_ALT)
                            .fit_to_exact_size(vec2(QR_IMAGE_SIZE, QR_IMAGE_SIZE)),
                    );

                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        download = ui.button(DOWNLOAD_LABEL).clicked();
                        copy = ui.button(COPY_LABEL).clicked();
                    });
                }

                ui.add_space(8.0);
                ui.label(RichText::new(&value).weak());
            });
        })
        .response;

    if on_clear {
        clear(ctx);
    }
    if download {
        ctx.dispatch::<DownloadQrCommand>();
    }
    if copy {
        ctx.dispatch::<CopyQrCommand>();
    }

    Some(response)
}
