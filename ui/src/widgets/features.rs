//! Static page content around the generator.

use egui::{Frame, Grid, Response, RichText, Ui};

use crate::utils::colors::COLOR_ACCENT;

pub const PAGE_TITLE: &str = "QR Code Generator";
pub const PAGE_TAGLINE: &str =
    "Create beautiful QR codes instantly. Perfect for URLs, text, contact info, and more.";
pub const FOOTER_TEXT: &str = "Supports URLs, plain text, phone numbers, email addresses, and more";

/// `(icon, title, description)` of each feature card.
pub const FEATURES: [(&str, &str, &str); 3] = [
    (
        "⚡",
        "Instant Generation",
        "Generate QR codes in milliseconds with our optimized engine",
    ),
    (
        "⬇",
        "Easy Download",
        "Download high-quality PNG images ready for print or digital use",
    ),
    (
        "★",
        "High Quality",
        "Crisp, clear QR codes with error correction for reliable scanning",
    ),
];

pub fn page_header(ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new(PAGE_TITLE).heading().size(32.0).color(COLOR_ACCENT));
        ui.add_space(8.0);
        ui.label(RichText::new(PAGE_TAGLINE).weak());
    })
    .response
}

pub fn feature_cards(ui: &mut Ui) -> Response {
    Grid::new("feature_cards")
        .num_columns(FEATURES.len())
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (icon, title, description) in FEATURES {
                Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
                    ui.set_width(150.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(icon).size(24.0));
                        ui.label(RichText::new(title).strong());
                        ui.label(RichText::new(description).small().weak());
                    });
                });
            }
            ui.end_row();
        })
        .response
}

pub fn footer(ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.separator();
        ui.label(RichText::new(FOOTER_TEXT).small().weak());
    })
    .response
}
