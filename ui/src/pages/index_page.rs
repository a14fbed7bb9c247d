//! The generator page: header, input, result, feature cards and footer.

use egui::{Response, Ui};
use quickqr_business::QrPageInput;

use crate::{state::State, widgets};

const CONTENT_MAX_WIDTH: f32 = 560.0;

/// The display surface appears only once generation has been requested.
pub fn index_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.set_max_width(CONTENT_MAX_WIDTH);

        widgets::page_header(ui);
        ui.add_space(24.0);

        widgets::qr_input(&mut state.ctx, ui);
        ui.add_space(24.0);

        if state.ctx.state::<QrPageInput>().should_generate {
            widgets::qr_display(&mut state.ctx, ui);
            ui.add_space(24.0);
        }

        widgets::feature_cards(ui);
        ui.add_space(24.0);
        widgets::footer(ui);
    })
    .response
}
