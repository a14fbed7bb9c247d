//! Input form: the text field, its clear button and the submit button.

use egui::{Button, Id, Key, Response, RichText, TextEdit, Ui, WidgetInfo, WidgetType};
use quickqr_business::{QrPageInput, is_submittable, request_generation, set_input_value};
use quickqr_states::StateCtx;

use crate::utils::colors::COLOR_ACCENT;

pub const INPUT_HINT: &str = "Enter text or URL...";
pub const GENERATE_LABEL: &str = "Generate QR Code";
pub const CLEAR_INPUT_LABEL: &str = "Clear input";
pub const INPUT_CAPTION: &str = "Enter any text, URL, or data to create an instant QR code";

/// Renders the input form and forwards edits, clears and submits to the page.
pub fn qr_input(ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let field_id = Id::new("qr_input_field");
    let mut value = ctx.state::<QrPageInput>().value.clone();
    let mut submit = false;
    let mut cleared = false;

    focus_on_first_frame(ui, field_id);

    let response = ui
        .vertical_centered(|ui| {
            ui.horizontal(|ui| {
                let field = ui.add(
                    TextEdit::singleline(&mut value)
                        .id(field_id)
                        .hint_text(INPUT_HINT)
                        .desired_width(ui.available_width() - 40.0),
                );
                if field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    submit = true;
                }

                if !value.is_empty() {
                    let clear = ui.add(Button::new("✕").frame(false));
                    clear.widget_info(|| {
                        WidgetInfo::labeled(WidgetType::Button, true, CLEAR_INPUT_LABEL)
                    });
                    if clear.on_hover_text(CLEAR_INPUT_LABEL).clicked() {
                        cleared = true;
                    }
                }
            });

            ui.add_space(12.0);

            let generate = Button::new(RichText::new(GENERATE_LABEL).strong())
                .fill(COLOR_ACCENT)
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(is_submittable(&value), generate).clicked() {
                submit = true;
            }

            ui.add_space(8.0);
            ui.label(RichText::new(INPUT_CAPTION).small().weak());
        })
        .response;

    if cleared {
        value.clear();
        ui.memory_mut(|memory| memory.request_focus(field_id));
    }

    set_input_value(ctx, value);
    if submit {
        request_generation(ctx);
    }

    response
}

/// Best effort: a headless context simply never reports focus.
fn focus_on_first_frame(ui: &Ui, field_id: Id) {
    let done_id = field_id.with("initial_focus");
    let done = ui.data(|data| data.get_temp::<bool>(done_id).unwrap_or(false));
    if !done {
        ui.memory_mut(|memory| memory.request_focus(field_id));
        ui.data_mut(|data| data.insert_temp(done_id, true));
    }
}
