//! Bottom-right notification overlay.

use egui::{Align2, Area, Context, Frame, Id, Order, RichText, vec2};
use quickqr_business::{ToastQueue, ToastVariant};
use quickqr_states::StateCtx;

use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

pub const DISMISS_LABEL: &str = "Dismiss";

const TOAST_WIDTH: f32 = 300.0;

/// Draws every queued toast, newest at the bottom.
pub fn toasts(ctx: &StateCtx, egui_ctx: &Context) {
    let Some(queue) = ctx.cached::<ToastQueue>() else {
        return;
    };
    if queue.is_empty() {
        return;
    }

    let mut dismissed = None;

    Area::new(Id::new("toast_overlay"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_BOTTOM, vec2(-16.0, -16.0))
        .show(egui_ctx, |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for (index, toast) in queue.toasts().iter().enumerate() {
                let title_color = match toast.variant {
                    ToastVariant::Default => COLOR_GREEN,
                    ToastVariant::Destructive => COLOR_RED,
                };

                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(TOAST_WIDTH);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&toast.title).strong().color(title_color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(DISMISS_LABEL).clicked() {
                                dismissed = Some(index);
                            }
                        });
                    });
                    ui.label(&toast.description);
                });
                ui.add_space(8.0);
            }
        });

    if let Some(index) = dismissed {
        ctx.updater()
            .update::<ToastQueue>(move |queue| queue.dismiss(index));
    }
}
