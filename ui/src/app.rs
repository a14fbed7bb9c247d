use std::time::Duration;

use bon::Builder;
use quickqr_business::{QrCodeCompute, ToastQueue};

use crate::{pages, state::State, widgets};

/// How often to poll for command results while something is pending.
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Builder)]
pub struct QuickQrApp {
    state: State,
}

impl QuickQrApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn has_pending_work(&self) -> bool {
        let ctx = &self.state.ctx;
        ctx.task_count() > 0
            || ctx.cached::<QrCodeCompute>().is_some_and(|qr| qr.is_loading)
            || ctx.cached::<ToastQueue>().is_some_and(|toasts| !toasts.is_empty())
    }
}

impl eframe::App for QuickQrApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = chrono::Utc::now();
        self.state
            .ctx
            .updater()
            .update::<ToastQueue>(move |toasts| toasts.expire(now));

        // Sync Compute for render
        self.state.ctx.sync_computes();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    pages::index_page(&mut self.state, ui);
                });
        });

        widgets::toasts(&self.state.ctx, ctx);

        if self.has_pending_work() {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        }
    }
}
