//! UI components and rendering

mod dialogs;
mod form;

pub use dialogs::{alert, render_blessing, render_dialog};
pub use form::render_form;

use eframe::egui;
use std::time::Instant;

use crate::app::RouletteApp;

// ============================================================================
// eframe::App Implementation
// ============================================================================

impl eframe::App for RouletteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_spin(ctx);

        let now = Instant::now();
        if self.blessing.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.blessing = None;
        }

        let is_busy = self.is_busy();
        // Modal: block the form while a message box is open
        let form_enabled = !is_busy && self.dialog.is_none();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(form_enabled, |ui| {
                render_form(self, ui, is_busy);
            });
        });

        render_dialog(self, ctx);
        render_blessing(self, ctx, now);
    }
}
