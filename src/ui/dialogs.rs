//! Message boxes and the pre-launch blessing popup

use std::io::Write;
use std::time::Instant;

use eframe::egui;

use crate::app::{DialogKind, RouletteApp};

/// Sound the terminal bell and ask the window manager for attention
pub fn alert(ctx: &egui::Context) {
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();

    ctx.send_viewport_cmd(egui::ViewportCommand::RequestUserAttention(
        egui::UserAttentionType::Informational,
    ));
}

/// Render the open message box, if any
pub fn render_dialog(app: &mut RouletteApp, ctx: &egui::Context) {
    let Some(dialog) = app.dialog.clone() else {
        return;
    };

    let mut close = false;
    egui::Window::new(dialog.title.as_str())
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let text = match dialog.kind {
                DialogKind::Info => egui::RichText::new(&dialog.message),
                DialogKind::Error => egui::RichText::new(&dialog.message)
                    .color(egui::Color32::from_rgb(255, 120, 120)),
            };
            ui.label(text);
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        });

    if close {
        app.dialog = None;
    }
}

const BLESSING_SIZE: [f32; 2] = [380.0, 110.0];

/// Top-left corner that centers a window of `size` on a monitor of `monitor`
fn centered_on_monitor(monitor: [f32; 2], size: [f32; 2]) -> [f32; 2] {
    [
        ((monitor[0] - size[0]) / 2.0).max(0.0),
        ((monitor[1] - size[1]) / 2.0).max(0.0),
    ]
}

/// Render the blessing popup until it expires.
///
/// Shown as its own always-on-top viewport centered on the monitor. Backends
/// without multiple viewports fall back to a window centered in the app.
pub fn render_blessing(app: &RouletteApp, ctx: &egui::Context, now: Instant) {
    let Some(blessing) = &app.blessing else {
        return;
    };

    let mut builder = egui::ViewportBuilder::default()
        .with_title(blessing.title())
        .with_inner_size(BLESSING_SIZE)
        .with_resizable(false)
        .with_always_on_top();
    if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
        builder = builder.with_position(centered_on_monitor([monitor.x, monitor.y], BLESSING_SIZE));
    }

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("blessing_popup"),
        builder,
        |ctx, class| {
            let message = blessing.message();
            if matches!(class, egui::ViewportClass::Embedded) {
                egui::Window::new(blessing.title())
                    .id(egui::Id::new("blessing_popup"))
                    .collapsible(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| blessing_body(ui, &message));
            } else {
                egui::CentralPanel::default().show(ctx, |ui| {
                    blessing_body(ui, &message);
                });
            }
        },
    );

    // Wake up to close it even without input
    ctx.request_repaint_after(blessing.remaining(now));
}

fn blessing_body(ui: &mut egui::Ui, message: &str) {
    ui.add_space(10.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(message).size(16.0));
    });
    ui.add_space(10.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blessing_centered_on_monitor() {
        assert_eq!(centered_on_monitor([1920.0, 1080.0], BLESSING_SIZE), [770.0, 485.0]);
    }

    #[test]
    fn test_blessing_position_never_negative() {
        assert_eq!(centered_on_monitor([300.0, 100.0], BLESSING_SIZE), [0.0, 0.0]);
    }
}
