//! Main form: credentials, install directory, mode checkboxes, start button

use eframe::egui;

use crate::app::{Dialog, RouletteApp};
use steam_roulette::logging::log_action;

const API_KEY_HELP_URL: &str = "https://steamcommunity.com/dev/apikey";
const USER_ID_HELP_URL: &str = "https://steamidfinder.com/";
const EXAMPLE_STEAM_PATH: &str = "C:/Program Files/Steam (adjust to your installation)";

pub fn render_form(app: &mut RouletteApp, ui: &mut egui::Ui, is_busy: bool) {
    ui.heading(egui::RichText::new("Random Steam Game Launcher").size(20.0).strong());
    ui.separator();
    ui.add_space(8.0);

    egui::Grid::new("settings_grid")
        .num_columns(3)
        .spacing([10.0, 10.0])
        .show(ui, |ui| {
            ui.label("Steam API Key:");
            ui.add(
                egui::TextEdit::singleline(&mut app.prefs.api_key)
                    .password(true)
                    .desired_width(300.0),
            );
            ui.hyperlink_to("Get one", API_KEY_HELP_URL);
            ui.end_row();

            ui.label("Steam User ID:");
            ui.add(
                egui::TextEdit::singleline(&mut app.prefs.user_id)
                    .password(true)
                    .desired_width(300.0),
            );
            ui.hyperlink_to("Find yours", USER_ID_HELP_URL);
            ui.end_row();

            ui.label("Steam Install Directory:");
            ui.add(
                egui::TextEdit::singleline(&mut app.prefs.steam_path)
                    .hint_text("/path/to/Steam")
                    .desired_width(300.0),
            );
            ui.horizontal(|ui| {
                if ui.button("📂 Browse").clicked() {
                    log_action("Browse for Steam directory clicked");
                    if let Some(path) = rfd::FileDialog::new().pick_folder() {
                        app.prefs.steam_path = path.to_string_lossy().to_string();
                    }
                }
                if ui.link("?").clicked() {
                    app.dialog = Some(Dialog::info("Example", EXAMPLE_STEAM_PATH));
                }
            });
            ui.end_row();
        });

    ui.add_space(10.0);

    // The two modes clear each other
    let mut include_uninstalled = app.prefs.include_uninstalled;
    if ui
        .checkbox(&mut include_uninstalled, "Pick from any owned game (including uninstalled)")
        .changed()
    {
        app.prefs.set_include_uninstalled(include_uninstalled);
    }

    let mut include_installed_only = app.prefs.include_installed_only;
    if ui
        .checkbox(&mut include_installed_only, "Pick from installed games only")
        .changed()
    {
        app.prefs.set_include_installed_only(include_installed_only);
    }

    ui.checkbox(&mut app.prefs.enable_blessing, "Show a blessing before launch");

    ui.add_space(16.0);

    ui.vertical_centered(|ui| {
        let label = if is_busy { "Picking..." } else { "Start Random Game" };
        if ui
            .add_enabled(!is_busy, egui::Button::new(label).min_size(egui::vec2(180.0, 32.0)))
            .clicked()
        {
            app.start_spin(ui.ctx());
        }
        if is_busy {
            ui.add_space(6.0);
            ui.spinner();
        }
    });
}
