//! Steam Roulette - random Steam game launcher
//!
//! Opens the desktop window by default; `spin` and `list` run headless.

use std::process::ExitCode;

use clap::Parser;
use eframe::egui;

mod app;
mod cli;
mod ui;

use app::RouletteApp;
use cli::{Cli, Command};
use steam_roulette::logging::{init_logger, log_error, log_info};

fn run_gui() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([620.0, 380.0])
            .with_min_inner_size([520.0, 340.0])
            .with_title("Random Steam Game Launcher"),
        ..Default::default()
    };

    eframe::run_native(
        "Steam Roulette",
        options,
        Box::new(|_cc| Ok(Box::new(RouletteApp::default()))),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Writes to <config dir>/steam-roulette/logs/
    init_logger();
    log_info("Steam Roulette starting up...");

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => match run_gui() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log_error(&format!("Window failed: {}", e));
                ExitCode::FAILURE
            }
        },
        Command::Spin(args) => cli::run_spin(&args),
        Command::List(args) => cli::run_list(&args),
    }
}
