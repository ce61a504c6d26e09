//! Application state and the spin worker

use std::sync::Arc;
use std::thread;

use eframe::egui;
use parking_lot::Mutex;

use steam_roulette::config::UserPreferences;
use steam_roulette::logging::{log_action, log_error};
use steam_roulette::roulette::{Roulette, Spin, SpinRequest};
use steam_roulette::steam::{detect_steam_path_checked, launch_game, Blessing, OwnedGamesClient};
use steam_roulette::RouletteError;

// ============================================================================
// Types
// ============================================================================

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DialogKind {
    Info,
    Error,
}

/// A modal message box
#[derive(Clone, Debug)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &RouletteError) -> Self {
        Self {
            kind: if err.is_informational() {
                DialogKind::Info
            } else {
                DialogKind::Error
            },
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

/// Result handed from the worker thread back to the UI thread
struct SpinOutcome {
    result: Result<Spin, RouletteError>,
    bless: bool,
}

// ============================================================================
// Application State
// ============================================================================

pub struct RouletteApp {
    /// Form fields, persisted on each launch attempt
    pub prefs: UserPreferences,

    pub is_spinning: Arc<Mutex<bool>>,
    spin_outcome: Arc<Mutex<Option<SpinOutcome>>>,

    pub dialog: Option<Dialog>,
    pub blessing: Option<Blessing>,
}

impl Default for RouletteApp {
    fn default() -> Self {
        let mut prefs = UserPreferences::load();

        // Pre-fill the install directory on first run
        if prefs.steam_path.trim().is_empty() {
            if let Some(path) = detect_steam_path_checked() {
                prefs.steam_path = path;
            }
        }

        Self {
            prefs,
            is_spinning: Arc::new(Mutex::new(false)),
            spin_outcome: Arc::new(Mutex::new(None)),
            dialog: None,
            blessing: None,
        }
    }
}

impl RouletteApp {
    pub fn is_busy(&self) -> bool {
        *self.is_spinning.lock()
    }

    pub fn show_error(&mut self, err: &RouletteError) {
        if !err.is_informational() {
            log_error(&err.to_string());
        }
        self.dialog = Some(Dialog::from_error(err));
    }

    /// Tell the user when the form could not be persisted. The spin still runs.
    fn note_saved(&mut self, saved: Result<(), RouletteError>) {
        if let Err(e) = saved {
            self.show_error(&RouletteError::Config(format!("Preferences were not saved: {}", e)));
        }
    }

    /// Start button handler.
    ///
    /// Validates and saves the form, then runs the pipeline on a worker
    /// thread. The button stays disabled until [`Self::poll_spin`] sees the
    /// result, so runs never overlap.
    pub fn start_spin(&mut self, ctx: &egui::Context) {
        if self.is_busy() {
            return;
        }
        log_action("Start random game clicked");

        let request = SpinRequest::from_preferences(&self.prefs);
        if let Err(e) = request.validate() {
            self.show_error(&e);
            return;
        }

        let saved = self.prefs.save();
        self.note_saved(saved);

        let bless = self.prefs.enable_blessing;
        let is_spinning = self.is_spinning.clone();
        let outcome = self.spin_outcome.clone();
        let ctx = ctx.clone();

        *is_spinning.lock() = true;
        thread::spawn(move || {
            let roulette = Roulette::new(OwnedGamesClient::with_defaults());
            let result = roulette.spin(&request, &mut rand::rng());

            *outcome.lock() = Some(SpinOutcome { result, bless });
            *is_spinning.lock() = false;
            ctx.request_repaint();
        });
    }

    /// Pick up a finished spin: show the blessing and launch, or report.
    pub fn poll_spin(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.spin_outcome.lock().take() else {
            return;
        };

        let spin = match outcome.result {
            Ok(spin) => spin,
            Err(e) => {
                self.show_error(&e);
                return;
            }
        };

        if outcome.bless {
            self.blessing = Some(Blessing::new(spin.chosen.display_name()));
            crate::ui::alert(ctx);
        }

        if let Err(e) = launch_game(spin.chosen.app_id) {
            self.show_error(&e);
        }
    }
}
