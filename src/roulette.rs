//! The spin pipeline
//!
//! validate → library folders → owned games (optional) → installed games →
//! merge → pick. Each run works from an immutable [`SpinRequest`] snapshot.

use std::path::Path;

use rand::Rng;

use crate::config::UserPreferences;
use crate::error::RouletteError;
use crate::game_finder::{detect_installed_games, get_library_folders};
use crate::logging::log_info;
use crate::selector::{merge_candidates, pick, Candidate, SelectionMode};
use crate::steam::{OwnedGamesClient, Transport};

/// Inputs for one run, captured when the run is triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinRequest {
    pub steam_path: String,
    pub api_key: String,
    pub user_id: String,
    pub mode: SelectionMode,
}

impl SpinRequest {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self {
            steam_path: prefs.steam_path.trim().to_string(),
            api_key: prefs.api_key.trim().to_string(),
            user_id: prefs.user_id.trim().to_string(),
            mode: SelectionMode::from_flags(
                prefs.include_uninstalled,
                prefs.include_installed_only,
            ),
        }
    }

    /// Check required fields. Runs before any file or network access.
    pub fn validate(&self) -> Result<(), RouletteError> {
        if self.steam_path.is_empty() {
            return Err(RouletteError::MissingSteamPath);
        }
        if self.mode.needs_web_api() && (self.api_key.is_empty() || self.user_id.is_empty()) {
            return Err(RouletteError::MissingCredentials);
        }
        Ok(())
    }
}

/// Outcome of a successful spin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spin {
    pub chosen: Candidate,
    pub candidate_count: usize,
}

/// Runs the pipeline against a Steam install and the owned-games API
pub struct Roulette<T: Transport> {
    client: OwnedGamesClient<T>,
}

impl<T: Transport> Roulette<T> {
    pub fn new(client: OwnedGamesClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &OwnedGamesClient<T> {
        &self.client
    }

    /// The de-duplicated candidate list for `request`
    pub fn candidates(&self, request: &SpinRequest) -> Result<Vec<Candidate>, RouletteError> {
        request.validate()?;

        let folders = get_library_folders(Path::new(&request.steam_path))?;

        let owned = if request.mode.needs_web_api() {
            Some(self.client.fetch(&request.api_key, &request.user_id)?)
        } else {
            None
        };

        let installed = detect_installed_games(&folders);
        let candidates = merge_candidates(&installed, owned.as_deref(), request.mode);

        log_info(&format!(
            "{} candidate(s) in {:?} mode",
            candidates.len(),
            request.mode
        ));
        Ok(candidates)
    }

    /// Build the candidate list and draw one game from it
    pub fn spin<R: Rng>(&self, request: &SpinRequest, rng: &mut R) -> Result<Spin, RouletteError> {
        let candidates = self.candidates(request)?;
        let chosen = pick(&candidates, rng).cloned().ok_or(RouletteError::NoGamesFound)?;

        log_info(&format!("Picked {} out of {}", chosen, candidates.len()));
        Ok(Spin {
            chosen,
            candidate_count: candidates.len(),
        })
    }
}
