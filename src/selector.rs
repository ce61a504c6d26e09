//! Candidate merge and random pick
//!
//! Combines the installed list with the owned list (when the user asked for
//! uninstalled games too) and draws one entry uniformly at random.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::game_finder::InstalledGame;
use crate::steam::OwnedGame;

// ============================================================================
// Types
// ============================================================================

/// Which games are eligible for the draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    InstalledOnly,
    IncludeUninstalled,
}

impl SelectionMode {
    /// Resolve the two mode checkboxes.
    ///
    /// Only "include uninstalled" on its own selects the owned list; neither
    /// or both set falls back to installed games.
    pub fn from_flags(include_uninstalled: bool, include_installed_only: bool) -> Self {
        if include_uninstalled && !include_installed_only {
            SelectionMode::IncludeUninstalled
        } else {
            SelectionMode::InstalledOnly
        }
    }

    pub fn needs_web_api(&self) -> bool {
        matches!(self, SelectionMode::IncludeUninstalled)
    }
}

/// One entry in the draw. App ids are unique within a candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub app_id: u32,
    pub name: Option<String>,
}

impl Candidate {
    pub fn new(app_id: u32, name: impl Into<String>) -> Self {
        Self {
            app_id,
            name: Some(name.into()),
        }
    }

    /// Name to show the user, `Game <appid>` when none was parsed
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Game {}", self.app_id),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.app_id)
    }
}

impl From<&InstalledGame> for Candidate {
    fn from(game: &InstalledGame) -> Self {
        Candidate::new(game.app_id, game.name.clone())
    }
}

impl From<&OwnedGame> for Candidate {
    fn from(game: &OwnedGame) -> Self {
        Candidate {
            app_id: game.app_id,
            name: game.name.clone(),
        }
    }
}

// ============================================================================
// Merge
// ============================================================================

/// Build the candidate list for `mode`.
///
/// With [`SelectionMode::IncludeUninstalled`] and fetched `owned` data, the
/// owned list comes first and installed games not already present are
/// appended, so the owned record wins on a shared id. If that merge is empty,
/// or in installed-only mode, the installed list is used on its own.
pub fn merge_candidates(
    installed: &[InstalledGame],
    owned: Option<&[OwnedGame]>,
    mode: SelectionMode,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    if let (SelectionMode::IncludeUninstalled, Some(owned)) = (mode, owned) {
        let owned = owned.iter().map(Candidate::from);
        let installed = installed.iter().map(Candidate::from);
        candidates = owned
            .chain(installed)
            .filter(|c| seen.insert(c.app_id))
            .collect();
    }

    if candidates.is_empty() {
        seen.clear();
        candidates = installed
            .iter()
            .map(Candidate::from)
            .filter(|c| seen.insert(c.app_id))
            .collect();
    }

    candidates
}

// ============================================================================
// Pick
// ============================================================================

/// Draw one candidate uniformly at random, `None` if there are none.
pub fn pick<'a, R: Rng>(candidates: &'a [Candidate], rng: &mut R) -> Option<&'a Candidate> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len()))
}
