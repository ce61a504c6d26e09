//! Steam path detection utilities
//!
//! Locates a Steam installation so the install directory field can be
//! pre-filled on first run.

use std::path::{Path, PathBuf};

use crate::logging::{log_info, log_warning};

// ============================================================================
// Core Path Detection
// ============================================================================

/// Well-known Steam installation roots for this platform.
fn candidate_steam_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if cfg!(windows) {
        for var in ["ProgramFiles(x86)", "ProgramFiles"] {
            if let Some(dir) = std::env::var_os(var) {
                candidates.push(PathBuf::from(dir).join("Steam"));
            }
        }
        candidates.push(PathBuf::from("C:/Program Files (x86)/Steam"));
    } else if let Some(home) = dirs::home_dir() {
        if cfg!(target_os = "macos") {
            candidates.push(home.join("Library/Application Support/Steam"));
        } else {
            candidates.push(home.join(".steam/steam"));
            candidates.push(home.join(".local/share/Steam"));
            candidates.push(home.join(".var/app/com.valvesoftware.Steam/.steam/steam"));
            candidates.push(home.join("snap/steam/common/.steam/steam"));
        }
    }

    candidates
}

/// Whether `path` looks like a Steam root the manifest reader can use.
pub fn is_valid_steam_path(path: &Path) -> bool {
    path.join("steamapps").join("libraryfolders.vdf").is_file()
}

/// Find the Steam installation path.
///
/// Returns `None` if no well-known location holds a usable Steam root.
#[must_use]
pub fn find_steam_path() -> Option<PathBuf> {
    candidate_steam_paths()
        .into_iter()
        .find(|p| is_valid_steam_path(p))
}

/// Detect the Steam installation path with logging.
///
/// Use this at startup to log whether Steam was found.
#[must_use]
pub fn detect_steam_path_checked() -> Option<String> {
    match find_steam_path() {
        Some(path) => {
            let path_str = path.to_string_lossy().to_string();
            log_info(&format!("Steam detected at: {}", path_str));
            Some(path_str)
        }
        None => {
            log_warning("Steam installation not detected, install directory must be set manually.");
            None
        }
    }
}
