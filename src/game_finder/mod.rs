//! Installed game detection
//!
//! Reads Steam's local manifests to find what is installed:
//! - `steamapps/libraryfolders.vdf` for the list of library folders
//! - `appmanifest_*.acf` in each library for the games themselves
//!
//! # Example
//!
//! ```rust,ignore
//! use steam_roulette::game_finder::{detect_installed_games, get_library_folders};
//!
//! let folders = get_library_folders(Path::new("/home/me/.local/share/Steam"))?;
//! for game in detect_installed_games(&folders) {
//!     println!("Found: {} ({})", game.name, game.app_id);
//! }
//! ```

mod steam;
pub mod vdf;

pub use steam::{detect_installed_games, get_library_folders};

/// A game with a manifest in one of the local libraries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledGame {
    /// Steam App ID
    pub app_id: u32,
    /// Display name from the manifest
    pub name: String,
}
