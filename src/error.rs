//! Error type shared by every stage of a spin

use std::path::PathBuf;

/// Everything that can end a spin early.
///
/// All variants are terminal for the current run. The UI shows
/// [`RouletteError::NoGamesFound`] as an informational notice and every other
/// variant as an error dialog.
#[derive(Debug, thiserror::Error)]
pub enum RouletteError {
    #[error("Please fill in the Steam install directory")]
    MissingSteamPath,

    #[error("Please fill in the Steam API key and user ID")]
    MissingCredentials,

    #[error("Could not find libraryfolders.vdf at {}", .0.display())]
    LibraryManifestMissing(PathBuf),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status code {0}")]
    HttpStatus(u16),

    #[error("Request failed, server not responding after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Could not parse JSON response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("No matching games found.")]
    NoGamesFound,

    #[error("Failed to launch game: {0}")]
    Launch(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl RouletteError {
    /// Whether this outcome is a notice rather than a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, RouletteError::NoGamesFound)
    }

    /// Dialog title used when surfacing this error to the user.
    pub fn title(&self) -> &'static str {
        if self.is_informational() {
            "Notice"
        } else {
            "Error"
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RouletteError::Io {
            path: path.into(),
            source,
        }
    }
}
