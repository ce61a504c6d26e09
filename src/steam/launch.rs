//! Game launch through the `steam://` protocol handler

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::RouletteError;
use crate::logging::log_launch;

/// How long the pre-launch blessing stays on screen
pub const BLESSING_DURATION: Duration = Duration::from_secs(2);

/// `steam://run/<appid>`
pub fn launch_uri(app_id: u32) -> String {
    format!("steam://run/{}", app_id)
}

/// Platform command that hands `uri` to its registered handler
fn opener_command(uri: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        // The empty string is `start`'s window title argument
        cmd.args(["/C", "start", "", uri]);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(uri);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(uri);
        cmd
    }
}

/// Ask Steam to start `app_id`.
///
/// Fire-and-forget: success means the opener was spawned, not that the game
/// actually started.
pub fn launch_game(app_id: u32) -> Result<(), RouletteError> {
    let uri = launch_uri(app_id);
    log_launch(&format!("Opening {}", uri));

    opener_command(&uri)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| RouletteError::Launch(format!("{}: {}", uri, e)))
}

/// The short "have fun" notice shown right before a launch
#[derive(Debug, Clone)]
pub struct Blessing {
    pub game_name: String,
    shown_at: Instant,
}

impl Blessing {
    pub fn new(game_name: impl Into<String>) -> Self {
        Self::shown_at(game_name, Instant::now())
    }

    pub fn shown_at(game_name: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            game_name: game_name.into(),
            shown_at,
        }
    }

    pub fn title(&self) -> &'static str {
        "This popup closes in 2s..."
    }

    pub fn message(&self) -> String {
        format!("{} is about to launch, have fun!", self.game_name)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BLESSING_DURATION
    }

    /// Time left before the popup should close
    pub fn remaining(&self, now: Instant) -> Duration {
        BLESSING_DURATION.saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
