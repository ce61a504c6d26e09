//! Steam integration module
//!
//! Handles installation detection, the owned-games Web API, and launching
//! games through the `steam://` protocol.

mod launch;
mod owned_games;
mod paths;

pub use launch::{launch_game, launch_uri, Blessing, BLESSING_DURATION};
#[cfg(feature = "fetch")]
pub use owned_games::UreqTransport;
pub use owned_games::{
    owned_games_url, HttpResponse, OwnedGame, OwnedGamesClient, RetryPolicy, Transport,
};
pub use paths::{detect_steam_path_checked, find_steam_path, is_valid_steam_path};
