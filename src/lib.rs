//! Steam Roulette - pick a random game from your Steam library and launch it
//!
//! Library crate for the core pipeline, shared between GUI and CLI.
//! Note: UI module is only available in the binary, not here.

#[macro_use]
pub mod paths;

pub mod config;
pub mod error;
pub mod game_finder;
pub mod logging;
#[cfg(feature = "picker")]
pub mod roulette;
#[cfg(feature = "picker")]
pub mod selector;
pub mod steam;

pub use error::RouletteError;
