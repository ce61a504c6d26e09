use std::{path::PathBuf, sync::LazyLock};

pub static DEFAULT_ROULETTE_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(custom) = std::env::var_os("STEAM_ROULETTE_HOME") {
        return PathBuf::from(custom);
    }

    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_default();
    path.push("steam-roulette");
    path
});

/// Computes a path inside the Steam Roulette data directory.
///
/// Returns a `&Path` referencing the data directory itself if no arguments are passed in, or a
/// `PathBuf` created by joining all of the arguments to the base directory if at least one
/// argument is passed in.
///
/// # Examples
///
/// ```ignore
/// // With STEAM_ROULETTE_HOME unset on Linux, the base is ~/.config/steam-roulette
/// let config = roulette_path!("config.json");
/// let logs = roulette_path!("logs");
/// ```
#[macro_export]
macro_rules! roulette_path {
    () => {
        $crate::paths::DEFAULT_ROULETTE_PATH.as_path()
    };

    ( $( $path:expr ),+ $(,)? ) => {
        [
            $crate::paths::DEFAULT_ROULETTE_PATH.as_path(),
            $( std::path::Path::new(&$path) ),+
        ].into_iter().collect::<std::path::PathBuf>()
    };
}
