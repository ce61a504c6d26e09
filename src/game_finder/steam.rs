//! Steam installed-game detection
//!
//! Resolves library folders from `libraryfolders.vdf` and reads every
//! `appmanifest_*.acf` found directly inside them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::vdf::{parse_library_folders, AppManifest};
use super::InstalledGame;
use crate::error::RouletteError;
use crate::logging::{log_info, log_warning};

/// Get all `steamapps` folders for a Steam installation.
///
/// The installation's own `steamapps` always comes first, followed by every
/// library declared in `steamapps/libraryfolders.vdf`. Duplicates are dropped.
pub fn get_library_folders(steam_path: &Path) -> Result<Vec<PathBuf>, RouletteError> {
    let base = steam_path.join("steamapps");
    let vdf_path = base.join("libraryfolders.vdf");

    if !vdf_path.is_file() {
        return Err(RouletteError::LibraryManifestMissing(vdf_path));
    }

    let bytes = fs::read(&vdf_path).map_err(|e| RouletteError::io(&vdf_path, e))?;
    let content = String::from_utf8_lossy(&bytes);

    let mut folders = vec![base];
    for path_str in parse_library_folders(&content) {
        let folder = PathBuf::from(path_str).join("steamapps");
        if !folders.contains(&folder) {
            folders.push(folder);
        }
    }

    log_info(&format!("Steam: {} library folder(s) declared", folders.len()));
    Ok(folders)
}

/// Read every installed game across the given library folders.
///
/// Folders that do not exist and manifests that cannot be read are logged and
/// skipped. Manifests without both an `appid` and a `name` are omitted. When
/// the same app id shows up in two libraries the first one wins.
pub fn detect_installed_games(library_folders: &[PathBuf]) -> Vec<InstalledGame> {
    let mut games = Vec::new();
    let mut seen = HashSet::new();

    for folder in library_folders {
        if !folder.is_dir() {
            log_warning(&format!("Library folder missing, skipping: {}", folder.display()));
            continue;
        }

        for path in find_app_manifests(folder) {
            let Some(game) = parse_appmanifest(&path) else {
                continue;
            };
            if seen.insert(game.app_id) {
                games.push(game);
            }
        }
    }

    log_info(&format!("Steam: Found {} installed games", games.len()));
    games
}

/// `appmanifest_*.acf` files directly inside `folder`, sorted by file name
fn find_app_manifests(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log_warning(&format!("Failed to list {}: {}", folder.display(), e));
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("appmanifest_") && name.ends_with(".acf"))
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn parse_appmanifest(path: &Path) -> Option<InstalledGame> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log_warning(&format!("Failed to read {}: {}", path.display(), e));
            return None;
        }
    };

    let manifest = AppManifest::from_vdf(&String::from_utf8_lossy(&bytes))?;
    Some(InstalledGame {
        app_id: manifest.app_id,
        name: manifest.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(steamapps: &Path, app_id: u32, name: &str) {
        fs::create_dir_all(steamapps).unwrap();
        fs::write(
            steamapps.join(format!("appmanifest_{}.acf", app_id)),
            format!(
                concat!(
                    "\"AppState\"\n{{\n\t\"appid\"\t\t\"{}\"\n",
                    "\t\"Universe\"\t\t\"1\"\n\t\"name\"\t\t\"{}\"\n}}\n",
                ),
                app_id, name
            ),
        )
        .unwrap();
    }

    fn write_library_folders(steam_root: &Path, extra: &[&Path]) {
        let steamapps = steam_root.join("steamapps");
        fs::create_dir_all(&steamapps).unwrap();
        let mut content = String::from("\"libraryfolders\"\n{\n");
        for (i, path) in extra.iter().enumerate() {
            let escaped = path.display().to_string().replace('\\', "\\\\");
            content.push_str(&format!(
                "\t\"{}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n",
                i, escaped
            ));
        }
        content.push_str("}\n");
        fs::write(steamapps.join("libraryfolders.vdf"), content).unwrap();
    }

    #[test]
    fn test_missing_library_manifest() {
        let root = TempDir::new().unwrap();
        let err = get_library_folders(root.path()).unwrap_err();
        assert!(matches!(err, RouletteError::LibraryManifestMissing(_)));
    }

    #[test]
    fn test_library_folders_base_first_and_deduplicated() {
        let root = TempDir::new().unwrap();
        let extra = TempDir::new().unwrap();
        write_library_folders(root.path(), &[root.path(), extra.path()]);

        let folders = get_library_folders(root.path()).unwrap();
        assert_eq!(
            folders,
            vec![root.path().join("steamapps"), extra.path().join("steamapps")]
        );
    }

    #[test]
    fn test_one_record_per_manifest() {
        let root = TempDir::new().unwrap();
        let steamapps = root.path().join("steamapps");
        write_manifest(&steamapps, 20, "B");
        write_manifest(&steamapps, 10, "A");
        let nameless = "\"AppState\"\n{\n\t\"appid\"\t\"30\"\n}\n";
        fs::write(steamapps.join("appmanifest_30.acf"), nameless).unwrap();
        let not_a_manifest = "\"appid\" \"99\"\n\"name\" \"not a manifest\"\n";
        fs::write(steamapps.join("libraryfolders.vdf"), not_a_manifest).unwrap();

        let games = detect_installed_games(&[steamapps]);
        assert_eq!(
            games,
            vec![
                InstalledGame { app_id: 10, name: "A".to_string() },
                InstalledGame { app_id: 20, name: "B".to_string() },
            ]
        );
    }

    #[test]
    fn test_duplicate_app_across_libraries_keeps_first() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_manifest(first.path(), 10, "First");
        write_manifest(second.path(), 10, "Second");
        write_manifest(second.path(), 40, "Other");

        let games = detect_installed_games(&[
            first.path().to_path_buf(),
            PathBuf::from("/nonexistent/steamapps"),
            second.path().to_path_buf(),
        ]);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "First");
        assert_eq!(games[1].app_id, 40);
    }

    #[test]
    fn test_manifests_are_not_searched_recursively() {
        let root = TempDir::new().unwrap();
        write_manifest(&root.path().join("common").join("nested"), 50, "Nested");
        assert!(detect_installed_games(&[root.path().to_path_buf()]).is_empty());
    }
}
