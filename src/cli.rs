//! Command line interface
//!
//! `gui` (the default) opens the window; `spin` and `list` run the pipeline
//! once from the saved preferences without touching the config file.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use steam_roulette::config::UserPreferences;
use steam_roulette::logging::log_error;
use steam_roulette::roulette::{Roulette, Spin, SpinRequest};
use steam_roulette::steam::{launch_game, Blessing, OwnedGamesClient, Transport, UreqTransport};
use steam_roulette::RouletteError;

#[derive(Parser, Debug)]
#[command(name = "steam-roulette", version, about = "Pick a random Steam game and launch it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the desktop window (default)
    Gui,
    /// Pick one game and launch it
    Spin(SpinArgs),
    /// Print every candidate without launching anything
    List(SourceArgs),
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Steam install directory, instead of the saved one
    #[arg(long, value_name = "DIR")]
    pub steam_path: Option<PathBuf>,

    /// Also draw from owned games that are not installed (uses the saved API key and user id)
    #[arg(long)]
    pub include_uninstalled: bool,
}

#[derive(Args, Debug)]
pub struct SpinArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Seed the draw for a reproducible pick
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the pick without launching it
    #[arg(long)]
    pub dry_run: bool,
}

impl SourceArgs {
    /// Saved preferences with command line overrides applied
    fn preferences(&self) -> UserPreferences {
        let mut prefs = UserPreferences::load();
        if let Some(path) = &self.steam_path {
            prefs.steam_path = path.to_string_lossy().to_string();
        }
        if self.include_uninstalled {
            prefs.set_include_uninstalled(true);
        }
        prefs
    }
}

fn roulette() -> Roulette<UreqTransport> {
    Roulette::new(OwnedGamesClient::with_defaults())
}

fn report(err: &RouletteError) -> ExitCode {
    if err.is_informational() {
        eprintln!("{}", err);
    } else {
        log_error(&err.to_string());
        eprintln!("{}: {}", err.title(), err);
    }
    ExitCode::FAILURE
}

/// Draw one game and print it as `Name (id) (1 of N)`
fn spin_to<T: Transport>(
    roulette: &Roulette<T>,
    request: &SpinRequest,
    seed: Option<u64>,
    out: &mut impl Write,
) -> Result<Spin, RouletteError> {
    let spin = match seed {
        Some(seed) => roulette.spin(request, &mut StdRng::seed_from_u64(seed))?,
        None => roulette.spin(request, &mut rand::rng())?,
    };
    let _ = writeln!(out, "{} (1 of {})", spin.chosen, spin.candidate_count);
    Ok(spin)
}

/// Print one `app_id<TAB>name` row per candidate
fn list_to<T: Transport>(
    roulette: &Roulette<T>,
    request: &SpinRequest,
    out: &mut impl Write,
) -> Result<usize, RouletteError> {
    let candidates = roulette.candidates(request)?;
    if candidates.is_empty() {
        return Err(RouletteError::NoGamesFound);
    }
    for candidate in &candidates {
        // Reader went away (`| head`)
        if writeln!(out, "{}\t{}", candidate.app_id, candidate.display_name()).is_err() {
            break;
        }
    }
    Ok(candidates.len())
}

pub fn run_spin(args: &SpinArgs) -> ExitCode {
    let prefs = args.source.preferences();
    let request = SpinRequest::from_preferences(&prefs);

    let spin = match spin_to(&roulette(), &request, args.seed, &mut io::stdout().lock()) {
        Ok(spin) => spin,
        Err(e) => return report(&e),
    };
    if args.dry_run {
        return ExitCode::SUCCESS;
    }

    if prefs.enable_blessing {
        println!("{}", Blessing::new(spin.chosen.display_name()).message());
    }
    match launch_game(spin.chosen.app_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

pub fn run_list(args: &SourceArgs) -> ExitCode {
    let request = SpinRequest::from_preferences(&args.preferences());

    match list_to(&roulette(), &request, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use steam_roulette::selector::SelectionMode;
    use steam_roulette::steam::{HttpResponse, RetryPolicy};
    use tempfile::TempDir;

    struct StaticTransport(&'static str);

    impl Transport for StaticTransport {
        fn get(&self, _url: &str) -> Result<HttpResponse, RouletteError> {
            Ok(HttpResponse {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    fn roulette(body: &'static str) -> Roulette<StaticTransport> {
        Roulette::new(OwnedGamesClient::new(StaticTransport(body), RetryPolicy::default()))
    }

    fn steam_root(games: &[(u32, &str)]) -> TempDir {
        let root = TempDir::new().unwrap();
        let steamapps = root.path().join("steamapps");
        fs::create_dir_all(&steamapps).unwrap();
        fs::write(steamapps.join("libraryfolders.vdf"), "\"libraryfolders\"\n{\n}\n").unwrap();
        for (app_id, name) in games {
            fs::write(
                steamapps.join(format!("appmanifest_{}.acf", app_id)),
                format!(
                    "\"AppState\"\n{{\n\t\"appid\"\t\"{}\"\n\t\"name\"\t\"{}\"\n}}\n",
                    app_id, name
                ),
            )
            .unwrap();
        }
        root
    }

    fn request(root: &TempDir, mode: SelectionMode) -> SpinRequest {
        SpinRequest {
            steam_path: root.path().to_string_lossy().to_string(),
            api_key: "KEY".to_string(),
            user_id: "7656".to_string(),
            mode,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spin() {
        let cli = Cli::parse_from([
            "steam-roulette",
            "spin",
            "--seed",
            "7",
            "--dry-run",
            "--steam-path",
            "/steam",
        ]);
        let Some(Command::Spin(args)) = cli.command else {
            panic!("expected spin");
        };
        assert_eq!(args.seed, Some(7));
        assert!(args.dry_run);
        assert!(!args.source.include_uninstalled);
        assert_eq!(args.source.steam_path, Some(PathBuf::from("/steam")));
    }

    #[test]
    fn test_no_subcommand_means_gui() {
        let cli = Cli::parse_from(["steam-roulette"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_prints_only_candidate_rows() {
        let root = steam_root(&[(20, "Beta"), (10, "Alpha")]);
        let req = request(&root, SelectionMode::InstalledOnly);
        let mut out = Vec::new();

        let count = list_to(&roulette("{}"), &req, &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "10\tAlpha\n20\tBeta\n");
    }

    #[test]
    fn test_list_includes_owned_games() {
        let root = steam_root(&[(10, "Alpha")]);
        let body = r#"{"response":{"games":[{"appid":30,"name":"Gamma"},{"appid":40}]}}"#;
        let req = request(&root, SelectionMode::IncludeUninstalled);
        let mut out = Vec::new();

        list_to(&roulette(body), &req, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "30\tGamma\n40\tGame 40\n10\tAlpha\n"
        );
    }

    #[test]
    fn test_list_without_games_prints_nothing() {
        let root = steam_root(&[]);
        let req = request(&root, SelectionMode::InstalledOnly);
        let mut out = Vec::new();

        let err = list_to(&roulette("{}"), &req, &mut out).unwrap_err();

        assert!(matches!(err, RouletteError::NoGamesFound));
        assert!(out.is_empty());
    }

    #[test]
    fn test_spin_prints_a_single_line() {
        let root = steam_root(&[(10, "Alpha"), (20, "Beta"), (30, "Gamma")]);
        let req = request(&root, SelectionMode::InstalledOnly);
        let mut out = Vec::new();

        let spin = spin_to(&roulette("{}"), &req, Some(3), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, format!("{} (1 of 3)\n", spin.chosen));
        assert_eq!(printed.lines().count(), 1);
    }
}
