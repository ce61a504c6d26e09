//! Steam Roulette Logging System
//!
//! Provides session logging with a system information header

use chrono::Local;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::process::Command;
use std::sync::OnceLock;

static LOGGER: OnceLock<Mutex<RouletteLogger>> = OnceLock::new();

// ============================================================================
// System Information Detection
// ============================================================================

#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub app_version: String,
    pub os: String,
    pub arch: String,
    pub distro: String,
    pub kernel: String,
    pub session_type: String,
    pub desktop_env: String,
}

impl SystemInfo {
    pub fn detect() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            distro: detect_distro(),
            kernel: detect_kernel(),
            session_type: detect_session_type(),
            desktop_env: detect_desktop_env(),
        }
    }

    pub fn to_log_header(&self) -> String {
        format!(
r#"================================================================================
Steam Roulette Log - {}
================================================================================
Application:   Steam Roulette v{}
System Info:
  OS:          {} ({})
  Distro:      {}
  Kernel:      {}
  Session:     {}
  Desktop:     {}
================================================================================
"#,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.app_version,
            self.os,
            self.arch,
            self.distro,
            self.kernel,
            self.session_type,
            self.desktop_env,
        )
    }
}

fn detect_session_type() -> String {
    std::env::var("XDG_SESSION_TYPE").unwrap_or_else(|_| "Unknown".to_string())
}

fn detect_distro() -> String {
    if let Ok(file) = File::open("/etc/os-release") {
        let reader = BufReader::new(file);
        for line in reader.lines().map_while(Result::ok) {
            if line.starts_with("PRETTY_NAME=") {
                return line
                    .trim_start_matches("PRETTY_NAME=")
                    .trim_matches('"')
                    .to_string();
            }
        }
    }
    "Unknown".to_string()
}

fn detect_kernel() -> String {
    if cfg!(windows) {
        return "n/a".to_string();
    }
    if let Ok(output) = Command::new("uname").arg("-r").output() {
        if output.status.success() {
            return String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
    }
    "Unknown".to_string()
}

fn detect_desktop_env() -> String {
    ["XDG_CURRENT_DESKTOP", "DESKTOP_SESSION", "XDG_SESSION_DESKTOP"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| "Unknown".to_string())
}

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Action, // User actions (button clicks, etc.)
    Fetch,
    Launch,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Action => "[ACTION]",
            LogLevel::Fetch => "[FETCH]",
            LogLevel::Launch => "[LAUNCH]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }
}

// ============================================================================
// Roulette Logger
// ============================================================================

pub struct RouletteLogger {
    log_file: Option<File>,
}

impl RouletteLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_file: open_session_file(),
        };

        let header = SystemInfo::detect().to_log_header();
        logger.write_raw(&header);

        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }

        // Mirror on stderr, stdout carries command output
        eprintln!("{}", msg);
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let formatted = format_line(&Local::now().format("%H:%M:%S").to_string(), level, message);
        self.write_raw(&formatted);
    }
}

impl Default for RouletteLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn format_line(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{}] {} {}", timestamp, level.prefix(), message)
}

#[cfg(not(test))]
fn open_session_file() -> Option<File> {
    use std::fs::{self, OpenOptions};

    let log_dir = roulette_path!("logs");
    let _ = fs::create_dir_all(&log_dir);

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("roulette_{}.log", timestamp));

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()
}

// Unit tests log to the console only.
#[cfg(test)]
fn open_session_file() -> Option<File> {
    None
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger (call once at startup)
pub fn init_logger() {
    logger();
}

fn logger() -> &'static Mutex<RouletteLogger> {
    LOGGER.get_or_init(|| Mutex::new(RouletteLogger::new()))
}

// ============================================================================
// Convenience Logging Functions
// ============================================================================

pub fn log_info(message: &str) {
    logger().lock().log(LogLevel::Info, message);
}

pub fn log_action(message: &str) {
    logger().lock().log(LogLevel::Action, message);
}

pub fn log_fetch(message: &str) {
    logger().lock().log(LogLevel::Fetch, message);
}

pub fn log_launch(message: &str) {
    logger().lock().log(LogLevel::Launch, message);
}

pub fn log_warning(message: &str) {
    logger().lock().log(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    logger().lock().log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        assert_eq!(
            format_line("12:00:01", LogLevel::Fetch, "GetOwnedGames attempt 1/3"),
            "[12:00:01] [FETCH] GetOwnedGames attempt 1/3"
        );
    }

    #[test]
    fn test_header_mentions_version() {
        let header = SystemInfo::detect().to_log_header();
        assert!(header.contains(env!("CARGO_PKG_VERSION")));
    }
}
