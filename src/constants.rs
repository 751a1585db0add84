//! Application-wide constants.
//!
//! Centralizes defaults, timing values and filesystem locations.

use std::path::PathBuf;

// ── Backend ───────────────────────────────────────────────────────
/// Default chat endpoint (the development backend).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";
/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "NEXUS_API_URL";
/// Request timeout (seconds, 0 = transport default).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 0;
/// Longest slice of an error body kept in the log.
pub const MAX_ERROR_BODY_LEN: usize = 300;

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

// ── UI Layout ─────────────────────────────────────────────────────
/// Page up/down step size for the chat history.
pub const PAGE_SIZE: usize = 10;
/// Lines scrolled per mouse wheel notch.
pub const MOUSE_SCROLL_STEP: usize = 3;
/// Help overlay width.
pub const HELP_POPUP_WIDTH: u16 = 52;
/// Help overlay height.
pub const HELP_POPUP_HEIGHT: u16 = 16;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages.
pub const LANGUAGES: &[&str] = &["en", "pt"];

// ── Logging ───────────────────────────────────────────────────────
/// Filter directive used when neither RUST_LOG nor --log-level is set.
pub const DEFAULT_LOG_DIRECTIVE: &str = "nexus=info";

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/nexus/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("nexus")
}

/// Returns `~/.config/nexus/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/nexus/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}

/// Returns `~/.config/nexus/.env`.
pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}

/// Returns `~/.local/share/nexus/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("nexus")
}

/// Returns `~/.local/share/nexus/nexus.log`.
pub fn log_file_path() -> PathBuf {
    data_dir().join("nexus.log")
}
