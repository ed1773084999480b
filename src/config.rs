//! Environment-driven configuration.
//!
//! - `STICKIES_DB`: storage file path (see [`crate::storage::db_path`]).
//! - `STICKIES_DARK`: system dark-mode preference (`1`/`true`/`0`/`false`).
//! - `COLORFGBG`: terminal colours, consulted when `STICKIES_DARK` is unset.

use std::path::PathBuf;

use crate::storage::db_path;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Dark-mode value used until the user picks one.
    pub prefers_dark: bool,
}

impl Config {
    pub fn from_env() -> Config {
        let prefers_dark = std::env::var("STICKIES_DARK")
            .ok()
            .and_then(|v| parse_flag(&v))
            .or_else(|| std::env::var("COLORFGBG").ok().and_then(|v| background_is_dark(&v)))
            .unwrap_or(false);
        Config { db_path: db_path(), prefers_dark }
    }

    /// Log file kept beside the storage file.
    pub fn log_path(&self) -> PathBuf {
        let mut p = self.db_path.clone();
        p.set_file_name("stickies.log");
        p
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// COLORFGBG is "fg;bg" (sometimes "fg;default;bg"); ANSI backgrounds 0-6 and 8 are dark.
fn background_is_dark(raw: &str) -> Option<bool> {
    let bg: u8 = raw.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg < 7 || bg == 8)
}
