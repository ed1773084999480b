use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber.
///
/// Tracing is opt-in via `RUST_LOG`. Events go to `log_path` because the TUI
/// owns the terminal; if the file cannot be opened logging stays off.
pub fn init_logging(log_path: &Path) {
    let Some(filter) = std::env::var("RUST_LOG").ok().and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    }) else {
        return;
    };

    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(_) => return,
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .try_init();
}
