//! notifybar: desktop notifications for single-line status bars.
//!
//! A listener queues incoming notifications; each periodic `render` shows
//! the oldest one with a countdown until its display time runs out.

pub mod commands;
pub mod config;
pub mod ingest;
pub mod listener;
pub mod scheduler;

use std::path::PathBuf;

use notify_store::FileStore;
use tracing_subscriber::EnvFilter;

use config::AppConfig;

/// Determine the state directory.
/// Priority: NOTIFYBAR_DATA_DIR > user cache dir > ./.cache
pub fn data_dir(config: &AppConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".cache"))
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::debug!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Logs go to stderr; stdout belongs to the status bar.
pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load config and open the state files.
pub fn init_foundation() -> Result<(AppConfig, FileStore), anyhow::Error> {
    load_dotenv();
    let config = AppConfig::from_env()?;
    let dir = data_dir(&config);
    tracing::debug!("Opening state directory {}", dir.display());
    let store = FileStore::open(&dir)?;
    Ok((config, store))
}
