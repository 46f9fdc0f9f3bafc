pub mod config;

pub use config::{ApiConfig, Config, FocusConfig, GeminiConfig};

use std::path::PathBuf;

/// Returns `~/.config/daylist[-dev]/` based on DAYLIST_ENV.
///
/// Set DAYLIST_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYLIST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("daylist-dev")
    } else {
        base_dir.join("daylist")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
