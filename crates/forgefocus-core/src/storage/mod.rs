mod config;
pub mod database;
pub mod records;
pub mod repository;

pub use config::Config;
pub use database::{Database, KvStore, MemoryStore, STORAGE_KEY};
pub use records::{DailyStats, SessionRecord, StorageData, SCHEMA_VERSION};
pub use repository::AggregateRepository;

use std::path::PathBuf;

/// Returns `~/.config/forgefocus[-dev]/` based on FORGEFOCUS_ENV.
///
/// Set FORGEFOCUS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FORGEFOCUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("forgefocus-dev")
    } else {
        base_dir.join("forgefocus")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
