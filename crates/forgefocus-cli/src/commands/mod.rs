pub mod config;
pub mod history;
pub mod presets;
pub mod timer;

use forgefocus_core::{AggregateRepository, Config, Database};

/// Open the aggregate store named by the config, or the default database.
pub fn open_repository(config: &Config) -> Result<AggregateRepository<Database>, Box<dyn std::error::Error>> {
    let db = match config.database_path() {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };
    Ok(AggregateRepository::new(db))
}
