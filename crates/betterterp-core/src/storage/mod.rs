mod config;
pub mod gateway;
pub mod keys;
pub mod kv;
pub mod memory;

pub use config::{ApiConfig, Config, LogConfig};
pub use gateway::PersistenceGateway;
pub use kv::KvStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Returns `~/.config/betterterp[-dev]/` based on BETTERTERP_ENV.
///
/// Set BETTERTERP_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BETTERTERP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("betterterp-dev")
    } else {
        base_dir.join("betterterp")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
