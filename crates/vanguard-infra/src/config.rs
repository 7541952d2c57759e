//! Engine configuration loader for Vanguard.
//!
//! Reads `config.toml` from the data directory (`~/.vanguard/` in production)
//! and deserializes it into [`EngineConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use vanguard_types::config::EngineConfig;

/// Upper bound on compare-and-swap retries, whatever the file says.
const MAX_WRITE_RETRIES: u32 = 20;

/// Default data directory: `~/.vanguard`, or `./.vanguard` without a home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vanguard")
}

/// Resolve the data directory.
///
/// Priority:
/// 1. Explicit override (CLI flag or `VANGUARD_DATA_DIR`, merged by clap)
/// 2. [`default_data_dir`]
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(default_data_dir)
}

/// Load engine configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`EngineConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config
///   with `max_write_retries` capped.
pub async fn load_engine_config(data_dir: &Path) -> EngineConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return EngineConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return EngineConfig::default();
        }
    };

    match toml::from_str::<EngineConfig>(&content) {
        Ok(mut config) => {
            config.max_write_retries = config.max_write_retries.min(MAX_WRITE_RETRIES);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            EngineConfig::default()
        }
    }
}
