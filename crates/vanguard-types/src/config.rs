//! Engine configuration types for Vanguard.
//!
//! `EngineConfig` represents the top-level `config.toml` that tunes the
//! progression index weights and the write-retry policy of the service layer.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the progression engine.
///
/// Loaded from `~/.vanguard/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weights folded into the progression index.
    #[serde(default)]
    pub index_weights: IndexWeights,

    /// How many times a compare-and-swap write is retried after a conflict.
    #[serde(default = "default_max_write_retries")]
    pub max_write_retries: u32,

    /// Refuse to load catalogs whose prerequisite edges contain a cycle.
    #[serde(default = "default_reject_cyclic_catalogs")]
    pub reject_cyclic_catalogs: bool,
}

fn default_max_write_retries() -> u32 {
    3
}

fn default_reject_cyclic_catalogs() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_weights: IndexWeights::default(),
            max_write_retries: default_max_write_retries(),
            reject_cyclic_catalogs: default_reject_cyclic_catalogs(),
        }
    }
}

/// Multipliers applied to each progression index component.
///
/// `xp_divisor` divides total XP rather than multiplying it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexWeights {
    pub learned_percent: f64,
    pub average_level: f64,
    pub xp_divisor: f64,
    pub active_percent: f64,
    pub multiplier_weight: f64,
}

impl Default for IndexWeights {
    fn default() -> Self {
        Self {
            learned_percent: 10.0,
            average_level: 25.0,
            xp_divisor: 100.0,
            active_percent: 15.0,
            multiplier_weight: 5.0,
        }
    }
}
