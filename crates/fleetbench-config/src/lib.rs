//! Configuration management for fleetbench
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the caller)
//! 2. Environment variables (`FLEETBENCH_<SECTION>__<KEY>`, e.g.
//!    `FLEETBENCH_GENERATION__SEED=7`)
//! 3. fleetbench.local.toml (gitignored, local overrides)
//! 4. fleetbench.toml (git-tracked, project config)
//! 5. ~/.config/fleetbench/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fleetbench_types::{ExistingTablePolicy, TimeInterval};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main fleetbench configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetbenchConfig {
    pub generation: GenerationConfig,
    pub loader: LoaderConfig,
}

/// Query generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u64,
    /// Vehicles in the synthetic catalog.
    pub scale: usize,
    /// Start of the dataset's time range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the dataset's time range (exclusive).
    pub end: DateTime<Utc>,
    /// Vehicles named by `last-loc-by-truck`.
    pub vehicles_per_query: usize,
    /// Generation threads; 0 uses one per core.
    pub workers: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            scale: 1000,
            start: Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            end: Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).single().unwrap_or_default(),
            vehicles_per_query: 1,
            workers: 0,
        }
    }
}

/// QuestDB REST loader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub endpoint: String,
    pub create_delay_ms: u64,
    pub existing_tables: ExistingTablePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000/".to_string(),
            create_delay_ms: 1000,
            existing_tables: ExistingTablePolicy::Reuse,
        }
    }
}

impl LoaderConfig {
    pub fn create_delay(&self) -> Duration {
        Duration::from_millis(self.create_delay_ms)
    }
}

impl FleetbenchConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Checks cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generation = &self.generation;
        if generation.start >= generation.end {
            return Err(ConfigError::ValidationError(format!(
                "generation.start ({}) must be before generation.end ({})",
                generation.start, generation.end
            )));
        }
        if generation.scale == 0 {
            return Err(ConfigError::ValidationError(
                "generation.scale must be at least 1".to_string(),
            ));
        }
        if self.loader.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "loader.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The dataset's time range.
    pub fn time_range(&self) -> Result<TimeInterval, ConfigError> {
        TimeInterval::new(self.generation.start, self.generation.end)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
