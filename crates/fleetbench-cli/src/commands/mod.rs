//! CLI command implementations.

use std::path::Path;

use anyhow::{Context, Result};
use fleetbench_config::{ConfigLoader, FleetbenchConfig};

pub mod config;
pub mod generate;
pub mod init_schema;
pub mod scenarios;
pub mod tables;
pub mod version;

/// Loads the layered configuration rooted at `project`.
pub(crate) fn load_config(project: &Path) -> Result<FleetbenchConfig> {
    ConfigLoader::new()
        .with_project_dir(project)
        .load()
        .with_context(|| format!("Failed to load configuration from {}", project.display()))
}
