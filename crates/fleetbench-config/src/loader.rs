//! Layered loading: defaults, user file, project file, local file, environment.

use crate::{FleetbenchConfig, Paths};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Builds a [`FleetbenchConfig`] from every source, later layers winning
/// key by key.
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    env_source: Option<HashMap<String, String>>,
    user_config: bool,
}

impl ConfigLoader {
    /// Loader rooted at the current directory.
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "FLEETBENCH".to_string(),
            env_source: None,
            user_config: true,
        }
    }

    /// Directory searched for fleetbench.toml and fleetbench.local.toml.
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read environment overrides from `vars` instead of the process
    /// environment.
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Ignore ~/.config/fleetbench/config.toml.
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Files that exist, lowest precedence first.
    fn file_layers(&self) -> Vec<PathBuf> {
        let user = self
            .user_config
            .then(|| Paths::new().user_config_file().ok())
            .flatten();

        user.into_iter()
            .chain([
                Paths::project_config_file(&self.project_dir),
                Paths::local_config_file(&self.project_dir),
            ])
            .filter(|path| path.is_file())
            .collect()
    }

    /// Merges every layer, then validates the result.
    pub fn load(self) -> Result<FleetbenchConfig> {
        let defaults = config::Config::try_from(&FleetbenchConfig::default())
            .context("Failed to encode built-in defaults")?;
        let mut builder = config::Config::builder().add_source(defaults);

        for path in self.file_layers() {
            tracing::debug!(path = %path.display(), "reading config layer");
            builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
        }

        // FLEETBENCH_SECTION__KEY; `__` keeps snake_case keys such as
        // `vehicles_per_query` intact.
        let environment = config::Environment::with_prefix(&self.env_prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(self.env_source);

        let merged: FleetbenchConfig = builder
            .add_source(environment)
            .build()
            .context("Failed to merge configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        merged.validate().context("Configuration is invalid")?;
        Ok(merged)
    }

    /// [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(self) -> FleetbenchConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
