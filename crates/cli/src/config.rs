//! Configuration for the comparison command
//!
//! Settings are read from a file (TOML, JSON or YAML, chosen by extension)
//! and then overridden by `CP_REPORT_COMPARE_*` environment variables.

use anyhow::{Context, Result};
use report_lib::{Cluster, ComparisonSettings, Credentials};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "CP_REPORT_COMPARE";

/// Comparison run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    /// Control plane base URL
    pub control_plane_url: String,
    /// Username for Basic authentication
    pub username: String,
    /// API token for Basic authentication
    pub token: String,
    /// Clusters to compare, in column order
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    /// Output workbook path
    #[serde(default = "report_lib::pipeline::default_comparison_output")]
    pub output: PathBuf,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CompareConfig {
    /// Load from `path`, or from the default location when `None`
    ///
    /// An explicit path must exist; the default file is optional so that
    /// everything can come from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path, true, ENV_PREFIX),
            None => Self::load_from(&Self::config_path()?, false, ENV_PREFIX),
        }
    }

    fn load_from(path: &Path, required: bool, env_prefix: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(required))
            .add_source(config::Environment::with_prefix(env_prefix))
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Invalid comparison configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("cp-report").join("compare.toml"))
    }

    pub fn into_settings(self) -> ComparisonSettings {
        ComparisonSettings {
            control_plane_url: self.control_plane_url,
            credentials: Credentials::new(self.username, self.token),
            clusters: self.clusters,
            output: self.output,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
