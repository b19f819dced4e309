use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::checksum::HashAlgorithm;
use crate::fetch::FetchOptions;

/// HTTP settings for fetching metalink documents (optional `[fetch]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum redirects to follow (0 disables following).
    pub max_redirections: u32,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let opts = FetchOptions::default();
        Self {
            connect_timeout_secs: opts.connect_timeout.as_secs(),
            timeout_secs: opts.timeout.as_secs(),
            max_redirections: opts.max_redirections,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn to_options(&self) -> FetchOptions {
        let defaults = FetchOptions::default();
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            follow_redirects: self.max_redirections > 0,
            max_redirections: self.max_redirections,
            user_agent: self.user_agent.clone().or(defaults.user_agent),
        }
    }
}

/// Global configuration loaded from `~/.config/mlk/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalinkConfig {
    /// Algorithm `mlk verify` uses when none is given on the command line
    /// (e.g. "sha256"). If unset, the strongest declared one is used.
    #[serde(default)]
    pub default_algorithm: Option<String>,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl MetalinkConfig {
    /// `default_algorithm` parsed; unknown names are an error.
    pub fn default_hash(&self) -> crate::Result<Option<HashAlgorithm>> {
        self.default_algorithm
            .as_deref()
            .map(str::parse::<HashAlgorithm>)
            .transpose()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mlk")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MetalinkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MetalinkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MetalinkConfig = toml::from_str(&data)?;
    Ok(cfg)
}
