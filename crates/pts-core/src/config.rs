use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::FetchOptions;
use crate::retry::{LinearBackoff, RetryPolicy, DEFAULT_RETRIES};

/// Retry parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the initial call; 0 disables retrying.
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Linear backoff step in seconds: the n-th retry waits n steps.
    #[serde(default = "default_backoff_step_secs")]
    pub backoff_step_secs: u64,
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_backoff_step_secs() -> u64 {
    1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            backoff_step_secs: default_backoff_step_secs(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            backoff: LinearBackoff {
                step: Duration::from_secs(self.backoff_step_secs),
            },
        }
    }
}

/// Global configuration loaded from `~/.config/pts/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtsConfig {
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole request.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for PtsConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            retry: None,
        }
    }
}

impl PtsConfig {
    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    /// Effective retry policy, with `retries` overriding the configured budget.
    pub fn retry_policy(&self, retries: Option<u32>) -> RetryPolicy {
        let mut policy = self.retry_config().policy();
        if let Some(n) = retries {
            policy.retries = n;
        }
        policy
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            headers: Vec::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pts")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PtsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PtsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<PtsConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PtsConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
