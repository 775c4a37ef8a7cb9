//! Configuration settings management
//!
//! This module handles loading configuration from multiple sources
//! and validating it before any request goes out.

use crate::error::{GhwError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://buckets.grayhatwarfare.com/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Bearer token for the search API. Debug output never shows the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.api_key {
            Some(key) if !key.is_empty() => {}
            _ => return Err(GhwError::config("missing api key")),
        }

        self.base_url()?;

        if self.timeout_secs == 0 {
            return Err(GhwError::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Parsed API root
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Location of the optional config file, `None` when no directory can be found
    pub fn get_config_path() -> Option<PathBuf> {
        config_path_from(|name| std::env::var(name).ok(), dirs::config_dir())
    }
}

/// Resolve the config file path from `GHW_CONFIG`, `XDG_CONFIG_HOME`, `HOME`
/// and finally the platform config directory.
pub fn config_path_from<F>(lookup: F, platform_dir: Option<PathBuf>) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

    if let Some(path) = non_empty("GHW_CONFIG") {
        return Some(PathBuf::from(path));
    }

    let config_dir = non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))
        .or(platform_dir)?;

    Some(config_dir.join("ghw").join("ghw.toml"))
}

/// Load configuration from the file and environment layers.
/// Command-line flags are applied on top by the caller.
pub async fn load_config() -> Result<Config> {
    let mut config = Config::default();

    match Config::get_config_path() {
        Some(path) if path.exists() => config = load_from_file(&path).await?,
        Some(_) => {}
        None => debug!("no config directory found, skipping config file"),
    }

    load_from_env(&mut config);

    Ok(config)
}

pub async fn load_from_file(path: &Path) -> Result<Config> {
    let contents = tokio::fs::read_to_string(path).await?;

    toml::from_str::<Config>(&contents).map_err(|e| {
        GhwError::config(format!(
            "failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}

fn load_from_env(config: &mut Config) {
    apply_env(config, |name| std::env::var(name).ok());
}

/// Overlay environment values onto `config` using `lookup` to read variables
pub fn apply_env<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("DEBUG") {
        config.debug = value.to_lowercase() == "true" || value == "1";
    }

    if let Some(value) = lookup("GHW_API_KEY") {
        if !value.is_empty() {
            config.api_key = Some(ApiKey::new(value));
        }
    }

    if let Some(value) = lookup("GHW_BASE_URL") {
        if !value.is_empty() {
            config.base_url = value;
        }
    }

    if let Some(value) = lookup("GHW_TIMEOUT_SECS") {
        if let Ok(seconds) = value.parse::<u64>() {
            config.timeout_secs = seconds;
        }
    }
}
