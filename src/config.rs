//! Configuration for the Murmur tool core
//!
//! Settings come from an optional TOML file under the platform config
//! directory, overridden by `MURMUR_*` environment variables. Everything has
//! a sensible default; the crate works with no configuration at all.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::{Error, Result};

/// Tool core configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the user home directory (mostly useful in tests)
    pub home_dir: Option<PathBuf>,

    /// Timeout for network reachability probes, in seconds
    pub network_timeout_secs: u64,

    /// Timeout for subprocess probes (nmcli, df, nvidia-smi, ...), in seconds
    pub subprocess_timeout_secs: u64,

    /// Web search settings
    pub search: SearchConfig,
}

/// Web search settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Region code passed to the search backend (e.g. "wt-wt", "us-en")
    pub region: String,

    /// Maximum results per search
    pub max_results: usize,

    /// HTTP timeout for search requests, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_dir: None,
            network_timeout_secs: 3,
            subprocess_timeout_secs: 5,
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region: "wt-wt".to_string(),
            max_results: 5,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the config file if present, then
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.is_file() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw)?
            }
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Path to the config file (`<config dir>/murmur/config.toml`), if the
    /// platform exposes a config directory.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "murmur", "murmur")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self) {
        if let Ok(home) = std::env::var("MURMUR_HOME") {
            self.home_dir = Some(PathBuf::from(home));
        }
        if let Some(secs) = env_u64("MURMUR_NETWORK_TIMEOUT") {
            self.network_timeout_secs = secs;
        }
        if let Some(secs) = env_u64("MURMUR_SUBPROCESS_TIMEOUT") {
            self.subprocess_timeout_secs = secs;
        }
        if let Ok(region) = std::env::var("MURMUR_SEARCH_REGION") {
            self.search.region = region;
        }
        if let Some(max) = env_u64("MURMUR_SEARCH_MAX_RESULTS") {
            self.search.max_results = max as usize;
        }
        if let Some(secs) = env_u64("MURMUR_SEARCH_TIMEOUT") {
            self.search.timeout_secs = secs;
        }
    }

    /// Resolve the effective home directory.
    ///
    /// # Errors
    ///
    /// Fails if no override is set and the platform has no home directory.
    pub fn resolve_home(&self) -> Result<PathBuf> {
        if let Some(home) = &self.home_dir {
            return Ok(home.clone());
        }
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| Error::Config("could not determine home directory".to_string()))
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.network_timeout_secs, 3);
        assert_eq!(config.search.region, "wt-wt");
        assert_eq!(config.search.max_results, 5);
    }

    // set_var is unsafe in edition 2024; this test owns the variables and
    // the suite has no other reader of them
    #[allow(unsafe_code)]
    #[test]
    fn every_field_has_an_env_override() {
        // One test owns these variables; nothing else in the suite reads them
        unsafe {
            std::env::set_var("MURMUR_NETWORK_TIMEOUT", "9");
            std::env::set_var("MURMUR_SUBPROCESS_TIMEOUT", "11");
            std::env::set_var("MURMUR_SEARCH_REGION", "de-de");
            std::env::set_var("MURMUR_SEARCH_MAX_RESULTS", "8");
            std::env::set_var("MURMUR_SEARCH_TIMEOUT", "20");
        }

        let mut config = Config::default();
        config.apply_env();
        assert_eq!(config.network_timeout_secs, 9);
        assert_eq!(config.subprocess_timeout_secs, 11);
        assert_eq!(config.search.region, "de-de");
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.timeout_secs, 20);

        unsafe {
            std::env::remove_var("MURMUR_NETWORK_TIMEOUT");
            std::env::remove_var("MURMUR_SUBPROCESS_TIMEOUT");
            std::env::remove_var("MURMUR_SEARCH_REGION");
            std::env::remove_var("MURMUR_SEARCH_MAX_RESULTS");
            std::env::remove_var("MURMUR_SEARCH_TIMEOUT");
        }
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            network_timeout_secs = 7

            [search]
            region = "us-en"
            "#,
        )
        .unwrap();
        assert_eq!(config.network_timeout_secs, 7);
        assert_eq!(config.search.region, "us-en");
        // Untouched fields keep their defaults
        assert_eq!(config.search.max_results, 5);
    }
}
