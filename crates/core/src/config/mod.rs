//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ROUTEPREP_*)
//! 2. TOML config file (if ROUTEPREP_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! Command-line flags are merged on top by the binaries via [`AppConfig::load_with`].

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Command-line overrides
/// 2. Environment variables (ROUTEPREP_*)
/// 3. TOML config file (if ROUTEPREP_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite geocode cache.
    ///
    /// Set via ROUTEPREP_CACHE_PATH environment variable.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Base URL of the OSRM service.
    ///
    /// Set via ROUTEPREP_OSRM_BASE_URL environment variable.
    #[serde(default = "default_osrm_base_url")]
    pub osrm_base_url: String,

    /// OSRM routing profile used in the table path.
    ///
    /// Set via ROUTEPREP_OSRM_PROFILE environment variable.
    #[serde(default = "default_osrm_profile")]
    pub osrm_profile: String,

    /// Duration substituted for unreachable pairs, in seconds.
    ///
    /// Set via ROUTEPREP_PENALTY environment variable.
    #[serde(default = "default_penalty")]
    pub penalty: f64,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via ROUTEPREP_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of coordinates sent in one table request. 0 disables the check.
    ///
    /// Set via ROUTEPREP_MAX_LOCATIONS environment variable.
    #[serde(default = "default_max_locations")]
    pub max_locations: usize,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via ROUTEPREP_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("cache.db")
}

fn default_osrm_base_url() -> String {
    "http://localhost:5000".into()
}

fn default_osrm_profile() -> String {
    "driving".into()
}

fn default_penalty() -> f64 {
    crate::matrix::DEFAULT_PENALTY
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_locations() -> usize {
    100
}

fn default_user_agent() -> String {
    "routeprep/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            osrm_base_url: default_osrm_base_url(),
            osrm_profile: default_osrm_profile(),
            penalty: default_penalty(),
            timeout_ms: default_timeout_ms(),
            max_locations: default_max_locations(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from defaults, config file and environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration and merge command-line overrides on top.
    ///
    /// `overrides` is any serializable value whose present fields replace
    /// the corresponding configuration keys; `None` fields should be skipped
    /// during serialization so they do not shadow lower layers.
    pub fn load_with<T: Serialize>(overrides: &T) -> Result<Self, ConfigError> {
        Self::extract(Self::figment().merge(Serialized::defaults(overrides)))
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("ROUTEPREP_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("ROUTEPREP_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
