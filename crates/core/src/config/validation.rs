//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `penalty` is negative, NaN or infinite
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `osrm_base_url` is not an http(s) URL
    /// - `osrm_profile` or `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(ConfigError::Invalid {
                field: "penalty".into(),
                reason: "must be a finite, non-negative number".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        match url::Url::parse(&self.osrm_base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError::Invalid {
                    field: "osrm_base_url".into(),
                    reason: format!("unsupported scheme: {}", parsed.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "osrm_base_url".into(), reason: e.to_string() });
            }
        }

        if self.osrm_profile.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "osrm_profile".into(), reason: "must not be empty".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.max_locations == 0 {
            tracing::warn!("max_locations is 0; table requests are not size-limited");
        }

        Ok(())
    }
}
