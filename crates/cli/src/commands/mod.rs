pub mod geocode;
pub mod matrix;

use std::path::PathBuf;

use serde::Serialize;

/// Command-line values layered over the loaded configuration.
///
/// Unset fields are skipped so environment and file settings still apply.
#[derive(Debug, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osrm_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osrm_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}
