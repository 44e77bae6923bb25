//! `build-matrix`: travel time matrix between geocoded stops via the OSRM table API.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use routeprep_client::{OsrmClient, OsrmConfig};
use routeprep_core::stops::read_coordinates;
use routeprep_core::{AppConfig, TravelMatrix};

use super::ConfigOverrides;

/// Build a travel time matrix between stops using the OSRM Table API.
#[derive(Debug, Parser)]
#[command(name = "build-matrix", version)]
pub struct MatrixArgs {
    /// Path to the geocoded stops CSV (expects latitude and longitude columns).
    #[arg(long, value_name = "PATH", default_value = "geocoded_stops.csv")]
    pub geocoded: PathBuf,

    /// Destination for the travel time matrix JSON file.
    #[arg(long, value_name = "PATH", default_value = "travel_matrix.json")]
    pub output: PathBuf,

    /// Base URL of the OSRM service [default: http://localhost:5000].
    #[arg(long, value_name = "URL")]
    pub osrm_base_url: Option<String>,

    /// Penalty value in seconds used when no route is returned [default: 1000000].
    #[arg(long, value_name = "SECONDS")]
    pub penalty: Option<f64>,

    /// OSRM routing profile [default: driving].
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Request timeout in milliseconds [default: 10000].
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Name of the latitude column.
    #[arg(long, value_name = "NAME", default_value = "lat")]
    pub lat_column: String,

    /// Name of the longitude column.
    #[arg(long, value_name = "NAME", default_value = "lng")]
    pub lng_column: String,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

impl MatrixArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            osrm_base_url: self.osrm_base_url.clone(),
            osrm_profile: self.profile.clone(),
            penalty: self.penalty,
            timeout_ms: self.timeout_ms,
            ..Default::default()
        }
    }
}

/// Load configuration, request the matrix and write it as JSON.
pub async fn run(args: &MatrixArgs) -> anyhow::Result<TravelMatrix> {
    let config = AppConfig::load_with(&args.overrides()).context("loading configuration")?;

    let coordinates = read_coordinates(&args.geocoded, &args.lat_column, &args.lng_column)?;
    tracing::info!(stops = coordinates.len(), osrm = %config.osrm_base_url, "building travel matrix");

    let client = OsrmClient::new(OsrmConfig::from(&config))?;
    let matrix = client.build_travel_matrix(&coordinates, config.penalty).await?;

    matrix
        .write_json(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(matrix)
}
