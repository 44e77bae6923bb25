//! OSRM Table API client.
//!
//! Requests an all-pairs duration matrix for an ordered list of stops in a
//! single call.
//!
//! ### Specification
//!
//! - **Endpoint**: `{base_url}/table/v1/{profile}/{lng,lat;lng,lat;...}`
//! - **Query**: `sources` and `destinations` set to `0;1;...;N-1`
//! - **Response**: `durations` N×N, `null` for unreachable pairs
//! - **Failure**: transport errors, non-2xx status, non-`Ok` code or a
//!   missing `durations` field abort the request. No retries.

pub mod error;
pub mod request;
pub mod response;

pub use error::OsrmError;
pub use request::{TableQuery, TableRequest, index_param};
pub use response::TableApiResponse;

use reqwest::header;
use routeprep_core::{AppConfig, Coordinates, Error, TravelMatrix};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// OSRM client configuration.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL (default: http://localhost:5000).
    pub base_url: String,
    /// Routing profile in the request path (default: driving).
    pub profile: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: routeprep/0.x).
    pub user_agent: String,
    /// Maximum coordinates per request, 0 for no limit (default: 100).
    pub max_locations: usize,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for OsrmConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.osrm_base_url.clone(),
            profile: config.osrm_profile.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            max_locations: config.max_locations,
        }
    }
}

/// OSRM table API client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, OsrmError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OsrmError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Fetch the raw duration grid for `coordinates`, indexed in input order.
    ///
    /// An empty input returns an empty grid without contacting the service.
    pub async fn table(&self, coordinates: &[Coordinates]) -> Result<Vec<Vec<Option<f64>>>, OsrmError> {
        if coordinates.is_empty() {
            return Ok(Vec::new());
        }

        let req = TableRequest::new(coordinates);
        req.validate(self.config.max_locations)?;

        let start = Instant::now();
        let url = req.url(&self.config.base_url, &self.config.profile);

        tracing::debug!(locations = coordinates.len(), "requesting OSRM table: {}", url);

        let http_response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .query(&req.query())
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("OSRM response status: {}", status);

        let bytes = http_response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            let message = TableApiResponse::from_slice(&bytes).ok().and_then(|r| r.message);
            return Err(OsrmError::HttpError { status: status.as_u16(), message });
        }

        let durations = TableApiResponse::from_slice(&bytes)?.into_durations(coordinates.len())?;

        tracing::debug!("table completed in {:?}, {} rows", start.elapsed(), durations.len());

        Ok(durations)
    }

    /// Build the penalty-normalized travel matrix for `coordinates`.
    pub async fn build_travel_matrix(&self, coordinates: &[Coordinates], penalty: f64) -> Result<TravelMatrix, Error> {
        let durations = self.table(coordinates).await?;
        Ok(TravelMatrix::from_durations(&durations, penalty))
    }
}
