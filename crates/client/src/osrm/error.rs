//! OSRM client error types.

use std::sync::Arc;

use routeprep_core::Error;

/// Errors from the OSRM table API client.
#[derive(Debug, thiserror::Error)]
pub enum OsrmError {
    /// Coordinate outside the valid latitude/longitude range.
    #[error("invalid coordinate at index {index}: {detail}")]
    InvalidCoordinate { index: usize, detail: String },

    /// More coordinates than the configured per-request limit.
    #[error("too many locations: {count} (max {max})")]
    TooManyLocations { count: usize, max: usize },

    /// HTTP error response.
    #[error("OSRM table request failed with status {status}{}", detail_suffix(.message))]
    HttpError { status: u16, message: Option<String> },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("failed to reach OSRM service: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body is not the JSON we expect.
    #[error("parse error: {0}")]
    Parse(String),

    /// Service answered with a non-`Ok` code.
    #[error("OSRM error: {code}: {message}")]
    Upstream { code: String, message: String },

    /// Response lacks the top-level `durations` field.
    #[error("OSRM response missing 'durations' field")]
    MissingDurations,

    /// `durations` is not N×N for N requested coordinates.
    #[error("durations matrix {detail}")]
    DimensionMismatch { detail: String },
}

fn detail_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl From<reqwest::Error> for OsrmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { OsrmError::Timeout } else { OsrmError::Network(Arc::new(err)) }
    }
}

impl From<OsrmError> for Error {
    fn from(err: OsrmError) -> Self {
        match err {
            OsrmError::InvalidCoordinate { .. } | OsrmError::TooManyLocations { .. } => {
                Error::InvalidInput(err.to_string())
            }
            OsrmError::HttpError { .. } | OsrmError::Timeout | OsrmError::Network(_) => {
                Error::HttpError(err.to_string())
            }
            OsrmError::Parse(_)
            | OsrmError::Upstream { .. }
            | OsrmError::MissingDurations
            | OsrmError::DimensionMismatch { .. } => Error::MalformedResponse(err.to_string()),
        }
    }
}
