//! Unified error types for routeprep.
//!
//! Every variant renders as `CODE: detail` so failures read the same way
//! whichever binary surfaces them.

use tokio_rusqlite::rusqlite;

/// Unified error types for the routeprep tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file does not exist.
    #[error("INPUT_NOT_FOUND: {0}")]
    InputNotFound(String),

    /// Input CSV lacks a column the step needs.
    #[error("MISSING_COLUMN: input CSV must include a '{0}' column")]
    MissingColumn(String),

    /// Input row could not be interpreted (e.g., non-numeric latitude).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Network failure or non-success HTTP status from the routing service.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Routing service answered, but not with what we expected.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),

    /// Geocoding provider could not resolve an address.
    #[error("GEOCODE_FAILED: {0}")]
    GeocodeFailed(String),

    /// Reading or writing a CSV file failed.
    #[error("IO_ERROR: {0}")]
    Csv(#[from] csv::Error),

    /// Encoding the matrix JSON failed.
    #[error("IO_ERROR: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl Error {
    /// Short machine-readable code, the prefix of the display string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InputNotFound(_) => "INPUT_NOT_FOUND",
            Error::MissingColumn(_) => "MISSING_COLUMN",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Database(_) | Error::MigrationFailed(_) => "CACHE_ERROR",
            Error::HttpError(_) => "HTTP_ERROR",
            Error::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Error::GeocodeFailed(_) => "GEOCODE_FAILED",
            Error::Csv(_) | Error::Json(_) | Error::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputNotFound("stops.csv".to_string());
        assert!(err.to_string().contains("INPUT_NOT_FOUND"));
        assert!(err.to_string().contains("stops.csv"));
    }

    #[test]
    fn test_missing_column_display() {
        let err = Error::MissingColumn("address".to_string());
        assert_eq!(err.to_string(), "MISSING_COLUMN: input CSV must include a 'address' column");
    }

    #[test]
    fn test_code_matches_display_prefix() {
        let errors = [
            Error::InvalidInput("x".into()),
            Error::HttpError("x".into()),
            Error::MalformedResponse("x".into()),
            Error::GeocodeFailed("x".into()),
            Error::MigrationFailed("x".into()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with(err.code()), "{err}");
        }
    }

    #[test]
    fn test_rusqlite_conversion() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(err.code(), "CACHE_ERROR");
    }
}
