//! OSRM table response types and validation.

use serde::Deserialize;

use super::OsrmError;

/// Raw response from the OSRM table service.
///
/// Only the fields the matrix builder reads are modeled.
#[derive(Debug, Deserialize)]
pub struct TableApiResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Row-major durations in seconds; `null` marks an unreachable pair.
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableApiResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, OsrmError> {
        serde_json::from_slice(bytes).map_err(|e| OsrmError::Parse(e.to_string()))
    }

    /// Validate the response and return an `expected`×`expected` duration grid.
    ///
    /// A `code` other than `Ok` wins over a missing `durations` field so the
    /// service's own message is surfaced.
    pub fn into_durations(self, expected: usize) -> Result<Vec<Vec<Option<f64>>>, OsrmError> {
        if let Some(code) = self.code
            && code != "Ok"
        {
            return Err(OsrmError::Upstream {
                code,
                message: self.message.unwrap_or_else(|| "unexpected OSRM response code".to_string()),
            });
        }

        let durations = self.durations.ok_or(OsrmError::MissingDurations)?;

        if durations.len() != expected {
            return Err(OsrmError::DimensionMismatch {
                detail: format!("has {} rows, expected {expected}", durations.len()),
            });
        }

        for (row_index, row) in durations.iter().enumerate() {
            if row.len() != expected {
                return Err(OsrmError::DimensionMismatch {
                    detail: format!("row {row_index} has {} entries, expected {expected}", row.len()),
                });
            }
        }

        Ok(durations)
    }
}
