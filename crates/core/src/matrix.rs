//! Travel matrix normalization and JSON output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default duration in seconds used when no route exists between two stops.
pub const DEFAULT_PENALTY: f64 = 1_000_000.0;

/// N×N grid of travel durations in seconds, indexed in input order.
///
/// Serializes as `{"matrix": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelMatrix {
    pub matrix: Vec<Vec<f64>>,
}

/// Replace missing entries with `penalty`.
pub fn normalize_durations(durations: &[Vec<Option<f64>>], penalty: f64) -> Vec<Vec<f64>> {
    durations
        .iter()
        .map(|row| row.iter().map(|value| value.unwrap_or(penalty)).collect())
        .collect()
}

impl TravelMatrix {
    /// Build a matrix from raw service durations, substituting `penalty` for nulls.
    pub fn from_durations(durations: &[Vec<Option<f64>>], penalty: f64) -> Self {
        let unreachable = durations.iter().flatten().filter(|v| v.is_none()).count();
        if unreachable > 0 {
            tracing::info!(unreachable, penalty, "substituted penalty for unreachable pairs");
        }

        let matrix = Self { matrix: normalize_durations(durations, penalty) };

        let off_diagonal = matrix.nonzero_diagonal();
        if off_diagonal > 0 {
            tracing::warn!(count = off_diagonal, "diagonal entries with non-zero self-duration");
        }

        matrix
    }

    /// Number of stops (rows).
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Duration from stop `from` to stop `to`, if both indices exist.
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.matrix.get(from).and_then(|row| row.get(to)).copied()
    }

    fn nonzero_diagonal(&self) -> usize {
        self.matrix
            .iter()
            .enumerate()
            .filter(|(i, row)| row.get(*i).is_some_and(|v| *v != 0.0))
            .count()
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed JSON document to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), Error> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
