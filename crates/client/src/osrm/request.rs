//! OSRM table request construction and validation.

use routeprep_core::Coordinates;
use serde::Serialize;

use super::OsrmError;

/// An all-pairs table request for an ordered list of coordinates.
#[derive(Debug, Clone)]
pub struct TableRequest<'a> {
    pub coordinates: &'a [Coordinates],
}

/// Query string for the table endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableQuery {
    pub sources: String,
    pub destinations: String,
}

impl<'a> TableRequest<'a> {
    pub fn new(coordinates: &'a [Coordinates]) -> Self {
        Self { coordinates }
    }

    /// Check every coordinate is in range and the count respects `max_locations` (0 = unlimited).
    pub fn validate(&self, max_locations: usize) -> Result<(), OsrmError> {
        if max_locations > 0 && self.coordinates.len() > max_locations {
            return Err(OsrmError::TooManyLocations { count: self.coordinates.len(), max: max_locations });
        }

        for (index, coord) in self.coordinates.iter().enumerate() {
            if !coord.is_valid() {
                return Err(OsrmError::InvalidCoordinate { index, detail: format!("lat/lng out of range {coord}") });
            }
        }

        Ok(())
    }

    /// Semicolon-joined `lng,lat` list used as the request path.
    pub fn coordinate_path(&self) -> String {
        self.coordinates.iter().map(Coordinates::to_lng_lat).collect::<Vec<_>>().join(";")
    }

    /// Request every source against every destination, in input order.
    pub fn query(&self) -> TableQuery {
        let indices = index_param(0..self.coordinates.len());
        TableQuery { sources: indices.clone(), destinations: indices }
    }

    /// Full endpoint URL without the query string.
    pub fn url(&self, base_url: &str, profile: &str) -> String {
        format!("{}/table/v1/{}/{}", base_url.trim_end_matches('/'), profile, self.coordinate_path())
    }
}

/// Semicolon-separated index list for `sources`/`destinations`.
pub fn index_param(values: impl IntoIterator<Item = usize>) -> String {
    values.into_iter().map(|i| i.to_string()).collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> Vec<Coordinates> {
        vec![Coordinates::new(52.517037, 13.38886), Coordinates::new(52.529407, 13.397634)]
    }

    #[test]
    fn test_coordinate_path_is_lng_lat() {
        let coords = berlin();
        let req = TableRequest::new(&coords);
        assert_eq!(req.coordinate_path(), "13.38886,52.517037;13.397634,52.529407");
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let coords = berlin();
        let req = TableRequest::new(&coords);
        assert_eq!(
            req.url("http://localhost:5000/", "driving"),
            "http://localhost:5000/table/v1/driving/13.38886,52.517037;13.397634,52.529407"
        );
    }

    #[test]
    fn test_query_indices() {
        let coords = vec![Coordinates::new(0.0, 0.0); 3];
        let req = TableRequest::new(&coords);
        assert_eq!(req.query(), TableQuery { sources: "0;1;2".into(), destinations: "0;1;2".into() });
    }

    #[test]
    fn test_index_param_empty() {
        assert_eq!(index_param(0..0), "");
    }

    #[test]
    fn test_validate_ok() {
        let coords = berlin();
        assert!(TableRequest::new(&coords).validate(100).is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let coords = vec![Coordinates::new(1.0, 2.0), Coordinates::new(95.0, 2.0)];
        let result = TableRequest::new(&coords).validate(100);
        assert!(matches!(result, Err(OsrmError::InvalidCoordinate { index: 1, .. })));
    }

    #[test]
    fn test_validate_too_many() {
        let coords = vec![Coordinates::new(0.0, 0.0); 3];
        assert!(matches!(TableRequest::new(&coords).validate(2), Err(OsrmError::TooManyLocations { count: 3, max: 2 })));
        assert!(TableRequest::new(&coords).validate(0).is_ok());
    }
}
