use async_trait::async_trait;
use routeprep_core::Coordinates;

use super::{GeocodeError, Geocoder};

/// Temporary geocoder that answers every address with a fixed point in Brooklyn.
///
/// Stands in until a real provider is wired up; keeps the pipeline free of
/// external API costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGeocoder;

impl PlaceholderGeocoder {
    pub const COORDINATES: Coordinates = Coordinates { lat: 40.6782, lng: -73.9442 };
}

#[async_trait]
impl Geocoder for PlaceholderGeocoder {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
        Ok(Self::COORDINATES)
    }
}
