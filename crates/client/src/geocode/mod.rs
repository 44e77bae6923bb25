//! Address geocoding behind a swappable provider.
//!
//! ### Stable Abstraction
//! - Providers implement the `Geocoder` trait: address in, coordinates out.
//! - `CachedGeocoder` owns the cache lookup and write-through, so a real
//!   provider can replace `PlaceholderGeocoder` without touching cache or I/O code.

pub mod cached;
pub mod placeholder;

pub use cached::{CachedGeocoder, Resolution, ResolutionSource};
pub use placeholder::PlaceholderGeocoder;

use async_trait::async_trait;
use routeprep_core::{Coordinates, Error};

/// Errors from a geocoding provider.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Provider found no match for the address.
    #[error("no result for address: {0}")]
    NotFound(String),

    /// Provider failed for another reason.
    #[error("{provider}: {message}")]
    Provider { provider: String, message: String },
}

impl From<GeocodeError> for Error {
    fn from(err: GeocodeError) -> Self {
        Error::GeocodeFailed(err.to_string())
    }
}

/// Stable geocoder trait.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Resolve a free-text address to coordinates.
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}
