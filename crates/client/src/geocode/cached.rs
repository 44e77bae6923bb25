//! Write-through cache in front of a geocoding provider.

use routeprep_core::{CacheDb, Coordinates, Error, canonicalize_address};

use super::Geocoder;

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Provider,
}

/// Outcome of resolving one address.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Cache key the address normalized to.
    pub canonical: String,
    pub coordinates: Coordinates,
    pub source: ResolutionSource,
}

/// Geocoder that consults the cache first and persists provider results.
pub struct CachedGeocoder {
    cache: CacheDb,
    provider: Box<dyn Geocoder>,
}

impl CachedGeocoder {
    pub fn new(cache: CacheDb, provider: Box<dyn Geocoder>) -> Self {
        Self { cache, provider }
    }

    pub fn cache(&self) -> &CacheDb {
        &self.cache
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve `address`, calling the provider only on a cache miss.
    pub async fn resolve(&self, address: &str) -> Result<Resolution, Error> {
        let canonical = canonicalize_address(address);

        if let Some(coordinates) = self.cache.lookup(&canonical).await? {
            return Ok(Resolution { canonical, coordinates, source: ResolutionSource::Cache });
        }

        tracing::debug!(address = %canonical, provider = self.provider.name(), "cache miss, geocoding");

        let coordinates = self.provider.geocode(address).await?;
        if !coordinates.is_valid() {
            return Err(Error::GeocodeFailed(format!(
                "{} returned out-of-range coordinates {coordinates} for '{canonical}'",
                self.provider.name()
            )));
        }

        self.cache
            .store(&canonical, address, coordinates.lat, coordinates.lng)
            .await?;

        Ok(Resolution { canonical, coordinates, source: ResolutionSource::Provider })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::{GeocodeError, PlaceholderGeocoder};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a distinct point per call and counts invocations.
    struct CountingGeocoder {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        fn name(&self) -> &str {
            "counting"
        }

        async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Coordinates::new(n as f64, n as f64))
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        fn name(&self) -> &str {
            "failing"
        }

        async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
            Err(GeocodeError::NotFound(address.to_string()))
        }
    }

    struct OutOfRangeGeocoder;

    #[async_trait]
    impl Geocoder for OutOfRangeGeocoder {
        fn name(&self) -> &str {
            "broken"
        }

        async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
            Ok(Coordinates::new(123.0, 0.0))
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = CacheDb::open_in_memory().await.unwrap();
        let geocoder = CachedGeocoder::new(cache, Box::new(CountingGeocoder { calls: calls.clone() }));

        let first = geocoder.resolve(" 123 Main St ").await.unwrap();
        assert_eq!(first.source, ResolutionSource::Provider);
        assert_eq!(first.canonical, "123 main st");
        assert_eq!(first.coordinates, Coordinates::new(1.0, 1.0));

        let second = geocoder.resolve("123   MAIN ST").await.unwrap();
        assert_eq!(second.source, ResolutionSource::Cache);
        assert_eq!(second.coordinates, Coordinates::new(1.0, 1.0));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_persists_original_address() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let geocoder = CachedGeocoder::new(cache, Box::new(PlaceholderGeocoder));

        geocoder.resolve("  1 Elm   Rd ").await.unwrap();

        let entry = geocoder.cache().get_entry("1 elm rd").await.unwrap().unwrap();
        assert_eq!(entry.original_address.as_deref(), Some("  1 Elm   Rd "));
        assert_eq!(entry.coordinates(), PlaceholderGeocoder::COORDINATES);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_cached() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let geocoder = CachedGeocoder::new(cache, Box::new(FailingGeocoder));

        let result = geocoder.resolve("1 Nowhere Ln").await;
        assert!(matches!(result, Err(Error::GeocodeFailed(_))));
        assert_eq!(geocoder.cache().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_result_rejected() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let geocoder = CachedGeocoder::new(cache, Box::new(OutOfRangeGeocoder));

        let result = geocoder.resolve("1 Main St").await;
        assert!(matches!(result, Err(Error::GeocodeFailed(msg)) if msg.contains("broken")));
        assert_eq!(geocoder.cache().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_existing_entry_wins_over_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = CacheDb::open_in_memory().await.unwrap();
        cache.store("9 oak ave", "9 Oak Ave", 9.0, 9.0).await.unwrap();

        let geocoder = CachedGeocoder::new(cache, Box::new(CountingGeocoder { calls: calls.clone() }));
        let resolved = geocoder.resolve("9 OAK AVE").await.unwrap();

        assert_eq!(resolved.coordinates, Coordinates::new(9.0, 9.0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
