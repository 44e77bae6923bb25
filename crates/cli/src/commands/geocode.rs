//! `geocode-stops`: annotate a stops CSV with cached or freshly geocoded coordinates.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use routeprep_client::{CachedGeocoder, PlaceholderGeocoder, ResolutionSource};
use routeprep_core::stops::{read_stops, write_geocoded_stops};
use routeprep_core::{AppConfig, CacheDb, Error, GeocodedStop};

use super::ConfigOverrides;

/// Geocode stops from a CSV file, leveraging a SQLite cache to avoid duplicate lookups.
#[derive(Debug, Parser)]
#[command(name = "geocode-stops", version)]
pub struct GeocodeArgs {
    /// Path to the input stops CSV (expects an 'address' column).
    #[arg(long, value_name = "PATH", default_value = "stops.csv")]
    pub stops: PathBuf,

    /// Path to the SQLite cache database [default: cache.db].
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Destination for the geocoded stops CSV output.
    #[arg(long, value_name = "PATH", default_value = "geocoded_stops.csv")]
    pub output: PathBuf,

    /// Write the address as it appeared in the input instead of its canonical form.
    #[arg(long)]
    pub keep_original_address: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeSummary {
    pub stops: usize,
    pub cache_hits: usize,
    pub geocoded: usize,
}

/// Load configuration, geocode every stop and write the output CSV.
pub async fn run(args: &GeocodeArgs) -> anyhow::Result<GeocodeSummary> {
    let config = AppConfig::load_with(&ConfigOverrides { cache_path: args.cache.clone(), ..Default::default() })
        .context("loading configuration")?;

    let (rows, summary) = geocode_file(&args.stops, &config.cache_path, args.keep_original_address).await?;

    write_geocoded_stops(&args.output, &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;

    Ok(summary)
}

/// Read `stops_path`, resolve each address through the cache at `cache_path`.
///
/// Nothing is written to the output here; the caller does that once every
/// row has resolved.
pub async fn geocode_file(
    stops_path: &Path, cache_path: &Path, keep_original_address: bool,
) -> Result<(Vec<GeocodedStop>, GeocodeSummary), Error> {
    let stops = read_stops(stops_path)?;

    let cache = CacheDb::open(cache_path).await?;
    let geocoder = CachedGeocoder::new(cache, Box::new(PlaceholderGeocoder));

    tracing::info!(
        stops = stops.len(),
        cache = %cache_path.display(),
        provider = geocoder.provider_name(),
        "geocoding stops"
    );

    let mut rows = Vec::with_capacity(stops.len());
    let mut summary = GeocodeSummary { stops: stops.len(), cache_hits: 0, geocoded: 0 };

    for (idx, stop) in stops.into_iter().enumerate() {
        let resolved = geocoder.resolve(&stop.address).await?;
        match resolved.source {
            ResolutionSource::Cache => summary.cache_hits += 1,
            ResolutionSource::Provider => summary.geocoded += 1,
        }

        let address = if keep_original_address { stop.address } else { resolved.canonical };
        rows.push(GeocodedStop {
            id: idx + 1,
            address,
            lat: resolved.coordinates.lat,
            lng: resolved.coordinates.lng,
        });
    }

    let cached_total = geocoder.cache().count().await?;
    tracing::info!(hits = summary.cache_hits, misses = summary.geocoded, cached_total, "geocoding complete");

    Ok((rows, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_stops(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("stops.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_geocode_file_dedupes_through_cache() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_stops(dir.path(), "name,address\nA, 123 Main St \nB,123 MAIN ST\nC,9 Oak Ave\n");
        let cache = dir.path().join("cache.db");

        let (rows, summary) = geocode_file(&stops, &cache, false).await.unwrap();

        assert_eq!(summary, GeocodeSummary { stops: 3, cache_hits: 1, geocoded: 2 });
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows[0].address, "123 main st");
        assert_eq!(rows[1].address, "123 main st");
        assert_eq!((rows[2].lat, rows[2].lng), (40.6782, -73.9442));

        let (_, second_run) = geocode_file(&stops, &cache, false).await.unwrap();
        assert_eq!(second_run.geocoded, 0);
        assert_eq!(second_run.cache_hits, 3);
    }

    #[tokio::test]
    async fn test_keep_original_address() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_stops(dir.path(), "address\n1 Elm Rd\n");
        let cache = dir.path().join("cache.db");

        let (rows, _) = geocode_file(&stops, &cache, true).await.unwrap();
        assert_eq!(rows[0].address, "1 Elm Rd");
    }

    #[tokio::test]
    async fn test_missing_input_reported_before_cache_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache.db");

        let result = geocode_file(&dir.path().join("missing.csv"), &cache, false).await;

        assert!(matches!(result, Err(Error::InputNotFound(_))));
        assert!(!cache.exists());
    }

    #[tokio::test]
    async fn test_missing_address_column() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_stops(dir.path(), "name,street\nA,1 Main St\n");

        let result = geocode_file(&stops, &dir.path().join("cache.db"), false).await;
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "address"));
    }

    #[tokio::test]
    async fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_stops(dir.path(), "name,address\nA,1 Main St\n");
        let output = dir.path().join("geocoded_stops.csv");
        let args = GeocodeArgs {
            stops,
            cache: Some(dir.path().join("cache.db")),
            output: output.clone(),
            keep_original_address: false,
            log_json: false,
        };

        let summary = run(&args).await.unwrap();

        assert_eq!(summary.stops, 1);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "id,address,lat,lng\n1,1 main st,40.6782,-73.9442\n");
    }

    #[tokio::test]
    async fn test_run_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_stops(dir.path(), "name\nA\n");
        let output = dir.path().join("geocoded_stops.csv");
        let args = GeocodeArgs {
            stops,
            cache: Some(dir.path().join("cache.db")),
            output: output.clone(),
            keep_original_address: false,
            log_json: false,
        };

        assert!(run(&args).await.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_args_defaults() {
        let args = GeocodeArgs::parse_from(["geocode-stops"]);
        assert_eq!(args.stops, PathBuf::from("stops.csv"));
        assert_eq!(args.output, PathBuf::from("geocoded_stops.csv"));
        assert!(args.cache.is_none());
        assert!(!args.keep_original_address);
    }
}
