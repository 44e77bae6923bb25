//! Client code for routeprep.
//!
//! This crate provides the OSRM table client and the geocoding provider
//! abstraction shared by the CLI binaries.

pub mod geocode;
pub mod osrm;

pub use geocode::{CachedGeocoder, GeocodeError, Geocoder, PlaceholderGeocoder, Resolution, ResolutionSource};
pub use osrm::{OsrmClient, OsrmConfig, OsrmError};
