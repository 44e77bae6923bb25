//! Core types and shared functionality for routeprep.
//!
//! This crate provides:
//! - Geocode cache with SQLite backend and address canonicalization
//! - Stop CSV readers and writers
//! - Travel matrix normalization
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod matrix;
pub mod stops;

pub use cache::{CacheDb, GeocodeEntry, canonicalize_address};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use geo::Coordinates;
pub use matrix::{DEFAULT_PENALTY, TravelMatrix, normalize_durations};
pub use stops::{GeocodedStop, InputStop};
