//! SQLite-backed geocode cache.
//!
//! This module provides a persistent lookup table from canonical address to
//! coordinates using SQLite with async access via tokio-rusqlite. It supports:
//!
//! - Address canonicalization for deduplicated keys
//! - Automatic schema migrations
//! - Insert-if-absent writes (first writer wins, no expiry)

pub mod address;
pub mod connection;
pub mod geocodes;
pub mod migrations;

pub use crate::Error;

pub use address::canonicalize_address;
pub use connection::CacheDb;
pub use geocodes::GeocodeEntry;
