//! Geocode cache operations.
//!
//! Entries are keyed by canonical address and written at most once: a
//! second store for the same key leaves the first coordinates in place.

use super::connection::CacheDb;
use crate::Error;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A cached geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeEntry {
    pub id: i64,
    pub canonical_address: String,
    pub original_address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub created_at: Option<String>,
}

impl GeocodeEntry {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

impl CacheDb {
    /// Get cached coordinates for a canonical address.
    ///
    /// Returns None if the address has never been stored.
    pub async fn lookup(&self, canonical_address: &str) -> Result<Option<Coordinates>, Error> {
        let key = canonical_address.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Coordinates>, Error> {
                let mut stmt = conn.prepare("SELECT lat, lng FROM geocoded_addresses WHERE canonical_address = ?1")?;

                let result = stmt.query_row(params![key], |row| Ok(Coordinates::new(row.get(0)?, row.get(1)?)));

                match result {
                    Ok(coords) => Ok(Some(coords)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Persist a geocoding result unless the canonical address is already cached.
    ///
    /// Returns true when a new row was written.
    pub async fn store(
        &self, canonical_address: &str, original_address: &str, lat: f64, lng: f64,
    ) -> Result<bool, Error> {
        let key = canonical_address.to_string();
        let original = original_address.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let inserted = conn.execute(
                    "INSERT INTO geocoded_addresses (canonical_address, original_address, lat, lng)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(canonical_address) DO NOTHING",
                    params![key, original, lat, lng],
                )?;
                Ok(inserted == 1)
            })
            .await
            .map_err(Error::from)
    }

    /// Get the full cache row for a canonical address.
    pub async fn get_entry(&self, canonical_address: &str) -> Result<Option<GeocodeEntry>, Error> {
        let key = canonical_address.to_string();
        self.conn
            .call(move |conn| -> Result<Option<GeocodeEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, canonical_address, original_address, lat, lng, created_at
                     FROM geocoded_addresses WHERE canonical_address = ?1",
                )?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(GeocodeEntry {
                        id: row.get(0)?,
                        canonical_address: row.get(1)?,
                        original_address: row.get(2)?,
                        lat: row.get(3)?,
                        lng: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                });

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached addresses.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM geocoded_addresses", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
