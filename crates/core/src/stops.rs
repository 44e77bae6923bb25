//! Stop CSV input and output.
//!
//! # Geocoding input
//!
//! ```csv
//! name,address
//! Depot,"1 Main St, Brooklyn"
//! ```
//!
//! Only `address` is required; other columns are carried through untouched.
//!
//! # Geocoding output / matrix input
//!
//! ```csv
//! id,address,lat,lng
//! 1,"1 main st, brooklyn",40.6782,-73.9442
//! ```
//!
//! The matrix step only needs the two coordinate columns, whose names are
//! configurable. Rows with every field blank are skipped.

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::geo::Coordinates;

/// An input row for the geocoding step.
#[derive(Debug, Clone, PartialEq)]
pub struct InputStop {
    /// Optional display name from the `name` column.
    pub name: Option<String>,
    /// Address text exactly as it appears in the file.
    pub address: String,
}

/// One row of the geocoded output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedStop {
    /// 1-based position in the input file.
    pub id: usize,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

fn ensure_exists(path: &Path, what: &str) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::InputNotFound(format!("could not find {what} file at {}", path.display())));
    }
    Ok(())
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, Error> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))
}

/// Load stops from a CSV file with an `address` column.
pub fn read_stops(path: &Path) -> Result<Vec<InputStop>, Error> {
    ensure_exists(path, "stops")?;
    let file = std::fs::File::open(path)?;
    read_stops_from_reader(file)
}

/// Like [`read_stops`] but accepts any `Read` source.
pub fn read_stops_from_reader<R: Read>(reader: R) -> Result<Vec<InputStop>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let address_idx = column_index(&headers, "address")?;
    let name_idx = headers.iter().position(|h| h == "name");

    let mut stops = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let address = record.get(address_idx).unwrap_or_default();
        if address.trim().is_empty() {
            return Err(Error::InvalidInput(format!("row {}: address is empty", row + 1)));
        }

        stops.push(InputStop {
            name: name_idx.and_then(|i| record.get(i)).map(str::to_string),
            address: address.to_string(),
        });
    }

    Ok(stops)
}

/// Write geocoded stops as `id,address,lat,lng`.
pub fn write_geocoded_stops(path: &Path, stops: &[GeocodedStop]) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    write_geocoded_stops_to_writer(file, stops)
}

/// Like [`write_geocoded_stops`] but accepts any `Write` sink.
pub fn write_geocoded_stops_to_writer<W: Write>(writer: W, stops: &[GeocodedStop]) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if stops.is_empty() {
        csv_writer.write_record(["id", "address", "lat", "lng"])?;
    }
    for stop in stops {
        csv_writer.serialize(stop)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Load coordinates in file order from a geocoded stops CSV.
pub fn read_coordinates(path: &Path, lat_column: &str, lng_column: &str) -> Result<Vec<Coordinates>, Error> {
    ensure_exists(path, "geocoded stops")?;
    let file = std::fs::File::open(path)?;
    read_coordinates_from_reader(file, lat_column, lng_column)
}

/// Like [`read_coordinates`] but accepts any `Read` source.
pub fn read_coordinates_from_reader<R: Read>(
    reader: R, lat_column: &str, lng_column: &str,
) -> Result<Vec<Coordinates>, Error> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let lat_idx = column_index(&headers, lat_column)?;
    let lng_idx = column_index(&headers, lng_column)?;

    let mut coords = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let lat = parse_number(&record, lat_idx, lat_column, row)?;
        let lng = parse_number(&record, lng_idx, lng_column, row)?;
        coords.push(Coordinates::new(lat, lng));
    }

    Ok(coords)
}

fn parse_number(record: &csv::StringRecord, idx: usize, column: &str, row: usize) -> Result<f64, Error> {
    let raw = record.get(idx).unwrap_or_default();
    raw.parse::<f64>()
        .map_err(|_| Error::InvalidInput(format!("row {}: {column} '{raw}' is not numeric", row + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stops() {
        let csv = "name,address\nDepot,\"1 Main St, Brooklyn\"\nShop,  22 Elm  Rd \n";
        let stops = read_stops_from_reader(Cursor::new(csv)).unwrap();

        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].name.as_deref(), Some("Depot"));
        assert_eq!(stops[0].address, "1 Main St, Brooklyn");
        assert_eq!(stops[1].address, "  22 Elm  Rd ");
    }

    #[test]
    fn test_read_stops_without_name_column() {
        let csv = "address\n1 Main St\n";
        let stops = read_stops_from_reader(Cursor::new(csv)).unwrap();
        assert_eq!(stops, vec![InputStop { name: None, address: "1 Main St".into() }]);
    }

    #[test]
    fn test_read_stops_missing_address_column() {
        let csv = "name,street\nDepot,1 Main St\n";
        let result = read_stops_from_reader(Cursor::new(csv));
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "address"));
    }

    #[test]
    fn test_read_stops_blank_address() {
        let csv = "name,address\nDepot,\n";
        let result = read_stops_from_reader(Cursor::new(csv));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_read_stops_missing_file() {
        let result = read_stops(Path::new("definitely/not/here.csv"));
        assert!(matches!(result, Err(Error::InputNotFound(_))));
    }

    #[test]
    fn test_write_geocoded_stops() {
        let stops = vec![
            GeocodedStop { id: 1, address: "1 main st, brooklyn".into(), lat: 40.6782, lng: -73.9442 },
            GeocodedStop { id: 2, address: "22 elm rd".into(), lat: 1.5, lng: 2.0 },
        ];
        let mut out = Vec::new();
        write_geocoded_stops_to_writer(&mut out, &stops).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,address,lat,lng"));
        assert_eq!(lines.next(), Some("1,\"1 main st, brooklyn\",40.6782,-73.9442"));
        assert_eq!(lines.next(), Some("2,22 elm rd,1.5,2.0"));
    }

    #[test]
    fn test_write_empty_keeps_header() {
        let mut out = Vec::new();
        write_geocoded_stops_to_writer(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,address,lat,lng\n");
    }

    #[test]
    fn test_read_coordinates() {
        let csv = "id,address,lat,lng\n1,a,52.5,13.4\n,,,\n2,b, 52.6 ,13.5\n";
        let coords = read_coordinates_from_reader(Cursor::new(csv), "lat", "lng").unwrap();
        assert_eq!(coords, vec![Coordinates::new(52.5, 13.4), Coordinates::new(52.6, 13.5)]);
    }

    #[test]
    fn test_read_coordinates_custom_columns() {
        let csv = "latitude,longitude\n1.1,2.2\n";
        let coords = read_coordinates_from_reader(Cursor::new(csv), "latitude", "longitude").unwrap();
        assert_eq!(coords, vec![Coordinates::new(1.1, 2.2)]);
    }

    #[test]
    fn test_read_coordinates_missing_column() {
        let csv = "id,lat\n1,2\n";
        let result = read_coordinates_from_reader(Cursor::new(csv), "lat", "lng");
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "lng"));
    }

    #[test]
    fn test_read_coordinates_non_numeric() {
        let csv = "lat,lng\nabc,2\n";
        let result = read_coordinates_from_reader(Cursor::new(csv), "lat", "lng");
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("abc")));
    }
}
