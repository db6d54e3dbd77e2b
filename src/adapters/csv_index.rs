//! Offline reverse geocoding over a GeoNames-style CSV.
//!
//! The file needs `lat`, `lon` and `name` columns. Every other column (`admin1`,
//! `admin2`, `cc`, ...) is kept as an attribution field. Lookups return the nearest
//! row by great-circle distance.

use crate::core::ReverseGeocodeIndex;
use crate::domain::model::{Coordinate, GeocodeRecord};
use crate::utils::error::{PlaceGenError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["lat", "lon", "name"];

struct IndexedRecord {
    unit: [f64; 3],
    record: GeocodeRecord,
}

pub struct CsvReverseIndex {
    entries: Vec<IndexedRecord>,
}

impl CsvReverseIndex {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        tracing::info!("📂 Loading reverse geocoder index from {}", path.as_ref().display());
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PlaceGenError::ProcessingError {
                    message: format!("reverse geocoder CSV is missing the '{}' column", column),
                });
            }
        }

        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for row in csv_reader.records() {
            let row = row?;
            let mut fields: HashMap<String, String> = headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();

            let lat = fields.remove("lat").and_then(|v| v.parse::<f64>().ok());
            let lon = fields.remove("lon").and_then(|v| v.parse::<f64>().ok());
            let name = fields.remove("name").filter(|n| !n.is_empty());

            match (lat, lon, name) {
                (Some(lat), Some(lon), Some(name)) if lat.is_finite() && lon.is_finite() => {
                    entries.push(IndexedRecord {
                        unit: to_unit_vector(lat, lon),
                        record: GeocodeRecord {
                            name,
                            lat,
                            lon,
                            attributes: fields,
                        },
                    });
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} reverse geocoder rows without lat, lon or name", skipped);
        }
        tracing::debug!("Reverse geocoder index holds {} places", entries.len());

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nearest(&self, point: Coordinate) -> Option<&GeocodeRecord> {
        let target = to_unit_vector(point.lat, point.lon);
        self.entries
            .iter()
            .map(|entry| (chord_distance_sq(&entry.unit, &target), entry))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, entry)| &entry.record)
    }
}

#[async_trait]
impl ReverseGeocodeIndex for CsvReverseIndex {
    async fn lookup(&self, point: Coordinate) -> Result<Option<GeocodeRecord>> {
        Ok(self.nearest(point).cloned())
    }
}

fn to_unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

// monotonic in great-circle distance
fn chord_distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
