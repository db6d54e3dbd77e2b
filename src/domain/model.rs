use crate::utils::error::{PlaceGenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named point accepted into a region's result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Place {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat: Some(lat),
            lon: Some(lon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Axis-aligned lat/lon rectangle used as the sampling domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl BoundingBox {
    /// Each pair may be given in either order; it is stored as (min, max).
    pub fn new(lat_a: f64, lat_b: f64, lon_a: f64, lon_b: f64) -> Result<Self> {
        for (label, value) in [
            ("lat", lat_a),
            ("lat", lat_b),
            ("lon", lon_a),
            ("lon", lon_b),
        ] {
            if !value.is_finite() {
                return Err(PlaceGenError::ProcessingError {
                    message: format!("bounding box {} is not finite: {}", label, value),
                });
            }
        }

        Ok(Self {
            lat_min: lat_a.min(lat_b),
            lat_max: lat_a.max(lat_b),
            lon_min: lon_a.min(lon_b),
            lon_max: lon_a.max(lon_b),
        })
    }

    /// Corner order used by geocoders: `(lat_min, lon_min, lat_max, lon_max)`.
    pub fn from_resolver_order(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Result<Self> {
        Self::new(lat_min, lat_max, lon_min, lon_max)
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }
}

/// Output of a forward geocode lookup for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub resolved_name: String,
    pub bounding_box: BoundingBox,
}

/// A reverse geocode hit: required fields plus provider-specific attribution fields
/// such as `admin1` or `state`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub attributes: HashMap<String, String>,
}

impl GeocodeRecord {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(field.into(), value.into());
        self
    }

    pub fn attribution(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).map(String::as_str)
    }
}

/// A configured region and, once processed, the places generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    search_string: String,
    requested_place_count: usize,
    actual_place_count: Option<usize>,
    resolved_name: Option<String>,
    bounding_box: Option<BoundingBox>,
    places: Vec<Place>,
}

impl Region {
    pub fn new(search_string: impl Into<String>, requested_place_count: usize) -> Self {
        Self {
            search_string: search_string.into(),
            requested_place_count,
            actual_place_count: None,
            resolved_name: None,
            bounding_box: None,
            places: Vec::new(),
        }
    }

    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    pub fn requested_place_count(&self) -> usize {
        self.requested_place_count
    }

    pub fn actual_place_count(&self) -> Option<usize> {
        self.actual_place_count
    }

    pub fn resolved_name(&self) -> Option<&str> {
        self.resolved_name.as_deref()
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_name.is_some() && self.bounding_box.is_some()
    }

    /// Name used in diagnostics: the resolved name when known.
    pub fn display_name(&self) -> &str {
        self.resolved_name.as_deref().unwrap_or(&self.search_string)
    }

    pub fn apply_resolution(&mut self, resolution: Resolution) -> Result<()> {
        if self.is_resolved() {
            return Err(PlaceGenError::ProcessingError {
                message: format!("region '{}' is already resolved", self.search_string),
            });
        }
        self.resolved_name = Some(resolution.resolved_name);
        self.bounding_box = Some(resolution.bounding_box);
        Ok(())
    }

    /// Only the generator appends, after the acceptance filter has passed the place.
    pub(crate) fn push_place(&mut self, place: Place) -> Result<()> {
        if self.actual_place_count.is_some() {
            return Err(PlaceGenError::ProcessingError {
                message: format!("region '{}' is already finalized", self.display_name()),
            });
        }
        if self.places.len() >= self.requested_place_count {
            return Err(PlaceGenError::ProcessingError {
                message: format!(
                    "region '{}' already holds {} places",
                    self.display_name(),
                    self.requested_place_count
                ),
            });
        }
        self.places.push(place);
        Ok(())
    }

    /// Freezes the place count. Returns the count.
    pub fn finalize(&mut self) -> Result<usize> {
        if self.actual_place_count.is_some() {
            return Err(PlaceGenError::ProcessingError {
                message: format!("region '{}' is already finalized", self.display_name()),
            });
        }
        let count = self.places.len();
        self.actual_place_count = Some(count);
        Ok(count)
    }
}

/// All regions of a run, in configured order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub regions: Vec<Region>,
}

impl Dataset {
    pub fn total_places(&self) -> usize {
        self.regions.iter().map(|r| r.places().len()).sum()
    }
}
