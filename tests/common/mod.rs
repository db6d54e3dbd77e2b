#![allow(dead_code)]

use async_trait::async_trait;
use region_places::{
    BoundingBox, Coordinate, GeocodeRecord, GeocodeResolver, PlaceGenError, Resolution, Result,
    ReverseGeocodeIndex,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Resolves search strings from a fixed table; unknown strings fail.
#[derive(Default)]
pub struct TableResolver {
    entries: HashMap<String, Resolution>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, search_string: &str, resolved_name: &str, bbox: (f64, f64, f64, f64)) -> Self {
        let (lat_min, lon_min, lat_max, lon_max) = bbox;
        self.entries.insert(
            search_string.to_string(),
            Resolution {
                resolved_name: resolved_name.to_string(),
                bounding_box: BoundingBox::from_resolver_order(lat_min, lon_min, lat_max, lon_max)
                    .unwrap(),
            },
        );
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl GeocodeResolver for TableResolver {
    async fn resolve(&self, search_string: &str) -> Result<Resolution> {
        self.calls.lock().unwrap().push(search_string.to_string());
        self.entries
            .get(search_string)
            .cloned()
            .ok_or_else(|| PlaceGenError::ProcessingError {
                message: format!("no candidates for {}", search_string),
            })
    }
}

/// Replays scripted answers in order, then repeats the fallback.
pub struct ScriptedIndex {
    answers: Mutex<VecDeque<Option<GeocodeRecord>>>,
    fallback: Option<GeocodeRecord>,
    lookups: Arc<Mutex<usize>>,
}

impl ScriptedIndex {
    pub fn new(answers: Vec<Option<GeocodeRecord>>, fallback: Option<GeocodeRecord>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            fallback,
            lookups: Arc::new(Mutex::new(0)),
        }
    }

    pub fn lookups(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.lookups)
    }
}

#[async_trait]
impl ReverseGeocodeIndex for ScriptedIndex {
    async fn lookup(&self, _point: Coordinate) -> Result<Option<GeocodeRecord>> {
        *self.lookups.lock().unwrap() += 1;
        let next = self.answers.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

pub fn hit(name: &str, field: &str, region: &str) -> Option<GeocodeRecord> {
    Some(GeocodeRecord::new(name, 0.5, 0.5).with_attribute(field, region))
}

pub fn hit_at(name: &str, region: &str, lat: f64, lon: f64) -> Option<GeocodeRecord> {
    Some(GeocodeRecord::new(name, lat, lon).with_attribute("admin1", region))
}
