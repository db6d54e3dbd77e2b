//! Reverse geocoding against an OSM Nominatim `/reverse` endpoint.
//!
//! Address components (`state`, `county`, `country_code`, ...) become the record's
//! attribution fields, so `match_on` is usually `state` with this provider.

use crate::core::ReverseGeocodeIndex;
use crate::domain::model::{Coordinate, GeocodeRecord};
use crate::utils::error::{PlaceGenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
const DEFAULT_USER_AGENT: &str = "region-places/0.1";
const DEFAULT_ZOOM: &str = "10";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    address: HashMap<String, String>,
}

impl ReverseResponse {
    fn into_record(self) -> Option<GeocodeRecord> {
        let name = self.name.filter(|n| !n.is_empty())?;
        let lat = self.lat?.parse::<f64>().ok()?;
        let lon = self.lon?.parse::<f64>().ok()?;
        Some(GeocodeRecord {
            name,
            lat,
            lon,
            attributes: self.address,
        })
    }
}

pub struct NominatimReverseIndex {
    client: Client,
    endpoint: String,
}

impl NominatimReverseIndex {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ReverseGeocodeIndex for NominatimReverseIndex {
    async fn lookup(&self, point: Coordinate) -> Result<Option<GeocodeRecord>> {
        let lat = point.lat.to_string();
        let lon = point.lon.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", DEFAULT_ZOOM),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlaceGenError::ProcessingError {
                message: format!("reverse geocoder returned HTTP {}", response.status()),
            });
        }

        let body: ReverseResponse = response.json().await?;
        if let Some(error) = &body.error {
            tracing::trace!("No reverse match at ({}, {}): {}", lat, lon, error);
            return Ok(None);
        }

        Ok(body.into_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn index(server: &MockServer) -> NominatimReverseIndex {
        NominatimReverseIndex::new(server.url("/reverse"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_address_components_become_attribution_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/reverse")
                .query_param("format", "jsonv2")
                .query_param("lat", "-42.9")
                .query_param("lon", "147.3");
            then.status(200).json_body(serde_json::json!({
                "place_id": 1,
                "name": "Hobart",
                "lat": "-42.8825088",
                "lon": "147.3281233",
                "display_name": "Hobart, Tasmania, Australia",
                "address": {"city": "Hobart", "state": "Tasmania", "country_code": "au"}
            }));
        });

        let record = index(&server)
            .lookup(Coordinate {
                lat: -42.9,
                lon: 147.3,
            })
            .await
            .unwrap()
            .unwrap();

        mock.assert();
        assert_eq!(record.name, "Hobart");
        assert_eq!(record.lat, -42.8825088);
        assert_eq!(record.lon, 147.3281233);
        assert_eq!(record.attribution("state"), Some("Tasmania"));
    }

    #[tokio::test]
    async fn test_unable_to_geocode_is_no_match() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/reverse");
            then.status(200)
                .json_body(serde_json::json!({"error": "Unable to geocode"}));
        });

        let record = index(&server)
            .lookup(Coordinate { lat: -60.0, lon: 100.0 })
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_unnamed_result_is_no_match() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/reverse");
            then.status(200).json_body(serde_json::json!({
                "name": "",
                "lat": "-30.0",
                "lon": "135.0",
                "address": {"state": "South Australia"}
            }));
        });

        let record = index(&server)
            .lookup(Coordinate { lat: -30.0, lon: 135.0 })
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/reverse");
            then.status(429);
        });

        let result = index(&server)
            .lookup(Coordinate { lat: -30.0, lon: 135.0 })
            .await;
        assert!(result.is_err());
    }
}
