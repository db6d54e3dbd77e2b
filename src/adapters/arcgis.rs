//! Forward geocoding against the ArcGIS World geocoding `find` operation.

use crate::core::GeocodeResolver;
use crate::domain::model::{BoundingBox, Resolution};
use crate::utils::error::{PlaceGenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ARCGIS_ENDPOINT: &str =
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer/find";

#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    locations: Vec<LocationDto>,
}

#[derive(Debug, Deserialize)]
struct LocationDto {
    name: String,
    extent: ExtentDto,
}

#[derive(Debug, Deserialize)]
struct ExtentDto {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

pub struct ArcGisResolver {
    client: Client,
    endpoint: String,
}

impl ArcGisResolver {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl GeocodeResolver for ArcGisResolver {
    async fn resolve(&self, search_string: &str) -> Result<Resolution> {
        tracing::debug!("Making geocode request to: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("f", "json"), ("text", search_string), ("maxLocations", "1")])
            .send()
            .await?;

        tracing::debug!("Geocode response status: {}", response.status());
        if !response.status().is_success() {
            return Err(PlaceGenError::ResolutionFailed {
                search_string: search_string.to_string(),
                reason: format!("geocoder returned HTTP {}", response.status()),
            });
        }

        let body: FindResponse = response.json().await?;
        let location = body
            .locations
            .into_iter()
            .next()
            .ok_or_else(|| PlaceGenError::ResolutionFailed {
                search_string: search_string.to_string(),
                reason: "no candidates returned".to_string(),
            })?;

        // ArcGIS extents are x = lon, y = lat
        let extent = location.extent;
        let bounding_box =
            BoundingBox::from_resolver_order(extent.ymin, extent.xmin, extent.ymax, extent.xmax)?;

        Ok(Resolution {
            resolved_name: location.name,
            bounding_box,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_resolves_first_location() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/find")
                .query_param("f", "json")
                .query_param("text", "Tasmania, Australia")
                .query_param("maxLocations", "1");
            then.status(200).json_body(serde_json::json!({
                "locations": [{
                    "name": "Tasmania",
                    "extent": {"xmin": 143.8, "ymin": -43.7, "xmax": 148.5, "ymax": -39.5},
                    "feature": {"geometry": {"x": 146.6, "y": -42.0}, "attributes": {"Score": 100}}
                }]
            }));
        });

        let resolver = ArcGisResolver::new(server.url("/find"), Duration::from_secs(5)).unwrap();
        let resolution = resolver.resolve("Tasmania, Australia").await.unwrap();

        mock.assert();
        assert_eq!(resolution.resolved_name, "Tasmania");
        assert_eq!(resolution.bounding_box.lat_min(), -43.7);
        assert_eq!(resolution.bounding_box.lat_max(), -39.5);
        assert_eq!(resolution.bounding_box.lon_min(), 143.8);
        assert_eq!(resolution.bounding_box.lon_max(), 148.5);
    }

    #[tokio::test]
    async fn test_no_candidates_fails_resolution() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/find");
            then.status(200).json_body(serde_json::json!({"locations": []}));
        });

        let resolver = ArcGisResolver::new(server.url("/find"), Duration::from_secs(5)).unwrap();
        let result = resolver.resolve("Atlantis").await;

        assert!(matches!(result, Err(PlaceGenError::ResolutionFailed { .. })));
    }

    #[tokio::test]
    async fn test_http_error_fails_resolution() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/find");
            then.status(503);
        });

        let resolver = ArcGisResolver::new(server.url("/find"), Duration::from_secs(5)).unwrap();
        let result = resolver.resolve("Victoria, Australia").await;

        match result {
            Err(PlaceGenError::ResolutionFailed { reason, .. }) => assert!(reason.contains("503")),
            other => panic!("expected resolution failure, got {:?}", other),
        }
    }
}
