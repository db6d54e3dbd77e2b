use crate::domain::model::{Coordinate, GeocodeRecord, Resolution};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn describe(&self, path: &str) -> String;
}

/// Forward geocoding: free-text region name to canonical name and bounding box.
#[async_trait]
pub trait GeocodeResolver: Send + Sync {
    async fn resolve(&self, search_string: &str) -> Result<Resolution>;
}

/// Reverse geocoding: best matching named place for a coordinate, if any.
#[async_trait]
pub trait ReverseGeocodeIndex: Send + Sync {
    async fn lookup(&self, point: Coordinate) -> Result<Option<GeocodeRecord>>;
}

#[async_trait]
impl<T: ReverseGeocodeIndex + ?Sized> ReverseGeocodeIndex for Box<T> {
    async fn lookup(&self, point: Coordinate) -> Result<Option<GeocodeRecord>> {
        (**self).lookup(point).await
    }
}
