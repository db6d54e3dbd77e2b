use crate::core::Storage;
use crate::domain::model::{Dataset, Place, Region};
use crate::utils::error::Result;
use serde::Serialize;

pub const DEFAULT_OUTPUT_FILENAME: &str = "results.json";

#[derive(Serialize)]
struct DatasetDocument<'a> {
    data: Vec<RegionDocument<'a>>,
}

#[derive(Serialize)]
struct RegionDocument<'a> {
    search_string: &'a str,
    requested_place_count: usize,
    actual_place_count: Option<usize>,
    resolved_name: Option<&'a str>,
    bb_lat_1: Option<f64>,
    bb_lat_2: Option<f64>,
    bb_lon_1: Option<f64>,
    bb_lon_2: Option<f64>,
    places: &'a [Place],
}

impl<'a> From<&'a Region> for RegionDocument<'a> {
    fn from(region: &'a Region) -> Self {
        let bbox = region.bounding_box();
        Self {
            search_string: region.search_string(),
            requested_place_count: region.requested_place_count(),
            actual_place_count: region.actual_place_count(),
            resolved_name: region.resolved_name(),
            bb_lat_1: bbox.map(|b| b.lat_min()),
            bb_lat_2: bbox.map(|b| b.lat_max()),
            bb_lon_1: bbox.map(|b| b.lon_min()),
            bb_lon_2: bbox.map(|b| b.lon_max()),
            places: region.places(),
        }
    }
}

/// Writes the dataset as `{"data": [...]}` through a `Storage`.
pub struct JsonDatasetWriter<S: Storage> {
    storage: S,
    filename: String,
}

impl<S: Storage> JsonDatasetWriter<S> {
    pub fn new(storage: S) -> Self {
        Self::with_filename(storage, DEFAULT_OUTPUT_FILENAME)
    }

    pub fn with_filename(storage: S, filename: impl Into<String>) -> Self {
        Self {
            storage,
            filename: filename.into(),
        }
    }

    /// 4-space indented JSON document.
    pub fn render(dataset: &Dataset) -> Result<Vec<u8>> {
        let document = DatasetDocument {
            data: dataset.regions.iter().map(RegionDocument::from).collect(),
        };

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        Ok(buffer)
    }

    pub async fn write(&self, dataset: &Dataset) -> Result<String> {
        let bytes = Self::render(dataset)?;
        let output_path = self.storage.describe(&self.filename);

        tracing::info!("💾 Writing {} regions to {}", dataset.regions.len(), output_path);
        self.storage.write_file(&self.filename, &bytes).await?;
        tracing::debug!("Wrote {} bytes", bytes.len());

        Ok(output_path)
    }
}
