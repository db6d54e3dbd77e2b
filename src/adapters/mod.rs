// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod arcgis;
pub mod csv_index;
pub mod json_writer;
pub mod nominatim;
pub mod storage;

pub use arcgis::ArcGisResolver;
pub use csv_index::CsvReverseIndex;
pub use json_writer::JsonDatasetWriter;
pub use nominatim::NominatimReverseIndex;
pub use storage::LocalStorage;
