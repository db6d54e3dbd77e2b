pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{ArcGisResolver, CsvReverseIndex, JsonDatasetWriter, LocalStorage, NominatimReverseIndex};
pub use config::toml_config::TomlConfig;
pub use core::engine::{RunCoordinator, RunSummary};
pub use core::filter::{Acceptance, PlaceAcceptanceFilter, RejectReason};
pub use core::generator::{GenerationOutcome, RegionPlaceGenerator};
pub use core::sampler::CoordinateSampler;
pub use domain::model::{BoundingBox, Coordinate, Dataset, GeocodeRecord, Place, Region, Resolution};
pub use domain::ports::{GeocodeResolver, ReverseGeocodeIndex, Storage};
pub use utils::error::{PlaceGenError, Result};
