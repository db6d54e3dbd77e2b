//! Wires the configured adapters into a `RunCoordinator`.

use crate::adapters::{ArcGisResolver, CsvReverseIndex, JsonDatasetWriter, LocalStorage, NominatimReverseIndex};
use crate::config::toml_config::TomlConfig;
use crate::core::engine::RunCoordinator;
use crate::core::sampler::CoordinateSampler;
use crate::core::ReverseGeocodeIndex;
use crate::utils::error::{PlaceGenError, Result};
use crate::utils::validation;
use std::time::Duration;

pub type ConfiguredCoordinator = RunCoordinator<ArcGisResolver, Box<dyn ReverseGeocodeIndex>>;

pub fn build_reverse_index(config: &TomlConfig) -> Result<Box<dyn ReverseGeocodeIndex>> {
    let reverse = &config.reverse_geocoder;
    match reverse.kind.as_str() {
        "csv" => {
            let path = validation::validate_required_field("reverse_geocoder.path", &reverse.path)?;
            Ok(Box::new(CsvReverseIndex::from_path(path)?))
        }
        "nominatim" => Ok(Box::new(NominatimReverseIndex::new(
            config.reverse_endpoint(),
            Duration::from_secs(reverse.timeout_seconds),
        )?)),
        other => Err(PlaceGenError::InvalidConfigValueError {
            field: "reverse_geocoder.kind".to_string(),
            value: other.to_string(),
            reason: "Valid values: csv, nominatim".to_string(),
        }),
    }
}

/// Configured seed, or a fresh one that gets logged so the run can be repeated.
pub fn run_seed(config: &TomlConfig) -> u64 {
    match config.generation.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            tracing::info!("🎲 Using random seed {} (set generation.seed to reproduce)", seed);
            seed
        }
    }
}

pub fn build_coordinator(config: &TomlConfig) -> Result<ConfiguredCoordinator> {
    let resolver = ArcGisResolver::new(
        config.resolver.endpoint.clone(),
        Duration::from_secs(config.resolver.timeout_seconds),
    )?;
    let index = build_reverse_index(config)?;

    Ok(RunCoordinator::new(
        resolver,
        index,
        config.build_generator(),
        CoordinateSampler::from_seed(run_seed(config)),
    ))
}

pub fn build_writer(config: &TomlConfig) -> JsonDatasetWriter<LocalStorage> {
    JsonDatasetWriter::with_filename(
        LocalStorage::new(config.output.path.clone()),
        config.output.filename.clone(),
    )
}

/// Full run: resolve, generate, and write. Returns the output location.
pub async fn run(config: &TomlConfig) -> Result<String> {
    let mut coordinator = build_coordinator(config)?;
    let writer = build_writer(config);
    coordinator.run_and_write(config.build_regions(), &writer).await
}
