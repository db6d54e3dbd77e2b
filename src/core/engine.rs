use crate::adapters::json_writer::JsonDatasetWriter;
use crate::core::generator::{GenerationOutcome, RegionPlaceGenerator};
use crate::core::sampler::CoordinateSampler;
use crate::core::{GeocodeResolver, ReverseGeocodeIndex, Storage};
use crate::domain::model::{Dataset, Region};
use crate::utils::error::{PlaceGenError, Result};
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub complete: usize,
    pub degraded: usize,
    pub total_places: usize,
}

/// Drives every configured region through resolution and generation, in order.
///
/// Nothing is persisted unless every region ends `Complete` or `Degraded`.
pub struct RunCoordinator<G, I, R = StdRng>
where
    G: GeocodeResolver,
    I: ReverseGeocodeIndex,
    R: Rng,
{
    resolver: G,
    index: I,
    generator: RegionPlaceGenerator,
    sampler: CoordinateSampler<R>,
}

impl<G, I, R> RunCoordinator<G, I, R>
where
    G: GeocodeResolver,
    I: ReverseGeocodeIndex,
    R: Rng,
{
    pub fn new(
        resolver: G,
        index: I,
        generator: RegionPlaceGenerator,
        sampler: CoordinateSampler<R>,
    ) -> Self {
        Self {
            resolver,
            index,
            generator,
            sampler,
        }
    }

    pub async fn run(&mut self, regions: Vec<Region>) -> Result<Dataset> {
        tracing::info!("🚀 Generating places for {} regions", regions.len());

        let mut summary = RunSummary::default();
        let mut finished = Vec::with_capacity(regions.len());

        for mut region in regions {
            self.resolve(&mut region).await?;

            tracing::info!(
                "Generating {} places for '{}'",
                region.requested_place_count(),
                region.display_name()
            );
            let outcome = self
                .generator
                .generate(&mut region, &mut self.sampler, &self.index)
                .await?;

            match outcome {
                GenerationOutcome::Complete => summary.complete += 1,
                GenerationOutcome::Degraded {
                    requested,
                    collected,
                } => {
                    tracing::warn!(
                        "⚠️ Hit fail limit for {}: {} places were requested but only {} could be generated",
                        region.display_name(),
                        requested,
                        collected
                    );
                    summary.degraded += 1;
                }
                GenerationOutcome::Unresolvable { attempts } => {
                    tracing::error!(
                        "❌ Unable to match region {} after {} attempts",
                        region.display_name(),
                        attempts
                    );
                    return Err(PlaceGenError::RegionUnresolvable {
                        region: region.display_name().to_string(),
                        match_on: self.generator.match_on().to_string(),
                        fail_limit: self.generator.match_fail_limit(),
                        places_found: region.places().len(),
                    });
                }
            }

            summary.total_places += region.finalize()?;
            finished.push(region);
        }

        tracing::info!(
            "✅ Generated {} places ({} regions complete, {} degraded)",
            summary.total_places,
            summary.complete,
            summary.degraded
        );

        Ok(Dataset { regions: finished })
    }

    /// Runs every region, then hands the dataset to `writer`. Returns the output location.
    pub async fn run_and_write<S: Storage>(
        &mut self,
        regions: Vec<Region>,
        writer: &JsonDatasetWriter<S>,
    ) -> Result<String> {
        let dataset = self.run(regions).await?;
        writer.write(&dataset).await
    }

    async fn resolve(&self, region: &mut Region) -> Result<()> {
        tracing::info!("🔍 Searching for '{}'", region.search_string());

        let resolution = self
            .resolver
            .resolve(region.search_string())
            .await
            .map_err(|e| match e {
                PlaceGenError::ResolutionFailed { .. } => e,
                other => PlaceGenError::ResolutionFailed {
                    search_string: region.search_string().to_string(),
                    reason: other.to_string(),
                },
            })?;

        tracing::debug!(
            "Resolved '{}' to '{}' {:?}",
            region.search_string(),
            resolution.resolved_name,
            resolution.bounding_box
        );
        region.apply_resolution(resolution)
    }
}
