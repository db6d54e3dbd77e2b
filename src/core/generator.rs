use crate::core::filter::{Acceptance, PlaceAcceptanceFilter, RejectReason};
use crate::core::sampler::CoordinateSampler;
use crate::domain::model::Region;
use crate::domain::ports::ReverseGeocodeIndex;
use crate::utils::error::{PlaceGenError, Result};
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

/// How generation ended for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Every requested place was collected.
    Complete,
    /// The fail limit tripped after at least one place was collected.
    Degraded { requested: usize, collected: usize },
    /// The fail limit tripped before any place was collected.
    Unresolvable { attempts: usize },
}

/// Rejection-sampling loop for a single region.
///
/// Each place gets its own budget of `match_fail_limit` consecutive rejections.
/// Exhausting the budget ends generation for the region.
#[derive(Debug, Clone)]
pub struct RegionPlaceGenerator {
    filter: PlaceAcceptanceFilter,
    match_fail_limit: usize,
}

impl RegionPlaceGenerator {
    pub fn new(filter: PlaceAcceptanceFilter, match_fail_limit: usize) -> Self {
        Self {
            filter,
            match_fail_limit,
        }
    }

    pub fn match_on(&self) -> &str {
        self.filter.match_on()
    }

    pub fn match_fail_limit(&self) -> usize {
        self.match_fail_limit
    }

    pub async fn generate<R, I>(
        &self,
        region: &mut Region,
        sampler: &mut CoordinateSampler<R>,
        index: &I,
    ) -> Result<GenerationOutcome>
    where
        R: Rng,
        I: ReverseGeocodeIndex + ?Sized,
    {
        let (resolved_name, bbox) = match (region.resolved_name(), region.bounding_box()) {
            (Some(name), Some(bbox)) => (name.to_string(), *bbox),
            _ => {
                return Err(PlaceGenError::ProcessingError {
                    message: format!(
                        "region '{}' must be resolved before generating places",
                        region.search_string()
                    ),
                })
            }
        };

        let requested = region.requested_place_count();
        let mut seen: HashSet<String> = region.places().iter().map(|p| p.name.clone()).collect();
        let mut rejections: BTreeMap<String, usize> = BTreeMap::new();
        let remaining = requested.saturating_sub(region.places().len());

        for _ in 0..remaining {
            let mut fail_count = 0;

            loop {
                let point = sampler.sample(&bbox);
                let candidate = match index.lookup(point).await {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        tracing::debug!("Reverse lookup at ({}, {}) failed: {}", point.lat, point.lon, e);
                        None
                    }
                };

                match self.filter.accept(candidate.as_ref(), &resolved_name, &seen) {
                    Acceptance::Accepted(place) => {
                        tracing::trace!("Accepted '{}' for {}", place.name, resolved_name);
                        seen.insert(place.name.clone());
                        region.push_place(place)?;
                        break;
                    }
                    Acceptance::Rejected(reason) => {
                        record_rejection(&mut rejections, reason);
                        fail_count += 1;

                        if fail_count >= self.match_fail_limit {
                            tracing::debug!("Rejections for {}: {:?}", resolved_name, rejections);
                            let collected = region.places().len();
                            return Ok(if collected == 0 {
                                GenerationOutcome::Unresolvable {
                                    attempts: fail_count,
                                }
                            } else {
                                GenerationOutcome::Degraded {
                                    requested,
                                    collected,
                                }
                            });
                        }
                    }
                }
            }
        }

        tracing::debug!("Rejections for {}: {:?}", resolved_name, rejections);
        Ok(GenerationOutcome::Complete)
    }
}

fn record_rejection(rejections: &mut BTreeMap<String, usize>, reason: RejectReason) {
    *rejections.entry(reason.to_string()).or_insert(0) += 1;
}
