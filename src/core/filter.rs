use crate::domain::model::{GeocodeRecord, Place};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NoMatch,
    MissingAttribution,
    RegionMismatch,
    Duplicate,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoMatch => "no_match",
            Self::MissingAttribution => "missing_attribution",
            Self::RegionMismatch => "region_mismatch",
            Self::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Acceptance {
    Accepted(Place),
    Rejected(RejectReason),
}

/// Decides whether a reverse geocode hit becomes a place of the region.
#[derive(Debug, Clone)]
pub struct PlaceAcceptanceFilter {
    match_on: String,
}

impl PlaceAcceptanceFilter {
    pub fn new(match_on: impl Into<String>) -> Self {
        Self {
            match_on: match_on.into(),
        }
    }

    pub fn match_on(&self) -> &str {
        &self.match_on
    }

    /// The accepted place keeps the record's coordinates, not the sampled point.
    pub fn accept(
        &self,
        candidate: Option<&GeocodeRecord>,
        resolved_name: &str,
        seen_names: &HashSet<String>,
    ) -> Acceptance {
        let Some(record) = candidate else {
            return Acceptance::Rejected(RejectReason::NoMatch);
        };

        match record.attribution(&self.match_on) {
            None => Acceptance::Rejected(RejectReason::MissingAttribution),
            Some(attribution) if attribution != resolved_name => {
                Acceptance::Rejected(RejectReason::RegionMismatch)
            }
            Some(_) if seen_names.contains(&record.name) => {
                Acceptance::Rejected(RejectReason::Duplicate)
            }
            Some(_) => Acceptance::Accepted(Place::new(record.name.clone(), record.lat, record.lon)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, admin1: &str) -> GeocodeRecord {
        GeocodeRecord::new(name, -35.28, 149.13).with_attribute("admin1", admin1)
    }

    #[test]
    fn test_no_record_is_no_match() {
        let filter = PlaceAcceptanceFilter::new("admin1");
        assert_eq!(
            filter.accept(None, "X", &HashSet::new()),
            Acceptance::Rejected(RejectReason::NoMatch)
        );
    }

    #[test]
    fn test_attribution_must_match_exactly() {
        let filter = PlaceAcceptanceFilter::new("admin1");
        let seen = HashSet::new();

        assert_eq!(
            filter.accept(Some(&record("Canberra", "Australian Capital Territory")), "ACT", &seen),
            Acceptance::Rejected(RejectReason::RegionMismatch)
        );
        assert_eq!(
            filter.accept(Some(&record("Canberra", "x")), "X", &seen),
            Acceptance::Rejected(RejectReason::RegionMismatch)
        );
    }

    #[test]
    fn test_missing_attribution_field_is_rejected() {
        let filter = PlaceAcceptanceFilter::new("state");
        let candidate = record("Canberra", "X");
        assert_eq!(
            filter.accept(Some(&candidate), "X", &HashSet::new()),
            Acceptance::Rejected(RejectReason::MissingAttribution)
        );
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let filter = PlaceAcceptanceFilter::new("admin1");
        let seen: HashSet<String> = ["Canberra".to_string()].into_iter().collect();
        assert_eq!(
            filter.accept(Some(&record("Canberra", "X")), "X", &seen),
            Acceptance::Rejected(RejectReason::Duplicate)
        );
    }

    #[test]
    fn test_accepted_place_uses_record_coordinates() {
        let filter = PlaceAcceptanceFilter::new("admin1");
        let candidate = GeocodeRecord::new("Queanbeyan", -35.35, 149.23).with_attribute("admin1", "X");

        match filter.accept(Some(&candidate), "X", &HashSet::new()) {
            Acceptance::Accepted(place) => {
                assert_eq!(place, Place::new("Queanbeyan", -35.35, 149.23));
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }
}
