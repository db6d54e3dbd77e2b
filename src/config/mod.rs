#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::Region;

pub const DEFAULT_PLACE_COUNT: usize = 200;

/// Reverse geocode field compared against a region's resolved name.
pub const MATCH_ON: &str = "admin1";

/// Consecutive rejections tolerated while looking for one more place.
pub const MATCH_FAIL_LIMIT: usize = DEFAULT_PLACE_COUNT * 5;

/// 內建的區域清單 (澳洲各州與領地)
pub fn default_regions() -> Vec<Region> {
    vec![
        Region::new("Australian Capital Territory, Australia", 6),
        Region::new("New South Wales, Australia", DEFAULT_PLACE_COUNT),
        Region::new("Northern Territory, Australia", 10),
        Region::new("Queensland, Australia", 90),
        Region::new("South Australia, Australia", 80),
        Region::new("Tasmania, Australia", 35),
        Region::new("Victoria, Australia", 150),
        Region::new("Western Australia, Australia", 80),
    ]
}
