pub mod engine;
pub mod filter;
pub mod generator;
pub mod sampler;

pub use crate::domain::model::{BoundingBox, Coordinate, Dataset, GeocodeRecord, Place, Region};
pub use crate::domain::ports::{GeocodeResolver, ReverseGeocodeIndex, Storage};
pub use crate::utils::error::Result;
