use crate::domain::model::{BoundingBox, Coordinate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws uniform random coordinates inside a bounding box.
///
/// One sampler is created per run and reused for every region.
pub struct CoordinateSampler<R: Rng = StdRng> {
    rng: R,
}

impl CoordinateSampler<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoordinateSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample(&mut self, bbox: &BoundingBox) -> Coordinate {
        let lat = uniform(&mut self.rng, bbox.lat_min(), bbox.lat_max());
        let lon = uniform(&mut self.rng, bbox.lon_min(), bbox.lon_max());
        Coordinate { lat, lon }
    }
}

fn uniform<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}
