//! Random source construction

use rand::{SeedableRng, rngs::StdRng};

/// Build a random source, seeded for reproducibility when a seed is given,
/// otherwise from OS entropy.
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}
