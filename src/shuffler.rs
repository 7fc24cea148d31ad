use chrono::Utc;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

// @module: Random ordering of generated rows

/// Permute `items` uniformly in place.
///
/// With `seed == None` the generator is seeded from the wall clock at call
/// time, so consecutive runs produce different orders. Returns the seed used.
pub fn shuffle<T>(items: &mut [T], seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
    debug!("Shuffled {} items with seed {}", items.len(), seed);
    seed
}

// @returns: Nanoseconds since the epoch
fn clock_seed() -> u64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}
