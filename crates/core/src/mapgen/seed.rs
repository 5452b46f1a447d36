//! Per-floor seed derivation for the geometry generator.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

/// Splitmix64 over the run seed offset by the floor index. One finalizer
/// pass is enough to decorrelate adjacent floors of the same run.
pub(super) fn derive_floor_seed(run_seed: u64, floor_index: u8) -> u64 {
    let mut state =
        run_seed.wrapping_add(0x9E37_79B9_7F4A_7C15u64.wrapping_mul(1 + floor_index as u64));
    state = (state ^ (state >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    state = (state ^ (state >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    state ^ (state >> 31)
}

/// Geometry RNG for one floor. Layout decisions draw from this stream and
/// never touch the game's own RNG.
pub(super) fn floor_rng(run_seed: u64, floor_index: u8) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_floor_seed(run_seed, floor_index))
}
