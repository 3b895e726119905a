//! Seedable PCG32 generators for phase randomisation.
//!
//! Every click draws its phases from a `Pcg32`. A request with an explicit
//! seed is reproducible bit-for-bit; a request without one is seeded from
//! the operating system.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Creates a PCG32 RNG with a fresh random seed.
///
/// Returns the seed alongside the generator so callers can log or
/// reproduce the click later.
pub fn create_unseeded_rng() -> (u32, Pcg32) {
    let seed: u32 = rand::random();
    (seed, create_rng(seed))
}

/// Derives an independent seed for the n-th click rendered from a base seed.
///
/// Uses BLAKE3 over the little-endian base seed and counter so consecutive
/// clicks in a session do not share phase sequences.
pub fn derive_click_seed(base_seed: u32, counter: u64) -> u32 {
    let mut input = Vec::with_capacity(12);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&counter.to_le_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
