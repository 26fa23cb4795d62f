//! Deterministic per-cell pseudo-random noise field
//!
//! This is deliberately not gradient noise: every integer lattice cell of the
//! scaled coordinates hashes to an independent uniform value. Flow trajectories
//! use it as a turning perturbation and the organic mode as an inclusion test.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Multiplier applied to `x` before truncation to a lattice coordinate
pub const X_HASH_PRIME: f64 = 73_856_093.0;
/// Multiplier applied to `y` before truncation to a lattice coordinate
pub const Y_HASH_PRIME: f64 = 19_349_663.0;

/// Hash scaled coordinates and a seed into a single key
///
/// Float to integer casts saturate, so negative, fractional, huge and NaN
/// inputs all produce a valid key.
pub const fn lattice_key(x: f64, y: f64, seed: u64) -> u64 {
    let xi = (x * X_HASH_PRIME) as i64;
    let yi = (y * Y_HASH_PRIME) as i64;
    ((xi ^ yi) as u64) ^ seed
}

/// Sample the noise field at `(x, y)` for the given seed
///
/// Returns a value in `[-1, 1)`. Identical arguments always yield the
/// identical value regardless of call order.
pub fn noise(x: f64, y: f64, seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(lattice_key(x, y, seed));
    rng.random_range(-1.0..1.0)
}

/// A noise field bound to one seed, sampled in coordinates divided by `scale`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    seed: u64,
    scale: f64,
}

impl NoiseField {
    /// Create a field with the given seed and coordinate divisor
    ///
    /// A non-positive or non-finite scale falls back to `1.0`.
    pub const fn new(seed: u64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self { seed, scale }
    }

    /// Seed of this field
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Coordinate divisor of this field
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Sample the field at canvas coordinates
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        noise(x / self.scale, y / self.scale, self.seed)
    }
}
