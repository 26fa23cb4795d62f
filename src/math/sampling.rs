//! Closed-interval tunables and probability draws
//!
//! Every randomized quantity in a composition (tile sizes, angles, factors,
//! counts) is described by a [`Span`] so configuration files can override it.
//! A span whose bounds coincide always yields that value, which is how tests
//! pin a mode to a deterministic layout.

use num_traits::Num;
use rand::Rng;
use rand::distr::uniform::SampleUniform;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Closed interval `[min, max]` sampled uniformly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<T> {
    /// Inclusive lower bound
    pub min: T,
    /// Inclusive upper bound
    pub max: T,
}

impl<T> Span<T>
where
    T: Copy + PartialOrd + SampleUniform,
{
    /// Create a span from its bounds
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Create a span that always yields `value`
    pub const fn fixed(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Draw a value uniformly from the interval
    ///
    /// Degenerate or inverted spans return `min` without consuming randomness.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    /// Whether `value` lies inside the interval
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T> Span<T>
where
    T: Num + Copy + PartialOrd,
{
    /// Whether both bounds are strictly positive and ordered
    pub fn is_positive(&self) -> bool {
        self.min > T::zero() && self.max >= self.min
    }

    /// Whether the bounds are ordered
    pub fn is_ordered(&self) -> bool {
        self.max >= self.min
    }
}

/// Bernoulli draw with probability `p`
///
/// Probabilities at or below zero never fire and at or above one always fire;
/// neither extreme consumes randomness.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.random::<f64>() < p
    }
}

/// Whether `p` is a usable probability
pub fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Normal draw with the given mean and standard deviation (Box-Muller)
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let radius = (-2.0 * (1.0 - rng.random::<f64>()).ln()).sqrt();
    let angle = TAU * rng.random::<f64>();
    std_dev.mul_add(radius * angle.cos(), mean)
}
