//! Mathematical utilities for placement algorithms

/// Deterministic per-cell pseudo-random noise field
pub mod noise;
/// Closed-interval tunables and probability draws
pub mod sampling;
