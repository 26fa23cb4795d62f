//! Noise-steered trajectories
//!
//! Each trajectory starts at a random point with a random heading. Every step
//! turns the heading by the noise value at the current point, advances by a
//! fraction of the tile and stamps a module aligned with the new heading.

use crate::algorithm::placement::PlacementContext;
use crate::math::noise::NoiseField;
use crate::math::sampling::Span;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

/// Largest noise seed drawn when none is configured
pub const MAX_NOISE_SEED: u64 = 10_000;

/// Tunables of the flow field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Tile edge length, drawn once per composition
    pub tile: Span<u32>,
    /// Number of trajectories
    pub trajectories: Span<u32>,
    /// Steps per trajectory, drawn once per composition
    pub steps: Span<u32>,
    /// Heading change per unit of noise, in radians
    pub turn_gain: f64,
    /// Pixels per noise lattice unit
    pub noise_scale: f64,
    /// Pixel offset added to both coordinates per step index before sampling noise
    pub drift: f64,
    /// Step length as a fraction of the tile
    pub step_factor: Span<f64>,
    /// Module size as a fraction of the tile
    pub size_factor: Span<f64>,
    /// Extra rotation on top of the heading, in degrees
    pub heading_jitter: Span<f64>,
    /// Noise seed; drawn from the composition source when absent
    pub seed: Option<u64>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(28, 52),
            trajectories: Span::new(16, 36),
            steps: Span::new(18, 36),
            turn_gain: 0.8,
            noise_scale: 80.0,
            drift: 3.0,
            step_factor: Span::new(0.6, 1.2),
            size_factor: Span::new(0.7, 1.3),
            heading_jitter: Span::new(-10.0, 10.0),
            seed: None,
        }
    }
}

/// Walk every trajectory and stamp its modules
pub fn place(cfg: &FlowConfig, ctx: &mut PlacementContext<'_>) {
    let tile = f64::from(ctx.sample(cfg.tile).max(1));
    let steps = ctx.sample(cfg.steps);
    let trajectories = ctx.sample(cfg.trajectories);
    let seed = match cfg.seed {
        Some(seed) => seed,
        None => ctx.sample(Span::new(0, MAX_NOISE_SEED)),
    };
    let field = NoiseField::new(seed, cfg.noise_scale);
    let x_range = Span::new(0, i64::from(ctx.canvas.width()));
    let y_range = Span::new(0, i64::from(ctx.canvas.height()));

    for _ in 0..trajectories {
        let (mut x, mut y) = (ctx.sample(x_range), ctx.sample(y_range));
        let mut heading = ctx.sample(Span::new(0.0, TAU));
        for step in 0..steps {
            let offset = f64::from(step) * cfg.drift;
            let value = field.sample(x as f64 + offset, y as f64 + offset);
            heading += value * cfg.turn_gain;
            let length = tile * ctx.sample(cfg.step_factor);
            let (sin, cos) = heading.sin_cos();
            x += (cos * length).trunc() as i64;
            y += (sin * length).trunc() as i64;

            let adjusted = ctx.adjusted_tile();
            let size = (tile * ctx.sample(cfg.size_factor)).trunc().max(1.0) as u32;
            let module = ctx.palette_module_from(&adjusted, size, None);
            // Heading is measured with y pointing down; rotation is counter-clockwise on screen.
            let angle = heading.to_degrees() + ctx.sample(cfg.heading_jitter);
            let module = module.rotate_expand(-angle);
            ctx.paste_centered(&module, x, y);
        }
    }

    debug!(seed, trajectories, steps, "flow field placed");
}
