//! Modules strung along a Lissajous-like path
//!
//! Instance `k` sits at parameter `t = k * step`, with a fresh step drawn per
//! instance, so spacing along the curve is irregular.

use crate::algorithm::placement::PlacementContext;
use crate::math::sampling::Span;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

/// Tunables of the wave path
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Tile edge length, drawn once per composition
    pub tile: Span<u32>,
    /// Number of instances along the path
    pub count: Span<u32>,
    /// Angular frequency on each axis, drawn independently
    pub frequency: Span<f64>,
    /// Amplitude in pixels on each axis, drawn independently
    pub amplitude: Span<u32>,
    /// Path parameter advance per instance index
    pub step: Span<f64>,
    /// Per-instance offset in pixels on each axis
    pub jitter: Span<i64>,
    /// Probability that an instance is rescaled and rotated
    pub transform_probability: f64,
    /// Scale factor for transformed instances
    pub scale: Span<f64>,
    /// Rotation in degrees for transformed instances
    pub rotation: Span<f64>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(22, 56),
            count: Span::new(140, 260),
            frequency: Span::new(0.0012, 0.0035),
            amplitude: Span::new(60, 180),
            step: Span::new(3.0, 7.0),
            jitter: Span::new(-90, 90),
            transform_probability: 0.4,
            scale: Span::new(0.8, 1.3),
            rotation: Span::new(-35.0, 35.0),
        }
    }
}

/// Emit every instance of the path
pub fn place(cfg: &WaveConfig, ctx: &mut PlacementContext<'_>) {
    let tile = ctx.sample(cfg.tile).max(1);
    let count = ctx.sample(cfg.count);
    let (freq_x, freq_y) = (ctx.sample(cfg.frequency), ctx.sample(cfg.frequency));
    let amp_x = f64::from(ctx.sample(cfg.amplitude));
    let amp_y = f64::from(ctx.sample(cfg.amplitude));
    let phase = ctx.sample(Span::new(0.0, TAU));
    let (mid_x, mid_y) = (i64::from(ctx.canvas.width() / 2), i64::from(ctx.canvas.height() / 2));

    for k in 0..count {
        let adjusted = ctx.adjusted_tile();
        let t = f64::from(k) * ctx.sample(cfg.step);
        let cx = mid_x + (amp_x * t.mul_add(freq_x, phase).sin()).trunc() as i64 + ctx.sample(cfg.jitter);
        let cy = mid_y
            + (amp_y * t.mul_add(freq_y, phase * 0.7).sin()).trunc() as i64
            + ctx.sample(cfg.jitter);

        let module = if ctx.chance(cfg.transform_probability) {
            let angle = ctx.sample(cfg.rotation);
            let size = (f64::from(tile) * ctx.sample(cfg.scale)).trunc().max(1.0) as u32;
            ctx.palette_module_from(&adjusted, size, Some(angle))
        } else {
            ctx.palette_module_from(&adjusted, tile, None)
        };
        ctx.paste_centered(&module, cx, cy);
    }

    debug!(tile, count, "waves placed");
}
