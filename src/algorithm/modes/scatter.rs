//! Free scatter of scaled, rotated, translucent duotone modules
//!
//! Ignores any grid. Each module gets its own scale, rotation, position and
//! opacity; the pass can end with a light canvas-wide blur or posterize.

use crate::algorithm::effects::{blur_canvas, posterize_canvas};
use crate::algorithm::placement::PlacementContext;
use crate::color::colorize::ColorPolicy;
use crate::color::palette::DuotonePair;
use crate::io::configuration::{DEFAULT_MODULE_SIZE, MIN_SCATTER_SIZE};
use crate::math::sampling::Span;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the typographic scatter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of modules scattered
    pub count: Span<u32>,
    /// Scale shared by the whole pass
    pub base_scale: Span<f64>,
    /// Per-module scale multiplier
    pub scale_variation: Span<f64>,
    /// Module edge length at scale 1
    pub base_size: u32,
    /// Smallest module edge length
    pub min_size: u32,
    /// Probability of rotating a module
    pub rotation_probability: f64,
    /// Rotation in degrees
    pub rotation: Span<f64>,
    /// Uniform module opacity
    pub alpha: Span<u8>,
    /// Probability of the closing blur
    pub blur_probability: f64,
    /// Closing blur sigma
    pub blur_radius: Span<f64>,
    /// Probability of the closing posterize
    pub posterize_probability: f64,
    /// Bits kept per channel by the closing posterize
    pub posterize_bits: Span<u8>,
    /// Fixed `[dark, light]` colors; a random soft pair is drawn when absent
    pub colors: Option<[[u8; 3]; 2]>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: Span::new(180, 420),
            base_scale: Span::new(0.8, 2.2),
            scale_variation: Span::new(0.4, 4.5),
            base_size: DEFAULT_MODULE_SIZE,
            min_size: MIN_SCATTER_SIZE,
            rotation_probability: 0.7,
            rotation: Span::new(-45.0, 45.0),
            alpha: Span::new(100, 255),
            blur_probability: 0.3,
            blur_radius: Span::new(0.5, 2.0),
            posterize_probability: 0.3,
            posterize_bits: Span::new(2, 4),
            colors: None,
        }
    }
}

/// Scatter the modules, then run the optional closing filters
pub fn place(cfg: &ScatterConfig, ctx: &mut PlacementContext<'_>) {
    let pair = match cfg.colors {
        Some(channels) => DuotonePair::from_channels(channels),
        None => DuotonePair::random(&mut *ctx.rng),
    };
    let policy = ColorPolicy::Duotone(pair);
    let count = ctx.sample(cfg.count);
    let base_scale = ctx.sample(cfg.base_scale);
    let (width, height) = (i64::from(ctx.canvas.width()), i64::from(ctx.canvas.height()));

    for _ in 0..count {
        let adjusted = ctx.adjusted_tile();
        let scale = base_scale * ctx.sample(cfg.scale_variation);
        let size = ((f64::from(cfg.base_size) * scale).trunc().max(0.0) as u32).max(cfg.min_size.max(1));
        let mut module = ctx.finish(&adjusted, size, None, &policy);
        if let Some(angle) = ctx.maybe_rotation(cfg.rotation_probability, cfg.rotation) {
            module = module.rotate_expand(angle);
        }

        let size = f64::from(size);
        let lead = (size * 0.8).trunc() as i64;
        let trail = (size * 0.2).trunc() as i64;
        let x = ctx.sample(Span::new(-lead, width - trail));
        let y = ctx.sample(Span::new(-lead, height - trail));
        let alpha = ctx.sample(cfg.alpha);
        ctx.paste(&module.with_alpha(alpha), x, y);
    }

    if ctx.chance(cfg.blur_probability) {
        let sigma = ctx.sample(cfg.blur_radius);
        blur_canvas(ctx.canvas, sigma);
    }
    if ctx.chance(cfg.posterize_probability) {
        let bits = ctx.sample(cfg.posterize_bits);
        posterize_canvas(ctx.canvas, bits);
    }

    debug!(count, base_scale, "typographic scatter placed");
}
