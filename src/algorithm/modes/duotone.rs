//! Strict grid of duotone modules with a per-run density filter

use crate::algorithm::placement::PlacementContext;
use crate::color::colorize::ColorPolicy;
use crate::color::palette::DuotonePair;
use crate::math::sampling::Span;
use crate::spatial::grid::CellGrid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the duotone grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuotoneConfig {
    /// Tile edge length, drawn once per composition
    pub tile: Span<u32>,
    /// Inclusion probability per cell, drawn once per composition
    pub density: Span<f64>,
    /// Probability of a left-right mirror per included cell
    pub mirror_probability: f64,
    /// Probability of a top-bottom flip per included cell
    pub flip_probability: f64,
    /// Probability of a rotation per included cell
    pub rotation_probability: f64,
    /// Rotation in degrees
    pub rotation: Span<f64>,
    /// Fixed `[dark, light]` colors; a random soft pair is drawn when absent
    pub colors: Option<[[u8; 3]; 2]>,
}

impl Default for DuotoneConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(60, 120),
            density: Span::new(0.35, 0.85),
            mirror_probability: 0.25,
            flip_probability: 0.2,
            rotation_probability: 0.35,
            rotation: Span::new(-25.0, 25.0),
            colors: None,
        }
    }
}

/// Fill the grid, keeping each cell with the drawn density
pub fn place(cfg: &DuotoneConfig, ctx: &mut PlacementContext<'_>) {
    let tile = ctx.sample(cfg.tile).max(1);
    let mut grid = CellGrid::over(ctx.canvas.width(), ctx.canvas.height(), tile);
    ctx.report.candidate_cells = grid.candidate_count();

    let pair = match cfg.colors {
        Some(channels) => DuotonePair::from_channels(channels),
        None => DuotonePair::random(&mut *ctx.rng),
    };
    let policy = ColorPolicy::Duotone(pair);
    let base = ctx.adjusted_tile();
    let density = ctx.sample(cfg.density);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if !ctx.chance(density) {
                continue;
            }
            let mut module = ctx.finish(&base, tile, None, &policy);
            if ctx.chance(cfg.mirror_probability) {
                module = module.mirrored();
            }
            if ctx.chance(cfg.flip_probability) {
                module = module.flipped();
            }
            if let Some(angle) = ctx.maybe_rotation(cfg.rotation_probability, cfg.rotation) {
                module = module.rotate_and_recrop(angle, tile);
            }
            let (x, y) = grid.origin(row, col);
            ctx.paste(&module, x, y);
            grid.mark(row, col);
        }
    }

    debug!(tile, density, populated = grid.populated_count(), "duotone grid placed");
    ctx.report.grid = Some(grid);
}
