//! Rotated, sheared grid of palette-colored modules
//!
//! One base module is drawn per composition and reused row after row; a few
//! cells draw a fresh module instead. The whole lattice is sheared per row and
//! turned by a small global angle before per-cell jitter is added.

use crate::algorithm::placement::PlacementContext;
use crate::color::colorize::ColorPolicy;
use crate::math::sampling::Span;
use crate::spatial::grid::CellGrid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the trama grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TramaConfig {
    /// Tile edge length, drawn once per composition
    pub tile: Span<u32>,
    /// Global lattice rotation in degrees
    pub rotation: Span<f64>,
    /// Horizontal shear per row, as a fraction of the tile
    pub skew: Span<f64>,
    /// Maximum per-cell offset on each axis, as a fraction of the tile
    pub jitter_ratio: f64,
    /// Probability that a cell draws a fresh module instead of the base one
    pub fresh_module_probability: f64,
    /// Probability of a per-cell rotation
    pub local_rotation_probability: f64,
    /// Per-cell rotation in degrees
    pub local_rotation: Span<f64>,
}

impl Default for TramaConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(18, 44),
            rotation: Span::new(-10.0, 10.0),
            skew: Span::new(-0.4, 0.4),
            jitter_ratio: 0.25,
            fresh_module_probability: 0.08,
            local_rotation_probability: 0.18,
            local_rotation: Span::new(-20.0, 20.0),
        }
    }
}

/// Lay the sheared lattice over the canvas
pub fn place(cfg: &TramaConfig, ctx: &mut PlacementContext<'_>) {
    let tile = ctx.sample(cfg.tile).max(1);
    let mut grid = CellGrid::over(ctx.canvas.width(), ctx.canvas.height(), tile);
    ctx.report.candidate_cells = grid.candidate_count();

    let base = ctx.adjusted_tile();
    let (sin, cos) = ctx.sample(cfg.rotation).to_radians().sin_cos();
    let skew = ctx.sample(cfg.skew);
    let jitter = (f64::from(tile) * cfg.jitter_ratio).trunc().max(0.0) as i64;
    let jitter_span = Span::new(-jitter, jitter);
    let size = f64::from(tile);
    let policy = ColorPolicy::Palette(ctx.palette);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let fresh = ctx.chance(cfg.fresh_module_probability);
            let rotation = ctx.maybe_rotation(cfg.local_rotation_probability, cfg.local_rotation);
            let module = if fresh {
                let adjusted = ctx.adjusted_tile();
                ctx.finish(&adjusted, tile, rotation, &policy)
            } else {
                ctx.finish(&base, tile, rotation, &policy)
            };

            let base_x = (col as f64).mul_add(size, row as f64 * skew * size).trunc();
            let base_y = row as f64 * size;
            let x = base_x.mul_add(cos, -(base_y * sin)).trunc() as i64 + ctx.sample(jitter_span);
            let y = base_x.mul_add(sin, base_y * cos).trunc() as i64 + ctx.sample(jitter_span);
            ctx.paste(&module, x, y);
            grid.mark(row, col);
        }
    }

    debug!(tile, cells = grid.candidate_count(), "trama placed");
    ctx.report.grid = Some(grid);
}
