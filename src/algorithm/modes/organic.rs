//! Noise-thresholded grid population

use crate::algorithm::modes::flow::MAX_NOISE_SEED;
use crate::algorithm::placement::PlacementContext;
use crate::math::noise::noise;
use crate::math::sampling::Span;
use crate::spatial::grid::CellGrid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the organic density grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicConfig {
    /// Tile edge length and grid spacing, drawn once per composition
    pub tile: Span<u32>,
    /// Cells whose noise value is below the threshold stay empty
    pub threshold: Span<f64>,
    /// Pixels per noise lattice unit
    pub warp: Span<f64>,
    /// Offset added to cell x before warping
    pub offset_x: f64,
    /// Offset added to cell y before warping
    pub offset_y: f64,
    /// Module size as a fraction of the tile
    pub size_factor: Span<f64>,
    /// Probability of rotating a populated cell's module
    pub rotation_probability: f64,
    /// Rotation in degrees
    pub rotation: Span<f64>,
    /// Noise seed; drawn from the composition source when absent
    pub seed: Option<u64>,
}

impl Default for OrganicConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(24, 50),
            threshold: Span::new(-0.15, 0.25),
            warp: Span::new(60.0, 120.0),
            offset_x: 200.0,
            offset_y: -150.0,
            size_factor: Span::new(0.8, 1.2),
            rotation_probability: 0.25,
            rotation: Span::new(-25.0, 25.0),
            seed: None,
        }
    }
}

/// Populate the cells whose noise clears the threshold
pub fn place(cfg: &OrganicConfig, ctx: &mut PlacementContext<'_>) {
    let tile = ctx.sample(cfg.tile).max(1);
    let mut grid = CellGrid::over(ctx.canvas.width(), ctx.canvas.height(), tile);
    ctx.report.candidate_cells = grid.candidate_count();

    let seed = match cfg.seed {
        Some(seed) => seed,
        None => ctx.sample(Span::new(0, MAX_NOISE_SEED)),
    };
    let threshold = ctx.sample(cfg.threshold);
    let warp = ctx.sample(cfg.warp);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let (x, y) = grid.origin(row, col);
            let value = noise(
                (x as f64 + cfg.offset_x) / warp,
                (y as f64 + cfg.offset_y) / warp,
                seed,
            );
            if value < threshold {
                continue;
            }
            let size = (f64::from(tile) * ctx.sample(cfg.size_factor)).trunc().max(1.0) as u32;
            let rotation = ctx.maybe_rotation(cfg.rotation_probability, cfg.rotation);
            let mut module = ctx.palette_module(size, None);
            if let Some(angle) = rotation {
                module = module.rotate_expand(angle);
            }
            ctx.paste(&module, x, y);
            grid.mark(row, col);
        }
    }

    debug!(tile, threshold, warp, populated = grid.populated_count(), "organic density placed");
    ctx.report.grid = Some(grid);
}
