//! Clusters of sub-modules on a coarse grid
//!
//! The grid spacing is twice the tile. Each cell draws one base module and
//! stamps resized copies of it at the offsets of the composition's motif,
//! relative to the cell center.

use crate::algorithm::placement::PlacementContext;
use crate::math::sampling::Span;
use crate::spatial::grid::CellGrid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

/// Offset pattern stamped around each cell center
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motif {
    /// Points along both axes
    Cross,
    /// Points evenly spaced on a circle
    Ring,
    /// Points along the main diagonal
    Diagonal,
}

impl Motif {
    /// All motifs
    pub const ALL: [Self; 3] = [Self::Cross, Self::Ring, Self::Diagonal];

    /// Uniform draw over the three motifs
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.random_range(0..Self::ALL.len());
        Self::ALL.get(index).copied().unwrap_or(Self::Cross)
    }

    /// Offsets for a tile of edge `tile`
    ///
    /// `ring_ratio` scales the ring radius relative to the tile and is ignored
    /// by the other motifs.
    pub fn offsets(self, tile: u32, ring_ratio: f64) -> Vec<(i64, i64)> {
        let tile = i64::from(tile);
        let step = (tile / 6).max(3) as usize;
        let axis = (-tile).div_euclid(2)..=tile / 2;
        match self {
            Self::Cross => {
                let vertical = axis.clone().step_by(step).map(|dy| (0, dy));
                let horizontal = axis.step_by(step).map(|dx| (dx, 0));
                vertical.chain(horizontal).collect()
            }
            Self::Ring => {
                let radius = (tile as f64 * ring_ratio).trunc();
                let spacing = (tile / 8).max(3) as f64;
                let points = ((TAU * radius / spacing).trunc() as usize).max(8);
                (0..points)
                    .map(|k| {
                        let (sin, cos) = (TAU * k as f64 / points as f64).sin_cos();
                        ((radius * cos).trunc() as i64, (radius * sin).trunc() as i64)
                    })
                    .collect()
            }
            Self::Diagonal => axis.step_by(step).map(|k| (k, k)).collect(),
        }
    }
}

/// Tunables of the motif grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    /// Tile edge length, drawn once per composition
    pub tile: Span<u32>,
    /// Fixed motif; drawn per composition when absent
    pub motif: Option<Motif>,
    /// Ring radius as a fraction of the tile, drawn per cell
    pub ring_ratio: Span<f64>,
    /// Sub-module size as a fraction of the tile
    pub sub_size: Span<f64>,
    /// Probability of rotating a sub-module
    pub rotation_probability: f64,
    /// Sub-module rotation in degrees
    pub rotation: Span<f64>,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            tile: Span::new(28, 64),
            motif: None,
            ring_ratio: Span::new(0.3, 0.45),
            sub_size: Span::new(0.55, 0.95),
            rotation_probability: 0.25,
            rotation: Span::new(-30.0, 30.0),
        }
    }
}

/// Stamp one motif cluster per coarse cell
pub fn place(cfg: &MotifConfig, ctx: &mut PlacementContext<'_>) {
    let tile = ctx.sample(cfg.tile).max(1);
    let motif = match cfg.motif {
        Some(motif) => motif,
        None => Motif::random(&mut *ctx.rng),
    };
    let mut grid = CellGrid::over(ctx.canvas.width(), ctx.canvas.height(), tile.saturating_mul(2));
    ctx.report.candidate_cells = grid.candidate_count();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let (cx, cy) = grid.center(row, col);
            let base = ctx.adjusted_tile();
            let ring_ratio = ctx.sample(cfg.ring_ratio);
            for (dx, dy) in motif.offsets(tile, ring_ratio) {
                let size = (f64::from(tile) * ctx.sample(cfg.sub_size)).trunc().max(1.0) as u32;
                let rotation = ctx.maybe_rotation(cfg.rotation_probability, cfg.rotation);
                let mut module = ctx.palette_module_from(&base, size, None);
                if let Some(angle) = rotation {
                    module = module.rotate_expand(angle);
                }
                ctx.paste_centered(&module, cx + dx, cy + dy);
            }
            grid.mark(row, col);
        }
    }

    debug!(tile, ?motif, cells = grid.candidate_count(), "modular motif placed");
    ctx.report.grid = Some(grid);
}
