//! Shared state threaded through a placement algorithm

use crate::algorithm::module::{Module, ModuleSource};
use crate::algorithm::transform::TransformPolicy;
use crate::color::colorize::ColorPolicy;
use crate::math::sampling::{Span, chance};
use crate::spatial::canvas::Canvas;
use crate::spatial::grid::CellGrid;
use image::{GrayImage, Rgb};
use rand::RngCore;
use rand::distr::uniform::SampleUniform;

/// Counters describing what a placement algorithm did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementReport {
    /// Cells considered before density or probability filtering (grid modes)
    pub candidate_cells: usize,
    /// Modules drawn through the pipeline
    pub modules_drawn: usize,
    /// Placements that touched the canvas
    pub modules_pasted: usize,
    /// Placements dropped because they fell entirely outside the canvas
    pub modules_clipped: usize,
    /// Draws where the source had nothing and a blank tile was substituted
    pub blank_substitutions: usize,
    /// Cell occupancy for grid-based modes
    pub grid: Option<CellGrid>,
}

impl PlacementReport {
    /// Populated cells according to the occupancy grid, zero for gridless modes
    pub fn populated_cells(&self) -> usize {
        self.grid.as_ref().map_or(0, CellGrid::populated_count)
    }
}

/// Everything an algorithm needs to emit placements onto the canvas
pub struct PlacementContext<'a> {
    /// Target canvas
    pub canvas: &'a mut Canvas,
    /// Injected random source for every draw in the run
    pub rng: &'a mut dyn RngCore,
    /// Supplier of raw module tiles
    pub source: &'a mut dyn ModuleSource,
    /// Color group chosen for this composition, possibly empty
    pub palette: &'a [Rgb<u8>],
    /// Adjustment pipeline tunables
    pub transform: &'a TransformPolicy,
    /// Running counters
    pub report: PlacementReport,
}

impl<'a> PlacementContext<'a> {
    /// Bundle the collaborators of one composition run
    pub fn new(
        canvas: &'a mut Canvas,
        rng: &'a mut dyn RngCore,
        source: &'a mut dyn ModuleSource,
        palette: &'a [Rgb<u8>],
        transform: &'a TransformPolicy,
    ) -> Self {
        Self {
            canvas,
            rng,
            source,
            palette,
            transform,
            report: PlacementReport::default(),
        }
    }

    /// Canvas width as a float, for placement math
    pub fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    /// Canvas height as a float, for placement math
    pub fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    /// Draw a value from a span
    pub fn sample<T>(&mut self, span: Span<T>) -> T
    where
        T: Copy + PartialOrd + SampleUniform,
    {
        span.sample(&mut *self.rng)
    }

    /// Bernoulli draw
    pub fn chance(&mut self, p: f64) -> bool {
        chance(&mut *self.rng, p)
    }

    /// Optional rotation angle: drawn from `angles` with probability `p`
    pub fn maybe_rotation(&mut self, p: f64, angles: Span<f64>) -> Option<f64> {
        if self.chance(p) {
            Some(self.sample(angles))
        } else {
            None
        }
    }

    /// Pull a tile from the source and run the luminance adjustments on it
    pub fn adjusted_tile(&mut self) -> GrayImage {
        let (tile, substituted) = self.transform.draw_tile(&mut *self.source, &mut *self.rng);
        self.report.modules_drawn += 1;
        if substituted {
            self.report.blank_substitutions += 1;
        }
        self.transform.adjust_luminance(tile, &mut *self.rng)
    }

    /// Resize, rotate and colorize an adjusted tile
    pub fn finish(
        &mut self,
        adjusted: &GrayImage,
        size: u32,
        rotation: Option<f64>,
        policy: &ColorPolicy<'_>,
    ) -> Module {
        self.transform
            .prepare(adjusted, size, rotation, policy, &mut *self.rng)
    }

    /// Draw, adjust and finish a module colored from the composition palette
    pub fn palette_module(&mut self, size: u32, rotation: Option<f64>) -> Module {
        let adjusted = self.adjusted_tile();
        self.palette_module_from(&adjusted, size, rotation)
    }

    /// Finish an already adjusted tile with a color from the composition palette
    pub fn palette_module_from(&mut self, adjusted: &GrayImage, size: u32, rotation: Option<f64>) -> Module {
        let policy = ColorPolicy::Palette(self.palette);
        self.finish(adjusted, size, rotation, &policy)
    }

    /// Composite a module with its top-left corner at `(x, y)`
    pub fn paste(&mut self, module: &Module, x: i64, y: i64) -> bool {
        let touched = self.canvas.paste_module(module, x, y);
        if touched {
            self.report.modules_pasted += 1;
        } else {
            self.report.modules_clipped += 1;
        }
        touched
    }

    /// Composite a module centered on `(cx, cy)`
    pub fn paste_centered(&mut self, module: &Module, cx: i64, cy: i64) -> bool {
        let x = cx - i64::from(module.width() / 2);
        let y = cy - i64::from(module.height() / 2);
        self.paste(module, x, y)
    }
}
