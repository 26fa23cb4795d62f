use crate::{
    algorithm::effects::{AppliedEffects, GlobalEffects},
    algorithm::modes::{ModeKind, ModeSelection, ModeTable},
    algorithm::module::ModuleSource,
    algorithm::placement::{PlacementContext, PlacementReport},
    algorithm::transform::TransformPolicy,
    color::palette::{PaletteProvider, choose_group},
    io::error::Result,
    spatial::canvas::{Canvas, CanvasSpec},
};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything that shapes one composition apart from the random source
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Physical canvas size
    pub canvas: CanvasSpec,
    /// Placement algorithm, fixed or drawn per composition
    pub mode: ModeSelection,
    /// Payloads used when a mode is chosen by kind
    pub modes: ModeTable,
    /// Per-module adjustment tunables
    pub transform: TransformPolicy,
    /// Canvas-wide post-effects
    pub effects: GlobalEffects,
}

impl ComposerConfig {
    /// Check every section before any placement happens
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error naming the first bad tunable
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.mode.validate()?;
        self.modes.validate()?;
        self.transform.validate()?;
        self.effects.validate()
    }
}

/// Output of one composition run
#[derive(Clone, Debug)]
pub struct Composition {
    /// Finished canvas
    pub canvas: Canvas,
    /// Algorithm that produced it
    pub mode: ModeKind,
    /// Placement counters
    pub report: PlacementReport,
    /// Global effects that fired
    pub effects: AppliedEffects,
}

/// Canvas after placement, before the global effect pass
#[derive(Clone, Debug)]
pub struct Placed {
    /// Canvas holding every placed module
    pub canvas: Canvas,
    /// Algorithm that placed them
    pub mode: ModeKind,
    /// Placement counters
    pub report: PlacementReport,
}

/// Runs compositions: mode selection, placements, then the global pass
///
/// The composer owns its random source, so two composers built from the same
/// configuration and seed produce identical canvases.
pub struct Composer<R: RngCore = StdRng> {
    config: ComposerConfig,
    rng: R,
}

impl Composer<StdRng> {
    /// Build a composer with a `StdRng` seeded from `seed`
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the configuration is rejected
    pub fn new(config: ComposerConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Composer<R> {
    /// Build a composer around an injected random source
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the configuration is rejected
    pub fn with_rng(config: ComposerConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Active configuration
    pub const fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Produce one composition
    ///
    /// Runs [`Self::place`] then [`Self::apply_effects`]. Missing modules and
    /// empty palettes are recovered from; only canvas creation can fail, and
    /// the configuration was validated up front.
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the canvas cannot be created
    pub fn compose(
        &mut self,
        source: &mut dyn ModuleSource,
        palettes: &dyn PaletteProvider,
    ) -> Result<Composition> {
        let placed = self.place(source, palettes)?;
        Ok(self.apply_effects(placed))
    }

    /// First half of a composition: choose the mode and palette group, then place modules
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the canvas cannot be created
    pub fn place(
        &mut self,
        source: &mut dyn ModuleSource,
        palettes: &dyn PaletteProvider,
    ) -> Result<Placed> {
        let mut canvas = Canvas::from_spec(&self.config.canvas)?;
        let mode = self.config.mode.resolve(&self.config.modes, &mut self.rng);
        let palette = choose_group(palettes, &mut self.rng);
        info!(
            mode = %mode.kind(),
            width = canvas.width(),
            height = canvas.height(),
            palette_colors = palette.len(),
            "composing"
        );

        let report = {
            let mut ctx = PlacementContext::new(
                &mut canvas,
                &mut self.rng,
                source,
                palette,
                &self.config.transform,
            );
            mode.run(&mut ctx)
        };
        debug!(
            candidates = report.candidate_cells,
            populated = report.populated_cells(),
            pasted = report.modules_pasted,
            clipped = report.modules_clipped,
            substituted = report.blank_substitutions,
            "placement finished"
        );

        Ok(Placed {
            canvas,
            mode: mode.kind(),
            report,
        })
    }

    /// Second half of a composition: the global effect pass
    pub fn apply_effects(&mut self, placed: Placed) -> Composition {
        let Placed {
            mut canvas,
            mode,
            report,
        } = placed;
        let effects = self.config.effects.apply(&mut canvas, &mut self.rng);
        Composition {
            canvas,
            mode,
            report,
            effects,
        }
    }
}
