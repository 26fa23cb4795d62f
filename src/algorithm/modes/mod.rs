//! Placement algorithms and mode selection
//!
//! Each algorithm lives in its own module with a serde-configurable payload.
//! [`Mode`] tags the payload and [`Mode::place`] dispatches with a single
//! exhaustive match, so an unknown mode cannot be expressed.

/// Duotone grid: strict grid, one duotone pair, per-cell density filter
pub mod duotone;
/// Flow field: noise-steered trajectories of heading-aligned modules
pub mod flow;
/// Modular motif: clusters of sub-modules in cross, ring or diagonal patterns
pub mod motif;
/// Organic density: noise-thresholded grid population
pub mod organic;
/// Typographic scatter: free scatter of scaled, rotated, translucent modules
pub mod scatter;
/// Trama: rotated, sheared grid with per-cell jitter
pub mod trama;
/// Waves: modules strung along a Lissajous-like path
pub mod waves;

use crate::algorithm::effects::validate_sigma;
use crate::algorithm::placement::{PlacementContext, PlacementReport};
use crate::io::error::{Result, invalid_parameter};
use crate::math::sampling::{Span, is_probability};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use duotone::DuotoneConfig;
pub use flow::FlowConfig;
pub use motif::{Motif, MotifConfig};
pub use organic::OrganicConfig;
pub use scatter::ScatterConfig;
pub use trama::TramaConfig;
pub use waves::WaveConfig;

/// One placement algorithm together with its configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// Rotated, sheared grid
    Trama(TramaConfig),
    /// Lissajous-like wave path
    Waves(WaveConfig),
    /// Strict grid with a single duotone pair
    DuotoneGrid(DuotoneConfig),
    /// Noise-steered trajectories
    FlowField(FlowConfig),
    /// Motif clusters on a coarse grid
    ModularMotif(MotifConfig),
    /// Noise-thresholded grid
    OrganicDensity(OrganicConfig),
    /// Free scatter of scaled glyphs
    TypographicScatter(ScatterConfig),
}

impl Mode {
    /// Tag of this mode
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Trama(_) => ModeKind::Trama,
            Self::Waves(_) => ModeKind::Waves,
            Self::DuotoneGrid(_) => ModeKind::DuotoneGrid,
            Self::FlowField(_) => ModeKind::FlowField,
            Self::ModularMotif(_) => ModeKind::ModularMotif,
            Self::OrganicDensity(_) => ModeKind::OrganicDensity,
            Self::TypographicScatter(_) => ModeKind::TypographicScatter,
        }
    }

    /// Check tile ranges and probabilities of the payload
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error naming the first bad tunable
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Trama(cfg) => {
                validate_tile("trama.tile", cfg.tile)?;
                validate_probability("trama.fresh_module_probability", cfg.fresh_module_probability)?;
                validate_probability("trama.local_rotation_probability", cfg.local_rotation_probability)
            }
            Self::Waves(cfg) => {
                validate_tile("waves.tile", cfg.tile)?;
                validate_probability("waves.transform_probability", cfg.transform_probability)
            }
            Self::DuotoneGrid(cfg) => {
                validate_tile("duotone_grid.tile", cfg.tile)?;
                validate_probability("duotone_grid.mirror_probability", cfg.mirror_probability)?;
                validate_probability("duotone_grid.flip_probability", cfg.flip_probability)?;
                validate_probability("duotone_grid.rotation_probability", cfg.rotation_probability)
            }
            Self::FlowField(cfg) => {
                validate_tile("flow_field.tile", cfg.tile)?;
                if cfg.noise_scale.is_finite() && cfg.noise_scale > 0.0 {
                    Ok(())
                } else {
                    Err(invalid_parameter(
                        "flow_field.noise_scale",
                        &cfg.noise_scale,
                        &"must be a positive number",
                    ))
                }
            }
            Self::ModularMotif(cfg) => {
                validate_tile("modular_motif.tile", cfg.tile)?;
                validate_probability("modular_motif.rotation_probability", cfg.rotation_probability)
            }
            Self::OrganicDensity(cfg) => {
                validate_tile("organic_density.tile", cfg.tile)?;
                validate_probability("organic_density.rotation_probability", cfg.rotation_probability)?;
                if cfg.warp.min > 0.0 && cfg.warp.is_ordered() {
                    Ok(())
                } else {
                    Err(invalid_parameter(
                        "organic_density.warp",
                        &format!("{:?}", cfg.warp),
                        &"warp must be positive",
                    ))
                }
            }
            Self::TypographicScatter(cfg) => {
                validate_tile("typographic_scatter.base_size", Span::fixed(cfg.base_size))?;
                validate_probability("typographic_scatter.rotation_probability", cfg.rotation_probability)?;
                validate_probability("typographic_scatter.blur_probability", cfg.blur_probability)?;
                validate_sigma("typographic_scatter.blur_radius", cfg.blur_radius)?;
                validate_probability(
                    "typographic_scatter.posterize_probability",
                    cfg.posterize_probability,
                )?;
                let bits = cfg.posterize_bits;
                if bits.min >= 1 && bits.max <= 8 && bits.is_ordered() {
                    Ok(())
                } else {
                    Err(invalid_parameter(
                        "typographic_scatter.posterize_bits",
                        &format!("{}..={}", bits.min, bits.max),
                        &"bits must lie in 1..=8 and be ordered",
                    ))
                }
            }
        }
    }

    /// Run the algorithm against a placement context
    pub fn place(&self, ctx: &mut PlacementContext<'_>) {
        match self {
            Self::Trama(cfg) => trama::place(cfg, ctx),
            Self::Waves(cfg) => waves::place(cfg, ctx),
            Self::DuotoneGrid(cfg) => duotone::place(cfg, ctx),
            Self::FlowField(cfg) => flow::place(cfg, ctx),
            Self::ModularMotif(cfg) => motif::place(cfg, ctx),
            Self::OrganicDensity(cfg) => organic::place(cfg, ctx),
            Self::TypographicScatter(cfg) => scatter::place(cfg, ctx),
        }
    }

    /// Run the algorithm and hand back the report
    pub fn run(&self, ctx: &mut PlacementContext<'_>) -> PlacementReport {
        self.place(ctx);
        std::mem::take(&mut ctx.report)
    }
}

fn validate_tile(parameter: &'static str, tile: Span<u32>) -> Result<()> {
    if tile.is_positive() {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &format!("{}..={}", tile.min, tile.max),
            &"tile sizes must be positive and ordered",
        ))
    }
}

fn validate_probability(parameter: &'static str, p: f64) -> Result<()> {
    if is_probability(p) {
        Ok(())
    } else {
        Err(invalid_parameter(parameter, &p, &"must lie in [0, 1]"))
    }
}

/// Tag naming one of the seven placement algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Rotated, sheared grid
    Trama,
    /// Lissajous-like wave path
    Waves,
    /// Strict grid with a single duotone pair
    DuotoneGrid,
    /// Noise-steered trajectories
    FlowField,
    /// Motif clusters on a coarse grid
    ModularMotif,
    /// Noise-thresholded grid
    OrganicDensity,
    /// Free scatter of scaled glyphs
    TypographicScatter,
}

impl ModeKind {
    /// All seven modes in declaration order
    pub const ALL: [Self; 7] = [
        Self::Trama,
        Self::Waves,
        Self::DuotoneGrid,
        Self::FlowField,
        Self::ModularMotif,
        Self::OrganicDensity,
        Self::TypographicScatter,
    ];

    /// Mode with its default configuration
    pub fn default_mode(self) -> Mode {
        ModeTable::default().mode(self)
    }

    /// Uniform draw over the seven modes
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.random_range(0..Self::ALL.len());
        Self::ALL.get(index).copied().unwrap_or(Self::Trama)
    }

    /// Stable snake-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trama => "trama",
            Self::Waves => "waves",
            Self::DuotoneGrid => "duotone_grid",
            Self::FlowField => "flow_field",
            Self::ModularMotif => "modular_motif",
            Self::OrganicDensity => "organic_density",
            Self::TypographicScatter => "typographic_scatter",
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-mode configuration consulted whenever a mode is chosen by kind
///
/// Random selection and the command-line `--mode` flag both read their
/// payload from here, so a configuration file can retune any mode without
/// fixing it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTable {
    /// Trama tunables
    pub trama: TramaConfig,
    /// Waves tunables
    pub waves: WaveConfig,
    /// Duotone grid tunables
    pub duotone_grid: DuotoneConfig,
    /// Flow field tunables
    pub flow_field: FlowConfig,
    /// Modular motif tunables
    pub modular_motif: MotifConfig,
    /// Organic density tunables
    pub organic_density: OrganicConfig,
    /// Typographic scatter tunables
    pub typographic_scatter: ScatterConfig,
}

impl ModeTable {
    /// Mode of the given kind carrying this table's payload
    pub fn mode(&self, kind: ModeKind) -> Mode {
        match kind {
            ModeKind::Trama => Mode::Trama(self.trama.clone()),
            ModeKind::Waves => Mode::Waves(self.waves.clone()),
            ModeKind::DuotoneGrid => Mode::DuotoneGrid(self.duotone_grid.clone()),
            ModeKind::FlowField => Mode::FlowField(self.flow_field.clone()),
            ModeKind::ModularMotif => Mode::ModularMotif(self.modular_motif.clone()),
            ModeKind::OrganicDensity => Mode::OrganicDensity(self.organic_density.clone()),
            ModeKind::TypographicScatter => Mode::TypographicScatter(self.typographic_scatter.clone()),
        }
    }

    /// Validate every entry
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error from the first bad payload
    pub fn validate(&self) -> Result<()> {
        ModeKind::ALL
            .into_iter()
            .try_for_each(|kind| self.mode(kind).validate())
    }
}

/// How the mode of a composition is chosen
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    /// Draw one of the seven modes uniformly, configured from the mode table
    #[default]
    Random,
    /// Always run this mode
    Fixed(Mode),
}

impl ModeSelection {
    /// Resolve to a concrete mode, drawing a kind from `rng` when random
    pub fn resolve<R: Rng + ?Sized>(&self, table: &ModeTable, rng: &mut R) -> Mode {
        match self {
            Self::Random => table.mode(ModeKind::random(rng)),
            Self::Fixed(mode) => mode.clone(),
        }
    }

    /// Fix the selection to `kind`
    ///
    /// A fixed payload of the same kind is kept; otherwise the payload comes
    /// from `table`.
    pub fn fix_kind(&mut self, kind: ModeKind, table: &ModeTable) {
        if !matches!(self, Self::Fixed(mode) if mode.kind() == kind) {
            *self = Self::Fixed(table.mode(kind));
        }
    }

    /// Validate a fixed mode; random selection draws from the separately validated table
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error from the fixed mode's payload
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Random => Ok(()),
            Self::Fixed(mode) => mode.validate(),
        }
    }
}
