//! Procedural poster compositions assembled from small grayscale glyph modules
//!
//! A composition places transformed and colorized modules onto a transparent
//! RGBA canvas using one of seven spatial distribution algorithms, then runs a
//! single alpha-preserving global effect pass over the result.

#![forbid(unsafe_code)]

/// Module transforms, placement algorithms, global effects and orchestration
pub mod algorithm;
/// Colors, palettes, colorization and tonal enhancements
pub mod color;
/// Input/output collaborators, configuration and error handling
pub mod io;
/// Noise field and randomized range sampling
pub mod math;
/// Canvas, masks, cell grids and geometric transforms
pub mod spatial;

pub use algorithm::executor::{Composer, ComposerConfig, Composition};
pub use algorithm::modes::{Mode, ModeKind, ModeSelection, ModeTable};
pub use io::error::{CompositionError, Result};
