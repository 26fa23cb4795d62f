//! Composition constants and runtime configuration defaults

use crate::algorithm::executor::ComposerConfig;
use crate::io::error::{CompositionError, Result, WithPath};
use std::path::Path;

// Physical canvas: 15 x 19.5 cm poster at print resolution
/// Default canvas width in centimeters
pub const DEFAULT_WIDTH_CM: f64 = 15.0;
/// Default canvas height in centimeters
pub const DEFAULT_HEIGHT_CM: f64 = 19.5;
/// Default resolution in dots per inch
pub const DEFAULT_DPI: u32 = 300;

// Module sizes
/// Edge length of blank substitute tiles and of unscaled scatter modules
pub const DEFAULT_MODULE_SIZE: u32 = 64;
/// Smallest module edge length the typographic scatter produces
pub const MIN_SCATTER_SIZE: u32 = 8;

// Palette extraction sampling
/// Images sampled per category directory
pub const PALETTE_IMAGES_PER_CATEGORY: usize = 5;
/// Edge length images are reduced to before sampling
pub const PALETTE_THUMBNAIL_SIZE: u32 = 32;
/// Pixels sampled per thumbnail
pub const PALETTE_SAMPLES_PER_IMAGE: usize = 12;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible batches
pub const DEFAULT_SEED: u64 = 42;
/// Compositions rendered per run
pub const DEFAULT_COMPOSITIONS: usize = 10;

// Output settings
/// Prefix of numbered output files
pub const OUTPUT_PREFIX: &str = "composition_";
/// Extension of output files
pub const OUTPUT_EXTENSION: &str = "png";
/// Digits used for the output sequence number
pub const OUTPUT_NUMBER_WIDTH: usize = 3;

/// Read a JSON configuration file; missing fields keep their defaults
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The contents are not a valid configuration document
pub fn load_config(path: &Path) -> Result<ComposerConfig> {
    let text = std::fs::read_to_string(path).with_path(path, "read configuration")?;
    serde_json::from_str(&text).map_err(|source| CompositionError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
