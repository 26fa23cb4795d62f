//! Color handling for modules and canvases

/// Luminance to RGBA colorization policies
pub mod colorize;
/// Factor-based contrast, brightness and saturation adjustments
pub mod enhance;
/// Category palettes and duotone pairs
pub mod palette;

pub use colorize::ColorPolicy;
pub use palette::{DuotonePair, Palette, PaletteProvider};
