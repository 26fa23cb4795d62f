//! Spatial data structures and raster geometry
//!
//! This module contains:
//! - The compositing canvas and its physical size
//! - Binary luminance masks
//! - Cell lattices for grid-based placement
//! - Rotation, cropping and row-shift transforms

/// Fixed-size RGBA compositing surface
pub mod canvas;
/// Rotation, cropping and row-shift transforms
pub mod geometry;
/// Cell lattices with occupancy tracking
pub mod grid;
/// Bit-packed luminance masks
pub mod mask;

pub use canvas::{Canvas, CanvasSpec};
pub use grid::CellGrid;
pub use mask::Mask;
