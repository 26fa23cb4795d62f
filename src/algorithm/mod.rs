/// Canvas-wide post-effects that preserve alpha
pub mod effects;
/// Composition orchestration: mode selection, placement and effects
pub mod executor;
/// Placement algorithms and mode selection
pub mod modes;
/// Modules and module sources
pub mod module;
/// Shared state and counters for placement algorithms
pub mod placement;
/// Overlays drawn onto single modules
pub mod texture;
/// Per-module randomized adjustment pipeline
pub mod transform;
