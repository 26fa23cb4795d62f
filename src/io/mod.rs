//! Input/output collaborators around the composition core
//!
//! This module contains:
//! - Error types shared by the whole crate
//! - Compile-time defaults and JSON configuration loading
//! - Directory-backed module source and palette extraction
//! - Numbered PNG export, progress display, logging and the CLI

/// Command-line interface and batch runner
pub mod cli;
/// Constants and configuration file loading
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Numbered PNG export with DPI metadata
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Per-category palette extraction from the module tree
pub mod palette;
/// Progress bars for batch rendering
pub mod progress;
/// Module tiles read from the module tree
pub mod source;
