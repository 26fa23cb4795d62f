//! Per-module randomized adjustment pipeline
//!
//! Every drawn tile passes through the same sequence before it is placed:
//!
//! 1. Inversion of the luminance
//! 2. Row wave: each row rolled by `amplitude * sin(2π * row * frequency)`
//! 3. Row glitch: a handful of random rows rolled by random shifts
//! 4. Block quantization: nearest-neighbor down/up sampling then binarization
//! 5. Two-level posterize: binarization mapped onto a dark and a light level
//! 6. Morse marks: translucent dashes and dots
//! 7. Contrast and brightness jitter
//! 8. Lanczos resize to the placement size
//! 9. Colorization
//! 10. Annex texture blended into the color
//! 11. Optional rotation cropped back to the placement size
//!
//! Steps 1-6 and 10 fire independently with their own probabilities. Steps
//! 8-11 are driven by the placement algorithm through [`TransformPolicy::prepare`].

use crate::algorithm::module::{Module, ModuleSource, blank_tile, resize_tile};
use crate::algorithm::texture::{TextureKind, morse_marks};
use crate::color::colorize::ColorPolicy;
use crate::color::enhance::{brightness_gray, contrast_gray, threshold_gray, two_level_gray};
use crate::io::configuration::DEFAULT_MODULE_SIZE;
use crate::io::error::{Result, invalid_parameter};
use crate::math::sampling::{Span, chance, is_probability};
use crate::spatial::geometry::roll_row;
use image::GrayImage;
use image::imageops::{self, FilterType};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

/// Tunables of the module adjustment pipeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPolicy {
    /// Probability of inverting the tile
    pub invert_probability: f64,
    /// Probability of the sinusoidal row wave
    pub wave_probability: f64,
    /// Wave amplitude in pixels
    pub wave_amplitude: Span<u32>,
    /// Wave frequency in cycles per row
    pub wave_frequency: Span<f64>,
    /// Probability of the row glitch
    pub glitch_probability: f64,
    /// Number of glitched rows
    pub glitch_rows: Span<u32>,
    /// Horizontal shift applied to each glitched row
    pub glitch_shift: Span<i64>,
    /// Probability of block quantization
    pub halftone_probability: f64,
    /// Block edge length in pixels
    pub halftone_block: Span<u32>,
    /// Binarization threshold after quantization
    pub halftone_threshold: Span<u8>,
    /// Probability of the two-level posterize
    pub posterize_probability: f64,
    /// Level the dark half is mapped to
    pub posterize_dark: Span<u8>,
    /// Level the light half is mapped to
    pub posterize_light: Span<u8>,
    /// Probability of morse marks
    pub morse_probability: f64,
    /// Number of dashes and dots
    pub morse_marks: Span<u32>,
    /// Contrast factor
    pub contrast: Span<f64>,
    /// Brightness factor
    pub brightness: Span<f64>,
    /// Probability of blending an annex texture into the colorized module
    pub texture_probability: f64,
    /// Fixed texture; drawn per module when absent
    pub texture: Option<TextureKind>,
    /// Edge length of the blank tile substituted for missing modules
    pub default_module_size: u32,
}

impl Default for TransformPolicy {
    fn default() -> Self {
        Self {
            invert_probability: 0.4,
            wave_probability: 0.25,
            wave_amplitude: Span::new(4, 15),
            wave_frequency: Span::new(0.02, 0.08),
            glitch_probability: 0.18,
            glitch_rows: Span::new(4, 12),
            glitch_shift: Span::new(-18, 18),
            halftone_probability: 0.18,
            halftone_block: Span::new(3, 6),
            halftone_threshold: Span::new(100, 165),
            posterize_probability: 0.05,
            posterize_dark: Span::new(50, 199),
            posterize_light: Span::new(100, 254),
            morse_probability: 0.05,
            morse_marks: Span::new(50, 150),
            contrast: Span::new(0.85, 1.6),
            brightness: Span::new(0.85, 1.3),
            texture_probability: 0.4,
            texture: None,
            default_module_size: DEFAULT_MODULE_SIZE,
        }
    }
}

impl TransformPolicy {
    /// Policy that leaves modules untouched: no distortions, unit factors
    pub fn identity() -> Self {
        Self {
            invert_probability: 0.0,
            wave_probability: 0.0,
            glitch_probability: 0.0,
            halftone_probability: 0.0,
            posterize_probability: 0.0,
            morse_probability: 0.0,
            texture_probability: 0.0,
            contrast: Span::fixed(1.0),
            brightness: Span::fixed(1.0),
            ..Self::default()
        }
    }

    /// Check probabilities and ranges
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error naming the first bad tunable
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("transform.invert_probability", self.invert_probability),
            ("transform.wave_probability", self.wave_probability),
            ("transform.glitch_probability", self.glitch_probability),
            ("transform.halftone_probability", self.halftone_probability),
            ("transform.posterize_probability", self.posterize_probability),
            ("transform.morse_probability", self.morse_probability),
            ("transform.texture_probability", self.texture_probability),
        ] {
            if !is_probability(p) {
                return Err(invalid_parameter(name, &p, &"must lie in [0, 1]"));
            }
        }
        if !self.halftone_block.is_positive() {
            return Err(invalid_parameter(
                "transform.halftone_block",
                &format!("{:?}", self.halftone_block),
                &"block size must be positive",
            ));
        }
        if self.default_module_size == 0 {
            return Err(invalid_parameter(
                "transform.default_module_size",
                &self.default_module_size,
                &"must be positive",
            ));
        }
        Ok(())
    }

    /// Pull a tile from the source, substituting a blank tile when it has none
    ///
    /// The boolean is `true` when the substitution happened.
    pub fn draw_tile(
        &self,
        source: &mut dyn ModuleSource,
        rng: &mut dyn RngCore,
    ) -> (GrayImage, bool) {
        match source.next_module(None, rng) {
            Some(tile) if tile.width() > 0 && tile.height() > 0 => (tile, false),
            _ => {
                debug!(size = self.default_module_size, "module unavailable, using blank tile");
                (blank_tile(self.default_module_size), true)
            }
        }
    }

    /// Apply the randomized luminance adjustments (pipeline steps 1-7)
    pub fn adjust_luminance(&self, mut tile: GrayImage, rng: &mut dyn RngCore) -> GrayImage {
        if chance(rng, self.invert_probability) {
            imageops::invert(&mut tile);
        }
        if chance(rng, self.wave_probability) {
            let amplitude = f64::from(self.wave_amplitude.sample(rng));
            let frequency = self.wave_frequency.sample(rng);
            wave_rows(&mut tile, amplitude, frequency);
        }
        if chance(rng, self.glitch_probability) {
            let rows = self.glitch_rows.sample(rng);
            glitch_rows(&mut tile, rows, self.glitch_shift, rng);
        }
        if chance(rng, self.halftone_probability) {
            let block = self.halftone_block.sample(rng);
            let threshold = self.halftone_threshold.sample(rng);
            tile = block_quantize(&tile, block, threshold);
        }
        if chance(rng, self.posterize_probability) {
            let dark = self.posterize_dark.sample(rng);
            let light = self.posterize_light.sample(rng);
            two_level_gray(&mut tile, dark, light);
        }
        if chance(rng, self.morse_probability) {
            let marks = self.morse_marks.sample(rng);
            morse_marks(&mut tile, marks, rng);
        }
        contrast_gray(&mut tile, self.contrast.sample(rng) as f32);
        brightness_gray(&mut tile, self.brightness.sample(rng) as f32);
        tile
    }

    /// Resize, colorize, texture and optionally rotate an adjusted tile (pipeline steps 8-11)
    ///
    /// Rotation is cropped back to `size × size`, so the returned module always
    /// has the requested dimensions.
    pub fn prepare(
        &self,
        adjusted: &GrayImage,
        size: u32,
        rotation: Option<f64>,
        policy: &ColorPolicy<'_>,
        rng: &mut dyn RngCore,
    ) -> Module {
        let size = size.max(1);
        let mut module = Module::colorize(resize_tile(adjusted, size), policy, rng);
        if chance(rng, self.texture_probability) {
            let kind = match self.texture {
                Some(kind) => kind,
                None => TextureKind::random(rng),
            };
            let texture = kind.render(module.width(), module.height(), rng);
            module = module.with_underlay(&texture);
        }
        match rotation {
            Some(angle) => module.rotate_and_recrop(angle, size),
            None => module,
        }
    }
}

/// Roll every row by `amplitude * sin(2π * row * frequency)` pixels
pub fn wave_rows(tile: &mut GrayImage, amplitude: f64, frequency: f64) {
    for row in 0..tile.height() {
        let shift = amplitude * (TAU * f64::from(row) * frequency).sin();
        roll_row(tile, row, shift.trunc() as i64);
    }
}

/// Roll `count` randomly chosen rows by independent shifts drawn from `shift`
pub fn glitch_rows<R: Rng + ?Sized>(tile: &mut GrayImage, count: u32, shift: Span<i64>, rng: &mut R) {
    let height = tile.height();
    if height == 0 {
        return;
    }
    for _ in 0..count {
        let row = rng.random_range(0..height);
        let amount = shift.sample(rng);
        roll_row(tile, row, amount);
    }
}

/// Nearest-neighbor down/up sampling by `block`, then binarization at `threshold`
///
/// The result is a whole number of blocks on each axis, at least one block.
pub fn block_quantize(tile: &GrayImage, block: u32, threshold: u8) -> GrayImage {
    let block = block.max(1);
    let small_w = (tile.width() / block).max(1);
    let small_h = (tile.height() / block).max(1);
    let small = imageops::resize(tile, small_w, small_h, FilterType::Nearest);
    let mut quantized = imageops::resize(&small, small_w * block, small_h * block, FilterType::Nearest);
    threshold_gray(&mut quantized, threshold);
    quantized
}
