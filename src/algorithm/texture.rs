//! Overlays drawn onto single modules
//!
//! Morse marks darken short dashes and dots on a luminance tile. Annex
//! textures are procedural patterns blended into a colorized module, so they
//! only show inside the glyph once the mask is applied.

use crate::math::sampling::{chance, gaussian};
use image::{GrayImage, Luma, RgbaImage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const DASH_LENGTH: RangeInclusive<u32> = 5..=30;
const DASH_THICKNESS: u32 = 2;
const DOT_DIAMETER: RangeInclusive<u32> = 2..=5;
const MARK_OPACITY: RangeInclusive<u8> = 80..=150;

const GRID_STEP: RangeInclusive<u32> = 6..=18;
const GRID_LEVEL: RangeInclusive<u8> = 100..=180;
const HATCH_PERIOD: RangeInclusive<u32> = 6..=12;
const HATCH_LEVEL: u8 = 180;

/// Procedural pattern blended into a module's color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Gaussian noise around mid gray
    Noise,
    /// Gray lines on a square lattice
    Grid,
    /// Diagonal hatching
    Hatch,
    /// Near-white grain
    Paper,
}

impl TextureKind {
    /// All texture kinds
    pub const ALL: [Self; 4] = [Self::Noise, Self::Grid, Self::Hatch, Self::Paper];

    /// Uniform draw over the four kinds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.random_range(0..Self::ALL.len());
        Self::ALL.get(index).copied().unwrap_or(Self::Paper)
    }

    /// Render the texture at `width × height`
    ///
    /// White pixels leave the color untouched when the texture is blended in.
    pub fn render<R: Rng + ?Sized>(self, width: u32, height: u32, rng: &mut R) -> GrayImage {
        match self {
            Self::Noise => GrayImage::from_fn(width, height, |_, _| {
                Luma([gaussian_level(&mut *rng, 128.0, 50.0)])
            }),
            Self::Grid => {
                let step = rng.random_range(GRID_STEP);
                GrayImage::from_fn(width, height, |x, y| {
                    if x % step == 0 || y % step == 0 {
                        Luma([rng.random_range(GRID_LEVEL)])
                    } else {
                        Luma([u8::MAX])
                    }
                })
            }
            Self::Hatch => {
                let period = rng.random_range(HATCH_PERIOD);
                GrayImage::from_fn(width, height, |x, y| {
                    Luma([if (x + y) % period == 0 { HATCH_LEVEL } else { u8::MAX }])
                })
            }
            Self::Paper => GrayImage::from_fn(width, height, |_, _| {
                Luma([gaussian_level(&mut *rng, 240.0, 10.0)])
            }),
        }
    }
}

fn gaussian_level<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> u8 {
    gaussian(rng, mean, std_dev).round().clamp(0.0, 255.0) as u8
}

/// Blend `texture` into the color channels of `color`
///
/// A texture level `t` keeps `t / 255` of the color and fills the rest with
/// the inverted level. Alpha is untouched.
pub fn underlay(color: &mut RgbaImage, texture: &GrayImage) {
    for (pixel, level) in color.pixels_mut().zip(texture.pixels()) {
        let keep = f32::from(level.0[0]) / 255.0;
        let shade = f32::from(u8::MAX - level.0[0]) * (1.0 - keep);
        for channel in pixel.0.iter_mut().take(3) {
            *channel = f32::from(*channel)
                .mul_add(keep, shade)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
    }
}

/// Darken `count` dashes and dots at random positions
///
/// Marks are collected on an overlay first, so where marks overlap the last
/// one drawn sets the opacity.
pub fn morse_marks<R: Rng + ?Sized>(tile: &mut GrayImage, count: u32, rng: &mut R) {
    let (width, height) = tile.dimensions();
    let mut overlay = GrayImage::new(width, height);
    for _ in 0..count {
        let origin = (rng.random_range(0..=width), rng.random_range(0..=height));
        let opacity = rng.random_range(MARK_OPACITY);
        if chance(rng, 0.5) {
            let length = rng.random_range(DASH_LENGTH);
            stamp(&mut overlay, origin, (length, DASH_THICKNESS), opacity, false);
        } else {
            let diameter = rng.random_range(DOT_DIAMETER);
            stamp(&mut overlay, origin, (diameter, diameter), opacity, true);
        }
    }

    for (pixel, mark) in tile.pixels_mut().zip(overlay.pixels()) {
        let keep = f32::from(u8::MAX - mark.0[0]) / 255.0;
        pixel.0[0] = (f32::from(pixel.0[0]) * keep).round() as u8;
    }
}

/// Fill the inclusive box `origin ..= origin + extent`, or the ellipse inscribed in it
fn stamp(overlay: &mut GrayImage, origin: (u32, u32), extent: (u32, u32), opacity: u8, round: bool) {
    let (x, y) = origin;
    let (w, h) = extent;
    let (rx, ry) = (f64::from(w + 1) / 2.0, f64::from(h + 1) / 2.0);
    for dy in 0..=h {
        for dx in 0..=w {
            if round {
                let nx = (f64::from(dx) + 0.5 - rx) / rx;
                let ny = (f64::from(dy) + 0.5 - ry) / ry;
                if nx.mul_add(nx, ny * ny) > 1.0 {
                    continue;
                }
            }
            if let Some(pixel) =
                overlay.get_pixel_mut_checked(x.saturating_add(dx), y.saturating_add(dy))
            {
                pixel.0[0] = opacity;
            }
        }
    }
}
