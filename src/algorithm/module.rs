//! Modules and the sources that supply them
//!
//! A [`Module`] is created fresh for every placement: a luminance tile plus its
//! colorized RGBA rendering. Geometric transforms are always applied to both
//! halves together so the mask derived from luminance keeps lining up with
//! the color.

use crate::algorithm::texture::underlay;
use crate::color::colorize::ColorPolicy;
use crate::spatial::geometry::{rotate_and_recrop, rotate_expand};
use crate::spatial::mask::Mask;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};
use rand::RngCore;

/// Supplies single-channel glyph tiles on demand
///
/// Implementations may fail by returning `None`; callers substitute a blank
/// tile and carry on.
pub trait ModuleSource {
    /// Produce the next tile, optionally biased toward a category
    fn next_module(&mut self, category: Option<&str>, rng: &mut dyn RngCore) -> Option<GrayImage>;
}

/// Source that never yields a tile, so every placement uses the blank fallback
#[derive(Clone, Copy, Debug, Default)]
pub struct BlankSource;

impl ModuleSource for BlankSource {
    fn next_module(&mut self, _category: Option<&str>, _rng: &mut dyn RngCore) -> Option<GrayImage> {
        None
    }
}

/// Adapter turning a closure into a [`ModuleSource`]
pub struct FnSource<F>(pub F);

impl<F> ModuleSource for FnSource<F>
where
    F: FnMut(&mut dyn RngCore) -> Option<GrayImage>,
{
    fn next_module(&mut self, _category: Option<&str>, rng: &mut dyn RngCore) -> Option<GrayImage> {
        (self.0)(rng)
    }
}

/// Uniform white square used when a source has nothing to offer
pub fn blank_tile(size: u32) -> GrayImage {
    GrayImage::from_pixel(size.max(1), size.max(1), Luma([u8::MAX]))
}

/// Resize a luminance tile to `size × size` with a Lanczos filter
pub fn resize_tile(tile: &GrayImage, size: u32) -> GrayImage {
    let size = size.max(1);
    if tile.dimensions() == (size, size) {
        return tile.clone();
    }
    imageops::resize(tile, size, size, FilterType::Lanczos3)
}

/// One transformed glyph ready to be composited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    luma: GrayImage,
    color: RgbaImage,
}

impl Module {
    /// Pair a luminance tile with its colorized rendering
    ///
    /// Both images are expected to share dimensions; compositing only uses
    /// their overlapping area.
    pub const fn new(luma: GrayImage, color: RgbaImage) -> Self {
        Self { luma, color }
    }

    /// Colorize a luminance tile under `policy`
    pub fn colorize(luma: GrayImage, policy: &ColorPolicy<'_>, rng: &mut dyn RngCore) -> Self {
        let color = policy.apply(&luma, rng);
        Self { luma, color }
    }

    /// Luminance tile
    pub const fn luma(&self) -> &GrayImage {
        &self.luma
    }

    /// Colorized tile
    pub const fn color(&self) -> &RgbaImage {
        &self.color
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.luma.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.luma.height()
    }

    /// Binary mask derived from the luminance
    pub fn mask(&self) -> Mask {
        Mask::from_luminance(&self.luma)
    }

    /// Rotate and crop back to `target × target` about the center
    #[must_use]
    pub fn rotate_and_recrop(&self, angle_degrees: f64, target: u32) -> Self {
        Self {
            luma: rotate_and_recrop(&self.luma, angle_degrees, target),
            color: rotate_and_recrop(&self.color, angle_degrees, target),
        }
    }

    /// Rotate, growing the tile to hold the whole rotated glyph
    #[must_use]
    pub fn rotate_expand(&self, angle_degrees: f64) -> Self {
        Self {
            luma: rotate_expand(&self.luma, angle_degrees),
            color: rotate_expand(&self.color, angle_degrees),
        }
    }

    /// Mirror left to right
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            luma: imageops::flip_horizontal(&self.luma),
            color: imageops::flip_horizontal(&self.color),
        }
    }

    /// Flip top to bottom
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            luma: imageops::flip_vertical(&self.luma),
            color: imageops::flip_vertical(&self.color),
        }
    }

    /// Blend a texture of the module's size into its color
    #[must_use]
    pub fn with_underlay(mut self, texture: &GrayImage) -> Self {
        underlay(&mut self.color, texture);
        self
    }

    /// Replace the color alpha with a uniform value
    ///
    /// The mask still bounds the painted area; this only lowers opacity inside it.
    #[must_use]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        for pixel in self.color.pixels_mut() {
            pixel.0[3] = alpha;
        }
        self
    }
}
