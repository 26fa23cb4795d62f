//! Luminance to RGBA colorization

use crate::color::palette::{DuotonePair, choose_color};
use image::{GrayImage, Rgb, Rgba, RgbaImage};
use rand::RngCore;

/// White endpoint used by the hue-on-white policies
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// How a module's luminance is turned into color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPolicy<'a> {
    /// Map luminance 0 to the dark color and 255 to the light color
    Duotone(DuotonePair),
    /// Map luminance 0 to a color picked from the group and 255 to white;
    /// an empty group picks a uniformly random hue instead
    Palette(&'a [Rgb<u8>]),
}

impl ColorPolicy<'_> {
    /// Colorize a luminance tile according to this policy
    pub fn apply(&self, luma: &GrayImage, rng: &mut dyn RngCore) -> RgbaImage {
        match self {
            Self::Duotone(pair) => colorize(luma, pair.dark, pair.light),
            Self::Palette(colors) => colorize(luma, choose_color(colors, rng), WHITE),
        }
    }
}

/// Linear two-color mapping of luminance, fully opaque
///
/// The output alpha is always 255; visibility is decided later by the
/// module's mask, never by colorization.
pub fn colorize(luma: &GrayImage, dark: Rgb<u8>, light: Rgb<u8>) -> RgbaImage {
    let lerp = |from: u8, to: u8, level: u8| {
        let t = f32::from(level) / 255.0;
        (t.mul_add(f32::from(to) - f32::from(from), f32::from(from)))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    RgbaImage::from_fn(luma.width(), luma.height(), |x, y| {
        let level = luma.get_pixel(x, y).0[0];
        Rgba([
            lerp(dark.0[0], light.0[0], level),
            lerp(dark.0[1], light.0[1], level),
            lerp(dark.0[2], light.0[2], level),
            u8::MAX,
        ])
    })
}
