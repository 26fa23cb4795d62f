//! Factor-based tonal adjustments
//!
//! Each enhancement interpolates between a degenerate image and the input:
//! factor 1.0 is the identity, 0.0 is the degenerate image and values above
//! one extrapolate away from it.
//!
//! | Adjustment | Degenerate image |
//! |------------|------------------|
//! | contrast   | uniform gray at the mean luminance |
//! | brightness | black |
//! | saturation | the grayscale version of the input |

use image::{GrayImage, Luma, RgbImage};

/// ITU-R 601 luma of an RGB triple
pub fn luma_of(rgb: [u8; 3]) -> f32 {
    f32::from(rgb[0]).mul_add(
        0.299,
        f32::from(rgb[1]).mul_add(0.587, f32::from(rgb[2]) * 0.114),
    )
}

fn blend(degenerate: f32, value: u8, factor: f32) -> u8 {
    factor
        .mul_add(f32::from(value) - degenerate, degenerate)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn rounded_mean(sum: f64, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).round() as f32
    }
}

/// Scale contrast of a luminance tile around its mean level
pub fn contrast_gray(image: &mut GrayImage, factor: f32) {
    let sum: f64 = image.pixels().map(|p| f64::from(p.0[0])).sum();
    let mean = rounded_mean(sum, image.width() as usize * image.height() as usize);
    for pixel in image.pixels_mut() {
        *pixel = Luma([blend(mean, pixel.0[0], factor)]);
    }
}

/// Scale brightness of a luminance tile toward or away from black
pub fn brightness_gray(image: &mut GrayImage, factor: f32) {
    for pixel in image.pixels_mut() {
        *pixel = Luma([blend(0.0, pixel.0[0], factor)]);
    }
}

/// Binarize a luminance tile: strictly above `threshold` becomes 255, the rest 0
pub fn threshold_gray(image: &mut GrayImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { u8::MAX } else { 0 };
    }
}

/// Binarize at the midpoint, then map the halves to `dark` and `light`
pub fn two_level_gray(image: &mut GrayImage, dark: u8, light: u8) {
    for pixel in image.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > 128 { light } else { dark };
    }
}

/// Scale contrast of an RGB image around the mean luma
pub fn contrast_rgb(image: &mut RgbImage, factor: f32) {
    let sum: f64 = image.pixels().map(|p| f64::from(luma_of(p.0))).sum();
    let mean = rounded_mean(sum, image.width() as usize * image.height() as usize);
    for pixel in image.pixels_mut() {
        pixel.0 = pixel.0.map(|channel| blend(mean, channel, factor));
    }
}

/// Scale saturation of an RGB image relative to its own grayscale
pub fn saturation_rgb(image: &mut RgbImage, factor: f32) {
    for pixel in image.pixels_mut() {
        let gray = luma_of(pixel.0).round();
        pixel.0 = pixel.0.map(|channel| blend(gray, channel, factor));
    }
}

/// Invert the color channels of an RGB image
pub fn invert_rgb(image: &mut RgbImage) {
    image::imageops::invert(image);
}

/// Keep only the `bits` most significant bits of each channel
pub fn posterize_rgb(image: &mut RgbImage, bits: u8) {
    let bits = bits.clamp(1, 8);
    let keep = u8::MAX << (8 - bits);
    for pixel in image.pixels_mut() {
        pixel.0 = pixel.0.map(|channel| channel & keep);
    }
}
