//! Canvas-wide color passes that leave the alpha channel untouched
//!
//! Every pass works on an RGB copy of the canvas and writes the result back
//! only where the canvas alpha is non-zero. Alpha itself is never written, so
//! the coverage produced by placement survives any combination of effects.

use crate::color::enhance::{contrast_rgb, invert_rgb, posterize_rgb, saturation_rgb};
use crate::io::error::{Result, invalid_parameter};
use crate::math::sampling::{Span, chance, is_probability};
use crate::spatial::canvas::Canvas;
use image::imageops;
use image::{Rgb, RgbImage};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables of the global effect pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalEffects {
    /// Probability of inverting the color channels
    pub invert_probability: f64,
    /// Probability of a saturation boost
    pub saturation_probability: f64,
    /// Saturation factor
    pub saturation: Span<f64>,
    /// Probability of a contrast boost
    pub contrast_probability: f64,
    /// Contrast factor
    pub contrast: Span<f64>,
    /// Probability of a Gaussian blur
    pub blur_probability: f64,
    /// Blur sigma in pixels
    pub blur_sigma: Span<f64>,
}

impl Default for GlobalEffects {
    fn default() -> Self {
        Self {
            invert_probability: 0.22,
            saturation_probability: 0.35,
            saturation: Span::new(1.1, 1.8),
            contrast_probability: 0.35,
            contrast: Span::new(1.1, 1.7),
            blur_probability: 0.2,
            blur_sigma: Span::new(0.2, 0.9),
        }
    }
}

/// Which effects fired and with what parameters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AppliedEffects {
    /// Color channels were inverted
    pub inverted: bool,
    /// Saturation factor, when boosted
    pub saturation: Option<f64>,
    /// Contrast factor, when boosted
    pub contrast: Option<f64>,
    /// Blur sigma, when blurred
    pub blur: Option<f64>,
}

impl AppliedEffects {
    /// Whether any effect fired
    pub const fn any(&self) -> bool {
        self.inverted || self.saturation.is_some() || self.contrast.is_some() || self.blur.is_some()
    }
}

impl GlobalEffects {
    /// Pass that never fires
    pub fn disabled() -> Self {
        Self {
            invert_probability: 0.0,
            saturation_probability: 0.0,
            contrast_probability: 0.0,
            blur_probability: 0.0,
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
            ("effects.invert_probability", self.invert_probability),
            ("effects.saturation_probability", self.saturation_probability),
            ("effects.contrast_probability", self.contrast_probability),
            ("effects.blur_probability", self.blur_probability),
        ] {
            if !is_probability(p) {
                return Err(invalid_parameter(name, &p, &"must lie in [0, 1]"));
            }
        }
        validate_sigma("effects.blur_sigma", self.blur_sigma)
    }

    /// Run the pass: invert, saturation, contrast, blur, each independently
    pub fn apply(&self, canvas: &mut Canvas, rng: &mut dyn RngCore) -> AppliedEffects {
        let mut applied = AppliedEffects::default();
        let mut rgb = rgb_of(canvas);

        if chance(rng, self.invert_probability) {
            invert_rgb(&mut rgb);
            applied.inverted = true;
        }
        if chance(rng, self.saturation_probability) {
            let factor = self.saturation.sample(rng);
            saturation_rgb(&mut rgb, factor as f32);
            applied.saturation = Some(factor);
        }
        if chance(rng, self.contrast_probability) {
            let factor = self.contrast.sample(rng);
            contrast_rgb(&mut rgb, factor as f32);
            applied.contrast = Some(factor);
        }
        if chance(rng, self.blur_probability) {
            let sigma = self.blur_sigma.sample(rng);
            rgb = gaussian_blur(&rgb, sigma);
            applied.blur = Some(sigma);
        }

        if applied.any() {
            write_rgb(canvas, &rgb);
        }
        debug!(?applied, "global effects applied");
        applied
    }
}

/// RGB copy of the canvas color channels
fn rgb_of(canvas: &Canvas) -> RgbImage {
    let image = canvas.image();
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        Rgb([r, g, b])
    })
}

/// Write color channels back wherever the canvas is not fully transparent
fn write_rgb(canvas: &mut Canvas, rgb: &RgbImage) {
    for (x, y, pixel) in canvas.image_mut().enumerate_pixels_mut() {
        if pixel.0[3] == 0 {
            continue;
        }
        if let Some(source) = rgb.get_pixel_checked(x, y) {
            let [r, g, b] = source.0;
            pixel.0 = [r, g, b, pixel.0[3]];
        }
    }
}

/// Run an RGB transform over the canvas without touching alpha or transparent pixels
pub fn apply_rgb_preserving_alpha(canvas: &mut Canvas, transform: impl FnOnce(RgbImage) -> RgbImage) {
    let rgb = transform(rgb_of(canvas));
    write_rgb(canvas, &rgb);
}

/// Check a blur sigma range: finite, strictly positive once narrowed to `f32`, ordered
///
/// # Errors
///
/// Returns an invalid configuration error naming `parameter`
pub fn validate_sigma(parameter: &'static str, sigma: Span<f64>) -> Result<()> {
    if is_usable_sigma(sigma.min) && is_usable_sigma(sigma.max) && sigma.is_ordered() {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &format!("{sigma:?}"),
            &"sigma must be finite, positive and ordered",
        ))
    }
}

const fn is_usable_sigma(sigma: f64) -> bool {
    let narrowed = sigma as f32;
    narrowed.is_normal() && narrowed > 0.0
}

/// Gaussian blur that leaves the image untouched for unusable sigmas
pub fn gaussian_blur(rgb: &RgbImage, sigma: f64) -> RgbImage {
    if is_usable_sigma(sigma) {
        imageops::blur(rgb, sigma as f32)
    } else {
        debug!(sigma, "blur skipped, sigma unusable");
        rgb.clone()
    }
}

/// Gaussian blur of the color channels
pub fn blur_canvas(canvas: &mut Canvas, sigma: f64) {
    apply_rgb_preserving_alpha(canvas, |rgb| gaussian_blur(&rgb, sigma));
}

/// Keep `bits` significant bits per color channel
pub fn posterize_canvas(canvas: &mut Canvas, bits: u8) {
    apply_rgb_preserving_alpha(canvas, |mut rgb| {
        posterize_rgb(&mut rgb, bits);
        rgb
    });
}
