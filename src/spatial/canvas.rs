//! Fixed-size RGBA compositing surface
//!
//! The canvas starts fully transparent and is only ever changed by masked
//! pastes and by the alpha-preserving effect passes. Its dimensions never
//! change after creation.

use crate::algorithm::module::Module;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::mask::Mask;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Centimeters per inch, used to turn physical sizes into pixels
pub const CM_PER_INCH: f64 = 2.54;

/// Physical canvas size and print resolution
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Width in centimeters
    pub width_cm: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Resolution in dots per inch
    pub dpi: u32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width_cm: crate::io::configuration::DEFAULT_WIDTH_CM,
            height_cm: crate::io::configuration::DEFAULT_HEIGHT_CM,
            dpi: crate::io::configuration::DEFAULT_DPI,
        }
    }
}

impl CanvasSpec {
    /// Pixel dimensions, truncating `cm / 2.54 * dpi` on each axis
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        let to_px = |cm: f64| {
            let px = (cm / CM_PER_INCH * f64::from(self.dpi)).floor();
            if px.is_finite() && px > 0.0 { px as u32 } else { 0 }
        };
        (to_px(self.width_cm), to_px(self.height_cm))
    }

    /// Check that the physical size resolves to a non-empty pixel area
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error when either pixel dimension is zero
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.pixel_dimensions();
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{} cm @ {} dpi", self.width_cm, self.height_cm, self.dpi),
                &"canvas must resolve to at least one pixel on each axis",
            ));
        }
        Ok(())
    }
}

/// Transparent RGBA buffer that modules are composited onto
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{width}x{height}"),
                &"canvas dimensions must be positive",
            ));
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    /// Create a canvas sized from a physical spec
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the physical size resolves to zero pixels
    pub fn from_spec(spec: &CanvasSpec) -> Result<Self> {
        spec.validate()?;
        let (width, height) = spec.pixel_dimensions();
        Self::new(width, height)
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying buffer
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Mutable access for effect passes; dimensions cannot change through it
    pub(crate) const fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Consume the canvas and hand the buffer to an exporter
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Copy of the alpha channel in row-major order
    pub fn alpha_channel(&self) -> Vec<u8> {
        self.image.pixels().map(|p| p.0[3]).collect()
    }

    /// Whether every pixel is `(0, 0, 0, 0)`
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0 == [0, 0, 0, 0])
    }

    /// Composite a module at the given top-left offset using its own mask
    pub fn paste_module(&mut self, module: &Module, x: i64, y: i64) -> bool {
        self.paste(module.color(), &module.mask(), x, y)
    }

    /// Straight-alpha "over" composite of `tile` at `(x, y)`
    ///
    /// Effective source alpha is the smaller of the mask and the tile's own
    /// alpha, so nothing is ever painted where the mask is transparent. Parts
    /// of the tile outside the canvas are clipped. Returns `false` when the
    /// tile lies entirely outside the canvas and nothing was touched.
    pub fn paste(&mut self, tile: &RgbaImage, mask: &Mask, x: i64, y: i64) -> bool {
        let tile_w = tile.width().min(mask.width());
        let tile_h = tile.height().min(mask.height());

        let left = x.max(0);
        let top = y.max(0);
        let right = (x + i64::from(tile_w)).min(i64::from(self.width()));
        let bottom = (y + i64::from(tile_h)).min(i64::from(self.height()));
        if left >= right || top >= bottom {
            return false;
        }

        for cy in top..bottom {
            for cx in left..right {
                let (tx, ty) = ((cx - x) as u32, (cy - y) as u32);
                let Some(source) = tile.get_pixel_checked(tx, ty) else {
                    continue;
                };
                let alpha = mask.alpha(tx, ty).min(source.0[3]);
                if alpha == 0 {
                    continue;
                }
                if let Some(target) = self.image.get_pixel_mut_checked(cx as u32, cy as u32) {
                    *target = blend_over(*target, *source, alpha);
                }
            }
        }
        true
    }
}

/// Composite `source` with effective alpha `alpha` over `target`
fn blend_over(target: Rgba<u8>, source: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    if alpha == u8::MAX {
        return Rgba([source.0[0], source.0[1], source.0[2], u8::MAX]);
    }
    let src_a = f32::from(alpha) / 255.0;
    let dst_a = f32::from(target.0[3]) / 255.0;
    let out_a = dst_a.mul_add(1.0 - src_a, src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let value = f32::from(s).mul_add(src_a, f32::from(d) * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(source.0[0], target.0[0]),
        channel(source.0[1], target.0[1]),
        channel(source.0[2], target.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
