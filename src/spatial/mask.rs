//! Binary opacity masks derived from module luminance

use bitvec::bitvec;
use bitvec::vec::BitVec;
use image::{GrayImage, Luma};

/// Luminance strictly above this value is opaque
pub const MASK_THRESHOLD: u8 = 128;

/// Bit-packed opaque/transparent selector with the dimensions of its module
///
/// Built only from luminance, so colorizing a module can never change where
/// it is allowed to paint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl Mask {
    /// Threshold a luminance tile at [`MASK_THRESHOLD`]
    pub fn from_luminance(luma: &GrayImage) -> Self {
        let bits = luma.pixels().map(|p| p.0[0] > MASK_THRESHOLD).collect();
        Self {
            bits,
            width: luma.width(),
            height: luma.height(),
        }
    }

    /// Mask that is opaque everywhere
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![1; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Mask width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Test whether `(x, y)` is opaque; out-of-range coordinates are transparent
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Alpha value of the mask at `(x, y)`: 255 when opaque, otherwise 0
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if self.is_opaque(x, y) { u8::MAX } else { 0 }
    }

    /// Number of opaque pixels
    pub fn opaque_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Render the mask as a grayscale image of 0 and 255
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| Luma([self.alpha(x, y)]))
    }
}
