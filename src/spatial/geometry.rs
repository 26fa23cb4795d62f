//! Geometric transforms on module tiles
//!
//! Rotations follow the usual raster-editor convention: positive angles turn
//! the image counter-clockwise on screen, sampling is nearest-neighbor and the
//! area uncovered by the source is left at zero (black, fully transparent).

use image::{GrayImage, ImageBuffer, Pixel};

type Buffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Circularly shift one row of a grayscale image
///
/// Positive shifts move pixels to the right and wrap around the left edge.
pub fn roll_row(image: &mut GrayImage, row: u32, shift: i64) {
    let width = image.width() as usize;
    if width == 0 {
        return;
    }
    let amount = shift.rem_euclid(width as i64) as usize;
    if let Some(pixels) = image.chunks_exact_mut(width).nth(row as usize) {
        pixels.rotate_right(amount);
    }
}

/// Bounding dimensions of a `width × height` image rotated by `angle_degrees`
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let (w, h) = (f64::from(width), f64::from(height));
    let bound_w = w.mul_add(cos.abs(), h * sin.abs()).round().max(1.0);
    let bound_h = w.mul_add(sin.abs(), h * cos.abs()).round().max(1.0);
    (bound_w as u32, bound_h as u32)
}

/// Rotate an image, growing the output so no source pixel is lost
pub fn rotate_expand<P: Pixel>(image: &Buffer<P>, angle_degrees: f64) -> Buffer<P> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }
    let (out_w, out_h) = rotated_bounds(width, height, angle_degrees);
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let (src_cx, src_cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let (dst_cx, dst_cy) = (f64::from(out_w) / 2.0, f64::from(out_h) / 2.0);

    let mut rotated = Buffer::<P>::new(out_w, out_h);
    for (x, y, pixel) in rotated.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;
        let sx = dx.mul_add(cos, -(dy * sin)) + src_cx;
        let sy = dx.mul_add(sin, dy * cos) + src_cy;
        if sx < 0.0 || sy < 0.0 {
            continue;
        }
        if let Some(source) = image.get_pixel_checked(sx.floor() as u32, sy.floor() as u32) {
            *pixel = *source;
        }
    }
    rotated
}

/// Crop a `width × height` window about the image center
///
/// Requested windows larger than the image are padded with zero pixels, so
/// the output always has exactly the requested dimensions.
pub fn center_crop<P: Pixel>(image: &Buffer<P>, width: u32, height: u32) -> Buffer<P> {
    let left = (i64::from(image.width()) - i64::from(width)).div_euclid(2);
    let top = (i64::from(image.height()) - i64::from(height)).div_euclid(2);

    let mut cropped = Buffer::<P>::new(width, height);
    for (x, y, pixel) in cropped.enumerate_pixels_mut() {
        let sx = left + i64::from(x);
        let sy = top + i64::from(y);
        if sx < 0 || sy < 0 {
            continue;
        }
        if let Some(source) = image.get_pixel_checked(sx as u32, sy as u32) {
            *pixel = *source;
        }
    }
    cropped
}

/// Rotate with expansion, then crop back to a `target × target` square about the center
///
/// This keeps downstream placement math identical for rotated and unrotated
/// modules: the result is always exactly `target × target`.
pub fn rotate_and_recrop<P: Pixel>(image: &Buffer<P>, angle_degrees: f64, target: u32) -> Buffer<P> {
    center_crop(&rotate_expand(image, angle_degrees), target, target)
}
