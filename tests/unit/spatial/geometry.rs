//! Tests for rotation, cropping and row-shift transforms

#[cfg(test)]
mod tests {
    use glyphcompose::spatial::geometry::{
        center_crop, roll_row, rotate_and_recrop, rotate_expand, rotated_bounds,
    };
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use proptest::prelude::*;

    // Tests circular shifting in both directions
    // Verified by using rotate_left for positive shifts
    #[test]
    fn test_roll_row_wraps_both_ways() {
        let mut image = GrayImage::from_fn(4, 2, |x, y| Luma([(y * 10 + x) as u8]));
        roll_row(&mut image, 0, 1);
        let row0: Vec<u8> = (0..4).map(|x| image.get_pixel(x, 0).0[0]).collect();
        assert_eq!(row0, vec![3, 0, 1, 2]);

        roll_row(&mut image, 1, -5);
        let row1: Vec<u8> = (0..4).map(|x| image.get_pixel(x, 1).0[0]).collect();
        assert_eq!(row1, vec![11, 12, 13, 10]);
    }

    // Tests that rolling a row outside the image is a no-op
    #[test]
    fn test_roll_row_out_of_range() {
        let mut image = GrayImage::from_pixel(3, 3, Luma([9]));
        let before = image.clone();
        roll_row(&mut image, 7, 2);
        assert_eq!(image, before);
    }

    // Tests bounding sizes of rotated rectangles
    #[test]
    fn test_rotated_bounds() {
        assert_eq!(rotated_bounds(40, 20, 0.0), (40, 20));
        assert_eq!(rotated_bounds(40, 20, 90.0), (20, 40));
        assert_eq!(rotated_bounds(10, 10, 45.0), (14, 14));
    }

    // Tests that a quarter turn is counter-clockwise
    // Verified by negating the angle in rotate_expand
    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        let mut image = RgbaImage::new(4, 2);
        image.put_pixel(3, 0, Rgba([255, 0, 0, 255]));

        let rotated = rotate_expand(&image, 90.0);
        assert_eq!(rotated.dimensions(), (2, 4));
        assert_eq!(rotated.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(rotated.pixels().filter(|p| p.0[3] > 0).count(), 1);
    }

    // Tests that zero rotation is the identity
    #[test]
    fn test_zero_rotation_is_identity() {
        let image = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));
        assert_eq!(rotate_expand(&image, 0.0), image);
        assert_eq!(rotate_and_recrop(&GrayImage::from_pixel(6, 6, Luma([200])), 0.0, 6), GrayImage::from_pixel(6, 6, Luma([200])));
    }

    // Tests that cropping larger than the image pads with zeros around the center
    #[test]
    fn test_center_crop_pads() {
        let image = GrayImage::from_pixel(2, 2, Luma([255]));
        let cropped = center_crop(&image, 4, 4);
        assert_eq!(cropped.dimensions(), (4, 4));
        assert_eq!(cropped.get_pixel(0, 0).0, [0]);
        assert_eq!(cropped.get_pixel(1, 1).0, [255]);
        assert_eq!(cropped.get_pixel(2, 2).0, [255]);
        assert_eq!(cropped.get_pixel(3, 3).0, [0]);
    }

    proptest! {
        // Tests that rotate-then-recrop always returns exactly target × target
        #[test]
        fn prop_recrop_preserves_dimensions(size in 1_u32..48, angle in -360.0..360.0_f64) {
            let tile = GrayImage::from_pixel(size, size, Luma([255]));
            let rotated = rotate_and_recrop(&tile, angle, size);
            prop_assert_eq!(rotated.dimensions(), (size, size));
        }
    }
}
