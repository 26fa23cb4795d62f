//! Tests for luminance colorization

#[cfg(test)]
mod tests {
    use glyphcompose::color::colorize::{ColorPolicy, WHITE, colorize};
    use glyphcompose::color::palette::DuotonePair;
    use image::{GrayImage, Luma, Rgb};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ramp() -> GrayImage {
        GrayImage::from_fn(3, 1, |x, _| Luma([[0, 128, 255][x as usize]]))
    }

    // Tests the endpoints and midpoint of the linear mapping
    // Verified by swapping dark and light in colorize
    #[test]
    fn test_colorize_maps_endpoints() {
        let colored = colorize(&ramp(), Rgb([10, 20, 30]), Rgb([210, 220, 230]));
        assert_eq!(colored.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(colored.get_pixel(2, 0).0, [210, 220, 230, 255]);
        assert_eq!(colored.get_pixel(1, 0).0, [110, 120, 130, 255]);
    }

    // Tests that colorization never produces transparency
    #[test]
    fn test_colorize_is_opaque() {
        let colored = colorize(&ramp(), Rgb([0, 0, 0]), Rgb([0, 0, 0]));
        assert!(colored.pixels().all(|p| p.0[3] == 255));
    }

    // Tests the duotone policy uses the pair's endpoints
    #[test]
    fn test_duotone_policy() {
        let pair = DuotonePair::new(Rgb([1, 2, 3]), Rgb([250, 251, 252]));
        let mut rng = StdRng::seed_from_u64(0);
        let colored = ColorPolicy::Duotone(pair).apply(&ramp(), &mut rng);
        assert_eq!(colored.get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(colored.get_pixel(2, 0).0, [250, 251, 252, 255]);
    }

    // Tests the palette policy maps dark pixels to a group color and light ones to white
    #[test]
    fn test_palette_policy_uses_group_and_white() {
        let group = [Rgb([40, 80, 120])];
        let mut rng = StdRng::seed_from_u64(3);
        let colored = ColorPolicy::Palette(&group).apply(&ramp(), &mut rng);
        assert_eq!(colored.get_pixel(0, 0).0, [40, 80, 120, 255]);
        assert_eq!(colored.get_pixel(2, 0).0, [WHITE.0[0], WHITE.0[1], WHITE.0[2], 255]);
    }

    // Tests that an empty group still colorizes with a random hue
    #[test]
    fn test_empty_palette_falls_back_to_random_hue() {
        let mut first = StdRng::seed_from_u64(8);
        let mut second = StdRng::seed_from_u64(8);
        let a = ColorPolicy::Palette(&[]).apply(&ramp(), &mut first);
        let b = ColorPolicy::Palette(&[]).apply(&ramp(), &mut second);
        assert_eq!(a, b);
        assert_eq!(a.get_pixel(2, 0).0, [255, 255, 255, 255]);
    }
}
