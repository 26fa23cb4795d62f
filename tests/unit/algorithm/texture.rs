//! Tests for module overlays

#[cfg(test)]
mod tests {
    use glyphcompose::algorithm::texture::{TextureKind, morse_marks, underlay};
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn mean(image: &GrayImage) -> f64 {
        let sum: f64 = image.pixels().map(|p| f64::from(p.0[0])).sum();
        sum / f64::from(image.width() * image.height())
    }

    // Tests that every kind is reachable from the random draw
    #[test]
    fn test_random_texture() {
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<String> = (0..100)
            .map(|_| format!("{:?}", TextureKind::random(&mut rng)))
            .collect();
        assert_eq!(seen.len(), 4);
    }

    // Tests the levels each texture renders
    // Verified by drawing the hatch period per pixel instead of per texture
    #[test]
    fn test_texture_levels() {
        let mut rng = StdRng::seed_from_u64(2);

        let hatch = TextureKind::Hatch.render(40, 40, &mut rng);
        assert_eq!(hatch.get_pixel(0, 0).0, [180]);
        assert!(hatch.pixels().all(|p| p.0[0] == 180 || p.0[0] == 255));
        let period = (1..40).find(|&x| hatch.get_pixel(x, 0).0 == [180]).unwrap_or(0);
        assert!((6..=12).contains(&period));
        assert!((0..40 - period).all(|x| hatch.get_pixel(x + period, 1).0 == hatch.get_pixel(x, 1).0));

        let grid = TextureKind::Grid.render(40, 40, &mut rng);
        assert!((100..=180).contains(&grid.get_pixel(0, 7).0[0]));
        assert_eq!(grid.get_pixel(1, 1).0, [255]);

        let paper = TextureKind::Paper.render(40, 40, &mut rng);
        assert!((235.0..245.0).contains(&mean(&paper)));

        let noise = TextureKind::Noise.render(40, 40, &mut rng);
        assert!((118.0..138.0).contains(&mean(&noise)));
        assert_eq!(noise.dimensions(), (40, 40));
    }

    // Tests the underlay blend at white, black and mid-gray texture levels
    #[test]
    fn test_underlay() {
        let mut color = RgbaImage::from_pixel(3, 1, Rgba([0, 100, 200, 77]));
        let texture = GrayImage::from_fn(3, 1, |x, _| Luma([[255, 0, 128][x as usize]]));
        underlay(&mut color, &texture);

        assert_eq!(color.get_pixel(0, 0).0, [0, 100, 200, 77]);
        assert_eq!(color.get_pixel(1, 0).0, [255, 255, 255, 77]);
        assert_eq!(color.get_pixel(2, 0).0[0], 63);
        assert_eq!(color.get_pixel(2, 0).0[3], 77);
    }

    // Tests that marks darken by their opacity without stacking
    // Verified by darkening the tile once per mark
    #[test]
    fn test_morse_marks() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut untouched = GrayImage::from_pixel(30, 30, Luma([255]));
        morse_marks(&mut untouched, 0, &mut rng);
        assert!(untouched.pixels().all(|p| p.0[0] == 255));

        let mut marked = GrayImage::from_pixel(30, 30, Luma([255]));
        morse_marks(&mut marked, 200, &mut rng);
        let darkened = marked.pixels().filter(|p| p.0[0] < 255).count();
        assert!(darkened > 0);
        assert!(marked.pixels().all(|p| p.0[0] == 255 || (105..=175).contains(&p.0[0])));

        let mut black = GrayImage::new(10, 10);
        morse_marks(&mut black, 50, &mut rng);
        assert!(black.pixels().all(|p| p.0[0] == 0));
    }
}
