//! Tests for the duotone grid

#[cfg(test)]
mod tests {
    use super::super::run_mode;
    use glyphcompose::algorithm::modes::{DuotoneConfig, Mode};
    use glyphcompose::math::sampling::Span;

    fn full_density() -> DuotoneConfig {
        DuotoneConfig {
            tile: Span::fixed(100),
            density: Span::fixed(1.0),
            mirror_probability: 0.0,
            flip_probability: 0.0,
            rotation_probability: 0.0,
            colors: Some([[0, 0, 0], [10, 200, 30]]),
            ..DuotoneConfig::default()
        }
    }

    // Tests that full density populates every cell with opaque modules
    #[test]
    fn test_full_density_fills_grid() {
        let (canvas, report) = run_mode(&Mode::DuotoneGrid(full_density()), 300, 300, 1);

        assert_eq!(report.candidate_cells, 9);
        assert_eq!(report.populated_cells(), 9);
        assert_eq!(report.modules_drawn, 1);
        assert!(canvas.alpha_channel().iter().all(|&a| a == 255));

        let center = canvas.image().get_pixel(150, 150).0;
        assert!(center[1] > 190 && center[0] < 20, "{center:?}");
    }

    // Tests that zero density leaves every candidate empty
    // Verified by skipping the density check for the first cell
    #[test]
    fn test_zero_density_leaves_grid_empty() {
        let config = DuotoneConfig {
            density: Span::fixed(0.0),
            ..full_density()
        };
        let (canvas, report) = run_mode(&Mode::DuotoneGrid(config), 300, 300, 2);

        assert_eq!(report.candidate_cells, 9);
        assert_eq!(report.populated_cells(), 0);
        assert!(canvas.is_blank());
    }

    // Tests that a canvas smaller than one tile has no candidates
    #[test]
    fn test_canvas_smaller_than_tile() {
        let (canvas, report) = run_mode(&Mode::DuotoneGrid(full_density()), 99, 300, 3);
        assert_eq!(report.candidate_cells, 0);
        assert!(canvas.is_blank());
    }

    // Tests that transforms keep modules inside their cell
    #[test]
    fn test_transformed_modules_stay_in_cells() {
        let config = DuotoneConfig {
            tile: Span::fixed(20),
            mirror_probability: 1.0,
            flip_probability: 1.0,
            rotation_probability: 1.0,
            ..full_density()
        };
        let (canvas, report) = run_mode(&Mode::DuotoneGrid(config), 45, 45, 4);

        assert_eq!(report.populated_cells(), 4);
        let strays = canvas
            .image()
            .enumerate_pixels()
            .filter(|(x, y, p)| (*x >= 40 || *y >= 40) && p.0[3] > 0)
            .count();
        assert_eq!(strays, 0);
    }
}
