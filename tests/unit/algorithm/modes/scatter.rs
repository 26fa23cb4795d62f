//! Tests for the typographic scatter

#[cfg(test)]
mod tests {
    use super::super::run_mode;
    use glyphcompose::algorithm::modes::{Mode, ScatterConfig};
    use glyphcompose::math::sampling::Span;

    fn quiet() -> ScatterConfig {
        ScatterConfig {
            base_scale: Span::fixed(0.1),
            scale_variation: Span::fixed(1.0),
            base_size: 10,
            rotation_probability: 0.0,
            blur_probability: 0.0,
            posterize_probability: 0.0,
            colors: Some([[0, 0, 0], [255, 255, 255]]),
            ..ScatterConfig::default()
        }
    }

    // Tests that an empty scatter leaves the canvas blank even with closing filters
    #[test]
    fn test_zero_count_stays_blank() {
        let config = ScatterConfig {
            count: Span::fixed(0),
            blur_probability: 1.0,
            posterize_probability: 1.0,
            ..quiet()
        };
        let (canvas, report) = run_mode(&Mode::TypographicScatter(config), 80, 80, 1);
        assert!(canvas.is_blank());
        assert_eq!(report.modules_drawn, 0);
    }

    // Tests the minimum module size and uniform translucency
    // Verified by painting with the mask alpha instead of the module alpha
    #[test]
    fn test_small_translucent_module() {
        let config = ScatterConfig {
            count: Span::fixed(1),
            alpha: Span::fixed(100),
            ..quiet()
        };
        let (canvas, report) = run_mode(&Mode::TypographicScatter(config), 80, 80, 2);

        assert_eq!(report.modules_drawn, 1);
        assert_eq!(report.modules_pasted, 1);
        let alpha = canvas.alpha_channel();
        assert!(alpha.iter().all(|&a| a == 0 || a == 100));
        let painted = alpha.iter().filter(|&&a| a == 100).count();
        assert!(painted > 0 && painted <= 64, "painted {painted}");
    }

    // Tests that placements always overlap the canvas
    #[test]
    fn test_placements_touch_canvas() {
        let config = ScatterConfig {
            count: Span::fixed(40),
            rotation_probability: 0.5,
            ..quiet()
        };
        let (_, report) = run_mode(&Mode::TypographicScatter(config), 60, 60, 3);
        assert_eq!(report.modules_drawn, 40);
        assert_eq!(report.modules_pasted, 40);
    }
}
