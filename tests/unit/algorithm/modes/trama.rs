//! Tests for the sheared trama grid

#[cfg(test)]
mod tests {
    use super::super::run_mode;
    use glyphcompose::algorithm::modes::{Mode, TramaConfig};
    use glyphcompose::math::sampling::Span;

    fn straight(tile: u32) -> TramaConfig {
        TramaConfig {
            tile: Span::fixed(tile),
            rotation: Span::fixed(0.0),
            skew: Span::fixed(0.0),
            jitter_ratio: 0.0,
            fresh_module_probability: 0.0,
            local_rotation_probability: 0.0,
            ..TramaConfig::default()
        }
    }

    // Tests that an unrotated, unsheared lattice tiles the canvas exactly
    // Verified by offsetting odd rows by half a tile
    #[test]
    fn test_straight_lattice_covers_canvas() {
        let (canvas, report) = run_mode(&Mode::Trama(straight(20)), 100, 60, 1);

        assert_eq!(report.candidate_cells, 15);
        assert_eq!(report.populated_cells(), 15);
        assert_eq!(report.modules_pasted, 15);
        assert_eq!(report.modules_drawn, 1);
        assert!(canvas.alpha_channel().iter().all(|&a| a == 255));
    }

    // Tests that fresh modules are drawn per cell when forced
    #[test]
    fn test_fresh_modules() {
        let config = TramaConfig {
            fresh_module_probability: 1.0,
            ..straight(25)
        };
        let (_, report) = run_mode(&Mode::Trama(config), 100, 100, 2);
        assert_eq!(report.modules_drawn, 17);
    }

    // Tests that every candidate cell is emitted under rotation and shear
    #[test]
    fn test_every_cell_is_emitted() {
        let config = TramaConfig {
            tile: Span::fixed(10),
            ..TramaConfig::default()
        };
        let (canvas, report) = run_mode(&Mode::Trama(config), 80, 50, 3);
        assert_eq!(report.candidate_cells, 40);
        assert_eq!(report.populated_cells(), 40);
        assert_eq!(report.modules_pasted + report.modules_clipped, 40);
        assert!(!canvas.is_blank());
    }
}
