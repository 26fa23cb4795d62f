//! Tests for noise-steered trajectories

#[cfg(test)]
mod tests {
    use super::super::run_mode;
    use glyphcompose::algorithm::modes::{FlowConfig, Mode};
    use glyphcompose::math::sampling::Span;

    fn small(seed: Option<u64>) -> FlowConfig {
        FlowConfig {
            tile: Span::fixed(12),
            trajectories: Span::fixed(3),
            steps: Span::fixed(4),
            seed,
            ..FlowConfig::default()
        }
    }

    // Tests that one module is stamped per step of every trajectory
    #[test]
    fn test_module_count() {
        let (_, report) = run_mode(&Mode::FlowField(small(Some(9))), 200, 200, 1);
        assert_eq!(report.modules_drawn, 12);
        assert_eq!(report.modules_pasted + report.modules_clipped, 12);
        assert!(report.grid.is_none());
    }

    // Tests that no trajectories means no placements
    #[test]
    fn test_no_trajectories() {
        let config = FlowConfig {
            trajectories: Span::fixed(0),
            ..small(None)
        };
        let (canvas, report) = run_mode(&Mode::FlowField(config), 100, 100, 2);
        assert!(canvas.is_blank());
        assert_eq!(report.modules_drawn, 0);
    }

    // Tests that the same seeds reproduce the same canvas
    #[test]
    fn test_reproducible() {
        let mode = Mode::FlowField(small(Some(4)));
        let (first, _) = run_mode(&mode, 150, 150, 3);
        let (second, _) = run_mode(&mode, 150, 150, 3);
        assert_eq!(first, second);
        assert!(!first.is_blank());
    }
}
