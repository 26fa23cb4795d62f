//! Tests for motif clusters

#[cfg(test)]
mod tests {
    use super::super::run_mode;
    use glyphcompose::algorithm::modes::{Mode, Motif, MotifConfig};
    use glyphcompose::math::sampling::Span;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    // Tests the cross and diagonal offset patterns
    // Verified by stepping one pixel at a time along the axis
    #[test]
    fn test_axis_offsets() {
        let diagonal = Motif::Diagonal.offsets(12, 0.4);
        assert_eq!(diagonal, vec![(-6, -6), (-3, -3), (0, 0), (3, 3), (6, 6)]);

        let cross = Motif::Cross.offsets(12, 0.4);
        assert_eq!(cross.len(), 10);
        assert!(cross.iter().all(|&(dx, dy)| dx == 0 || dy == 0));
        assert!(cross.contains(&(0, -6)) && cross.contains(&(6, 0)));

        let wide = Motif::Diagonal.offsets(60, 0.4);
        assert_eq!(wide.len(), 7);
        assert_eq!(wide.first(), Some(&(-30, -30)));
    }

    // Tests ring offsets sit on the circle with at least eight points
    #[test]
    fn test_ring_offsets() {
        let ring = Motif::Ring.offsets(12, 0.5);
        assert_eq!(ring.len(), 12);
        assert_eq!(ring.first(), Some(&(6, 0)));
        assert!(ring.iter().all(|&(dx, dy)| {
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            (5.0..=6.0).contains(&distance)
        }));

        assert_eq!(Motif::Ring.offsets(4, 0.3).len(), 8);
    }

    // Tests that random motifs reach all three patterns
    #[test]
    fn test_random_motif() {
        let mut rng = StdRng::seed_from_u64(6);
        let seen: HashSet<String> = (0..100)
            .map(|_| format!("{:?}", Motif::random(&mut rng)))
            .collect();
        assert_eq!(seen.len(), 3);
    }

    // Tests one base draw per coarse cell and one placement per offset
    // Verified by spacing the grid at one tile instead of two
    #[test]
    fn test_cluster_placement() {
        let config = MotifConfig {
            tile: Span::fixed(10),
            motif: Some(Motif::Diagonal),
            rotation_probability: 0.0,
            ..MotifConfig::default()
        };
        let (canvas, report) = run_mode(&Mode::ModularMotif(config), 100, 100, 1);

        assert_eq!(report.candidate_cells, 25);
        assert_eq!(report.populated_cells(), 25);
        assert_eq!(report.modules_drawn, 25);
        assert_eq!(report.modules_pasted + report.modules_clipped, 100);
        assert!(!canvas.is_blank());
    }

    // Tests that rotated sub-modules keep their corners instead of being cropped to the tile
    // Verified by cropping rotated sub-modules back to their unrotated size
    #[test]
    fn test_rotation_grows_sub_modules() {
        let config = MotifConfig {
            tile: Span::fixed(10),
            motif: Some(Motif::Diagonal),
            sub_size: Span::fixed(1.0),
            rotation_probability: 1.0,
            rotation: Span::fixed(45.0),
            ..MotifConfig::default()
        };
        let (canvas, report) = run_mode(&Mode::ModularMotif(config), 20, 20, 4);
        assert_eq!(report.modules_pasted, 4);

        // The last sub-module sits at (14, 14); a 10px crop would stop at x = 18
        let alpha = canvas.alpha_channel();
        assert_eq!(alpha.get(14 * 20 + 19).copied(), Some(255));
        assert_eq!(alpha.get(19).copied(), Some(0));
    }
}
