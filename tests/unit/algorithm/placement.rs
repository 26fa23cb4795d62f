//! Tests for the placement context

#[cfg(test)]
mod tests {
    use glyphcompose::algorithm::module::{BlankSource, Module};
    use glyphcompose::algorithm::placement::{PlacementContext, PlacementReport};
    use glyphcompose::algorithm::transform::TransformPolicy;
    use glyphcompose::math::sampling::Span;
    use glyphcompose::spatial::canvas::Canvas;
    use glyphcompose::spatial::grid::CellGrid;
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn opaque_module(size: u32) -> Module {
        Module::new(
            GrayImage::from_pixel(size, size, Luma([255])),
            RgbaImage::from_pixel(size, size, Rgba([30, 60, 90, 255])),
        )
    }

    // Tests that drawing through the context updates the counters
    #[test]
    fn test_adjusted_tile_counts_draws() {
        let mut canvas = Canvas::new(20, 20).expect("valid canvas");
        let mut rng = StdRng::seed_from_u64(1);
        let mut source = BlankSource;
        let transform = TransformPolicy::identity();
        let mut ctx = PlacementContext::new(&mut canvas, &mut rng, &mut source, &[], &transform);

        let tile = ctx.adjusted_tile();
        let _ = ctx.adjusted_tile();
        assert_eq!(tile.dimensions(), (64, 64));
        assert_eq!(ctx.report.modules_drawn, 2);
        assert_eq!(ctx.report.blank_substitutions, 2);

        let module = ctx.palette_module(8, Some(15.0));
        assert_eq!((module.width(), module.height()), (8, 8));
        assert_eq!(ctx.report.modules_drawn, 3);
    }

    // Tests pasted and clipped counters
    // Verified by counting clipped placements as pasted
    #[test]
    fn test_paste_counters() {
        let mut canvas = Canvas::new(20, 20).expect("valid canvas");
        let mut rng = StdRng::seed_from_u64(2);
        let mut source = BlankSource;
        let transform = TransformPolicy::identity();
        let mut ctx = PlacementContext::new(&mut canvas, &mut rng, &mut source, &[], &transform);

        let module = opaque_module(4);
        assert!(ctx.paste(&module, 0, 0));
        assert!(!ctx.paste(&module, 40, 40));
        assert!(!ctx.paste(&module, -4, 0));
        assert_eq!(ctx.report.modules_pasted, 1);
        assert_eq!(ctx.report.modules_clipped, 2);
    }

    // Tests that centered pastes put the module's center on the point
    #[test]
    fn test_paste_centered() {
        let mut canvas = Canvas::new(10, 10).expect("valid canvas");
        let mut rng = StdRng::seed_from_u64(3);
        let mut source = BlankSource;
        let transform = TransformPolicy::identity();
        {
            let mut ctx = PlacementContext::new(&mut canvas, &mut rng, &mut source, &[], &transform);
            assert!(ctx.paste_centered(&opaque_module(4), 5, 5));
        }
        assert_eq!(canvas.image().get_pixel(3, 3).0, [30, 60, 90, 255]);
        assert_eq!(canvas.image().get_pixel(6, 6).0, [30, 60, 90, 255]);
        assert_eq!(canvas.image().get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!(canvas.image().get_pixel(7, 7).0, [0, 0, 0, 0]);
    }

    // Tests optional rotations at the probability extremes
    #[test]
    fn test_maybe_rotation() {
        let mut canvas = Canvas::new(1, 1).expect("valid canvas");
        let mut rng = StdRng::seed_from_u64(4);
        let mut source = BlankSource;
        let transform = TransformPolicy::identity();
        let mut ctx = PlacementContext::new(&mut canvas, &mut rng, &mut source, &[], &transform);

        assert_eq!(ctx.maybe_rotation(0.0, Span::new(-10.0, 10.0)), None);
        let angle = ctx.maybe_rotation(1.0, Span::new(-10.0, 10.0)).expect("always rotates");
        assert!((-10.0..=10.0).contains(&angle));
        assert!((ctx.width() - 1.0).abs() < f64::EPSILON);
    }

    // Tests populated cell counts on reports
    #[test]
    fn test_report_populated_cells() {
        let mut report = PlacementReport::default();
        assert_eq!(report.populated_cells(), 0);

        let mut grid = CellGrid::over(30, 30, 10);
        grid.mark(0, 0);
        grid.mark(2, 1);
        report.grid = Some(grid);
        assert_eq!(report.populated_cells(), 2);
    }
}
