//! Tests for closed-interval tunables and probability draws

#[cfg(test)]
mod tests {
    use glyphcompose::math::sampling::{Span, chance, gaussian, is_probability};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    // Tests that degenerate spans return their bound without consuming randomness
    // Verified by drawing from the rng unconditionally in Span::sample
    #[test]
    fn test_fixed_span_does_not_consume_randomness() {
        let mut drawn = StdRng::seed_from_u64(5);
        let mut untouched = StdRng::seed_from_u64(5);

        assert_eq!(Span::fixed(17_u32).sample(&mut drawn), 17);
        assert_eq!(Span::new(3.5, 3.5).sample(&mut drawn), 3.5);
        assert_eq!(drawn.next_u64(), untouched.next_u64());
    }

    // Tests that samples stay inside the closed interval
    // Verified by sampling from min..max+1
    #[test]
    fn test_sample_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let span = Span::new(-3_i64, 4);
        for _ in 0..500 {
            let value = span.sample(&mut rng);
            assert!(span.contains(value), "{value} escaped {span:?}");
        }

        let floats = Span::new(0.25, 0.5);
        for _ in 0..500 {
            let value = floats.sample(&mut rng);
            assert!((0.25..=0.5).contains(&value));
        }
    }

    // Tests the extreme probabilities behave as never and always
    // Verified by comparing with <= instead of < in chance
    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!((0..200).all(|_| !chance(&mut rng, 0.0)));
        assert!((0..200).all(|_| chance(&mut rng, 1.0)));
        assert!((0..200).all(|_| !chance(&mut rng, -0.5)));
    }

    // Tests that a mid-range probability fires roughly the expected share of draws
    #[test]
    fn test_chance_frequency() {
        let mut rng = StdRng::seed_from_u64(99);
        let hits = (0..10_000).filter(|_| chance(&mut rng, 0.25)).count();
        assert!((2_200..2_800).contains(&hits), "got {hits} hits");
    }

    // Tests span validation helpers used by configuration checks
    #[test]
    fn test_span_validation_helpers() {
        assert!(Span::new(1_u32, 4).is_positive());
        assert!(!Span::new(0_u32, 4).is_positive());
        assert!(!Span::new(5_u32, 4).is_positive());
        assert!(Span::new(-1.0, 1.0).is_ordered());
        assert!(!Span::new(1.0, -1.0).is_ordered());

        assert!(is_probability(0.0));
        assert!(is_probability(1.0));
        assert!(!is_probability(1.01));
        assert!(!is_probability(f64::NAN));
    }

    // Tests that gaussian draws center on the mean with the requested spread
    // Verified by dropping the radius term from the Box-Muller transform
    #[test]
    fn test_gaussian_moments() {
        let mut rng = StdRng::seed_from_u64(8);
        let draws: Vec<f64> = (0..4000).map(|_| gaussian(&mut rng, 10.0, 2.0)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let variance = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!((mean - 10.0).abs() < 0.2, "mean {mean}");
        assert!((variance.sqrt() - 2.0).abs() < 0.2, "deviation {}", variance.sqrt());
        assert!(draws.iter().all(|d| d.is_finite()));
    }
}
