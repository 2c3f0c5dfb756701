//! Uniform noise shared by the synthesizers.

use rand::Rng;

/// Uniform noise centred on zero covering `span` in total, i.e. `[-span/2, span/2)`.
pub fn centered<R: Rng + ?Sized>(rng: &mut R, span: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * span
}

/// `f32` flavour of [`centered`] for accelerometer axes.
pub fn centered_f32<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_stays_within_span() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let n = centered(&mut rng, 10.0);
            assert!((-5.0..5.0).contains(&n));
            let m = centered_f32(&mut rng, 0.02);
            assert!((-0.01..0.01).contains(&m));
        }
    }

    #[test]
    fn test_zero_span_is_silent() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(centered(&mut rng, 0.0), 0.0);
    }
}
