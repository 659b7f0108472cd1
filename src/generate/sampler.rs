//! Integer counts drawn from a normal distribution.
//!
//! The generator decides how many points (or child centers) a step emits by
//! sampling `N(mean, std_dev)`, flooring, and clamping to at least one. The
//! clamp matters: with the default `std_dev = mean` roughly 16% of raw draws
//! land below zero.

use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draw a count from `N(mean, std_dev)`, floored and clamped to `>= 1`.
///
/// `std_dev` defaults to `mean` when `None`. A negative standard deviation is
/// taken by absolute value, so `sample_count(rng, -3.0, None)` still samples
/// (and still returns at least one).
///
/// Fails with [`Error::Configuration`] only when `mean` or `std_dev` is not
/// finite.
pub fn sample_count<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: Option<f64>) -> Result<usize> {
    let std_dev = std_dev.unwrap_or(mean);
    if !mean.is_finite() {
        return Err(Error::configuration("mean", format!("must be finite, got {mean}")));
    }
    if !std_dev.is_finite() {
        return Err(Error::configuration(
            "std_dev",
            format!("must be finite, got {std_dev}"),
        ));
    }

    let normal =
        Normal::new(mean, std_dev.abs()).map_err(|e| Error::configuration("std_dev", e.to_string()))?;
    let raw = normal.sample(rng).floor();

    // Saturating float-to-int cast; anything below one clamps up.
    if raw >= 1.0 {
        Ok(raw as usize)
    } else {
        Ok(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_spread_is_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_count(&mut rng, 4.0, Some(0.0)).unwrap(), 4);
        assert_eq!(sample_count(&mut rng, 4.9, Some(0.0)).unwrap(), 4);
    }

    #[test]
    fn test_negative_mean_clamps_to_one() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_count(&mut rng, -50.0, Some(0.0)).unwrap(), 1);
        for _ in 0..100 {
            assert!(sample_count(&mut rng, -3.0, None).unwrap() >= 1);
        }
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            sample_count(&mut rng, f64::NAN, Some(1.0)),
            Err(Error::Configuration { name: "mean", .. })
        ));
        assert!(matches!(
            sample_count(&mut rng, 1.0, Some(f64::INFINITY)),
            Err(Error::Configuration { name: "std_dev", .. })
        ));
    }

    #[test]
    fn test_mean_is_roughly_respected() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 2000;
        let total: usize = (0..n)
            .map(|_| sample_count(&mut rng, 20.0, Some(2.0)).unwrap())
            .sum();
        let avg = total as f64 / n as f64;
        // Flooring shifts the mean down by about one half.
        assert!((avg - 19.5).abs() < 0.5, "avg = {avg}");
    }

    proptest! {
        #[test]
        fn sample_count_is_at_least_one(
            seed in any::<u64>(),
            mean in -1.0e6f64..1.0e6,
            std_dev in proptest::option::of(-1.0e3f64..1.0e3),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            prop_assert!(sample_count(&mut rng, mean, std_dev).unwrap() >= 1);
        }
    }
}
