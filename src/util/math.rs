//! Numeric helpers shared by the projection, feature and digest stages.

/// Rounds to the nearest integer with halves pushed away from zero.
#[inline]
pub(crate) fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

/// Population mean and standard deviation of `values`.
///
/// The variance is clamped at zero before the square root so that rounding
/// noise on flat inputs cannot produce NaN.
pub(crate) fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for &v in values {
        sum += v;
        sum_sq += v * v;
    }
    let mean = sum / n;
    let var = (sum_sq / n - mean * mean).max(0.0);
    (mean, var.sqrt())
}

/// Arithmetic mean of a byte slice.
pub(crate) fn mean_u8(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    sum as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{mean_std, mean_u8, round_half_away};

    #[test]
    fn round_half_away_pushes_halves_outward() {
        assert_eq!(round_half_away(2.5), 3);
        assert_eq!(round_half_away(-2.5), -3);
        assert_eq!(round_half_away(-2.3), -2);
        assert_eq!(round_half_away(0.49), 0);
    }

    #[test]
    fn mean_std_matches_known_values() {
        let (mean, std) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mean_std_of_constant_is_zero_std() {
        let (mean, std) = mean_std(&[0.1; 17]);
        assert!((mean - 0.1).abs() < 1e-12);
        assert!(std < 1e-6);
        assert!(!std.is_nan());
        assert_eq!(mean_std(&[]), (0.0, 0.0));
    }

    #[test]
    fn mean_u8_averages_bytes() {
        assert!((mean_u8(&[0, 255]) - 127.5).abs() < 1e-12);
        assert_eq!(mean_u8(&[]), 0.0);
    }
}
