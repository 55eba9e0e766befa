//! Circular cross-correlation between digests.
//!
//! The digest coefficients derive from an angle-indexed signal, so two
//! digests are compared at every circular shift and the best normalised
//! correlation wins. Scores live in `[0, 1]`: anti-correlated alignments
//! never beat the zero baseline, and shifts with a zero denominator score 0.

use crate::digest::Digest;
use crate::trace::{trace_event, trace_span};
use crate::util::math::mean_u8;
use crate::util::{RadonHashError, RadonHashResult};

/// Best circular alignment between two digests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correlation {
    /// Peak normalised correlation, in `[0, 1]`.
    pub score: f64,
    /// Shift `d` applied to the second digest at the peak; the earliest
    /// shift wins ties.
    pub shift: usize,
}

/// Normalised correlation of `x` against `y` circularly shifted by `d`.
fn correlation_at(x: &[f64], y: &[f64], d: usize) -> f64 {
    let n = x.len();
    let mut num = 0.0f64;
    let mut den_x = 0.0f64;
    let mut den_y = 0.0f64;
    for (i, &xi) in x.iter().enumerate() {
        let yi = y[(n + i - d) % n];
        num += xi * yi;
        den_x += xi * xi;
        den_y += yi * yi;
    }
    let den = (den_x * den_y).sqrt();
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Computes the peak circular cross-correlation of two equal-size digests.
pub fn cross_correlation(x: &Digest, y: &Digest) -> RadonHashResult<Correlation> {
    if x.len() != y.len() {
        return Err(RadonHashError::DigestSizeMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let _span = trace_span!("cross_correlation", size = x.len()).entered();

    let mean_x = mean_u8(x.coeffs());
    let mean_y = mean_u8(y.coeffs());
    let xc: Vec<f64> = x.coeffs().iter().map(|&c| f64::from(c) - mean_x).collect();
    let yc: Vec<f64> = y.coeffs().iter().map(|&c| f64::from(c) - mean_y).collect();

    let mut best = Correlation {
        score: 0.0,
        shift: 0,
    };
    for d in 0..xc.len() {
        let r = correlation_at(&xc, &yc, d);
        if r > best.score {
            best = Correlation { score: r, shift: d };
        }
    }

    trace_event!("correlation_peak", score = best.score, shift = best.shift);
    Ok(best)
}
