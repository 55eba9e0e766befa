//! Truncated DCT-II compression of feature vectors.

use crate::digest::Digest;
use crate::features::FeatureVector;
use crate::trace::{trace_degenerate, trace_span};
use crate::util::{RadonHashError, RadonHashResult};
use std::f64::consts::{PI, SQRT_2};

/// Coefficients retained by default.
pub const DEFAULT_NB_COEFFS: usize = 40;

const QUANT_MAX: f64 = 255.0;

/// Checks that `1 <= nb_coeffs <= angle_count`.
pub(crate) fn check_coeff_count(nb_coeffs: usize, angle_count: usize) -> RadonHashResult<()> {
    if nb_coeffs == 0 || nb_coeffs > angle_count {
        return Err(RadonHashError::InvalidCoeffCount {
            nb_coeffs,
            angle_count,
        });
    }
    Ok(())
}

/// Orthonormal DCT-II terms `0..nb_coeffs` of `values`.
pub(crate) fn dct_ii_leading(values: &[f64], nb_coeffs: usize) -> Vec<f64> {
    let n = values.len();
    let n_f = n as f64;
    let sqrt_n = n_f.sqrt();
    (0..nb_coeffs)
        .map(|k| {
            let sum: f64 = values
                .iter()
                .enumerate()
                .map(|(i, &v)| v * (PI * (2 * i + 1) as f64 * k as f64 / (2.0 * n_f)).cos())
                .sum();
            if k == 0 {
                sum / sqrt_n
            } else {
                sum * SQRT_2 / sqrt_n
            }
        })
        .collect()
}

/// Compresses `features` into a digest of `nb_coeffs` quantised terms.
///
/// Coefficients are mapped linearly from `[min, max]` onto `[0, 255]` and
/// rounded. When every coefficient is equal the digest is all zeros.
pub fn dct_digest(features: &FeatureVector, nb_coeffs: usize) -> RadonHashResult<Digest> {
    check_coeff_count(nb_coeffs, features.len())?;
    let _span = trace_span!("dct_digest", angles = features.len(), coeffs = nb_coeffs).entered();

    let raw = dct_ii_leading(features.values(), nb_coeffs);
    let (min, max) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            (lo.min(c), hi.max(c))
        });
    let range = max - min;

    // Also catches NaN ranges.
    if !(range > 0.0) {
        trace_degenerate!("constant_coefficients", min = min, max = max);
        return Digest::from_coeffs(vec![0u8; nb_coeffs]);
    }

    let coeffs = raw
        .iter()
        .map(|&c| (QUANT_MAX * (c - min) / range).round().clamp(0.0, QUANT_MAX) as u8)
        .collect();
    Digest::from_coeffs(coeffs)
}
