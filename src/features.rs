//! Per-angle variance features.
//!
//! Each projection line is reduced to the population variance of its
//! in-bounds samples, then the `N` variances are standardised to zero mean
//! and unit population deviation. Lines without samples contribute a
//! variance of zero; a set of equal variances standardises to all zeros.

use crate::radon::Projections;
use crate::trace::{trace_degenerate, trace_span};
use crate::util::math::mean_std;

/// Deviations at or below this are treated as a flat feature set.
const FLAT_STD_EPS: f64 = 1e-9;

/// Standardised variance statistic per angle bin.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wraps raw feature values without normalising them.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of features (one per angle bin).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature values in angle-bin order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns true if every feature is zero.
    pub fn is_flat(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

/// Population variance of a projection line over `count` valid samples.
fn line_variance(line: &[u8], count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for &v in line {
        let v = f64::from(v);
        sum += v;
        sum_sq += v * v;
    }
    let n = f64::from(count);
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}

/// Builds the normalised feature vector from projections.
pub fn feature_vector(proj: &Projections) -> FeatureVector {
    let _span = trace_span!("feature_vector", angles = proj.angle_count()).entered();

    let mut values: Vec<f64> = proj
        .lines()
        .map(|(line, count)| line_variance(line, count))
        .collect();

    let (mean, std) = mean_std(&values);
    if !std.is_finite() || std <= FLAT_STD_EPS {
        trace_degenerate!("flat_features", mean = mean, std = std);
        values.iter_mut().for_each(|v| *v = 0.0);
        return FeatureVector { values };
    }
    for v in &mut values {
        *v = (*v - mean) / std;
    }
    FeatureVector { values }
}
