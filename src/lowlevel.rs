//! Individual pipeline stages for callers that need intermediate results.
//!
//! Most users should prefer `compute_digest`, `compare_images` or `Hasher`.
//! These re-exports let tooling inspect projections and features, or run
//! the stages with custom preprocessing in between.

pub use crate::compare::cross_correlation;
pub use crate::digest::dct_digest;
pub use crate::features::{feature_vector, FeatureVector};
pub use crate::radon::{radon_projections, Projections, TangentTable};
