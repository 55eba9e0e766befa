//! Tangent lookup tables for the projection line walk.

use std::borrow::Cow;
use std::f64::consts::PI;
use std::sync::OnceLock;

/// Angle count whose table is shared process-wide.
pub const DEFAULT_ANGLE_COUNT: usize = 180;

static DEFAULT_TABLE: OnceLock<Vec<f64>> = OnceLock::new();

/// `tan(k * pi / n)` for every angle bin `k` in `[0, n)`.
#[derive(Clone, Debug)]
pub struct TangentTable {
    tangents: Cow<'static, [f64]>,
}

impl TangentTable {
    /// Returns the table for `angle_count` bins.
    ///
    /// The default 180-bin table is built once and borrowed by every caller;
    /// other sizes are computed on demand and owned by the returned value.
    pub fn for_angles(angle_count: usize) -> Self {
        let tangents = if angle_count == DEFAULT_ANGLE_COUNT {
            Cow::Borrowed(
                DEFAULT_TABLE
                    .get_or_init(|| build(DEFAULT_ANGLE_COUNT))
                    .as_slice(),
            )
        } else {
            Cow::Owned(build(angle_count))
        };
        Self { tangents }
    }

    /// Number of angle bins covered.
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    /// Returns true if the table has no bins.
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    /// Tangent of bin `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    #[inline]
    pub fn tan(&self, k: usize) -> f64 {
        self.tangents[k]
    }

    /// Returns true if this table borrows the shared default table.
    pub fn is_shared(&self) -> bool {
        matches!(self.tangents, Cow::Borrowed(_))
    }
}

fn build(angle_count: usize) -> Vec<f64> {
    (0..angle_count)
        .map(|k| (k as f64 * PI / angle_count as f64).tan())
        .collect()
}
