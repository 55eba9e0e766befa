//! Discrete Radon projections by integer line walking.
//!
//! For each of `N` angle bins over `[0, pi)` a line through the image centre
//! is walked one column (or row) at a time; the nearest pixel to the ideal
//! line is copied into that bin's projection line. Only bins in `[0, N/4]`
//! and `[ceil(3N/4), N)` use their own tangent. The remaining bins are
//! filled from the same walk by reflecting the pixel coordinates:
//!
//! - bin `N/2 - k` (angle `pi/2 - theta_k`) transposes `(x, y)` to `(y, x)`,
//! - bin `3N/2 - k` (angle `3pi/2 - theta_k`) maps to `(y_off - y, 2 y_off - x)`.
//!
//! Every bin is written by exactly one walk, so each `(bin, sample)` slot
//! holds at most one pixel. A bin whose line never crosses the image keeps a
//! sample count of zero; the feature stage treats it as flat.

mod tangent;

pub use tangent::{TangentTable, DEFAULT_ANGLE_COUNT};

use crate::image::ImageView;
use crate::trace::{trace_degenerate, trace_span};
use crate::util::math::round_half_away;
use crate::util::{RadonHashError, RadonHashResult};

/// Per-angle projection lines and their valid sample counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projections {
    angle_count: usize,
    distance: usize,
    lines: Vec<u8>,
    sample_counts: Vec<u32>,
}

impl Projections {
    fn zeroed(angle_count: usize, distance: usize) -> Self {
        Self {
            angle_count,
            distance,
            lines: vec![0u8; angle_count * distance],
            sample_counts: vec![0u32; angle_count],
        }
    }

    /// Number of angle bins `N`.
    pub fn angle_count(&self) -> usize {
        self.angle_count
    }

    /// Samples per projection line, `max(width, height)`.
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// Projection line for angle bin `k`; unsampled slots are zero.
    pub fn line(&self, k: usize) -> Option<&[u8]> {
        if k >= self.angle_count {
            return None;
        }
        let start = k * self.distance;
        self.lines.get(start..start + self.distance)
    }

    /// Iterates `(line, sample_count)` pairs in angle-bin order.
    pub fn lines(&self) -> impl Iterator<Item = (&[u8], u32)> + '_ {
        self.lines
            .chunks_exact(self.distance.max(1))
            .zip(self.sample_counts.iter().copied())
    }

    /// Number of in-bounds samples written into each line.
    pub fn sample_counts(&self) -> &[u32] {
        &self.sample_counts
    }

    /// Number of in-bounds samples written into line `k`.
    pub fn sample_count(&self, k: usize) -> Option<u32> {
        self.sample_counts.get(k).copied()
    }

    /// Number of lines that never crossed the image.
    pub fn empty_lines(&self) -> usize {
        self.sample_counts.iter().filter(|&&c| c == 0).count()
    }

    #[inline]
    fn sample(&mut self, image: &ImageView<'_>, k: usize, x: usize, px: i64, py: i64) {
        if px < 0 || py < 0 {
            return;
        }
        if let Some(value) = image.get(px as usize, py as usize) {
            self.lines[k * self.distance + x] = value;
            self.sample_counts[k] += 1;
        }
    }
}

/// Checks that `angle_count` is even and at least 2.
pub(crate) fn check_angle_count(angle_count: usize) -> RadonHashResult<()> {
    if angle_count < 2 || angle_count % 2 != 0 {
        return Err(RadonHashError::InvalidAngleCount { angle_count });
    }
    Ok(())
}

/// Projects `image` onto `angle_count` lines through its centre.
pub fn radon_projections(
    image: ImageView<'_>,
    angle_count: usize,
) -> RadonHashResult<Projections> {
    check_angle_count(angle_count)?;
    let _span = trace_span!(
        "radon_projections",
        width = image.width(),
        height = image.height(),
        angles = angle_count
    )
    .entered();

    let n = angle_count;
    let width = image.width() as i64;
    let height = image.height() as i64;
    let distance = image.width().max(image.height());
    let x_off = (width + 1) / 2;
    let y_off = (height + 1) / 2;
    let tangents = TangentTable::for_angles(n);
    let mut proj = Projections::zeroed(n, distance);

    let first_end = n / 4;
    for k in 0..=first_end {
        let tan_k = tangents.tan(k);
        let mirror = n / 2 - k;
        for x in 0..distance {
            let xi = x as i64;
            let yd = round_half_away(tan_k * (xi - x_off) as f64);
            proj.sample(&image, k, x, xi, yd.saturating_add(y_off));
            if mirror > first_end {
                proj.sample(&image, mirror, x, yd.saturating_add(x_off), xi);
            }
        }
    }

    let second_start = (3 * n).div_ceil(4);
    for k in second_start..n {
        let tan_k = tangents.tan(k);
        let mirror = 3 * n / 2 - k;
        for x in 0..distance {
            let xi = x as i64;
            let yd = round_half_away(tan_k * (xi - x_off) as f64);
            proj.sample(&image, k, x, xi, yd.saturating_add(y_off));
            if mirror < second_start {
                proj.sample(
                    &image,
                    mirror,
                    x,
                    y_off.saturating_sub(yd),
                    (2 * y_off).saturating_sub(xi),
                );
            }
        }
    }

    let empty = proj.empty_lines();
    if empty > 0 {
        trace_degenerate!("empty_projection_lines", count = empty);
    }
    Ok(proj)
}

#[cfg(test)]
mod tests {
    use super::{check_angle_count, radon_projections};
    use crate::image::ImageView;
    use crate::util::RadonHashError;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .map(|i| ((i % width) * 7 + (i / width) * 3) as u8)
            .collect()
    }

    #[test]
    fn horizontal_bin_walks_centre_row() {
        let data = gradient(8, 6);
        let view = ImageView::from_slice(&data, 8, 6).unwrap();
        let proj = radon_projections(view, 180).unwrap();
        assert_eq!(proj.distance(), 8);
        // tan(0) == 0, so bin 0 reads row y_off = 3.
        assert_eq!(proj.line(0), Some(&data[3 * 8..4 * 8]));
        assert_eq!(proj.sample_count(0), Some(8));
    }

    #[test]
    fn vertical_bin_walks_centre_column() {
        let data = gradient(8, 6);
        let view = ImageView::from_slice(&data, 8, 6).unwrap();
        let proj = radon_projections(view, 180).unwrap();
        // Bin 90 is the transpose of bin 0: column x_off = 4, rows 0..6.
        let column: Vec<u8> = (0..6).map(|y| data[y * 8 + 4]).collect();
        let line = proj.line(90).unwrap();
        assert_eq!(&line[..6], column.as_slice());
        assert_eq!(&line[6..], &[0, 0]);
        assert_eq!(proj.sample_count(90), Some(6));
    }

    #[test]
    fn every_bin_is_covered_for_square_images() {
        for n in [4usize, 6, 10, 90, 180] {
            let data = gradient(33, 33);
            let view = ImageView::from_slice(&data, 33, 33).unwrap();
            let proj = radon_projections(view, n).unwrap();
            assert_eq!(proj.angle_count(), n);
            assert_eq!(proj.empty_lines(), 0, "angle_count {n}");
            assert_eq!(proj.lines().count(), n);
            for (line, count) in proj.lines() {
                assert_eq!(line.len(), proj.distance());
                assert!(count as usize <= proj.distance());
            }
        }
    }

    #[test]
    fn out_of_range_bins_are_none() {
        let data = gradient(8, 6);
        let view = ImageView::from_slice(&data, 8, 6).unwrap();
        let proj = radon_projections(view, 180).unwrap();
        assert!(proj.line(179).is_some());
        assert_eq!(proj.line(180), None);
        assert_eq!(proj.sample_count(180), None);
    }

    #[test]
    fn degenerate_lines_are_tolerated() {
        let data = [200u8];
        let view = ImageView::from_slice(&data, 1, 1).unwrap();
        let proj = radon_projections(view, 180).unwrap();
        assert_eq!(proj.distance(), 1);
        assert!(proj.empty_lines() > 0);
        assert!(proj.empty_lines() < 180);
    }

    #[test]
    fn odd_or_tiny_angle_counts_are_rejected() {
        assert_eq!(
            check_angle_count(0),
            Err(RadonHashError::InvalidAngleCount { angle_count: 0 })
        );
        assert_eq!(
            check_angle_count(181),
            Err(RadonHashError::InvalidAngleCount { angle_count: 181 })
        );
        assert!(check_angle_count(2).is_ok());
    }
}
