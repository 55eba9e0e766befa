//! Separable Gaussian smoothing for `u8` grids.
//!
//! The horizontal pass accumulates into an `f32` scratch buffer; the vertical
//! pass rounds back to `u8`. Borders replicate the edge pixel, so a uniform
//! image stays uniform.

/// Normalised 1D Gaussian taps of length `2 * radius + 1`, where the radius
/// is `ceil(3 * sigma)` capped at `max_radius`.
///
/// Returns `None` when the kernel collapses to the identity, i.e. when
/// `2 * sigma^2` underflows below the smallest normal `f32`.
pub(crate) fn gaussian_kernel(sigma: f32, max_radius: usize) -> Option<Vec<f32>> {
    let denom = 2.0 * sigma * sigma;
    if !(denom >= f32::MIN_POSITIVE) {
        return None;
    }
    let radius = ((3.0 * sigma).ceil() as usize).min(max_radius);
    if radius == 0 {
        return None;
    }
    let mut taps: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let d = i as f32 - radius as f32;
            (-d * d / denom).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= sum;
    }
    Some(taps)
}

pub(crate) fn gaussian_blur_in_place(data: &mut [u8], width: usize, height: usize, sigma: f32) {
    if !sigma.is_finite() || sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(data.len(), width * height);

    // Taps past the longer side only re-read the clamped edge pixel.
    let Some(taps) = gaussian_kernel(sigma, width.max(height)) else {
        return;
    };
    let radius = taps.len() / 2;
    let mut scratch = vec![0.0f32; width * height];

    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        let out = &mut scratch[y * width..(y + 1) * width];
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (i, &w) in taps.iter().enumerate() {
                let sx = (x + i).saturating_sub(radius).min(width - 1);
                acc += w * f32::from(row[sx]);
            }
            *dst = acc;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (i, &w) in taps.iter().enumerate() {
                let sy = (y + i).saturating_sub(radius).min(height - 1);
                acc += w * scratch[sy * width + x];
            }
            data[y * width + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{gaussian_blur_in_place, gaussian_kernel};

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let taps = gaussian_kernel(1.0, usize::MAX).unwrap();
        assert_eq!(taps.len(), 7);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
        assert!(taps[3] > taps[2]);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let mut data = vec![97u8; 9 * 5];
        gaussian_blur_in_place(&mut data, 9, 5, 1.0);
        assert!(data.iter().all(|&v| v == 97));
    }

    #[test]
    fn impulse_spreads_and_keeps_peak() {
        let (w, h) = (9, 9);
        let mut data = vec![0u8; w * h];
        data[4 * w + 4] = 255;
        gaussian_blur_in_place(&mut data, w, h, 1.0);
        let center = data[4 * w + 4];
        assert!(center < 255);
        assert!(center > 0);
        assert!(data[4 * w + 5] > 0);
        assert!(data[4 * w + 5] <= center);
        assert_eq!(data[4 * w + 5], data[4 * w + 3]);
    }

    #[test]
    fn zero_sigma_is_noop() {
        let mut data: Vec<u8> = (0u8..16).collect();
        let before = data.clone();
        gaussian_blur_in_place(&mut data, 4, 4, 0.0);
        assert_eq!(data, before);
    }

    fn texture(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .map(|i| (((i % width) * 13) ^ ((i / width) * 7)) as u8)
            .collect()
    }

    #[test]
    fn vanishing_sigma_keeps_pixels() {
        let mut data = texture(32, 32);
        let before = data.clone();
        gaussian_blur_in_place(&mut data, 32, 32, 1e-30);
        assert_eq!(data, before);
        assert!(gaussian_kernel(1e-30, usize::MAX).is_none());
        assert!(gaussian_kernel(f32::MIN_POSITIVE, usize::MAX).is_none());
    }

    #[test]
    fn kernel_radius_is_capped() {
        let taps = gaussian_kernel(1e12, 8).unwrap();
        assert_eq!(taps.len(), 17);
        assert!(taps.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn huge_sigma_stays_within_input_range() {
        for sigma in [1e12f32, 1e30] {
            let mut data = texture(8, 8);
            let lo = *data.iter().min().unwrap();
            let hi = *data.iter().max().unwrap();
            gaussian_blur_in_place(&mut data, 8, 8, sigma);
            assert!(data.iter().all(|&v| (lo..=hi).contains(&v)));
        }
    }
}
