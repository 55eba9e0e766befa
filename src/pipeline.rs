//! Digest pipeline: blur, project, extract features, compress.
//!
//! Every call works on its own copy of the input pixels, so the caller's
//! buffer is never mutated and concurrent calls share nothing except the
//! read-only default tangent table.

use crate::compare::{cross_correlation, Correlation};
use crate::digest::{check_coeff_count, dct_digest, Digest, DEFAULT_NB_COEFFS};
use crate::features::feature_vector;
use crate::image::{ImageView, OwnedImage};
use crate::radon::{check_angle_count, radon_projections, DEFAULT_ANGLE_COUNT};
use crate::trace::{trace_event, trace_span};
use crate::util::{RadonHashError, RadonHashResult};

/// Largest blur sigma accepted by [`DigestConfig::validate`].
pub const MAX_BLUR_SIGMA: f32 = 64.0;

/// Parameters of the digest pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DigestConfig {
    /// Number of projection angle bins over `[0, pi)`; even, at least 2.
    pub angle_count: usize,
    /// Leading DCT coefficients kept in the digest; `1..=angle_count`.
    pub nb_coeffs: usize,
    /// Gaussian sigma applied before projection, in `[0, MAX_BLUR_SIGMA]`;
    /// `0` disables smoothing.
    pub blur_sigma: f32,
    /// Hash independent images on the rayon pool (needs the `rayon` feature).
    pub parallel: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            angle_count: DEFAULT_ANGLE_COUNT,
            nb_coeffs: DEFAULT_NB_COEFFS,
            blur_sigma: 1.0,
            parallel: false,
        }
    }
}

impl DigestConfig {
    /// Rejects parameter combinations the pipeline cannot honour.
    pub fn validate(&self) -> RadonHashResult<()> {
        check_angle_count(self.angle_count)?;
        check_coeff_count(self.nb_coeffs, self.angle_count)?;
        if !self.blur_sigma.is_finite() {
            return Err(RadonHashError::InvalidBlurSigma {
                reason: "sigma must be finite",
            });
        }
        if self.blur_sigma < 0.0 {
            return Err(RadonHashError::InvalidBlurSigma {
                reason: "sigma must be >= 0",
            });
        }
        if self.blur_sigma > MAX_BLUR_SIGMA {
            return Err(RadonHashError::InvalidBlurSigma {
                reason: "sigma too large",
            });
        }
        Ok(())
    }
}

/// Computes the digest of `image` under `cfg`.
pub fn compute_digest(image: ImageView<'_>, cfg: &DigestConfig) -> RadonHashResult<Digest> {
    cfg.validate()?;
    digest_validated(image, cfg)
}

/// Compares two images with the default configuration and returns the
/// peak correlation score.
pub fn compare_images(a: ImageView<'_>, b: ImageView<'_>) -> RadonHashResult<f64> {
    Ok(Hasher::new().compare(a, b)?.score)
}

fn digest_validated(image: ImageView<'_>, cfg: &DigestConfig) -> RadonHashResult<Digest> {
    let _span = trace_span!(
        "compute_digest",
        width = image.width(),
        height = image.height(),
        angles = cfg.angle_count,
        coeffs = cfg.nb_coeffs
    )
    .entered();

    let mut owned = OwnedImage::from_view(image)?;
    owned.blur(cfg.blur_sigma);
    let proj = radon_projections(owned.view(), cfg.angle_count)?;
    let features = feature_vector(&proj);
    let digest = dct_digest(&features, cfg.nb_coeffs)?;

    trace_event!("digest_ready", flat = digest.is_flat(), key = digest.catalog_key());
    Ok(digest)
}

/// Reusable digest/compare front end bound to one configuration.
#[derive(Clone, Debug, Default)]
pub struct Hasher {
    cfg: DigestConfig,
}

impl Hasher {
    /// Creates a hasher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DigestConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DigestConfig {
        &self.cfg
    }

    /// Computes the digest of one image.
    pub fn digest(&self, image: ImageView<'_>) -> RadonHashResult<Digest> {
        compute_digest(image, &self.cfg)
    }

    /// Computes digests for several images, in input order.
    pub fn digest_batch(&self, images: &[ImageView<'_>]) -> RadonHashResult<Vec<Digest>> {
        self.cfg.validate()?;
        let _span = trace_span!("digest_batch", count = images.len()).entered();
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::pipeline::par::digest_batch_par(images, &self.cfg);
        }
        images
            .iter()
            .map(|&image| digest_validated(image, &self.cfg))
            .collect()
    }

    /// Digests both images and returns their best circular alignment.
    pub fn compare(&self, a: ImageView<'_>, b: ImageView<'_>) -> RadonHashResult<Correlation> {
        self.cfg.validate()?;
        let (da, db) = self.digest_pair(a, b)?;
        cross_correlation(&da, &db)
    }

    /// Compares two stored digests.
    pub fn compare_digests(&self, a: &Digest, b: &Digest) -> RadonHashResult<Correlation> {
        cross_correlation(a, b)
    }

    fn digest_pair(&self, a: ImageView<'_>, b: ImageView<'_>) -> RadonHashResult<(Digest, Digest)> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            let (da, db) = rayon::join(
                || digest_validated(a, &self.cfg),
                || digest_validated(b, &self.cfg),
            );
            return Ok((da?, db?));
        }
        Ok((digest_validated(a, &self.cfg)?, digest_validated(b, &self.cfg)?))
    }
}

#[cfg(feature = "rayon")]
mod par {
    use super::digest_validated;
    use crate::digest::Digest;
    use crate::image::ImageView;
    use crate::pipeline::DigestConfig;
    use crate::util::RadonHashResult;
    use rayon::prelude::*;

    /// Image-parallel batch digest; output order matches input order.
    pub(super) fn digest_batch_par(
        images: &[ImageView<'_>],
        cfg: &DigestConfig,
    ) -> RadonHashResult<Vec<Digest>> {
        images
            .par_iter()
            .map(|&image| digest_validated(image, cfg))
            .collect()
    }
}
