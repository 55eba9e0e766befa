//! Error types for radonhash.

use thiserror::Error;

/// Result alias for radonhash operations.
pub type RadonHashResult<T> = std::result::Result<T, RadonHashError>;

/// Errors that can occur when building images, digests or configurations.
///
/// Numeric degeneracies (empty projection lines, flat feature vectors,
/// constant digests) are never reported here; they resolve to zeros.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RadonHashError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the declared image.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Angle count must be an even number of at least 2.
    #[error("invalid angle count {angle_count}: must be even and >= 2")]
    InvalidAngleCount { angle_count: usize },
    /// Retained coefficient count must lie in `1..=angle_count`.
    #[error("invalid coefficient count {nb_coeffs} for {angle_count} angles")]
    InvalidCoeffCount { nb_coeffs: usize, angle_count: usize },
    /// Blur sigma must be finite and non-negative.
    #[error("invalid blur sigma: {reason}")]
    InvalidBlurSigma { reason: &'static str },
    /// A digest needs at least one coefficient.
    #[error("digest has no coefficients")]
    EmptyDigest,
    /// Only digests of equal size can be compared.
    #[error("digest size mismatch: {left} vs {right}")]
    DigestSizeMismatch { left: usize, right: usize },
    /// Hex text could not be decoded into a digest.
    #[error("invalid digest hex: {reason}")]
    InvalidDigestHex { reason: &'static str },
    /// Image decoding failed (only produced by the `image-io` adapter).
    #[error("image I/O error: {reason}")]
    ImageIo { reason: String },
}
