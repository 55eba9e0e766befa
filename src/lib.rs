//! radonhash computes Radon-projection perceptual digests of grayscale images
//! and compares them by circular cross-correlation.
//!
//! The pipeline blurs a copy of the input, projects it onto `N` angle bins
//! (180 by default), reduces each projection line to a standardised variance,
//! and keeps the leading 40 DCT-II coefficients quantised to bytes.
//! Similar images yield digests whose peak correlation is close to 1.
//!
//! ```
//! use radonhash::{compare_images, ImageView};
//!
//! let data: Vec<u8> = (0..64 * 64).map(|i| ((i % 64) ^ (i / 64)) as u8).collect();
//! let view = ImageView::from_slice(&data, 64, 64)?;
//! let score = compare_images(view, view)?;
//! assert!(score > 0.99);
//! # Ok::<(), radonhash::RadonHashError>(())
//! ```
//!
//! Optional features: `rayon` (parallel batches), `image-io` (decoding via
//! the `image` crate), `tracing` (spans and events per stage).

mod trace;

pub mod compare;
pub mod digest;
pub mod features;
pub mod image;
pub mod lowlevel;
pub mod pipeline;
pub mod radon;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::image::{ImageView, OwnedImage};
pub use compare::{cross_correlation, Correlation};
pub use digest::{Digest, DEFAULT_NB_COEFFS};
pub use pipeline::{compare_images, compute_digest, DigestConfig, Hasher, MAX_BLUR_SIGMA};
pub use radon::DEFAULT_ANGLE_COUNT;
pub use util::{RadonHashError, RadonHashResult};
