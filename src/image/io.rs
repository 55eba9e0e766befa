//! Decoding helpers built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled. The digest pipeline
//! itself never touches files; these helpers only turn encoded images into
//! grayscale buffers.

use crate::image::{ImageView, OwnedImage};
use crate::util::{RadonHashError, RadonHashResult};
use std::path::Path;

/// Creates a borrowed view over a decoded luma buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> RadonHashResult<ImageView<'_>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts any decoded image to luma and copies it into an owned buffer.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> RadonHashResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Decodes an image file and reduces it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> RadonHashResult<OwnedImage> {
    let img = image::open(path).map_err(|err| RadonHashError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image and reduces it to grayscale.
pub fn decode_gray_image(bytes: &[u8]) -> RadonHashResult<OwnedImage> {
    let img = image::load_from_memory(bytes).map_err(|err| RadonHashError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
