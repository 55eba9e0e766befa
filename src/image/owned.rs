use crate::image::blur::gaussian_blur_in_place;
use crate::image::ImageView;
use crate::util::{RadonHashError, RadonHashResult};

/// Owned contiguous grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a row-major buffer of exactly `width * height` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> RadonHashResult<Self> {
        if width == 0 || height == 0 {
            return Err(RadonHashError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(RadonHashError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(RadonHashError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(RadonHashError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image filled with a single intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> RadonHashResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(RadonHashError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_>) -> RadonHashResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = view.row(y).ok_or(RadonHashError::BufferTooSmall {
                needed: y * view.stride() + width,
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its pixel data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Smooths the image in place with a separable Gaussian of `sigma`.
    ///
    /// The kernel radius is `ceil(3 * sigma)`, capped at the longer side, and
    /// borders clamp to the edge pixel. Sigmas that cannot spread weight off
    /// the centre tap (non-positive, non-finite or vanishingly small) leave
    /// the image untouched.
    pub fn blur(&mut self, sigma: f32) {
        gaussian_blur_in_place(&mut self.data, self.width, self.height, sigma);
    }
}
