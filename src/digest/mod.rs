//! Fixed-size quantised digests.
//!
//! A `Digest` is the only artifact meant to be stored or exchanged. Its
//! coefficients are the leading DCT-II terms of a feature vector, linearly
//! quantised to `0..=255`.

mod dct;

pub(crate) use dct::check_coeff_count;
pub use dct::{dct_digest, DEFAULT_NB_COEFFS};

use crate::util::{RadonHashError, RadonHashResult};
use std::fmt;

/// Immutable perceptual digest with an optional opaque identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest {
    coeffs: Vec<u8>,
    id: Option<String>,
}

impl Digest {
    /// Wraps quantised coefficients; at least one is required.
    pub fn from_coeffs(coeffs: Vec<u8>) -> RadonHashResult<Self> {
        if coeffs.is_empty() {
            return Err(RadonHashError::EmptyDigest);
        }
        Ok(Self { coeffs, id: None })
    }

    /// Attaches an opaque identifier (file name, catalog id, ...).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Quantised coefficients in DCT order.
    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Always false for constructed digests; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if every coefficient is zero (flat or uniform input).
    pub fn is_flat(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// 32-bit catalog key: `h = 1; h = 31 * h + c` over the coefficients,
    /// with wrapping arithmetic.
    ///
    /// Exact duplicates share a key, so it works as a cheap bucket before the
    /// correlation comparison. Near duplicates generally do not.
    pub fn catalog_key(&self) -> i32 {
        self.coeffs.iter().fold(1i32, |h, &c| {
            h.wrapping_mul(31).wrapping_add(i32::from(c))
        })
    }

    /// Lower-case hex encoding, two characters per coefficient.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.coeffs.len() * 2);
        for c in &self.coeffs {
            out.push_str(&format!("{c:02x}"));
        }
        out
    }

    /// Parses the encoding produced by [`Digest::to_hex`].
    pub fn from_hex(hex: &str) -> RadonHashResult<Self> {
        let hex = hex.trim();
        if hex.len() % 2 != 0 {
            return Err(RadonHashError::InvalidDigestHex {
                reason: "odd number of hex digits",
            });
        }
        let coeffs = hex
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                pair.iter()
                    .all(u8::is_ascii_hexdigit)
                    .then(|| std::str::from_utf8(pair).ok())
                    .flatten()
                    .and_then(|s| u8::from_str_radix(s, 16).ok())
                    .ok_or(RadonHashError::InvalidDigestHex {
                        reason: "non-hex character",
                    })
            })
            .collect::<RadonHashResult<Vec<u8>>>()?;
        Self::from_coeffs(coeffs)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
