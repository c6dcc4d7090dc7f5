//! Deterministic word colors.
//!
//! A word's color is a BLAKE2b digest of its UTF-8 bytes computed with an
//! explicit digest length. BLAKE2b mixes the length into its parameter
//! block, so a 3-byte digest is not a prefix of a longer one: the configured
//! size is part of the color contract.

use std::fmt;

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use serde::{Serialize, Serializer};

use crate::config::{MAX_COLOR_SIZE, MIN_COLOR_SIZE};
use crate::error::ValidationError;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Alpha used for every painted pixel.
    pub const ALPHA: u8 = u8::MAX;

    /// RGBA channels with full opacity.
    #[must_use]
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, Self::ALPHA]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn size_error(size: usize) -> ValidationError {
    ValidationError::ColorSizeOutOfRange {
        size,
        min: MIN_COLOR_SIZE,
        max: MAX_COLOR_SIZE,
    }
}

/// BLAKE2b digest of `bytes` with a `size`-byte output.
///
/// # Errors
///
/// Returns `ValidationError::ColorSizeOutOfRange` if BLAKE2b cannot produce
/// a digest of that length (zero or more than 64 bytes).
pub fn hash_bytes(bytes: &[u8], size: usize) -> Result<Vec<u8>, ValidationError> {
    let mut hasher = Blake2bVar::new(size).map_err(|_| size_error(size))?;
    hasher.update(bytes);
    let mut out = vec![0u8; size];
    hasher
        .finalize_variable(&mut out)
        .map_err(|_| size_error(size))?;
    Ok(out)
}

/// Derives the color of `word` from a `size`-byte digest.
///
/// The first three digest bytes are red, green and blue.
///
/// # Errors
///
/// Returns `ValidationError::ColorSizeOutOfRange` unless `3 <= size <= 64`.
///
/// ```
/// use texelmap::color::derive_color;
///
/// let c = derive_color("cat", 3).unwrap();
/// assert_eq!(c.to_string(), "#8e0a17");
/// ```
pub fn derive_color(word: &str, size: usize) -> Result<Color, ValidationError> {
    if size < MIN_COLOR_SIZE {
        return Err(size_error(size));
    }
    let digest = hash_bytes(word.as_bytes(), size)?;
    Ok(Color {
        r: digest[0],
        g: digest[1],
        b: digest[2],
    })
}
