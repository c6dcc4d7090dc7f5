//! Pipeline configuration.
//!
//! The literal character tables used by the tokenizer and the normalizer
//! live here, next to the lookup and render knobs, so the whole contract of
//! a run can be inspected or serialized in one place.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Characters replaced by a space before splitting the document.
pub const DEFAULT_SEPARATORS: [char; 4] = ['-', '.', ',', '\n'];

/// Characters removed anywhere inside a token during normalization.
pub const DEFAULT_STRIP_CHARS: [char; 6] = ['"', '\'', ',', '.', '!', '?'];

/// Maximum edit distance for the approximate fallback.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// Digest length used for word colors.
pub const DEFAULT_COLOR_SIZE: usize = 3;

/// Minimum digest length (one byte per RGB channel).
pub const MIN_COLOR_SIZE: usize = 3;

/// Maximum BLAKE2b digest length.
pub const MAX_COLOR_SIZE: usize = 64;

/// Side length of the output canvas.
pub const DEFAULT_RESOLUTION: u32 = 256;

/// `count / block_divisor` is a block's half extent.
pub const DEFAULT_BLOCK_DIVISOR: u32 = 4;

/// Tokenizer and normalizer tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextConfig {
    /// Replaced by a space before splitting on spaces.
    pub separators: Vec<char>,
    /// Removed from tokens during normalization.
    pub strip_chars: Vec<char>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.to_vec(),
            strip_chars: DEFAULT_STRIP_CHARS.to_vec(),
        }
    }
}

/// Lookup and color settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Bound for the approximate fallback.
    pub max_edit_distance: usize,
    /// Digest length fed to the color hash.
    pub color_size: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            color_size: DEFAULT_COLOR_SIZE,
        }
    }
}

/// Canvas settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas side length in pixels.
    pub resolution: u32,
    /// Divides a word's count to get its block half extent.
    pub block_divisor: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            block_divisor: DEFAULT_BLOCK_DIVISOR,
        }
    }
}

impl RenderConfig {
    /// Default render settings at the given resolution.
    #[must_use]
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Checks the canvas settings.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the resolution or divisor is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resolution == 0 {
            return Err(ValidationError::ZeroResolution {
                value: self.resolution,
            });
        }
        if self.block_divisor == 0 {
            return Err(ValidationError::ZeroBlockDivisor);
        }
        Ok(())
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Tokenizer and normalizer tables.
    pub text: TextConfig,
    /// Lookup and color settings.
    pub resolve: ResolveConfig,
    /// Canvas settings.
    pub render: RenderConfig,
}

impl PipelineConfig {
    /// Default configuration at the given resolution.
    #[must_use]
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            render: RenderConfig::with_resolution(resolution),
            ..Self::default()
        }
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.render.validate()?;
        let size = self.resolve.color_size;
        if !(MIN_COLOR_SIZE..=MAX_COLOR_SIZE).contains(&size) {
            return Err(ValidationError::ColorSizeOutOfRange {
                size,
                min: MIN_COLOR_SIZE,
                max: MAX_COLOR_SIZE,
            });
        }
        Ok(())
    }
}
