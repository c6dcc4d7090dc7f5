//! Error types for texelmap.
//!
//! All errors are strongly typed using thiserror. Only fatal conditions are
//! errors: bad dictionary lines and unknown words are tallied in the
//! [`RunReport`](crate::pipeline::RunReport) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Validation errors raised for bad configuration or malformed values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Resolution must be positive, got {value}")]
    ZeroResolution {
        value: u32,
    },

    #[error("Block divisor must be positive")]
    ZeroBlockDivisor,

    #[error("Color digest size {size} is outside [{min}, {max}] bytes")]
    ColorSizeOutOfRange {
        size: usize,
        min: usize,
        max: usize,
    },

    #[error("Coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate {
        x: f64,
        y: f64,
    },
}

/// Errors raised while reading the dictionary or the document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dictionary not readable at {path}: {source}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document not readable at {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while writing the rendered image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write image to {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write report to {path}: {message}")]
    Report {
        path: PathBuf,
        message: String,
    },
}

/// Top-level error type for texelmap.
///
/// Every variant is fatal for the run that produced it.
#[derive(Debug, Error)]
pub enum TexelError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl TexelError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an input loading error.
    #[must_use]
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Returns true if this is an output error.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}

/// Result type alias for texelmap operations.
pub type TexelResult<T> = Result<T, TexelError>;
