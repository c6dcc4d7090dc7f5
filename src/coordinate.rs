//! Normalized 2D embedding positions.

use serde::Serialize;

use crate::error::ValidationError;

/// A word's position in the 2D embedding plane.
///
/// Both axes are conventionally in `[0, 1]`, but any finite value is
/// accepted; positions outside the unit square simply land off-canvas and
/// get clipped when painted.
///
/// # Examples
///
/// ```
/// use texelmap::Coordinate;
///
/// let c = Coordinate::new(0.25, 0.75).unwrap();
/// assert_eq!(c.to_pixel(256), (64, 192));
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonFiniteCoordinate` if either axis is NaN
    /// or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self, ValidationError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    /// Horizontal axis.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical axis.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Scales to a `dim x dim` canvas, truncating toward zero.
    ///
    /// Values beyond the `i64` range saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_pixel(&self, dim: u32) -> (i64, i64) {
        let d = f64::from(dim);
        ((self.x * d) as i64, (self.y * d) as i64)
    }
}
