//! Distance-to-parameter mapping.
//!
//! A theremin maps the distance between a hand and a fixed antenna to an
//! audio parameter. Both pitch and volume use the same exponential falloff
//! shape with different bounds and sensitivities.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("sensitivity must be positive and finite, got {0}")]
    BadSensitivity(f32),
    #[error("curve bounds must be finite with min <= max, got [{min}, {max}]")]
    BadBounds { min: f32, max: f32 },
}

/// Affine remap of `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Inputs outside the source range extrapolate linearly; callers that need
/// clamping do it themselves. Used to carry raw tracker pixel coordinates
/// into scene space.
#[inline]
pub fn linear_remap(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    ((value - in_min) * (out_max - out_min)) / (in_max - in_min) + out_min
}

/// Exponential falloff from `max` at distance 0 toward `min` as distance
/// grows. Monotonically decreasing and bounded within `[min, max]` for all
/// non-negative distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FalloffCurve {
    pub min: f32,
    pub max: f32,
    pub sensitivity: f32,
}

impl FalloffCurve {
    pub const fn new(min: f32, max: f32, sensitivity: f32) -> Self {
        Self {
            min,
            max,
            sensitivity,
        }
    }

    pub fn validate(&self) -> Result<(), CurveError> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(CurveError::BadSensitivity(self.sensitivity));
        }
        if !(self.min.is_finite() && self.max.is_finite() && self.min <= self.max) {
            return Err(CurveError::BadBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn value_at(&self, distance: f32) -> f32 {
        (-distance * self.sensitivity).exp() * (self.max - self.min) + self.min
    }
}
