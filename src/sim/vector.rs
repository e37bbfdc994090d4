//! 2D vector helpers
//!
//! Positions and velocities are plain `glam::Vec2` values. glam already covers
//! addition (vector or scalar), component-wise and scalar multiplication and
//! length; this module adds the shortening operation, which divides by the
//! length and must refuse to do so for a zero vector instead of producing NaN.

use glam::Vec2;

use crate::error::DomainError;

/// The simulation's vector type
pub type Vector2 = Vec2;

/// Checked length-dividing operation
pub trait VectorExt: Sized {
    /// Shrink the vector by `amount` along its own direction:
    /// `self * (1 - amount / |self|)`
    fn shorten_by_length(self, amount: f32) -> Result<Self, DomainError>;
}

impl VectorExt for Vec2 {
    fn shorten_by_length(self, amount: f32) -> Result<Self, DomainError> {
        let len = self.length();
        if len == 0.0 {
            return Err(DomainError::ZeroLength {
                op: "shorten_by_length",
            });
        }
        Ok(self * (1.0 - amount / len))
    }
}

/// Sign of each component, with zero mapping to zero
#[inline]
pub fn sign_or_zero(v: Vec2) -> Vec2 {
    let sign = |c: f32| {
        if c > 0.0 {
            1.0
        } else if c < 0.0 {
            -1.0
        } else {
            0.0
        }
    };
    Vec2::new(sign(v.x), sign(v.y))
}
