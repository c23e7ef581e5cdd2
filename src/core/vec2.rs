//! Fixed-Point 2D World Position
//!
//! The board lies in the world X/Z plane; the vector's `y` component maps
//! to the world depth axis. Presentation decides what to do with it.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::fixed::{Fixed, fixed_mul_int, to_float};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Offset by whole steps of `step` along each axis.
    #[inline]
    pub fn add_steps(self, step: Fixed, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(fixed_mul_int(step, dx)),
            y: self.y.wrapping_add(fixed_mul_int(step, dy)),
        }
    }

    /// Convert to floats for rendering.
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.y))
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.to_floats();
        write!(f, "FixedVec2({:.3}, {:.3})", x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FIXED_ONE};

    #[test]
    fn test_add_steps() {
        let origin = FixedVec2::new(to_fixed(-3.5), to_fixed(-3.5));
        let v = origin.add_steps(FIXED_ONE, 2, 7);
        assert_eq!(v, FixedVec2::new(to_fixed(-1.5), to_fixed(3.5)));
    }
}
