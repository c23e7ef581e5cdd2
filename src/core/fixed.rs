//! Q16.16 Fixed-Point Scalars
//!
//! World positions handed to presentation are expressed in fixed-point so
//! that the coordinate transform stays integer-only and reproducible.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  [S][IIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]   (i32)             │
//! │  Range: -32768.0 to +32767.99998                            │
//! │  Precision: 1/65536                                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

/// Q16.16 fixed-point number stored as i32.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE;

/// Default edge length of one board square: 1.0 world unit.
pub const DEFAULT_SQUARE_SIZE: Fixed = FIXED_ONE;

/// Convert a compile-time float to fixed-point.
///
/// Only use for constants and configuration, never inside rule code.
///
/// ```
/// use tactical_board::core::fixed::{to_fixed, FIXED_ONE};
/// const SQUARE: i32 = to_fixed(2.5);
/// assert_eq!(SQUARE, FIXED_ONE * 2 + FIXED_ONE / 2);
/// ```
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display only.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply a fixed-point number by a plain integer.
#[inline]
pub fn fixed_mul_int(a: Fixed, n: i32) -> Fixed {
    a.wrapping_mul(n)
}
