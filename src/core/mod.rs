//! Core deterministic primitives.
//!
//! Integer-only types shared by the game layer: grid coordinates,
//! fixed-point world positions and state hashing.

pub mod fixed;
pub mod vec2;
pub mod coord;
pub mod hash;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use vec2::FixedVec2;
pub use coord::{Coord, Direction};
pub use hash::{StateHash, StateHasher, compute_state_hash};
