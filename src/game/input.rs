//! Input Intents
//!
//! Discrete events already translated from pointer/device input upstream.
//! The core never sees screen positions, only board coordinates.

use serde::{Serialize, Deserialize};
use crate::core::coord::Coord;

/// What the user meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentKind {
    /// Pointer is over a cell (info panel only, never mutates)
    Hover = 0,
    /// Cell clicked/tapped
    Select = 1,
    /// "Move" chosen for a pending destination
    ConfirmMove = 2,
    /// "Defend" chosen for a pending destination
    ConfirmDefend = 3,
    /// Drop the current selection
    Cancel = 4,
}

/// One input intent.
///
/// `coord` is meaningful for `Hover` and `Select`; confirm and cancel
/// intents act on the pending selection and ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    /// Intent kind
    pub kind: IntentKind,
    /// Target cell
    pub coord: Coord,
}

impl Intent {
    /// Create an intent.
    pub const fn new(kind: IntentKind, coord: Coord) -> Self {
        Self { kind, coord }
    }

    /// Hover over `(x, y)`.
    pub const fn hover(x: i32, y: i32) -> Self {
        Self::new(IntentKind::Hover, Coord::new(x, y))
    }

    /// Select `(x, y)`.
    pub const fn select(x: i32, y: i32) -> Self {
        Self::new(IntentKind::Select, Coord::new(x, y))
    }

    /// Confirm a plain move to the pending destination.
    pub const fn confirm_move() -> Self {
        Self::new(IntentKind::ConfirmMove, Coord::new(0, 0))
    }

    /// Confirm move-then-defend to the pending destination.
    pub const fn confirm_defend() -> Self {
        Self::new(IntentKind::ConfirmDefend, Coord::new(0, 0))
    }

    /// Cancel the current selection.
    pub const fn cancel() -> Self {
        Self::new(IntentKind::Cancel, Coord::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Intent::select(2, 3), Intent::new(IntentKind::Select, Coord::new(2, 3)));
        assert_eq!(Intent::confirm_defend().kind, IntentKind::ConfirmDefend);
        assert_eq!(Intent::hover(4, 1).coord, Coord::new(4, 1));
    }
}
