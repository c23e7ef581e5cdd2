//! Game invariants: consistency checks that detect bugs.
//!
//! None of these should ever fire for a controller driven only through its
//! public operations.

use std::collections::BTreeMap;
use std::fmt;

use crate::MAX_ACTION_POINTS_PER_TURN;
use crate::game::token::{Team, TokenId};
use crate::game::turn::TurnController;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check board, roster and turn invariants.
///
/// Returns every violation found, or an empty list if all hold.
#[must_use]
pub fn check_invariants(controller: &TurnController) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = controller.board();

    // Grid ↔ token coordinates
    let mut cells_per_token: BTreeMap<TokenId, u32> = BTreeMap::new();
    for (coord, id) in board.occupied() {
        *cells_per_token.entry(id).or_default() += 1;
        match board.token(id) {
            Some(token) if token.occupied_square != coord => {
                violations.push(InvariantViolation::new(format!(
                    "token {} stored at {} but found in cell {}",
                    id, token.occupied_square, coord
                )));
            }
            Some(_) => {}
            None => {
                violations.push(InvariantViolation::new(format!(
                    "cell {} references missing token {}",
                    coord, id
                )));
            }
        }
    }

    for token in board.tokens() {
        let cells = cells_per_token.get(&token.id).copied().unwrap_or(0);
        if cells != 1 {
            violations.push(InvariantViolation::new(format!(
                "token {} occupies {} cells",
                token.id, cells
            )));
        }
        if token.health <= 0 {
            violations.push(InvariantViolation::new(format!(
                "token {} is on the board with health {}",
                token.id, token.health
            )));
        }
    }

    // Rosters
    let mut rosters_per_token: BTreeMap<TokenId, u32> = BTreeMap::new();
    for team in Team::ALL {
        for &id in controller.player(team).active_tokens() {
            *rosters_per_token.entry(id).or_default() += 1;
            match board.token(id) {
                Some(token) if token.team != team => {
                    violations.push(InvariantViolation::new(format!(
                        "{} roster holds {} token {}",
                        team, token.team, id
                    )));
                }
                Some(_) => {}
                None => {
                    violations.push(InvariantViolation::new(format!(
                        "{} roster holds dead token {}",
                        team, id
                    )));
                }
            }
        }
    }

    for token in board.tokens() {
        let rosters = rosters_per_token.get(&token.id).copied().unwrap_or(0);
        if rosters != 1 {
            violations.push(InvariantViolation::new(format!(
                "token {} is in {} rosters",
                token.id, rosters
            )));
        }
    }

    // Action points
    if controller.action_points() > MAX_ACTION_POINTS_PER_TURN {
        violations.push(InvariantViolation::new(format!(
            "action points {} > max {}",
            controller.action_points(),
            MAX_ACTION_POINTS_PER_TURN
        )));
    }

    violations
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::game::board::GridTransform;
    use crate::game::input::Intent;
    use crate::game::layout::GameConfig;

    #[test]
    fn test_fresh_game_is_consistent() {
        let controller = TurnController::new(&GameConfig::standard(), Arc::new(GridTransform::default())).unwrap();
        assert!(check_invariants(&controller).is_empty());
    }

    #[test]
    fn test_holds_after_moves() {
        let mut controller =
            TurnController::new(&GameConfig::standard(), Arc::new(GridTransform::default())).unwrap();

        controller.handle_intent(Intent::select(1, 0));
        controller.handle_intent(Intent::select(1, 1));
        controller.handle_intent(Intent::confirm_defend());
        controller.end_turn();

        let violations = check_invariants(&controller);
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_removal_hook_keeps_consistency() {
        let mut controller =
            TurnController::new(&GameConfig::standard(), Arc::new(GridTransform::default())).unwrap();

        // A detached copy of the token is enough for the hook to clean up both sides.
        let mut board = controller.board().clone();
        let removed = board.remove_token(crate::core::coord::Coord::new(0, 0));
        assert!(removed.is_some());
        controller.on_token_removed(&removed.unwrap());
        assert!(check_invariants(&controller).is_empty());
    }

    #[test]
    fn test_violation_display() {
        let violation = InvariantViolation::new("token #3 occupies 2 cells".to_string());
        assert_eq!(violation.to_string(), "Invariant violation: token #3 occupies 2 cells");
    }
}
