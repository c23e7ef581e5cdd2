//! Combat Resolution
//!
//! Deterministic, no randomness: `damage = max(0, attack - defence)`.
//! A target at or below zero health is taken off the board in the same call.

use tracing::debug;

use crate::core::coord::Coord;
use crate::game::board::Board;
use crate::game::token::{Token, TokenId};

/// Outcome of one attack.
#[derive(Clone, Debug)]
pub struct CombatOutcome {
    /// Attacking token
    pub attacker: TokenId,
    /// Attacked token
    pub target: TokenId,
    /// Cell the target stood on
    pub target_square: Coord,
    /// Damage dealt (never negative)
    pub damage: i32,
    /// Target health after the hit
    pub remaining_health: i32,
    /// The target, if the hit killed it and it was removed from the board
    pub removed: Option<Token>,
}

impl CombatOutcome {
    /// Did the target die?
    pub fn killed(&self) -> bool {
        self.removed.is_some()
    }
}

/// Damage dealt by `attack` against `defence`.
#[inline]
pub fn calculate_damage(attack: i32, defence: i32) -> i32 {
    attack.saturating_sub(defence).max(0)
}

/// Resolve `attacker` hitting whatever stands on `target_square`.
///
/// Returns `None` if either token is missing or both are on the same team.
/// The attacker is not moved here.
pub fn resolve_attack(board: &mut Board, attacker: TokenId, target_square: Coord) -> Option<CombatOutcome> {
    let (attack, attacker_team) = {
        let token = board.token(attacker)?;
        (token.attack, token.team)
    };

    let target = board.token_at(target_square)?;
    if target.team == attacker_team {
        return None;
    }
    let target_id = target.id;
    let damage = calculate_damage(attack, target.defence);

    let target = board.token_mut(target_id)?;
    let died = target.take_damage(damage);
    let remaining_health = target.health;

    debug!(
        attacker = %attacker,
        target = %target_id,
        damage,
        remaining_health,
        died,
        "attack resolved"
    );

    let removed = if died {
        board.remove_token(target_square)
    } else {
        None
    };

    Some(CombatOutcome {
        attacker,
        target: target_id,
        target_square,
        damage,
        remaining_health,
        removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::token::{Team, TokenStats, TokenType};

    #[test]
    fn test_damage_formula() {
        assert_eq!(calculate_damage(3, 5), 0);
        assert_eq!(calculate_damage(5, 2), 3);
        assert_eq!(calculate_damage(4, 4), 0);
        assert_eq!(calculate_damage(i32::MIN, i32::MAX), 0);
    }

    #[test]
    fn test_zero_damage_leaves_health() {
        let mut board = Board::default();
        let knight = board
            .spawn_token(Coord::new(2, 2), Team::White, &TokenStats::new(TokenType::Knight, 7, 3, 2))
            .unwrap();
        board.spawn_token(Coord::new(2, 3), Team::Black, &TokenStats::new(TokenType::Rook, 2, 2, 5));

        let outcome = resolve_attack(&mut board, knight, Coord::new(2, 3)).unwrap();
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.remaining_health, 2);
        assert!(!outcome.killed());
        assert_eq!(board.token_at(Coord::new(2, 3)).unwrap().health, 2);
    }

    #[test]
    fn test_lethal_damage_removes_target() {
        let mut board = Board::default();
        let attacker = board
            .spawn_token(Coord::new(4, 4), Team::White, &TokenStats::new(TokenType::Knight, 7, 5, 2))
            .unwrap();
        let target = board
            .spawn_token(Coord::new(4, 5), Team::Black, &TokenStats::new(TokenType::Rook, 2, 2, 2))
            .unwrap();

        let outcome = resolve_attack(&mut board, attacker, Coord::new(4, 5)).unwrap();
        assert_eq!(outcome.damage, 3);
        assert_eq!(outcome.remaining_health, -1);
        assert_eq!(outcome.removed.as_ref().map(|t| t.id), Some(target));
        assert!(board.token_at(Coord::new(4, 5)).is_none());
        assert!(!board.has_token(target));
        // Attacker stays put; moving in is the caller's job.
        assert_eq!(board.coords_of(attacker), Some(Coord::new(4, 4)));
    }

    #[test]
    fn test_no_friendly_fire() {
        let mut board = Board::default();
        let stats = TokenStats::new(TokenType::Knight, 7, 3, 2);
        let a = board.spawn_token(Coord::new(0, 0), Team::White, &stats).unwrap();
        board.spawn_token(Coord::new(0, 1), Team::White, &stats);

        assert!(resolve_attack(&mut board, a, Coord::new(0, 1)).is_none());
        assert!(resolve_attack(&mut board, a, Coord::new(5, 5)).is_none());
    }
}
