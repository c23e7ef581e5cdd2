//! Tokens
//!
//! A token is one unit on the board: a type tag, a team, integer stats and
//! the cached set of cells it may move to or attack this action.

use std::fmt;
use serde::{Serialize, Deserialize};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::MAX_TILES_PER_ACTION_POINT;
use crate::core::coord::{Coord, Direction};
use crate::core::vec2::FixedVec2;
use crate::game::board::{Board, CoordinateMapper};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Team identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    /// Moves first
    White = 0,
    /// Moves second
    Black = 1,
}

impl Team {
    /// Both teams in turn order.
    pub const ALL: [Team; 2] = [Team::White, Team::Black];

    /// The other team.
    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::White => write!(f, "White"),
            Team::Black => write!(f, "Black"),
        }
    }
}

/// Token type tag. Stats are looked up from configuration, not the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    /// Balanced attacker
    Knight = 0,
    /// Fragile but heavily armoured
    Rook = 1,
    /// Reserved type with no stock stats
    Bishop = 2,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Unique token identifier, assigned by the board at placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Base stats for one token type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Type these stats apply to
    pub token_type: TokenType,
    /// Starting health
    pub health: i32,
    /// Damage dealt before the target's defence is subtracted
    pub attack: i32,
    /// Damage absorbed per hit
    pub defence: i32,
}

impl TokenStats {
    /// Create a stats entry.
    pub const fn new(token_type: TokenType, health: i32, attack: i32, defence: i32) -> Self {
        Self { token_type, health, attack, defence }
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// One unit on the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Unique id
    pub id: TokenId,

    /// Type tag
    pub token_type: TokenType,

    /// Owning team
    pub team: Team,

    /// Cell currently occupied
    pub occupied_square: Coord,

    /// World position reported to presentation
    pub position: FixedVec2,

    /// Remaining health; the token dies at 0 or below
    pub health: i32,

    /// Attack stat
    pub attack: i32,

    /// Defence stat
    pub defence: i32,

    /// Defending tokens cannot act and cannot be targeted
    pub is_defending: bool,

    /// Legal destinations from the last move generation
    pub available_moves: Vec<Coord>,
}

impl Token {
    /// Create a token from its stats template.
    pub fn new(
        id: TokenId,
        team: Team,
        occupied_square: Coord,
        position: FixedVec2,
        stats: &TokenStats,
    ) -> Self {
        Self {
            id,
            token_type: stats.token_type,
            team,
            occupied_square,
            position,
            health: stats.health,
            attack: stats.attack,
            defence: stats.defence,
            is_defending: false,
            available_moves: Vec::new(),
        }
    }

    /// Current stats as a template-shaped value.
    pub fn stats(&self) -> TokenStats {
        TokenStats::new(self.token_type, self.health, self.attack, self.defence)
    }

    /// Is the token still alive?
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Same team as `other`?
    #[inline]
    pub fn is_from_same_team(&self, other: &Token) -> bool {
        self.team == other.team
    }

    /// Can this token move to (or attack) `coord` right now?
    ///
    /// Defending suppresses all movement.
    pub fn can_move_to(&self, coord: Coord) -> bool {
        !self.is_defending && self.available_moves.contains(&coord)
    }

    /// Compute legal destinations using the standard one-tile range.
    pub fn scan_available_squares(&self, board: &Board) -> Vec<Coord> {
        self.scan_available_squares_with_range(board, MAX_TILES_PER_ACTION_POINT)
    }

    /// Compute legal destinations scanning up to `range` cells per direction.
    ///
    /// Directions are scanned Left, Up, Right, Down, nearest cell first:
    /// - off-board ends the direction
    /// - an empty cell is legal and the scan continues
    /// - an ally ends the direction and is not legal
    /// - a defending opponent is not legal but does not end the direction
    /// - any other opponent is legal (an attack) and ends the direction
    pub fn scan_available_squares_with_range(&self, board: &Board, range: i32) -> Vec<Coord> {
        let mut moves = Vec::new();

        for direction in Direction::ALL {
            for distance in 1..=range {
                let next = self.occupied_square.offset(direction, distance);

                if !board.is_valid_coord(next) {
                    break;
                }

                match board.token_at(next) {
                    None => moves.push(next),
                    Some(other) if other.is_from_same_team(self) => break,
                    Some(other) if other.is_defending => continue,
                    Some(_) => {
                        moves.push(next);
                        break;
                    }
                }
            }
        }

        #[cfg(feature = "debug-tracing")]
        trace!(token = %self.id, from = %self.occupied_square, ?moves, "scanned moves");

        moves
    }

    /// Does any available move land on a token of `token_type`?
    pub fn is_attacking_token_of_type(&self, board: &Board, token_type: TokenType) -> bool {
        self.available_moves
            .iter()
            .any(|square| board.token_at(*square).is_some_and(|t| t.token_type == token_type))
    }

    /// Update the stored coordinate and refresh the world position.
    ///
    /// No legality check; callers establish it with `can_move_to` first.
    pub fn move_token(&mut self, coord: Coord, mapper: &dyn CoordinateMapper) {
        self.occupied_square = coord;
        self.position = mapper.position_for(coord);
    }

    /// Subtract `damage` from health. Returns true if the token died.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health = self.health.saturating_sub(damage.max(0));
        !self.is_alive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
