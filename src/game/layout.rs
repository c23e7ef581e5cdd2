//! Starting Layout and Stats Configuration
//!
//! Static tables read once at game start: where each token begins and what
//! each token type's base stats are. Layout positions are authored 1-based
//! (`[1, 1]` is the bottom-left square) and converted on load.
//!
//! Any problem here is fatal. A layout entry whose type has no stats is
//! rejected rather than patched with a default type.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::BOARD_SIZE;
use crate::core::coord::Coord;
use crate::game::token::{Team, TokenStats, TokenType};

/// Configuration errors. All of them abort initialization.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A layout entry uses a type with no stats entry.
    #[error("no stats for token type {0}")]
    MissingStats(TokenType),

    /// Two stats entries for one type.
    #[error("duplicate stats for token type {0}")]
    DuplicateStats(TokenType),

    /// Stats that would create a dead token.
    #[error("stats for {token_type} have non-positive health {health}")]
    InvalidStats {
        /// Offending type
        token_type: TokenType,
        /// Configured health
        health: i32,
    },

    /// A layout entry lies off the board.
    #[error("layout entry {index} at {position:?} is off the board")]
    CoordOutOfRange {
        /// Entry index in the layout table
        index: usize,
        /// Position as authored (1-based)
        position: [i32; 2],
    },

    /// Two layout entries share a square.
    #[error("layout places two tokens on {0}")]
    DuplicateSquare(Coord),

    /// Malformed JSON.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// LAYOUT
// =============================================================================

/// One starting token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareSetup {
    /// 1-based `[file, rank]`
    pub position: [i32; 2],
    /// Token type
    pub token_type: TokenType,
    /// Owning team
    pub team: Team,
}

impl SquareSetup {
    /// Create an entry from a 1-based position.
    pub const fn new(file: i32, rank: i32, token_type: TokenType, team: Team) -> Self {
        Self { position: [file, rank], token_type, team }
    }

    /// 0-based board coordinate.
    pub fn coord(&self) -> Coord {
        Coord::new(self.position[0] - 1, self.position[1] - 1)
    }
}

/// Starting layout table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Entries in placement order
    pub squares: Vec<SquareSetup>,
}

impl BoardLayout {
    /// Number of starting tokens.
    pub fn token_count(&self) -> usize {
        self.squares.len()
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Stats table keyed by token type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSetStats {
    /// One entry per type
    pub stats: Vec<TokenStats>,
}

impl TokenSetStats {
    /// Stats for `token_type`, if configured.
    pub fn stats_for(&self, token_type: TokenType) -> Option<&TokenStats> {
        self.stats.iter().find(|s| s.token_type == token_type)
    }
}

// =============================================================================
// GAME CONFIG
// =============================================================================

/// Everything needed to seed a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting layout
    pub layout: BoardLayout,
    /// Stats per token type
    pub stats: TokenSetStats,
}

impl GameConfig {
    /// Stock stats: Knight 7/3/2, Rook 2/2/5 (health/attack/defence).
    pub fn standard_stats() -> TokenSetStats {
        TokenSetStats {
            stats: vec![
                TokenStats::new(TokenType::Knight, 7, 3, 2),
                TokenStats::new(TokenType::Rook, 2, 2, 5),
            ],
        }
    }

    /// Stock layout: each team fills its back rank with Rooks on the
    /// outer files and Knights between them.
    pub fn standard() -> Self {
        let mut squares = Vec::new();
        for (team, rank) in [(Team::White, 1), (Team::Black, BOARD_SIZE)] {
            squares.push(SquareSetup::new(1, rank, TokenType::Rook, team));
            for file in [2, 4, 5, 7] {
                squares.push(SquareSetup::new(file, rank, TokenType::Knight, team));
            }
            squares.push(SquareSetup::new(BOARD_SIZE, rank, TokenType::Rook, team));
        }

        Self {
            layout: BoardLayout { squares },
            stats: Self::standard_stats(),
        }
    }

    /// Parse a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the tables before any token is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_types = BTreeSet::new();
        for stats in &self.stats.stats {
            if !seen_types.insert(stats.token_type) {
                return Err(ConfigError::DuplicateStats(stats.token_type));
            }
            if stats.health <= 0 {
                return Err(ConfigError::InvalidStats {
                    token_type: stats.token_type,
                    health: stats.health,
                });
            }
        }

        let mut seen_squares = BTreeSet::new();
        for (index, square) in self.layout.squares.iter().enumerate() {
            let coord = square.coord();
            let on_board = (0..BOARD_SIZE).contains(&coord.x) && (0..BOARD_SIZE).contains(&coord.y);
            if !on_board {
                return Err(ConfigError::CoordOutOfRange {
                    index,
                    position: square.position,
                });
            }
            if !seen_squares.insert(coord) {
                return Err(ConfigError::DuplicateSquare(coord));
            }
            if self.stats.stats_for(square.token_type).is_none() {
                return Err(ConfigError::MissingStats(square.token_type));
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}
