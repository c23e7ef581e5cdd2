//! Game Events
//!
//! Fire-and-forget notifications for presentation: highlights, info panel,
//! HUD counters and game over. Nothing in the core reads them back.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::core::vec2::FixedVec2;
use crate::game::token::{Team, TokenId, TokenStats, TokenType};
use crate::game::turn::GamePhase;

/// How a highlighted destination should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MoveKind {
    /// Empty cell
    Free = 0,
    /// Cell holding an opponent
    Attack = 1,
}

/// One legal destination of a selected token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHighlight {
    /// Destination cell
    pub coord: Coord,
    /// World position of the cell
    pub position: FixedVec2,
    /// Free move or attack
    pub kind: MoveKind,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A token was selected; `moves` is its highlight set
    TokenSelected {
        token: TokenId,
        moves: Vec<MoveHighlight>,
    },

    /// Selection dropped; clear highlights
    TokenDeselected {
        token: TokenId,
    },

    /// An empty destination was picked; show the move/defend choice
    ActionChoiceRequested {
        token: TokenId,
        destination: Coord,
        position: FixedVec2,
    },

    /// A token changed cells
    TokenMoved {
        token: TokenId,
        from: Coord,
        to: Coord,
        position: FixedVec2,
    },

    /// A token raised its guard
    TokenDefending {
        token: TokenId,
    },

    /// An attack landed (possibly for zero damage)
    TokenAttacked {
        attacker: TokenId,
        target: TokenId,
        damage: i32,
    },

    /// Stats shown in the info panel changed
    TokenStatsChanged {
        token: TokenId,
        health: i32,
        attack: i32,
        defence: i32,
    },

    /// A token died and left the board
    TokenRemoved {
        token: TokenId,
        team: Team,
        token_type: TokenType,
        coord: Coord,
    },

    /// Pointer is over a token
    TokenHovered {
        token: TokenId,
        team: Team,
        stats: TokenStats,
        position: FixedVec2,
    },

    /// Pointer left all tokens
    HoverCleared,

    /// Remaining action points
    ActionPointsChanged {
        points: u8,
    },

    /// Turn counter advanced
    TurnCounterChanged {
        turn: u32,
    },

    /// Control passed to another team
    ActivePlayerChanged {
        team: Team,
    },

    /// Game phase changed
    PhaseChanged {
        old_phase: GamePhase,
        new_phase: GamePhase,
    },

    /// Game finished
    GameOver {
        winner: Team,
    },
}

/// A notification stamped with the turn it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Turn counter when emitted
    pub turn: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(turn: u32, data: GameEventData) -> Self {
        Self { turn, data }
    }

    /// Create token moved event.
    pub fn token_moved(turn: u32, token: TokenId, from: Coord, to: Coord, position: FixedVec2) -> Self {
        Self::new(turn, GameEventData::TokenMoved { token, from, to, position })
    }

    /// Create stats changed event.
    pub fn stats_changed(turn: u32, token: TokenId, stats: TokenStats) -> Self {
        Self::new(
            turn,
            GameEventData::TokenStatsChanged {
                token,
                health: stats.health,
                attack: stats.attack,
                defence: stats.defence,
            },
        )
    }
}

/// Receiver for notifications, implemented by presentation layers.
pub trait EventSink: fmt::Debug {
    /// Handle one event. Must not call back into the core.
    fn notify(&mut self, event: &GameEvent);
}

/// Sink that logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn notify(&mut self, event: &GameEvent) {
        tracing::debug!(turn = event.turn, data = ?event.data, "event");
    }
}
