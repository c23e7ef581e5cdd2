//! # Tactical Board
//!
//! Rules core for a two-team, turn-based tactics game on an 8×8 grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TACTICAL BOARD                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── fixed.rs      - Q16.16 fixed-point arithmetic           │
//! │  ├── vec2.rs       - 2D fixed-point world positions          │
//! │  ├── coord.rs      - Grid coordinates and directions         │
//! │  └── hash.rs       - State hashing for verification          │
//! │                                                              │
//! │  game/             - Rules (deterministic)                   │
//! │  ├── token.rs      - Tokens and move generation              │
//! │  ├── board.rs      - Occupancy grid                          │
//! │  ├── player.rs     - Team rosters                            │
//! │  ├── layout.rs     - Starting layout and stats tables        │
//! │  ├── combat.rs     - Damage resolution                       │
//! │  ├── input.rs      - Input intents                           │
//! │  ├── selection.rs  - Selection / targeting protocol          │
//! │  ├── turn.rs       - Turn controller                         │
//! │  ├── events.rs     - Notifications for presentation          │
//! │  └── invariants.rs - Consistency checks                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic in game logic
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies
//! - No randomness: combat is a fixed formula
//!
//! Given identical configuration and intents, two controllers end in
//! states with identical [`TurnController::state_hash`] digests.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use tactical_board::{GameConfig, GridTransform, Intent, TurnController};
//!
//! let mut game = TurnController::new(&GameConfig::standard(), Arc::new(GridTransform::default())).unwrap();
//! game.handle_intent(Intent::select(1, 0));
//! game.handle_intent(Intent::select(1, 1));
//! let report = game.handle_intent(Intent::confirm_move()).unwrap();
//! assert_eq!(report.action_points, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use core::vec2::FixedVec2;
pub use core::coord::{Coord, Direction};
pub use game::board::{Board, CoordinateMapper, GridTransform};
pub use game::events::{EventSink, GameEvent, GameEventData};
pub use game::input::{Intent, IntentKind};
pub use game::layout::{ConfigError, GameConfig};
pub use game::token::{Team, Token, TokenId, TokenType};
pub use game::turn::{ActionReport, GamePhase, TurnController};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Board edge length in cells
pub const BOARD_SIZE: i32 = 8;

/// Action points granted at the start of each team's turn
pub const MAX_ACTION_POINTS_PER_TURN: u8 = 4;

/// Move-generation scan radius per direction
pub const MAX_TILES_PER_ACTION_POINT: i32 = 1;
