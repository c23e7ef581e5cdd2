//! Game Logic Module
//!
//! All rules code. Deterministic: no floating point in game logic, no
//! HashMap, no wall clock.
//!
//! ## Module Structure
//!
//! - `token`: Token identity, stats and move generation
//! - `board`: 8×8 occupancy grid and coordinate mapping
//! - `player`: Per-team rosters
//! - `layout`: Starting layout and stats configuration
//! - `combat`: Damage resolution
//! - `input`: Input intents
//! - `selection`: Selection / targeting state machine
//! - `turn`: Turn controller (phase, action points, win detection)
//! - `events`: Notifications for presentation
//! - `invariants`: Consistency checks for tests and tooling

pub mod token;
pub mod board;
pub mod player;
pub mod layout;
pub mod combat;
pub mod input;
pub mod selection;
pub mod turn;
pub mod events;
pub mod invariants;

// Re-export key types
pub use token::{Team, Token, TokenId, TokenStats, TokenType};
pub use board::{Board, CoordinateMapper, GridTransform};
pub use player::Player;
pub use layout::{BoardLayout, ConfigError, GameConfig, SquareSetup, TokenSetStats};
pub use combat::{CombatOutcome, calculate_damage, resolve_attack};
pub use input::{Intent, IntentKind};
pub use selection::{ResolvedAction, Selection};
pub use turn::{ActionReport, GamePhase, TurnController};
pub use events::{EventSink, GameEvent, GameEventData, MoveHighlight, MoveKind, TracingSink};
pub use invariants::{InvariantViolation, check_invariants};
