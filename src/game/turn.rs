//! Turn Controller
//!
//! Owns the whole game aggregate (board, both rosters, selection state,
//! phase, turn counter and action points) and is the only entry point for
//! intents. Single-threaded: every call runs to completion before the next.
//!
//! ```text
//!   Init ──▶ Play ◀──▶ Paused
//!              │
//!              ▼
//!           Finished
//! ```

use std::sync::Arc;

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::MAX_ACTION_POINTS_PER_TURN;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::board::{Board, CoordinateMapper};
use crate::game::events::{EventSink, GameEvent, GameEventData};
use crate::game::input::Intent;
use crate::game::layout::{ConfigError, GameConfig};
use crate::game::player::Player;
use crate::game::selection::{ProtocolContext, ResolvedAction, Selection, SelectionProtocol};
use crate::game::token::{Team, Token};

// =============================================================================
// PHASE
// =============================================================================

/// Game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GamePhase {
    /// Seeding the board
    #[default]
    Init = 0,
    /// Accepting intents
    Play = 1,
    /// Suspended by the UI; nothing is accepted
    Paused = 2,
    /// Game over (terminal)
    Finished = 3,
}

/// What one accepted intent did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    /// The resolved action
    pub action: ResolvedAction,
    /// Action points left after paying for it
    pub action_points: u8,
    /// Paying for it ended the turn
    pub turn_ended: bool,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Turn and game state machine.
#[derive(Debug)]
pub struct TurnController {
    board: Board,
    white: Player,
    black: Player,
    selection: SelectionProtocol,
    phase: GamePhase,
    active_team: Team,
    turn_counter: u32,
    action_points: u8,
    winner: Option<Team>,
    pending_events: Vec<GameEvent>,
    sink: Option<Box<dyn EventSink>>,
}

impl TurnController {
    /// Run Init: validate `config`, seed the board and rosters, then enter Play.
    ///
    /// Any configuration problem aborts before a controller exists.
    pub fn new(config: &GameConfig, mapper: Arc<dyn CoordinateMapper>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut controller = Self {
            board: Board::new(mapper),
            white: Player::new(Team::White),
            black: Player::new(Team::Black),
            selection: SelectionProtocol::new(),
            phase: GamePhase::Init,
            active_team: Team::White,
            turn_counter: 1,
            action_points: MAX_ACTION_POINTS_PER_TURN,
            winner: None,
            pending_events: Vec::new(),
            sink: None,
        };

        for (index, square) in config.layout.squares.iter().enumerate() {
            let stats = config
                .stats
                .stats_for(square.token_type)
                .ok_or(ConfigError::MissingStats(square.token_type))?;
            let id = controller
                .board
                .spawn_token(square.coord(), square.team, stats)
                .ok_or(ConfigError::CoordOutOfRange { index, position: square.position })?;
            controller.player_mut(square.team).add_token(id);
        }

        info!(
            tokens = controller.board.token_count(),
            white = controller.white.len(),
            black = controller.black.len(),
            "board seeded"
        );

        controller.refresh_active_moves();
        controller.push_event(GameEventData::TurnCounterChanged { turn: controller.turn_counter });
        controller.push_event(GameEventData::ActivePlayerChanged { team: controller.active_team });
        controller.push_event(GameEventData::ActionPointsChanged { points: controller.action_points });
        controller.set_phase(GamePhase::Play);

        Ok(controller)
    }

    /// Inject a notification sink. Events already queued (the Init
    /// notifications) are drained into it, and from then on every event goes
    /// to the sink instead of the internal queue.
    pub fn with_sink(mut self, mut sink: Box<dyn EventSink>) -> Self {
        for event in self.take_events() {
            sink.notify(&event);
        }
        self.sink = Some(sink);
        self
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Feed one intent to the selection protocol.
    ///
    /// Rejected outside Play. Returns a report when the intent resolved an
    /// action, which always costs one action point.
    pub fn handle_intent(&mut self, intent: Intent) -> Option<ActionReport> {
        if !self.is_game_in_progress() {
            warn!(?intent, phase = ?self.phase, "intent rejected");
            return None;
        }

        let mut events = Vec::new();
        let resolution = {
            let mut ctx = ProtocolContext {
                board: &mut self.board,
                active_team: self.active_team,
                turn: self.turn_counter,
                events: &mut events,
            };
            self.selection.handle(intent, &mut ctx)
        };
        self.push_events(events);

        let resolution = resolution?;
        if let Some(removed) = &resolution.removed {
            self.on_token_removed(removed);
        }

        let (action_points, turn_ended) = self.consume_action_point();
        debug!(action = ?resolution.action, action_points, turn_ended, "action resolved");

        Some(ActionReport {
            action: resolution.action,
            action_points,
            turn_ended,
        })
    }

    /// Spend one action point of the active player. Returns true if that
    /// ended the turn.
    pub fn use_active_player_action_point(&mut self) -> bool {
        if !self.is_game_in_progress() {
            warn!(phase = ?self.phase, "action point use rejected");
            return false;
        }
        self.consume_action_point().1
    }

    fn consume_action_point(&mut self) -> (u8, bool) {
        self.action_points = self.action_points.saturating_sub(1);
        let remaining = self.action_points;
        self.push_event(GameEventData::ActionPointsChanged { points: remaining });

        let turn_ended = remaining == 0 && self.end_turn();
        (remaining, turn_ended)
    }

    /// End the active player's turn.
    ///
    /// If either roster is empty the game finishes instead. Returns false
    /// (and does nothing) outside Play.
    pub fn end_turn(&mut self) -> bool {
        if !self.is_game_in_progress() {
            warn!(phase = ?self.phase, "end turn rejected");
            return false;
        }

        self.clear_selection();

        if self.white.is_empty() || self.black.is_empty() {
            let winner = if self.white.is_empty() { Team::Black } else { Team::White };
            self.winner = Some(winner);
            self.set_phase(GamePhase::Finished);
            self.push_event(GameEventData::GameOver { winner });
            info!(%winner, turn = self.turn_counter, "game over");
            return true;
        }

        self.turn_counter += 1;
        self.active_team = self.active_team.opponent();
        self.action_points = MAX_ACTION_POINTS_PER_TURN;
        self.board.clear_defending(self.active_team);
        self.refresh_active_moves();

        info!(turn = self.turn_counter, team = %self.active_team, "turn started");
        self.push_event(GameEventData::TurnCounterChanged { turn: self.turn_counter });
        self.push_event(GameEventData::ActivePlayerChanged { team: self.active_team });
        self.push_event(GameEventData::ActionPointsChanged { points: self.action_points });
        true
    }

    /// Pause or resume. Only Play ⇄ Paused is allowed; returns whether the
    /// phase changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let next = match (self.phase, paused) {
            (GamePhase::Play, true) => GamePhase::Paused,
            (GamePhase::Paused, false) => GamePhase::Play,
            (phase, _) => {
                debug!(?phase, paused, "pause toggle ignored");
                return false;
            }
        };
        self.set_phase(next);
        true
    }

    /// Drop a dead token from its roster (and from the board if it is
    /// somehow still there).
    pub fn on_token_removed(&mut self, token: &Token) {
        if self.board.token_id_at(token.occupied_square) == Some(token.id) {
            self.board.remove_token(token.occupied_square);
        }
        if self.player_mut(token.team).remove_token(token.id) {
            info!(
                token = %token.id,
                team = %token.team,
                left = self.player(token.team).len(),
                "token removed"
            );
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True only in Play.
    #[inline]
    pub fn is_game_in_progress(&self) -> bool {
        self.phase == GamePhase::Play
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Team allowed to act.
    pub fn active_team(&self) -> Team {
        self.active_team
    }

    /// Turn counter, starting at 1.
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Action points left this turn.
    pub fn action_points(&self) -> u8 {
        self.action_points
    }

    /// Winner, once Finished.
    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Roster of `team`.
    pub fn player(&self, team: Team) -> &Player {
        match team {
            Team::White => &self.white,
            Team::Black => &self.black,
        }
    }

    /// Selection protocol state.
    pub fn selection(&self) -> Selection {
        self.selection.state()
    }

    /// Digest of everything that affects play.
    pub fn state_hash(&self) -> StateHash {
        compute_state_hash(self.turn_counter, |hasher| {
            hasher.update_u8(self.phase as u8);
            hasher.update_u8(self.active_team as u8);
            hasher.update_u8(self.action_points);

            // BTreeMap order: ascending id
            for token in self.board.tokens() {
                hasher.update_u32(token.id.0);
                hasher.update_u8(token.token_type as u8);
                hasher.update_u8(token.team as u8);
                hasher.update_coord(token.occupied_square);
                hasher.update_i32(token.health);
                hasher.update_i32(token.attack);
                hasher.update_i32(token.defence);
                hasher.update_bool(token.is_defending);
            }
        })
    }

    /// Take pending events (consumes them). Always empty once a sink has
    /// been injected.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn player_mut(&mut self, team: Team) -> &mut Player {
        match team {
            Team::White => &mut self.white,
            Team::Black => &mut self.black,
        }
    }

    fn refresh_active_moves(&mut self) {
        let player = match self.active_team {
            Team::White => &self.white,
            Team::Black => &self.black,
        };
        player.generate_all_possible_moves(&mut self.board);
    }

    fn clear_selection(&mut self) {
        let mut events = Vec::new();
        let mut ctx = ProtocolContext {
            board: &mut self.board,
            active_team: self.active_team,
            turn: self.turn_counter,
            events: &mut events,
        };
        self.selection.reset(&mut ctx);
        self.push_events(events);
    }

    fn set_phase(&mut self, new_phase: GamePhase) {
        let old_phase = self.phase;
        if old_phase == new_phase {
            return;
        }
        self.phase = new_phase;
        info!(?old_phase, ?new_phase, "phase changed");
        self.push_event(GameEventData::PhaseChanged { old_phase, new_phase });
    }

    fn push_event(&mut self, data: GameEventData) {
        let event = GameEvent::new(self.turn_counter, data);
        self.deliver(event);
    }

    fn push_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: GameEvent) {
        match self.sink.as_mut() {
            Some(sink) => sink.notify(&event),
            None => self.pending_events.push(event),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
