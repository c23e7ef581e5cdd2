//! Selection / Targeting Protocol
//!
//! Turns "a cell was selected" intents into board mutations.
//!
//! ```text
//!   NoSelection ──select own token──▶ TokenSelected
//!        ▲                              │    │
//!        │◀──select opponent (attack)───┘    │ select empty destination
//!        │                                   ▼
//!        │◀──confirm move / defend──── AwaitingActionChoice
//!        │◀──cancel (from either selected state)
//! ```
//!
//! The protocol never touches action points or rosters. Every resolved
//! action is returned to the caller, which charges the action point and
//! handles any token the action killed.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::coord::Coord;
use crate::game::board::Board;
use crate::game::combat::resolve_attack;
use crate::game::events::{GameEvent, GameEventData, MoveHighlight, MoveKind};
use crate::game::input::{Intent, IntentKind};
use crate::game::token::{Team, Token, TokenId};

/// Protocol state. Each variant carries exactly what it needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing selected
    #[default]
    NoSelection,
    /// A token is selected and its moves are highlighted
    TokenSelected {
        token: TokenId,
    },
    /// An empty destination was picked; waiting for move or defend
    AwaitingActionChoice {
        token: TokenId,
        destination: Coord,
    },
}

impl Selection {
    /// The selected token, if any.
    pub fn token(&self) -> Option<TokenId> {
        match *self {
            Selection::NoSelection => None,
            Selection::TokenSelected { token } => Some(token),
            Selection::AwaitingActionChoice { token, .. } => Some(token),
        }
    }
}

/// An action that completed and costs one action point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedAction {
    /// Plain move to an empty cell
    Moved {
        token: TokenId,
        from: Coord,
        to: Coord,
    },
    /// Move to an empty cell, then defend
    MovedAndDefended {
        token: TokenId,
        from: Coord,
        to: Coord,
    },
    /// Attack on an opponent; the attacker only moves in on a kill
    Attacked {
        attacker: TokenId,
        target: TokenId,
        target_square: Coord,
        damage: i32,
        killed: bool,
    },
    /// Selection dropped
    Cancelled {
        token: TokenId,
    },
}

/// A resolved action plus the token it killed, if any.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// What happened
    pub action: ResolvedAction,
    /// Token taken off the board; its roster entry is still live
    pub removed: Option<Token>,
}

/// Everything the protocol may read or write for one intent.
pub struct ProtocolContext<'a> {
    /// Board to query and mutate
    pub board: &'a mut Board,
    /// Team allowed to act
    pub active_team: Team,
    /// Turn stamp for emitted events
    pub turn: u32,
    /// Event queue
    pub events: &'a mut Vec<GameEvent>,
}

impl ProtocolContext<'_> {
    fn emit(&mut self, data: GameEventData) {
        self.events.push(GameEvent::new(self.turn, data));
    }
}

/// Selection state machine.
#[derive(Clone, Debug, Default)]
pub struct SelectionProtocol {
    state: Selection,
}

impl SelectionProtocol {
    /// Start with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> Selection {
        self.state
    }

    /// Drop any selection without charging anything (turn change).
    pub fn reset(&mut self, ctx: &mut ProtocolContext<'_>) {
        if let Some(token) = self.state.token() {
            debug!(token = %token, "selection reset");
            ctx.emit(GameEventData::TokenDeselected { token });
        }
        self.state = Selection::NoSelection;
    }

    /// Apply one intent. Returns the resolved action, if the intent
    /// completed one; illegal intents leave the state unchanged.
    pub fn handle(&mut self, intent: Intent, ctx: &mut ProtocolContext<'_>) -> Option<Resolution> {
        match (intent.kind, self.state) {
            (IntentKind::Hover, _) => {
                self.hover(intent.coord, ctx);
                None
            }

            (IntentKind::Select, Selection::NoSelection) => {
                self.select_token(intent.coord, ctx);
                None
            }
            (IntentKind::Select, Selection::TokenSelected { token }) => {
                self.select_destination(token, intent.coord, ctx)
            }

            (IntentKind::ConfirmMove, Selection::AwaitingActionChoice { token, destination }) => {
                self.confirm(token, destination, false, ctx)
            }
            (IntentKind::ConfirmDefend, Selection::AwaitingActionChoice { token, destination }) => {
                self.confirm(token, destination, true, ctx)
            }

            (IntentKind::Cancel, Selection::TokenSelected { token })
            | (IntentKind::Cancel, Selection::AwaitingActionChoice { token, .. }) => {
                debug!(token = %token, "selection cancelled");
                self.deselect(token, ctx);
                Some(Resolution {
                    action: ResolvedAction::Cancelled { token },
                    removed: None,
                })
            }

            (kind, state) => {
                debug!(?kind, ?state, "intent ignored");
                None
            }
        }
    }

    fn hover(&self, coord: Coord, ctx: &mut ProtocolContext<'_>) {
        let data = match ctx.board.token_at(coord) {
            Some(token) => GameEventData::TokenHovered {
                token: token.id,
                team: token.team,
                stats: token.stats(),
                position: token.position,
            },
            None => GameEventData::HoverCleared,
        };
        ctx.emit(data);
    }

    fn select_token(&mut self, coord: Coord, ctx: &mut ProtocolContext<'_>) {
        let Some(token) = ctx.board.token_at(coord) else {
            return;
        };
        if token.team != ctx.active_team || token.is_defending {
            return;
        }
        let id = token.id;

        let moves = ctx.board.select_available_squares(id).map(<[Coord]>::to_vec).unwrap_or_default();
        let highlights = moves
            .iter()
            .map(|&coord| MoveHighlight {
                coord,
                position: ctx.board.position_for(coord),
                kind: if ctx.board.token_at(coord).is_some() {
                    MoveKind::Attack
                } else {
                    MoveKind::Free
                },
            })
            .collect();

        debug!(token = %id, at = %coord, ?moves, "token selected");
        self.state = Selection::TokenSelected { token: id };
        ctx.emit(GameEventData::TokenSelected { token: id, moves: highlights });
    }

    fn select_destination(
        &mut self,
        token: TokenId,
        coord: Coord,
        ctx: &mut ProtocolContext<'_>,
    ) -> Option<Resolution> {
        let Some(selected) = ctx.board.token(token) else {
            self.reset(ctx);
            return None;
        };
        if !selected.can_move_to(coord) {
            return None;
        }

        if ctx.board.token_at(coord).is_some() {
            return self.attack(token, coord, ctx);
        }

        debug!(token = %token, destination = %coord, "awaiting action choice");
        self.state = Selection::AwaitingActionChoice { token, destination: coord };
        ctx.emit(GameEventData::ActionChoiceRequested {
            token,
            destination: coord,
            position: ctx.board.position_for(coord),
        });
        None
    }

    fn attack(&mut self, attacker: TokenId, coord: Coord, ctx: &mut ProtocolContext<'_>) -> Option<Resolution> {
        let from = ctx.board.coords_of(attacker)?;
        let outcome = resolve_attack(ctx.board, attacker, coord)?;

        ctx.emit(GameEventData::TokenAttacked {
            attacker,
            target: outcome.target,
            damage: outcome.damage,
        });

        match &outcome.removed {
            Some(dead) => {
                ctx.emit(GameEventData::TokenRemoved {
                    token: dead.id,
                    team: dead.team,
                    token_type: dead.token_type,
                    coord,
                });
                if ctx.board.move_token(attacker, from, coord) {
                    let position = ctx.board.position_for(coord);
                    ctx.events.push(GameEvent::token_moved(ctx.turn, attacker, from, coord, position));
                }
            }
            None => {
                if let Some(target) = ctx.board.token(outcome.target) {
                    let stats = target.stats();
                    ctx.events.push(GameEvent::stats_changed(ctx.turn, outcome.target, stats));
                }
            }
        }

        self.deselect(attacker, ctx);
        Some(Resolution {
            action: ResolvedAction::Attacked {
                attacker,
                target: outcome.target,
                target_square: coord,
                damage: outcome.damage,
                killed: outcome.killed(),
            },
            removed: outcome.removed,
        })
    }

    fn confirm(
        &mut self,
        token: TokenId,
        destination: Coord,
        defend: bool,
        ctx: &mut ProtocolContext<'_>,
    ) -> Option<Resolution> {
        let Some(from) = ctx.board.coords_of(token) else {
            self.reset(ctx);
            return None;
        };
        if !ctx.board.move_token(token, from, destination) {
            debug!(token = %token, destination = %destination, "destination no longer free");
            self.reset(ctx);
            return None;
        }

        let position = ctx.board.position_for(destination);
        ctx.events.push(GameEvent::token_moved(ctx.turn, token, from, destination, position));

        if defend {
            if let Some(t) = ctx.board.token_mut(token) {
                t.is_defending = true;
            }
            ctx.emit(GameEventData::TokenDefending { token });
        }

        debug!(token = %token, from = %from, to = %destination, defend, "move confirmed");
        self.deselect(token, ctx);

        let action = if defend {
            ResolvedAction::MovedAndDefended { token, from, to: destination }
        } else {
            ResolvedAction::Moved { token, from, to: destination }
        };
        Some(Resolution { action, removed: None })
    }

    fn deselect(&mut self, token: TokenId, ctx: &mut ProtocolContext<'_>) {
        self.state = Selection::NoSelection;
        ctx.emit(GameEventData::TokenDeselected { token });
    }
}
