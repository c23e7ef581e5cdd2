//! Board
//!
//! Authoritative record of which token occupies which cell. The board owns
//! the live tokens; grid cells hold ids into that store so a token can only
//! ever be referenced from one cell.
//!
//! Every coordinate-taking operation quietly returns `None`/`false` on an
//! invalid coordinate. Callers that must tell "empty" from "off-board" use
//! [`Board::is_valid_coord`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::BOARD_SIZE;
use crate::core::coord::Coord;
use crate::core::fixed::{Fixed, DEFAULT_SQUARE_SIZE, to_fixed};
use crate::core::vec2::FixedVec2;
use crate::game::token::{Team, Token, TokenId, TokenStats};

const GRID: usize = BOARD_SIZE as usize;

// =============================================================================
// COORDINATE → POSITION COLLABORATOR
// =============================================================================

/// Converts board coordinates to world positions for presentation.
///
/// Injected at setup. Results are only reported outward; rules never read them.
pub trait CoordinateMapper: fmt::Debug + Send + Sync {
    /// World position of the centre of `coord`.
    fn position_for(&self, coord: Coord) -> FixedVec2;
}

/// Regular grid anchored at the bottom-left square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridTransform {
    /// World position of cell (0, 0)
    pub bottom_left: FixedVec2,
    /// Edge length of one square
    pub square_size: Fixed,
}

impl GridTransform {
    /// Create a transform.
    pub const fn new(bottom_left: FixedVec2, square_size: Fixed) -> Self {
        Self { bottom_left, square_size }
    }
}

impl Default for GridTransform {
    /// Unit squares with the board centred on the world origin.
    fn default() -> Self {
        Self::new(
            FixedVec2::new(to_fixed(-3.5), to_fixed(-3.5)),
            DEFAULT_SQUARE_SIZE,
        )
    }
}

impl CoordinateMapper for GridTransform {
    fn position_for(&self, coord: Coord) -> FixedVec2 {
        self.bottom_left.add_steps(self.square_size, coord.x, coord.y)
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// The 8×8 grid plus the store of live tokens.
#[derive(Clone, Debug)]
pub struct Board {
    /// Occupancy, indexed `[x][y]`
    grid: [[Option<TokenId>; GRID]; GRID],

    /// Live tokens (BTreeMap for deterministic iteration)
    tokens: BTreeMap<TokenId, Token>,

    /// Next token id (monotonic counter)
    next_token_id: u32,

    /// Coordinate → world position collaborator
    mapper: Arc<dyn CoordinateMapper>,
}

impl Board {
    /// Create an empty board.
    pub fn new(mapper: Arc<dyn CoordinateMapper>) -> Self {
        Self {
            grid: [[None; GRID]; GRID],
            tokens: BTreeMap::new(),
            next_token_id: 0,
            mapper,
        }
    }

    /// World position of `coord`.
    pub fn position_for(&self, coord: Coord) -> FixedVec2 {
        self.mapper.position_for(coord)
    }

    /// True iff both axes are within `[0, BOARD_SIZE)`.
    #[inline]
    pub fn is_valid_coord(&self, coord: Coord) -> bool {
        (0..BOARD_SIZE).contains(&coord.x) && (0..BOARD_SIZE).contains(&coord.y)
    }

    #[inline]
    fn cell(&self, coord: Coord) -> Option<&Option<TokenId>> {
        if !self.is_valid_coord(coord) {
            return None;
        }
        Some(&self.grid[coord.x as usize][coord.y as usize])
    }

    #[inline]
    fn cell_mut(&mut self, coord: Coord) -> Option<&mut Option<TokenId>> {
        if !self.is_valid_coord(coord) {
            return None;
        }
        Some(&mut self.grid[coord.x as usize][coord.y as usize])
    }

    /// Id of the occupant of `coord`, if any.
    pub fn token_id_at(&self, coord: Coord) -> Option<TokenId> {
        self.cell(coord).copied().flatten()
    }

    /// Occupant of `coord`; `None` for empty or off-board cells.
    pub fn token_at(&self, coord: Coord) -> Option<&Token> {
        self.token_id_at(coord).and_then(|id| self.tokens.get(&id))
    }

    /// Look up a live token.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(&id)
    }

    /// Look up a live token mutably.
    pub fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(&id)
    }

    /// Is `id` a live token on this board?
    pub fn has_token(&self, id: TokenId) -> bool {
        self.tokens.contains_key(&id)
    }

    /// Cell occupied by `id`.
    pub fn coords_of(&self, id: TokenId) -> Option<Coord> {
        self.tokens.get(&id).map(|t| t.occupied_square)
    }

    /// All live tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Number of live tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Every occupied cell with its occupant, file-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, TokenId)> + '_ {
        self.grid.iter().enumerate().flat_map(|(x, column)| {
            column.iter().enumerate().filter_map(move |(y, cell)| {
                cell.map(|id| (Coord::new(x as i32, y as i32), id))
            })
        })
    }

    /// Create a token from `stats` and place it at `coord`.
    ///
    /// Returns `None` (and creates nothing) if `coord` is off-board or occupied.
    pub fn spawn_token(&mut self, coord: Coord, team: Team, stats: &TokenStats) -> Option<TokenId> {
        if !self.is_valid_coord(coord) || self.token_id_at(coord).is_some() {
            return None;
        }
        let id = TokenId(self.next_token_id);
        self.next_token_id += 1;
        let token = Token::new(id, team, coord, self.position_for(coord), stats);
        self.place_token(coord, token);
        Some(id)
    }

    /// Write `token` into `coord` unconditionally. No-op if `coord` is invalid.
    ///
    /// The caller must have cleared the token's previous cell, and `coord`
    /// must be empty.
    pub fn place_token(&mut self, coord: Coord, mut token: Token) {
        if !self.is_valid_coord(coord) {
            return;
        }
        debug_assert!(
            self.token_id_at(coord).is_none(),
            "place_token onto occupied cell {coord}"
        );
        let id = token.id;
        token.occupied_square = coord;
        token.position = self.mapper.position_for(coord);
        self.next_token_id = self.next_token_id.max(id.0 + 1);
        self.tokens.insert(id, token);
        if let Some(cell) = self.cell_mut(coord) {
            *cell = Some(id);
        }
    }

    /// Relocate `id` from `from` to `to`, updating its stored coordinate.
    ///
    /// Both cells must be valid and `to` must be empty. Returns false and
    /// leaves the board untouched otherwise.
    pub fn move_token(&mut self, id: TokenId, from: Coord, to: Coord) -> bool {
        if !self.is_valid_coord(from) || !self.is_valid_coord(to) {
            return false;
        }
        if self.token_id_at(from) != Some(id) {
            return false;
        }
        if self.token_id_at(to).is_some() {
            return false;
        }

        if let Some(cell) = self.cell_mut(from) {
            *cell = None;
        }
        if let Some(cell) = self.cell_mut(to) {
            *cell = Some(id);
        }

        if let Some(token) = self.tokens.get_mut(&id) {
            token.move_token(to, self.mapper.as_ref());
        }
        true
    }

    /// Clear `coord` and take its occupant off the board.
    pub fn remove_token(&mut self, coord: Coord) -> Option<Token> {
        let id = self.cell_mut(coord)?.take()?;
        self.tokens.remove(&id)
    }

    /// Run move generation for `id` and cache the result on the token.
    pub fn select_available_squares(&mut self, id: TokenId) -> Option<&[Coord]> {
        let moves = self.tokens.get(&id)?.scan_available_squares(self);
        let token = self.tokens.get_mut(&id)?;
        token.available_moves = moves;
        Some(&token.available_moves)
    }

    /// Drop the defending flag on every token of `team`.
    pub fn clear_defending(&mut self, team: Team) {
        for token in self.tokens.values_mut().filter(|t| t.team == team) {
            token.is_defending = false;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Arc::new(GridTransform::default()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::token::TokenType;

    const KNIGHT: TokenStats = TokenStats::new(TokenType::Knight, 7, 3, 2);

    #[test]
    fn test_valid_coords() {
        let board = Board::default();
        assert!(board.is_valid_coord(Coord::new(0, 0)));
        assert!(board.is_valid_coord(Coord::new(7, 7)));
        assert!(!board.is_valid_coord(Coord::new(-1, 0)));
        assert!(!board.is_valid_coord(Coord::new(0, 8)));
        assert!(!board.is_valid_coord(Coord::new(8, 3)));
    }

    #[test]
    fn test_token_at_off_board_is_empty() {
        let board = Board::default();
        assert!(board.token_at(Coord::new(-3, 12)).is_none());
        assert!(board.token_at(Coord::new(4, 4)).is_none());
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut board = Board::default();
        let id = board.spawn_token(Coord::new(2, 2), Team::White, &KNIGHT).unwrap();

        let token = board.token_at(Coord::new(2, 2)).unwrap();
        assert_eq!(token.id, id);
        assert_eq!(token.occupied_square, Coord::new(2, 2));
        assert_eq!(token.position, board.position_for(Coord::new(2, 2)));
        assert_eq!(board.coords_of(id), Some(Coord::new(2, 2)));
        assert!(board.has_token(id));
    }

    #[test]
    fn test_spawn_off_board_creates_nothing() {
        let mut board = Board::default();
        assert!(board.spawn_token(Coord::new(8, 0), Team::White, &KNIGHT).is_none());
        assert_eq!(board.token_count(), 0);
    }

    #[test]
    fn test_spawn_onto_occupied_cell_creates_nothing() {
        let mut board = Board::default();
        let first = board.spawn_token(Coord::new(3, 3), Team::White, &KNIGHT).unwrap();
        assert!(board.spawn_token(Coord::new(3, 3), Team::Black, &KNIGHT).is_none());
        assert_eq!(board.token_count(), 1);
        assert_eq!(board.token_id_at(Coord::new(3, 3)), Some(first));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "occupied cell")]
    fn test_place_token_onto_occupied_cell_panics() {
        let mut board = Board::default();
        let first = board.spawn_token(Coord::new(3, 3), Team::White, &KNIGHT).unwrap();
        let mut intruder = board.token(first).unwrap().clone();
        intruder.id = TokenId(first.0 + 1);
        board.place_token(Coord::new(3, 3), intruder);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut board = Board::default();
        let a = board.spawn_token(Coord::new(0, 0), Team::White, &KNIGHT).unwrap();
        let b = board.spawn_token(Coord::new(1, 0), Team::Black, &KNIGHT).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_move_token() {
        let mut board = Board::default();
        let id = board.spawn_token(Coord::new(2, 2), Team::White, &KNIGHT).unwrap();

        assert!(board.move_token(id, Coord::new(2, 2), Coord::new(2, 3)));
        assert!(board.token_at(Coord::new(2, 2)).is_none());
        assert_eq!(board.token_id_at(Coord::new(2, 3)), Some(id));
        let token = board.token(id).unwrap();
        assert_eq!(token.occupied_square, Coord::new(2, 3));
        assert_eq!(token.position, board.position_for(Coord::new(2, 3)));
    }

    #[test]
    fn test_move_token_rejects_invalid_coords() {
        let mut board = Board::default();
        let id = board.spawn_token(Coord::new(0, 0), Team::White, &KNIGHT).unwrap();

        assert!(!board.move_token(id, Coord::new(0, 0), Coord::new(-1, 0)));
        assert_eq!(board.token_id_at(Coord::new(0, 0)), Some(id));
    }

    #[test]
    fn test_remove_token() {
        let mut board = Board::default();
        let id = board.spawn_token(Coord::new(5, 5), Team::Black, &KNIGHT).unwrap();

        let removed = board.remove_token(Coord::new(5, 5)).unwrap();
        assert_eq!(removed.id, id);
        assert!(board.token_at(Coord::new(5, 5)).is_none());
        assert!(!board.has_token(id));
        assert!(board.remove_token(Coord::new(5, 5)).is_none());
        assert!(board.remove_token(Coord::new(9, 9)).is_none());
    }

    #[test]
    fn test_occupied_matches_token_coords() {
        let mut board = Board::default();
        board.spawn_token(Coord::new(0, 7), Team::White, &KNIGHT);
        board.spawn_token(Coord::new(6, 1), Team::Black, &KNIGHT);

        for (coord, id) in board.occupied() {
            assert_eq!(board.coords_of(id), Some(coord));
        }
        assert_eq!(board.occupied().count(), 2);
    }

    #[test]
    fn test_select_available_squares_is_idempotent() {
        let mut board = Board::default();
        let id = board.spawn_token(Coord::new(4, 4), Team::White, &KNIGHT).unwrap();
        board.spawn_token(Coord::new(4, 5), Team::Black, &KNIGHT);

        let first = board.select_available_squares(id).unwrap().to_vec();
        let second = board.select_available_squares(id).unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(board.token(id).unwrap().available_moves, first);
    }

    #[test]
    fn test_clear_defending_only_touches_team() {
        let mut board = Board::default();
        let white = board.spawn_token(Coord::new(0, 0), Team::White, &KNIGHT).unwrap();
        let black = board.spawn_token(Coord::new(7, 7), Team::Black, &KNIGHT).unwrap();
        board.token_mut(white).unwrap().is_defending = true;
        board.token_mut(black).unwrap().is_defending = true;

        board.clear_defending(Team::White);
        assert!(!board.token(white).unwrap().is_defending);
        assert!(board.token(black).unwrap().is_defending);
    }

    #[test]
    fn test_grid_transform() {
        let transform = GridTransform::default();
        assert_eq!(
            transform.position_for(Coord::new(0, 0)),
            FixedVec2::new(to_fixed(-3.5), to_fixed(-3.5))
        );
        assert_eq!(
            transform.position_for(Coord::new(7, 7)),
            FixedVec2::new(to_fixed(3.5), to_fixed(3.5))
        );
    }
}
