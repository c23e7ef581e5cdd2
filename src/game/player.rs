//! Players
//!
//! A player is one team's roster of live token ids. Tokens themselves live
//! on the board; the roster only records ownership.

use serde::{Serialize, Deserialize};

use crate::game::board::Board;
use crate::game::token::{Team, TokenId, TokenType};

/// One team and the tokens it still has in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Team identifier
    pub team: Team,

    /// Live tokens owned by this team
    active_tokens: Vec<TokenId>,
}

impl Player {
    /// Create a player with an empty roster.
    pub fn new(team: Team) -> Self {
        Self {
            team,
            active_tokens: Vec::new(),
        }
    }

    /// Add a token to the roster. Adding the same id twice is a no-op.
    pub fn add_token(&mut self, id: TokenId) {
        if !self.active_tokens.contains(&id) {
            self.active_tokens.push(id);
        }
    }

    /// Remove a token from the roster. Unknown ids are ignored.
    pub fn remove_token(&mut self, id: TokenId) -> bool {
        let before = self.active_tokens.len();
        self.active_tokens.retain(|t| *t != id);
        self.active_tokens.len() != before
    }

    /// Is `id` on this roster?
    pub fn contains(&self, id: TokenId) -> bool {
        self.active_tokens.contains(&id)
    }

    /// Roster ids.
    pub fn active_tokens(&self) -> &[TokenId] {
        &self.active_tokens
    }

    /// Number of live tokens.
    pub fn len(&self) -> usize {
        self.active_tokens.len()
    }

    /// Has this team been wiped out?
    pub fn is_empty(&self) -> bool {
        self.active_tokens.is_empty()
    }

    /// Refresh available moves for every roster token still on the board.
    pub fn generate_all_possible_moves(&self, board: &mut Board) {
        for id in &self.active_tokens {
            if board.has_token(*id) {
                board.select_available_squares(*id);
            }
        }
    }

    /// Roster tokens currently threatening a token of `token_type`.
    ///
    /// Reads the cached available moves; call
    /// [`generate_all_possible_moves`](Self::generate_all_possible_moves) first.
    pub fn attacking_tokens(&self, board: &Board, token_type: TokenType) -> Vec<TokenId> {
        self.active_tokens
            .iter()
            .copied()
            .filter(|id| {
                board
                    .token(*id)
                    .is_some_and(|t| t.is_attacking_token_of_type(board, token_type))
            })
            .collect()
    }

    /// Roster tokens of `token_type`.
    pub fn tokens_of_type(&self, board: &Board, token_type: TokenType) -> Vec<TokenId> {
        self.active_tokens
            .iter()
            .copied()
            .filter(|id| board.token(*id).is_some_and(|t| t.token_type == token_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;
    use crate::game::token::TokenStats;

    const KNIGHT: TokenStats = TokenStats::new(TokenType::Knight, 7, 3, 2);
    const ROOK: TokenStats = TokenStats::new(TokenType::Rook, 2, 2, 5);

    #[test]
    fn test_add_is_idempotent() {
        let mut player = Player::new(Team::White);
        player.add_token(TokenId(3));
        player.add_token(TokenId(3));
        assert_eq!(player.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut player = Player::new(Team::Black);
        player.add_token(TokenId(1));
        player.add_token(TokenId(2));

        assert!(player.remove_token(TokenId(1)));
        assert!(!player.remove_token(TokenId(1)));
        assert!(!player.contains(TokenId(1)));
        assert_eq!(player.active_tokens(), &[TokenId(2)]);

        player.remove_token(TokenId(2));
        assert!(player.is_empty());
    }

    #[test]
    fn test_attacking_and_type_queries() {
        let mut board = Board::default();
        let mut white = Player::new(Team::White);

        let near = board.spawn_token(Coord::new(2, 2), Team::White, &KNIGHT).unwrap();
        let far = board.spawn_token(Coord::new(6, 6), Team::White, &ROOK).unwrap();
        board.spawn_token(Coord::new(2, 3), Team::Black, &ROOK);
        white.add_token(near);
        white.add_token(far);

        white.generate_all_possible_moves(&mut board);

        assert_eq!(white.attacking_tokens(&board, TokenType::Rook), vec![near]);
        assert!(white.attacking_tokens(&board, TokenType::Knight).is_empty());
        assert_eq!(white.tokens_of_type(&board, TokenType::Rook), vec![far]);
    }

    #[test]
    fn test_generate_skips_tokens_off_board() {
        let mut board = Board::default();
        let mut white = Player::new(Team::White);
        white.add_token(TokenId(42));

        white.generate_all_possible_moves(&mut board);
        assert!(!board.has_token(TokenId(42)));
    }
}
