//! Position snapshot handed to the agent by the host.
//!
//! `GameState` is immutable from the search's point of view: successors are
//! produced by the move generator, never by mutating a parent in place.

use crate::game_state::board::Board;
use crate::game_state::checkers_types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    /// Plies since the last capture; maintained by the host rules.
    pub turns_since_last_jump: u32,
}

impl GameState {
    #[inline]
    pub fn new(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            turns_since_last_jump: 0,
        }
    }

    /// Opening position with red to move.
    #[inline]
    pub fn new_game() -> Self {
        Self::new(Board::initial(), Color::Red)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}
