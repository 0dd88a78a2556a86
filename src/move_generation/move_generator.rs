use thiserror::Error;

use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::game_state::GameState;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("move generation is not implemented")]
    NotImplemented,
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// Host rules engine: legal-move enumeration and successor construction.
pub trait MoveGenerator: Send + Sync {
    /// All legal moves for `game_state.side_to_move`.
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<CheckersMove>>;

    /// Successor position after `mv`. The parent is left untouched.
    fn apply_move(&self, game_state: &GameState, mv: &CheckersMove) -> MoveGenResult<GameState>;
}

pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn generate_legal_moves(&self, _game_state: &GameState) -> MoveGenResult<Vec<CheckersMove>> {
        Err(MoveGenerationError::NotImplemented)
    }

    fn apply_move(&self, _game_state: &GameState, _mv: &CheckersMove) -> MoveGenResult<GameState> {
        Err(MoveGenerationError::NotImplemented)
    }
}
