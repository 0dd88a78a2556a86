//! Errors surfaced by the agent to its host.
//!
//! `AgentError` is the single error type returned across the public API.
//! Failures inside a search never surface here; the iterative-deepening
//! driver recovers from them by falling back to the last completed depth.

use thiserror::Error;

use crate::game_state::checkers_types::Color;

#[derive(Debug, Error)]
pub enum AgentError {
    /// `choose_move` was handed an empty move list. The host owns game-over
    /// detection, so this is a caller bug.
    #[error("no legal moves were supplied to choose from")]
    NoLegalMoves,

    #[error("agent plays {expected} but it is {found}'s turn")]
    NotOurTurn { expected: Color, found: Color },

    /// A board diagram could not be parsed.
    ///
    /// Payload: human-readable description of the offending row or symbol.
    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    #[error("invalid agent configuration: {0}")]
    InvalidConfig(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
