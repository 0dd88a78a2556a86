//! Engine abstraction exposed to the host game loop.
//!
//! The host calls `choose_move` once per turn and may call `evaluate` at any
//! time for position assessment without triggering a search.

use std::time::Duration;

use crate::errors::AgentResult;
use crate::game_state::board::Board;
use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::checkers_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::iterative_deepening::SearchReport;

/// Which path produced the chosen move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionKind {
    SingleMove,
    ForcedCapture { captured: usize },
    Search { reached_depth: u8, score: f64 },
}

#[derive(Debug, Clone)]
pub struct MoveDecision {
    pub chosen: CheckersMove,
    pub kind: DecisionKind,
    pub allotted_secs: f64,
    pub elapsed: Duration,
    pub report: Option<SearchReport>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        game_state: &GameState,
        possible_moves: &[CheckersMove],
    ) -> AgentResult<MoveDecision>;

    fn evaluate(&self, board: &Board, side: Color) -> f64;
}
