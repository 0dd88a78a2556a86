//! Host-supplied hooks consulted during search.

use std::time::{Duration, Instant};

use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::game_state::GameState;

/// Secondary deadline predicate polled by the search and by the
/// iterative-deepening driver after each completed depth.
pub trait TimeOracle: Send + Sync {
    fn no_more_time(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnlimitedTime;

impl TimeOracle for UnlimitedTime {
    fn no_more_time(&self) -> bool {
        false
    }
}

/// Total allowance for the whole game, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    started: Instant,
    allowance: Duration,
}

impl GameClock {
    pub fn new(allowance: Duration) -> Self {
        Self {
            started: Instant::now(),
            allowance,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.allowance.saturating_sub(self.started.elapsed())
    }
}

impl TimeOracle for GameClock {
    fn no_more_time(&self) -> bool {
        self.started.elapsed() >= self.allowance
    }
}

/// Decides whether a horizon node deserves extra plies.
pub trait SelectiveDeepening: Send + Sync {
    fn should_extend(&self, game_state: &GameState, moves: &[CheckersMove]) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExtend;

impl SelectiveDeepening for NeverExtend {
    fn should_extend(&self, _game_state: &GameState, _moves: &[CheckersMove]) -> bool {
        false
    }
}

/// Keep searching while the side to move is in the middle of an exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendOnCapture;

impl SelectiveDeepening for ExtendOnCapture {
    fn should_extend(&self, _game_state: &GameState, moves: &[CheckersMove]) -> bool {
        moves.iter().any(CheckersMove::is_jump)
    }
}
