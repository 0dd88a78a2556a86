//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The root side maximizes and its opponent minimizes the same score, which is
//! always computed from the root side's perspective. Every child position is a
//! fresh successor produced by the move generator.

use std::sync::Arc;

use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::checkers_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{MoveGenerationError, MoveGenerator};
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::{CancelToken, Interrupt};
use crate::search::search_hooks::{SelectiveDeepening, TimeOracle};

/// How often (in nodes) the host's `no_more_time` predicate is polled.
const ORACLE_POLL_INTERVAL: u64 = 256;

/// Everything a search iteration needs, cheap to clone into a worker.
pub struct SearchContext<G, S> {
    pub generator: Arc<G>,
    pub scorer: Arc<S>,
    pub oracle: Arc<dyn TimeOracle>,
    pub deepening: Arc<dyn SelectiveDeepening>,
}

impl<G, S> Clone for SearchContext<G, S> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            scorer: Arc::clone(&self.scorer),
            oracle: Arc::clone(&self.oracle),
            deepening: Arc::clone(&self.deepening),
        }
    }
}

#[derive(Debug)]
pub enum SearchError {
    Interrupted(Interrupt),
    MoveGeneration(MoveGenerationError),
}

impl From<MoveGenerationError> for SearchError {
    fn from(e: MoveGenerationError) -> Self {
        SearchError::MoveGeneration(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    pub score: f64,
    /// Index into the root move list.
    pub best_index: usize,
    pub nodes: u64,
}

/// Per-limit knobs for one fixed-depth search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeLimits {
    pub node_budget: Option<u64>,
    pub max_extension_plies: u8,
}

pub struct AlphaBeta<'a, G, S> {
    ctx: &'a SearchContext<G, S>,
    root_side: Color,
    token: &'a CancelToken,
    limits: NodeLimits,
    nodes: u64,
}

impl<'a, G: MoveGenerator, S: BoardScorer> AlphaBeta<'a, G, S> {
    pub fn new(
        ctx: &'a SearchContext<G, S>,
        root_side: Color,
        token: &'a CancelToken,
        limits: NodeLimits,
    ) -> Self {
        Self {
            ctx,
            root_side,
            token,
            limits,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        if self.token.is_cancelled() {
            return Err(SearchError::Interrupted(Interrupt::Cancelled));
        }
        if self.nodes % ORACLE_POLL_INTERVAL == 0 && self.ctx.oracle.no_more_time() {
            return Err(SearchError::Interrupted(Interrupt::Cancelled));
        }
        if let Some(budget) = self.limits.node_budget {
            if self.nodes > budget {
                return Err(SearchError::Interrupted(Interrupt::BudgetExhausted));
            }
        }
        Ok(())
    }

    /// Searches `root_moves` to `depth` plies (at least one).
    ///
    /// Ties keep the first move; if every move loses, the first move is
    /// reported with a score of negative infinity.
    pub fn search_root(
        &mut self,
        game_state: &GameState,
        root_moves: &[CheckersMove],
        depth: u8,
    ) -> Result<RootResult, SearchError> {
        self.visit()?;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best_score = f64::NEG_INFINITY;
        let mut best_index = 0;

        for (i, mv) in root_moves.iter().enumerate() {
            let child = self.ctx.generator.apply_move(game_state, mv)?;
            let score = self.minimax(
                &child,
                depth.saturating_sub(1),
                alpha,
                beta,
                self.limits.max_extension_plies,
            )?;
            if score > best_score {
                best_score = score;
                best_index = i;
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        Ok(RootResult {
            score: best_score,
            best_index,
            nodes: self.nodes,
        })
    }

    fn minimax(
        &mut self,
        game_state: &GameState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        extensions_left: u8,
    ) -> Result<f64, SearchError> {
        self.visit()?;

        let to_move = game_state.side_to_move;
        let maximizing = to_move == self.root_side;
        let loss = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        if game_state.board.count(to_move) == 0 {
            return Ok(loss);
        }
        let moves = self.ctx.generator.generate_legal_moves(game_state)?;
        if moves.is_empty() {
            return Ok(loss);
        }

        let (depth, extensions_left) = if depth > 0 {
            (depth, extensions_left)
        } else if extensions_left > 0 && self.ctx.deepening.should_extend(game_state, &moves) {
            (1, extensions_left - 1)
        } else {
            return Ok(self.ctx.scorer.score(&game_state.board, self.root_side));
        };

        let mut value = loss;
        for mv in &moves {
            let child = self.ctx.generator.apply_move(game_state, mv)?;
            let score = self.minimax(&child, depth - 1, alpha, beta, extensions_left)?;
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(value)
    }
}
