//! Iterative deepening driver over the alpha-beta core.
//!
//! Each depth runs as one deadline-bounded task with whatever is left of the
//! move's time allowance. A completed depth always supersedes the previous
//! one; an interrupted depth is discarded wholesale.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::errors::{AgentError, AgentResult};
use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::checkers_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta::{AlphaBeta, NodeLimits, SearchContext, SearchError};
use crate::search::board_scoring::BoardScorer;
use crate::search::deadline::{run_with_limited_time, Execution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Hard cap on the deepening loop; `None` means "until stopped".
    pub max_depth: Option<u8>,
    /// Nodes per iteration before the iteration is abandoned.
    pub node_budget: Option<u64>,
    pub max_extension_plies: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            node_budget: None,
            max_extension_plies: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    TimedOut,
    ResourceExhausted,
    NoMoreTime,
    ProvenWin,
    ProvenLoss,
    DepthLimit,
    /// The host move generator failed inside the depth being searched.
    MoveGenerationFailed,
}

#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub depth: u8,
    pub score: f64,
    pub best_move: CheckersMove,
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best_move: CheckersMove,
    /// Negative infinity until the first depth completes.
    pub best_score: f64,
    /// Zero when not even depth 1 finished.
    pub reached_depth: u8,
    pub iterations: Vec<IterationRecord>,
    pub stop_reason: StopReason,
    pub nodes: u64,
}

/// Deepens from depth 1 until time, a proof, or the depth cap stops it.
///
/// `possible_moves` must be non-empty; its first entry is the fallback if no
/// depth completes. `budget_secs` is measured from `started`. Host move
/// generation failures end the deepening like a timeout does.
pub fn iterative_deepening_search<G, S>(
    ctx: &SearchContext<G, S>,
    game_state: &GameState,
    possible_moves: &[CheckersMove],
    root_side: Color,
    budget_secs: f64,
    started: Instant,
    config: SearchConfig,
) -> AgentResult<SearchReport>
where
    G: MoveGenerator + 'static,
    S: BoardScorer + 'static,
{
    let Some(fallback) = possible_moves.first() else {
        return Err(AgentError::NoLegalMoves);
    };

    let shared_state = Arc::new(game_state.clone());
    let shared_moves: Arc<Vec<CheckersMove>> = Arc::new(possible_moves.to_vec());
    let limits = NodeLimits {
        node_budget: config.node_budget,
        max_extension_plies: config.max_extension_plies,
    };

    let mut report = SearchReport {
        best_move: fallback.clone(),
        best_score: f64::NEG_INFINITY,
        reached_depth: 0,
        iterations: Vec::new(),
        stop_reason: StopReason::DepthLimit,
        nodes: 0,
    };
    let mut depth: u8 = 1;

    report.stop_reason = loop {
        if config.max_depth.is_some_and(|max| depth > max) {
            break StopReason::DepthLimit;
        }

        let remaining = budget_secs - started.elapsed().as_secs_f64();
        debug!(
            "going to depth {depth}, remaining {remaining:.3}s, previous score {}, best move {}",
            report.best_score, report.best_move
        );

        let task_ctx = ctx.clone();
        let state = Arc::clone(&shared_state);
        let moves = Arc::clone(&shared_moves);
        let execution = run_with_limited_time(remaining, move |token| {
            let mut search = AlphaBeta::new(&task_ctx, root_side, token, limits);
            match search.search_root(&state, &moves, depth) {
                Ok(root) => Ok(Ok(root)),
                Err(SearchError::Interrupted(interrupt)) => Err(interrupt),
                Err(SearchError::MoveGeneration(e)) => Ok(Err(e)),
            }
        });

        let (root, elapsed) = match execution {
            Execution::Completed {
                value: Ok(root),
                elapsed,
            } => (root, elapsed),
            Execution::Completed { value: Err(e), .. } => {
                warn!(
                    "move generation failed at depth {depth} ({e}), keeping depth {}",
                    report.reached_depth
                );
                break StopReason::MoveGenerationFailed;
            }
            Execution::TimedOut => {
                info!("no more time, achieved depth {}", report.reached_depth);
                break StopReason::TimedOut;
            }
            Execution::ResourceExhausted(reason) => {
                info!(
                    "abandoning depth {depth} ({reason}), keeping depth {}",
                    report.reached_depth
                );
                break StopReason::ResourceExhausted;
            }
        };

        if ctx.oracle.no_more_time() {
            info!("host reports no more time after depth {depth}");
            break StopReason::NoMoreTime;
        }

        let best_move = shared_moves[root.best_index].clone();
        report.best_move = best_move.clone();
        report.best_score = root.score;
        report.reached_depth = depth;
        report.nodes += root.nodes;
        report.iterations.push(IterationRecord {
            depth,
            score: root.score,
            best_move,
            nodes: root.nodes,
            elapsed,
        });

        if root.score == f64::INFINITY {
            info!("the move {} guarantees victory", report.best_move);
            break StopReason::ProvenWin;
        }
        if root.score == f64::NEG_INFINITY {
            info!("all moves lose at depth {depth}");
            break StopReason::ProvenLoss;
        }

        match depth.checked_add(1) {
            Some(next) => depth = next,
            None => break StopReason::DepthLimit,
        }
    };

    Ok(report)
}
