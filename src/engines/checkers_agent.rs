//! The move-selecting agent.
//!
//! Per turn: start the clock, size this move's budget from the round state,
//! take the single-move or forced-capture shortcut when one applies, otherwise
//! deepen the alpha-beta search until the budget is spent. The round state is
//! advanced on every successful path before returning.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, warn};

use crate::engines::agent_config::AgentConfig;
use crate::engines::engine_trait::{DecisionKind, Engine, MoveDecision};
use crate::engines::time_management::{RoundBudget, TimeAllocator};
use crate::errors::{AgentError, AgentResult};
use crate::game_state::board::Board;
use crate::game_state::checkers_move::CheckersMove;
use crate::game_state::checkers_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta::SearchContext;
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::iterative_deepening::{iterative_deepening_search, SearchReport};
use crate::search::search_hooks::{NeverExtend, SelectiveDeepening, TimeOracle, UnlimitedTime};

pub struct CheckersAgent<G, S = HeuristicScorer> {
    color: Color,
    config: AgentConfig,
    round: RoundBudget,
    allocator: TimeAllocator,
    ctx: SearchContext<G, S>,
}

impl<G: MoveGenerator + 'static> CheckersAgent<G, HeuristicScorer> {
    /// Agent scoring with the configured weight table.
    pub fn new(color: Color, config: AgentConfig, generator: Arc<G>) -> AgentResult<Self> {
        let scorer = Arc::new(HeuristicScorer::new(config.weights));
        Self::with_scorer(color, config, generator, scorer)
    }
}

impl<G, S> CheckersAgent<G, S>
where
    G: MoveGenerator + 'static,
    S: BoardScorer + 'static,
{
    /// Agent with a caller-supplied scorer; `config.weights` is ignored.
    pub fn with_scorer(
        color: Color,
        config: AgentConfig,
        generator: Arc<G>,
        scorer: Arc<S>,
    ) -> AgentResult<Self> {
        config.validate()?;
        Ok(Self {
            color,
            config,
            round: RoundBudget::new(config.k, config.time_per_k_turns),
            allocator: TimeAllocator::new(config.allocation),
            ctx: SearchContext {
                generator,
                scorer,
                oracle: Arc::new(UnlimitedTime),
                deepening: Arc::new(NeverExtend),
            },
        })
    }

    pub fn with_time_oracle(mut self, oracle: Arc<dyn TimeOracle>) -> Self {
        self.ctx.oracle = oracle;
        self
    }

    pub fn with_selective_deepening(mut self, deepening: Arc<dyn SelectiveDeepening>) -> Self {
        self.ctx.deepening = deepening;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[inline]
    pub fn round(&self) -> &RoundBudget {
        &self.round
    }

    /// Replaces the round clock, e.g. when resuming a game mid-round.
    pub fn set_round(&mut self, round: RoundBudget) {
        self.round = round;
    }

    /// First move with the strictly largest capture count, if any captures.
    pub fn forced_capture(possible_moves: &[CheckersMove]) -> Option<&CheckersMove> {
        let mut best: Option<&CheckersMove> = None;
        for mv in possible_moves {
            if mv.capture_count() > best.map_or(0, CheckersMove::capture_count) {
                best = Some(mv);
            }
        }
        best
    }

    fn decide(
        &self,
        game_state: &GameState,
        possible_moves: &[CheckersMove],
        allotted_secs: f64,
        started: Instant,
    ) -> AgentResult<(CheckersMove, DecisionKind, Option<SearchReport>)> {
        if let [only] = possible_moves {
            debug!("single legal move {only}, skipping search");
            return Ok((only.clone(), DecisionKind::SingleMove, None));
        }

        if self.config.forced_capture_shortcut {
            if let Some(capture) = Self::forced_capture(possible_moves) {
                debug!(
                    "taking capture {capture} ({} pieces), skipping search",
                    capture.capture_count()
                );
                return Ok((
                    capture.clone(),
                    DecisionKind::ForcedCapture {
                        captured: capture.capture_count(),
                    },
                    None,
                ));
            }
        }

        let report = iterative_deepening_search(
            &self.ctx,
            game_state,
            possible_moves,
            self.color,
            allotted_secs,
            started,
            self.config.search,
        )?;
        let kind = DecisionKind::Search {
            reached_depth: report.reached_depth,
            score: report.best_score,
        };
        Ok((report.best_move.clone(), kind, Some(report)))
    }
}

impl<G, S> Engine for CheckersAgent<G, S>
where
    G: MoveGenerator + 'static,
    S: BoardScorer + 'static,
{
    fn new_game(&mut self) {
        self.round.reset();
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        possible_moves: &[CheckersMove],
    ) -> AgentResult<MoveDecision> {
        let started = Instant::now();
        if possible_moves.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }
        if game_state.side_to_move != self.color {
            return Err(AgentError::NotOurTurn {
                expected: self.color,
                found: game_state.side_to_move,
            });
        }

        let allotted_secs = self
            .allocator
            .time_for_move(&game_state.board, self.color, &self.round);
        if allotted_secs <= 0.0 {
            warn!("move budget is {allotted_secs:.3}s, search will fall back to the first move");
        }

        let decided = self.decide(game_state, possible_moves, allotted_secs, started);
        let elapsed = started.elapsed();
        self.round.advance_round(elapsed.as_secs_f64());
        let (chosen, kind, report) = decided?;

        let mut info_lines = vec![format!(
            "info string allotted {allotted_secs:.3}s elapsed {:.3}s",
            elapsed.as_secs_f64()
        )];
        match kind {
            DecisionKind::SingleMove => info_lines.push("info string single legal move".to_owned()),
            DecisionKind::ForcedCapture { captured } => {
                info_lines.push(format!("info string forced capture of {captured}"))
            }
            DecisionKind::Search {
                reached_depth,
                score,
            } => {
                let nodes = report.as_ref().map_or(0, |r| r.nodes);
                info_lines.push(format!(
                    "info depth {reached_depth} score {score} nodes {nodes}"
                ));
            }
        }
        info_lines.push(format!(
            "info string round turns_remaining {} time_remaining {:.3}",
            self.round.turns_remaining_in_round, self.round.time_remaining_in_round
        ));

        Ok(MoveDecision {
            chosen,
            kind,
            allotted_secs,
            elapsed,
            report,
            info_lines,
        })
    }

    fn evaluate(&self, board: &Board, side: Color) -> f64 {
        self.ctx.scorer.score(board, side)
    }
}
