//! Pluggable board evaluation interfaces and the weighted-feature scorer.
//!
//! Search stays independent of the heuristic by delegating static position
//! scoring to `BoardScorer`. Agent variants differ only in the `WeightTable`
//! they hand to `HeuristicScorer`.

use crate::game_state::board::Board;
use crate::game_state::checkers_types::Color;
use crate::search::features::{extract_features, FeatureVector};

pub trait BoardScorer: Send + Sync {
    /// Score from `side`'s perspective; higher is better for `side`.
    fn score(&self, board: &Board, side: Color) -> f64;
}

/// Fixed weight per feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    pub pawn: f64,
    pub king: f64,
    pub back_row: f64,
    pub center: f64,
    pub flank_middle: f64,
    pub protected: f64,
    pub vulnerable: f64,
}

impl WeightTable {
    pub const fn heuristic() -> Self {
        Self {
            pawn: 1.0,
            king: 1.5,
            back_row: 0.8,
            center: 0.5,
            flank_middle: 0.1,
            protected: 0.6,
            vulnerable: -0.6,
        }
    }

    /// Plain material count.
    pub const fn material_only() -> Self {
        Self {
            pawn: 1.0,
            king: 1.5,
            back_row: 0.0,
            center: 0.0,
            flank_middle: 0.0,
            protected: 0.0,
            vulnerable: 0.0,
        }
    }

    #[inline]
    pub fn weigh(&self, v: &FeatureVector) -> f64 {
        self.pawn * f64::from(v.pawns)
            + self.king * f64::from(v.kings)
            + self.back_row * f64::from(v.back_row)
            + self.center * f64::from(v.center)
            + self.flank_middle * f64::from(v.flank_middle)
            + self.protected * f64::from(v.protected)
            + self.vulnerable * f64::from(v.vulnerable)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::heuristic()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    pub weights: WeightTable,
}

impl HeuristicScorer {
    pub const fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    /// Per-feature weighted differences, mine minus opponent's, in
    /// declaration order. Useful for host-side reporting.
    pub fn breakdown(&self, board: &Board, side: Color) -> [f64; 7] {
        let all = extract_features(board);
        let (mine, theirs) = (&all[side.index()], &all[side.opposite().index()]);
        let w = &self.weights;
        let diff = |weight: f64, a: u32, b: u32| weight * f64::from(a) - weight * f64::from(b);
        [
            diff(w.pawn, mine.pawns, theirs.pawns),
            diff(w.king, mine.kings, theirs.kings),
            diff(w.back_row, mine.back_row, theirs.back_row),
            diff(w.center, mine.center, theirs.center),
            diff(w.flank_middle, mine.flank_middle, theirs.flank_middle),
            diff(w.protected, mine.protected, theirs.protected),
            diff(w.vulnerable, mine.vulnerable, theirs.vulnerable),
        ]
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, board: &Board, side: Color) -> f64 {
        let all = extract_features(board);
        let mine = &all[side.index()];
        let theirs = &all[side.opposite().index()];

        match (mine.pieces(), theirs.pieces()) {
            (0, 0) => 0.0,
            (0, _) => f64::NEG_INFINITY,
            (_, 0) => f64::INFINITY,
            _ => self.weights.weigh(mine) - self.weights.weigh(theirs),
        }
    }
}
