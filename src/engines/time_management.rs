//! Per-move time budgeting over a fixed-size round of turns.
//!
//! The agent receives `time_per_k_turns` seconds for every `k` turns. The
//! baseline spend is the even share of what is left in the round; the
//! adaptive policy spends more when the position is tactically sharp.

use log::debug;

use crate::game_state::board::Board;
use crate::game_state::checkers_types::Color;
use crate::search::features::{center_count, count_for_side, rescuable_threats, vulnerable_threats};

/// Seconds held back from every even share for bookkeeping overhead.
pub const SAFETY_MARGIN_SECS: f64 = 0.05;

/// Round-level clock state owned by the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundBudget {
    pub k: u32,
    pub time_per_k_turns: f64,
    pub turns_remaining_in_round: u32,
    pub time_remaining_in_round: f64,
}

impl RoundBudget {
    pub fn new(k: u32, time_per_k_turns: f64) -> Self {
        Self {
            k,
            time_per_k_turns,
            turns_remaining_in_round: k,
            time_remaining_in_round: time_per_k_turns,
        }
    }

    pub fn reset(&mut self) {
        self.turns_remaining_in_round = self.k;
        self.time_remaining_in_round = self.time_per_k_turns;
    }

    /// Books one finished turn that took `elapsed_secs`.
    ///
    /// The last turn of a round starts a fresh round regardless of how long
    /// it took. Returns `true` when that reset happened.
    pub fn advance_round(&mut self, elapsed_secs: f64) -> bool {
        if self.turns_remaining_in_round <= 1 {
            self.reset();
            debug!(
                "round finished, reset to {} turns / {:.3}s",
                self.k, self.time_per_k_turns
            );
            true
        } else {
            self.turns_remaining_in_round -= 1;
            self.time_remaining_in_round -= elapsed_secs;
            false
        }
    }
}

/// Multipliers applied to the even share, first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escalation {
    pub rescuable: f64,
    pub vulnerable: f64,
    pub center: f64,
    /// Own pieces in the center needed to trigger `center`.
    pub center_threshold: u32,
}

impl Default for Escalation {
    fn default() -> Self {
        Self {
            rescuable: 1.8,
            vulnerable: 1.5,
            center: 1.3,
            center_threshold: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocationPolicy {
    /// Always the even share.
    Uniform,
    Adaptive(Escalation),
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::Adaptive(Escalation::default())
    }
}

/// Tactical classification driving the adaptive policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// An own piece is attacked but has an escape.
    Rescuable,
    /// An own piece is attacked with no escape.
    Vulnerable,
    CenterControl,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAllocator {
    pub policy: AllocationPolicy,
    pub safety_margin_secs: f64,
}

impl Default for TimeAllocator {
    fn default() -> Self {
        Self::new(AllocationPolicy::default())
    }
}

impl TimeAllocator {
    pub const fn new(policy: AllocationPolicy) -> Self {
        Self {
            policy,
            safety_margin_secs: SAFETY_MARGIN_SECS,
        }
    }

    pub fn classify(board: &Board, side: Color, center_threshold: u32) -> Criticality {
        if count_for_side(board, side, rescuable_threats) >= 1 {
            Criticality::Rescuable
        } else if count_for_side(board, side, vulnerable_threats) >= 1 {
            Criticality::Vulnerable
        } else if center_count(board, side) >= center_threshold {
            Criticality::CenterControl
        } else {
            Criticality::Quiet
        }
    }

    /// Even share of the remaining round time, less the safety margin.
    #[inline]
    pub fn baseline(&self, round: &RoundBudget) -> f64 {
        round.time_remaining_in_round / f64::from(round.turns_remaining_in_round.max(1))
            - self.safety_margin_secs
    }

    /// Seconds allotted to `side`'s upcoming move.
    pub fn time_for_move(&self, board: &Board, side: Color, round: &RoundBudget) -> f64 {
        if round.turns_remaining_in_round <= 1 {
            return round.time_remaining_in_round;
        }
        let avg = self.baseline(round);
        match self.policy {
            AllocationPolicy::Uniform => avg,
            AllocationPolicy::Adaptive(e) => match Self::classify(board, side, e.center_threshold) {
                Criticality::Rescuable => e.rescuable * avg,
                Criticality::Vulnerable => e.vulnerable * avg,
                Criticality::CenterControl => e.center * avg,
                Criticality::Quiet => avg,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn board(diagram: &str) -> Board {
        Board::from_diagram(diagram).expect("diagram should parse")
    }

    fn mid_round() -> RoundBudget {
        RoundBudget {
            k: 10,
            time_per_k_turns: 20.0,
            turns_remaining_in_round: 4,
            time_remaining_in_round: 8.0,
        }
    }

    #[test]
    fn last_turn_of_round_gets_everything() {
        let round = RoundBudget {
            turns_remaining_in_round: 1,
            time_remaining_in_round: 3.25,
            ..mid_round()
        };
        let allocator = TimeAllocator::default();
        assert_eq!(allocator.time_for_move(&Board::initial(), Color::Red, &round), 3.25);
    }

    #[test]
    fn quiet_position_gets_even_share() {
        let allocator = TimeAllocator::default();
        let round = mid_round();
        let t = allocator.time_for_move(&Board::initial(), Color::Red, &round);
        assert!((t - (8.0 / 4.0 - 0.05)).abs() < EPS);
    }

    #[test]
    fn rescuable_outranks_vulnerable() {
        // (3,3) is attacked from both (2,2) and (2,4): vulnerable.
        // (3,6) is attacked only from (2,7): rescuable.
        let b = board(
            "........
             ........
             ..r.r..r
             ...b..b.
             ........
             ........
             ........
             ........",
        );
        assert_eq!(
            TimeAllocator::classify(&b, Color::Black, 2),
            Criticality::Rescuable
        );
        let allocator = TimeAllocator::default();
        let round = mid_round();
        let t = allocator.time_for_move(&b, Color::Black, &round);
        assert!((t - 1.8 * allocator.baseline(&round)).abs() < EPS);
    }

    #[test]
    fn trapped_piece_gets_vulnerable_multiplier() {
        let b = board(
            "........
             ........
             ..r.r...
             ...b....
             ........
             ........
             ........
             ........",
        );
        let allocator = TimeAllocator::default();
        let round = mid_round();
        let t = allocator.time_for_move(&b, Color::Black, &round);
        assert!((t - 1.5 * allocator.baseline(&round)).abs() < EPS);
    }

    #[test]
    fn center_control_needs_two_own_pieces() {
        let one = board(
            "........
             ........
             ........
             ..r.....
             ........
             ........
             ........
             ........",
        );
        let two = board(
            "........
             ........
             ........
             ..r.....
             .....r..
             ........
             ........
             ........",
        );
        assert_eq!(TimeAllocator::classify(&one, Color::Red, 2), Criticality::Quiet);
        assert_eq!(
            TimeAllocator::classify(&two, Color::Red, 2),
            Criticality::CenterControl
        );
        let allocator = TimeAllocator::default();
        let round = mid_round();
        let t = allocator.time_for_move(&two, Color::Red, &round);
        assert!((t - 1.3 * allocator.baseline(&round)).abs() < EPS);
    }

    #[test]
    fn uniform_policy_ignores_tactics() {
        let b = board(
            "........
             ........
             ..r.r...
             ...b....
             ........
             ........
             ........
             ........",
        );
        let allocator = TimeAllocator::new(AllocationPolicy::Uniform);
        let round = mid_round();
        let t = allocator.time_for_move(&b, Color::Black, &round);
        assert!((t - allocator.baseline(&round)).abs() < EPS);
    }

    #[test]
    fn round_resets_on_last_turn_and_decrements_otherwise() {
        let mut round = RoundBudget::new(3, 9.0);
        assert!(!round.advance_round(1.5));
        assert_eq!(round.turns_remaining_in_round, 2);
        assert!((round.time_remaining_in_round - 7.5).abs() < EPS);

        assert!(!round.advance_round(0.5));
        assert_eq!(round.turns_remaining_in_round, 1);

        assert!(round.advance_round(100.0));
        assert_eq!(round.turns_remaining_in_round, 3);
        assert_eq!(round.time_remaining_in_round, 9.0);
    }
}
