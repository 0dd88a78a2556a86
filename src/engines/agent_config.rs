//! Agent configuration and the named agent profiles.
//!
//! The named profiles share one orchestrator; they differ only in the
//! evaluation weights and the time-allocation policy picked here.

use crate::errors::{AgentError, AgentResult};
use crate::engines::time_management::{AllocationPolicy, Escalation};
use crate::search::board_scoring::WeightTable;
use crate::search::iterative_deepening::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentProfile {
    /// Material-only evaluation with adaptive time allocation.
    Improved,
    /// Seven-feature evaluation with an even time split.
    BetterHeuristic,
    /// Seven-feature evaluation with adaptive time allocation.
    #[default]
    ImprovedBetterHeuristic,
}

impl AgentProfile {
    pub const fn weights(self) -> WeightTable {
        match self {
            AgentProfile::Improved => WeightTable::material_only(),
            AgentProfile::BetterHeuristic | AgentProfile::ImprovedBetterHeuristic => {
                WeightTable::heuristic()
            }
        }
    }

    pub fn allocation(self) -> AllocationPolicy {
        match self {
            AgentProfile::BetterHeuristic => AllocationPolicy::Uniform,
            AgentProfile::Improved | AgentProfile::ImprovedBetterHeuristic => {
                AllocationPolicy::Adaptive(Escalation::default())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    /// Turns per time round.
    pub k: u32,
    /// Seconds granted per round.
    pub time_per_k_turns: f64,
    pub weights: WeightTable,
    pub allocation: AllocationPolicy,
    pub search: SearchConfig,
    pub forced_capture_shortcut: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::from_profile(AgentProfile::default(), 5, 10.0)
    }
}

impl AgentConfig {
    pub fn from_profile(profile: AgentProfile, k: u32, time_per_k_turns: f64) -> Self {
        Self {
            k,
            time_per_k_turns,
            weights: profile.weights(),
            allocation: profile.allocation(),
            search: SearchConfig::default(),
            forced_capture_shortcut: true,
        }
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.k == 0 {
            return Err(AgentError::InvalidConfig(
                "k must be at least one turn".to_owned(),
            ));
        }
        if !self.time_per_k_turns.is_finite() || self.time_per_k_turns <= 0.0 {
            return Err(AgentError::InvalidConfig(format!(
                "time_per_k_turns must be a positive number of seconds, got {}",
                self.time_per_k_turns
            )));
        }
        if self.search.max_depth == Some(0) {
            return Err(AgentError::InvalidConfig(
                "max_depth must allow at least depth 1".to_owned(),
            ));
        }
        Ok(())
    }
}
