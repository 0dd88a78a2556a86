//! Crate root module declarations for the checkers agent.
//!
//! This file exposes the subsystems (board model, host move generation,
//! search, and the move-selecting engine) so hosts, tests, and benches can
//! import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod checkers_move;
    pub mod checkers_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod move_generator;
    pub mod standard_rules;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod deadline;
    pub mod features;
    pub mod iterative_deepening;
    pub mod search_hooks;
}

pub mod engines {
    pub mod agent_config;
    pub mod checkers_agent;
    pub mod engine_trait;
    pub mod time_management;
}

pub use engines::agent_config::{AgentConfig, AgentProfile};
pub use engines::checkers_agent::CheckersAgent;
pub use engines::engine_trait::{DecisionKind, Engine, MoveDecision};
pub use errors::{AgentError, AgentResult};
