//! Agent state machines for the Blackfile campaign core.
//!
//! This crate contains the logic layer for agents and teams -- everything
//! that operates on entity state without touching storage or I/O. It sits
//! between `blackfile-types` (the data structures) and `blackfile-core`
//! (the store and command dispatcher).
//!
//! # Modules
//!
//! - [`agent`] -- Agent registration ([`AgentRegistration`], [`register_agent`])
//! - [`config`] -- Tunables for sanity and team mechanics ([`AgentConfig`], [`TeamConfig`])
//! - [`cover`] -- Cover-identity stress scoring
//! - [`error`] -- Error types for agent and team operations ([`AgentError`])
//! - [`sanity`] -- Sanity degradation, breakdown, and recovery
//! - [`team`] -- Morale, cohesion, and casualty dynamics
//! - [`update`] -- The closed set of agent updates ([`AgentUpdate`])

pub mod agent;
pub mod config;
pub mod cover;
pub mod error;
pub mod sanity;
pub mod team;
pub mod update;

// Re-export primary types at crate root for convenience.
pub use agent::{AgentRegistration, register_agent};
pub use config::{AgentConfig, TeamConfig};
pub use cover::{CoverOutcome, apply_cover_pressure, cover_status};
pub use error::AgentError;
pub use sanity::{SanityOutcome, modify_sanity, recover_sanity};
pub use team::{
    TeamDynamicsOutcome, TeamDynamicsUpdate, casualty_penalty, create_team, derive_status,
    manage_team_dynamics,
};
pub use update::{AgentUpdate, UpdateEffect, apply_update};
