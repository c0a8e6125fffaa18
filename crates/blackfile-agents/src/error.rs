//! Error types for the blackfile-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use blackfile_types::{AgentId, TeamId};

/// Errors that can occur during agent and team state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent with the given ID is not on the roster.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// An agent with this ID is already registered.
    #[error("duplicate agent id: {0}")]
    DuplicateAgent(AgentId),

    /// The roster holds an agent with no sanity tracker.
    #[error("sanity tracker missing for agent {0}")]
    SanityTrackerMissing(AgentId),

    /// A tracker was paired with the wrong agent.
    #[error("sanity tracker for {tracker} applied to agent {agent}")]
    TrackerMismatch {
        /// The agent being modified.
        agent: AgentId,
        /// The agent the tracker belongs to.
        tracker: AgentId,
    },

    /// The agent has no cover identity to act on.
    #[error("agent {0} has no cover identity")]
    NoCoverIdentity(AgentId),

    /// A bond failed validation.
    #[error("invalid bond: {reason}")]
    InvalidBond {
        /// Why the bond was rejected.
        reason: String,
    },

    /// An agent update failed validation.
    #[error("invalid agent update: {reason}")]
    InvalidUpdate {
        /// Why the update was rejected.
        reason: String,
    },

    /// Team with the given ID does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// A team with this ID already exists.
    #[error("duplicate team id: {0}")]
    DuplicateTeam(TeamId),

    /// A team references an agent that is not on the roster.
    #[error("team {team} references unknown agent {agent}")]
    UnknownMember {
        /// The team being created or modified.
        team: TeamId,
        /// The missing agent.
        agent: AgentId,
    },
}
