//! Error types for the blackfile-core crate.

use blackfile_agents::AgentError;
use blackfile_types::{MissionId, NarrativeId, ThreatId};

/// Errors raised by campaign-level operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An agent or team operation failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Mission with the given ID does not exist.
    #[error("mission not found: {0}")]
    MissionNotFound(MissionId),

    /// A mission with this ID already exists.
    #[error("duplicate mission id: {0}")]
    DuplicateMission(MissionId),

    /// Threat with the given ID does not exist.
    #[error("threat not found: {0}")]
    ThreatNotFound(ThreatId),

    /// A threat with this ID already exists.
    #[error("duplicate threat id: {0}")]
    DuplicateThreat(ThreatId),

    /// Narrative element with the given ID does not exist.
    #[error("narrative element not found: {0}")]
    NarrativeNotFound(NarrativeId),

    /// A dice expression could not be parsed or is out of range.
    #[error("invalid dice expression: {reason}")]
    InvalidDice {
        /// Why the expression was rejected.
        reason: String,
    },
}
