//! Shared type definitions for the Blackfile campaign core.
//!
//! This crate is the single source of truth for the data shapes used across
//! the workspace. Types flow downstream to `TypeScript` via `ts-rs` for
//! table-side presentation tools that consume context snapshots.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string identifiers for every entity
//! - [`bounded`] -- Clamped scalar newtypes (percentages, ratings, intensity)
//! - [`enums`] -- Statuses, levels, and kinds
//! - [`structs`] -- Entity records (agents, trackers, teams, missions, threats)
//! - [`response`] -- The command response envelope
//! - [`context`] -- The context snapshot shape

pub mod bounded;
pub mod context;
pub mod enums;
pub mod ids;
pub mod response;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use bounded::{BondStrength, Intensity, Percentage, ThreatRating};
pub use context::{ContextSnapshot, NarrativeState, SnapshotMetadata};
pub use enums::{
    AgentStatus, BreakpointKind, CommandStatus, ContainmentStatus, CoverStatus, MissionPriority,
    MissionStatus, NarrativeKind, OperationKind, OperationStatus, SanityLoss, Severity,
    TeamStatus, ThreatLevel, ThreatStatus,
};
pub use ids::{AgentId, MissionId, NarrativeId, OperationId, SnapshotId, TeamId, ThreatId};
pub use response::CommandResponse;
pub use structs::{
    Agent, AuditEntry, Bond, Breakpoint, CoverIdentity, Mission, MissionParameters,
    NarrativeElement, OperationRecord, Sanity, SanityHistoryEntry, SanityTracker, Team, Threat,
};
