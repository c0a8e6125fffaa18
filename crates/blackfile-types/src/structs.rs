//! Core entity structs for the Blackfile campaign core.
//!
//! These are plain data records. Behavior (sanity transitions, team
//! dynamics, cover stress) lives in `blackfile-agents`; storage and lookup
//! live in `blackfile-core`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bounded::{BondStrength, Intensity, Percentage, ThreatRating};
use crate::enums::{
    AgentStatus, BreakpointKind, CommandStatus, ContainmentStatus, MissionPriority, MissionStatus,
    NarrativeKind, OperationKind, OperationStatus, TeamStatus, ThreatStatus,
};
use crate::ids::{AgentId, MissionId, NarrativeId, OperationId, TeamId, ThreatId};

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Current and maximum sanity. `current` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Sanity {
    /// Present sanity points.
    pub current: u32,
    /// Ceiling for `current`.
    pub max: u32,
}

/// A fictitious persona an agent operates under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase", default)]
pub struct CoverIdentity {
    /// Whether the agent is currently operating under this cover.
    pub active: bool,
    /// Name used under cover.
    pub alias: String,
    /// Supporting backstory artifacts (documents, references, history).
    pub legends: Vec<String>,
    /// Professional fields the cover can credibly claim.
    pub field_expertise: Vec<String>,
    /// Safe houses available to the cover.
    pub safe_houses: Vec<String>,
}

/// A relationship from one agent to a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bond {
    /// The other agent.
    pub peer: AgentId,
    /// Free-form description ("partner", "handler", "sibling").
    pub relationship: String,
    /// Strength of the bond.
    pub strength: BondStrength,
}

/// An agent on the campaign roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Role within the organisation.
    pub role: String,
    /// Sanity mirror; the tracker is authoritative for history.
    pub sanity: Sanity,
    /// Operational status.
    pub status: AgentStatus,
    /// Accumulated stress, driven by cover pressure.
    pub stress_level: Percentage,
    /// Optional cover identity.
    pub cover: Option<CoverIdentity>,
    /// Bonds to other agents.
    pub bonds: Vec<Bond>,
    /// Named operational resource counters (ammunition, favours, cash).
    pub resources: BTreeMap<String, u32>,
    /// Skill ratings by name.
    pub skills: BTreeMap<String, u32>,
    /// Carried equipment.
    pub equipment: Vec<String>,
    /// Outside contacts.
    pub connections: Vec<String>,
    /// Game master notes.
    pub notes: String,
    /// When the agent joined the roster.
    pub registered_at: DateTime<Utc>,
}

/// One entry in a sanity tracker's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SanityHistoryEntry {
    /// When the change was applied.
    pub timestamp: DateTime<Utc>,
    /// Requested delta (before clamping).
    pub delta: i64,
    /// Sanity before the change.
    pub previous: u32,
    /// Sanity after the change.
    pub current: u32,
}

/// A recorded crossing of a sanity threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Breakpoint {
    /// Which threshold was crossed.
    pub kind: BreakpointKind,
    /// When it was crossed.
    pub timestamp: DateTime<Utc>,
    /// Sanity at the moment of crossing.
    pub sanity: u32,
}

/// Per-agent sanity ledger.
///
/// `history` and `breakpoints` only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SanityTracker {
    /// The agent this tracker belongs to.
    pub agent_id: AgentId,
    /// Mirror of the agent's current sanity.
    pub current: u32,
    /// Mirror of the agent's maximum sanity.
    pub max: u32,
    /// Sanity lost to temporary shocks that recovery may restore.
    pub temporary_loss: u32,
    /// Every change ever applied, in order.
    pub history: Vec<SanityHistoryEntry>,
    /// Every threshold crossing, in order.
    pub breakpoints: Vec<Breakpoint>,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// A team of agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Member agents (references into the roster).
    pub members: Vec<AgentId>,
    /// Morale.
    pub morale: Percentage,
    /// Cohesion.
    pub cohesion: Percentage,
    /// Casualties suffered; never decreases.
    pub casualty_count: u32,
    /// Derived from morale.
    pub status: TeamStatus,
}

// ---------------------------------------------------------------------------
// Missions
// ---------------------------------------------------------------------------

/// Operating parameters of a mission. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase", default)]
pub struct MissionParameters {
    /// Priority band.
    pub priority: MissionPriority,
    /// Expected duration.
    pub timeframe: String,
    /// Rules of engagement in force.
    pub rules_of_engagement: String,
    /// Level of force authorised.
    pub authorized_force: String,
    /// How much collateral exposure is tolerated.
    pub collateral_sensitivity: String,
}

impl Default for MissionParameters {
    fn default() -> Self {
        Self {
            priority: MissionPriority::Standard,
            timeframe: String::from("72 hours"),
            rules_of_engagement: String::from("observe and report"),
            authorized_force: String::from("minimal"),
            collateral_sensitivity: String::from("high"),
        }
    }
}

/// A mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    /// Unique identifier.
    pub id: MissionId,
    /// Operation name.
    pub name: String,
    /// Stated objectives.
    pub objectives: Vec<String>,
    /// Lifecycle status.
    pub status: MissionStatus,
    /// Operating parameters.
    pub parameters: MissionParameters,
    /// When the mission was registered.
    pub registered_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Threats
// ---------------------------------------------------------------------------

/// A tracked threat entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    /// Unique identifier.
    pub id: ThreatId,
    /// Display name.
    pub name: String,
    /// Free-form classification ("cult", "entity", "artifact").
    pub classification: String,
    /// Danger rating.
    pub threat_level: ThreatRating,
    /// Status.
    pub status: ThreatStatus,
    /// Containment state.
    pub containment_status: ContainmentStatus,
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

/// A piece of narrative queued for delivery to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct NarrativeElement {
    /// Unique identifier.
    pub id: NarrativeId,
    /// Which channel the element belongs to.
    pub kind: NarrativeKind,
    /// The text to deliver.
    pub content: String,
    /// Dramatic intensity.
    pub intensity: Intensity,
    /// Set once delivered; never cleared.
    pub delivered: bool,
    /// When the element was injected.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A record created by a dispatched command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// Unique identifier.
    pub id: OperationId,
    /// What kind of operation this is.
    pub kind: OperationKind,
    /// Status at creation.
    pub status: OperationStatus,
    /// Primary subject (target, threat, object type).
    pub subject: String,
    /// Agent involved, if any.
    pub agent_id: Option<AgentId>,
    /// Command-specific detail.
    pub details: serde_json::Value,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

/// One entry in the dispatcher's audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AuditEntry {
    /// When the command completed.
    pub timestamp: DateTime<Utc>,
    /// Upper-cased command name.
    pub command: String,
    /// Arguments after the command name.
    pub args: Vec<String>,
    /// Status of the response.
    pub status: CommandStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn mission_parameters_default_when_absent() {
        let params: MissionParameters =
            serde_json::from_str(r#"{"priority": "high"}"#).unwrap();
        assert_eq!(params.priority, MissionPriority::High);
        assert_eq!(params.timeframe, "72 hours");
        assert_eq!(params.authorized_force, "minimal");
    }

    #[test]
    fn cover_identity_uses_camel_case() {
        let cover = CoverIdentity {
            active: true,
            alias: String::from("Dr. Hale"),
            field_expertise: vec![String::from("epidemiology")],
            ..CoverIdentity::default()
        };
        let json = serde_json::to_value(&cover).unwrap();
        assert_eq!(json["fieldExpertise"][0], "epidemiology");
        assert_eq!(json["safeHouses"], serde_json::json!([]));
    }
}
