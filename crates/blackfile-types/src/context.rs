//! Context snapshot shape handed to presentation layers.
//!
//! A snapshot is a read-only copy: nothing in it aliases live campaign
//! state, so consumers may hold on to it for as long as they like.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ThreatLevel;
use crate::ids::SnapshotId;
use crate::structs::{Agent, Mission, NarrativeElement, Team, Threat};

/// Summary of the narrative queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct NarrativeState {
    /// Number of scenes ever injected.
    pub scenes: usize,
    /// Number of atmosphere elements ever injected.
    pub atmosphere: usize,
    /// Number of clues ever injected.
    pub clues: usize,
    /// Number of revelations ever injected.
    pub revelations: usize,
    /// The most recently injected scene, delivered or not.
    pub recent_scene: Option<NarrativeElement>,
    /// Undelivered elements: scenes, then atmosphere, clues, revelations.
    pub pending_narrative: Vec<NarrativeElement>,
}

/// Bookkeeping attached to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Campaign name from configuration.
    pub campaign: String,
    /// Global alert state when the snapshot was taken.
    pub threat_level: ThreatLevel,
    /// Agents on the roster.
    pub agent_count: usize,
    /// Teams registered.
    pub team_count: usize,
    /// Missions registered.
    pub mission_count: usize,
    /// Threats registered, active or not.
    pub threat_count: usize,
    /// Monotonic snapshot counter for this campaign.
    pub sequence: u64,
}

/// Full campaign snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    /// Unique identifier.
    pub id: SnapshotId,
    /// When the snapshot was built.
    pub timestamp: DateTime<Utc>,
    /// Every agent on the roster.
    pub agents: Vec<Agent>,
    /// Every team.
    pub teams: Vec<Team>,
    /// The current mission, if any mission is active.
    pub current_mission: Option<Mission>,
    /// Active threats, most dangerous first.
    pub active_threats: Vec<Threat>,
    /// Narrative queue summary.
    pub narrative: NarrativeState,
    /// Shallow copy of free-form world state.
    pub world_state: BTreeMap<String, serde_json::Value>,
    /// Current atmosphere note.
    pub atmosphere: String,
    /// Briefing depth for the table.
    pub briefing_level: String,
    /// Clearance the snapshot was produced under.
    pub clearance: String,
    /// Bookkeeping.
    pub metadata: SnapshotMetadata,
}
