//! Agent registration.
//!
//! [`AgentRegistration`] is the loose input shape accepted from roster
//! files and hosts: every field is optional. [`register_agent`] fills in
//! defaults from [`AgentConfig`], clamps sanity into range, and returns
//! the [`Agent`] together with its paired [`SanityTracker`].

use std::collections::BTreeMap;

use blackfile_types::{
    Agent, AgentId, AgentStatus, CoverIdentity, Percentage, Sanity, SanityTracker,
};
use chrono::Utc;
use serde::Deserialize;

use crate::config::AgentConfig;

/// Input for registering an agent. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentRegistration {
    /// Identifier; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Role within the organisation.
    pub role: Option<String>,
    /// Starting sanity; defaults to `max_sanity` and is clamped into range.
    pub sanity: Option<i64>,
    /// Maximum sanity; defaults to the configured value.
    pub max_sanity: Option<u32>,
    /// Skill ratings by name.
    pub skills: Option<BTreeMap<String, u32>>,
    /// Starting status.
    pub status: Option<AgentStatus>,
    /// Cover identity.
    pub cover: Option<CoverIdentity>,
    /// Carried equipment.
    pub equipment: Option<Vec<String>>,
    /// Outside contacts.
    pub connections: Option<Vec<String>>,
    /// Named resource counters.
    pub resources: Option<BTreeMap<String, u32>>,
    /// Game master notes.
    pub notes: Option<String>,
}

/// Build a new agent and its sanity tracker from a registration.
///
/// Duplicate-ID checks belong to the store; this function only applies
/// defaults and clamping.
pub fn register_agent(input: AgentRegistration, config: &AgentConfig) -> (Agent, SanityTracker) {
    let id = input.id.map_or_else(AgentId::generate, AgentId::new);
    let max = input.max_sanity.unwrap_or(config.default_max_sanity);
    let current = input
        .sanity
        .map_or(max, |raw| u32::try_from(raw.clamp(0, i64::from(max))).unwrap_or(max));

    let agent = Agent {
        id: id.clone(),
        name: input.name.unwrap_or_else(|| config.default_name.clone()),
        role: input.role.unwrap_or_else(|| config.default_role.clone()),
        sanity: Sanity { current, max },
        status: input.status.unwrap_or_default(),
        stress_level: Percentage::default(),
        cover: input.cover,
        bonds: Vec::new(),
        resources: input.resources.unwrap_or_default(),
        skills: input.skills.unwrap_or_default(),
        equipment: input.equipment.unwrap_or_default(),
        connections: input.connections.unwrap_or_default(),
        notes: input.notes.unwrap_or_default(),
        registered_at: Utc::now(),
    };

    let tracker = SanityTracker {
        agent_id: id,
        current,
        max,
        temporary_loss: 0,
        history: Vec::new(),
        breakpoints: Vec::new(),
    };

    (agent, tracker)
}
