//! Entity store.
//!
//! Agents, sanity trackers, teams, missions, and threats keyed by
//! identifier. The store only enforces referential rules (unique IDs, one
//! tracker per agent, team members on the roster); state transitions live
//! in `blackfile-agents` and [`crate::threat`].
//!
//! Agents and trackers are inserted and looked up as a pair, so every
//! tracker corresponds to exactly one agent. Nothing is ever removed.

use std::collections::BTreeMap;

use blackfile_agents::AgentError;
use blackfile_types::{
    Agent, AgentId, Mission, MissionId, MissionStatus, SanityTracker, Team, TeamId, Threat,
    ThreatId, ThreatStatus,
};

use crate::error::CoreError;

/// In-memory entity storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    agents: BTreeMap<AgentId, Agent>,
    trackers: BTreeMap<AgentId, SanityTracker>,
    teams: BTreeMap<TeamId, Team>,
    /// Registration order; "current mission" depends on it.
    missions: Vec<Mission>,
    threats: BTreeMap<ThreatId, Threat>,
}

impl EntityStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
            trackers: BTreeMap::new(),
            teams: BTreeMap::new(),
            missions: Vec::new(),
            threats: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Agents
    // -----------------------------------------------------------------------

    /// Add an agent together with its tracker.
    pub fn insert_agent(&mut self, agent: Agent, tracker: SanityTracker) -> Result<(), AgentError> {
        if self.agents.contains_key(&agent.id) {
            return Err(AgentError::DuplicateAgent(agent.id));
        }
        if tracker.agent_id != agent.id {
            return Err(AgentError::TrackerMismatch {
                agent: agent.id,
                tracker: tracker.agent_id,
            });
        }
        self.trackers.insert(agent.id.clone(), tracker);
        self.agents.insert(agent.id.clone(), agent);
        Ok(())
    }

    /// Whether an agent with this ID is on the roster.
    pub fn contains_agent(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    /// Look up an agent.
    pub fn agent(&self, id: &AgentId) -> Result<&Agent, AgentError> {
        self.agents
            .get(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.clone()))
    }

    /// Look up an agent's tracker.
    pub fn tracker(&self, id: &AgentId) -> Result<&SanityTracker, AgentError> {
        if !self.agents.contains_key(id) {
            return Err(AgentError::AgentNotFound(id.clone()));
        }
        self.trackers
            .get(id)
            .ok_or_else(|| AgentError::SanityTrackerMissing(id.clone()))
    }

    /// Mutable access to an agent and its tracker together.
    pub fn agent_pair_mut(
        &mut self,
        id: &AgentId,
    ) -> Result<(&mut Agent, &mut SanityTracker), AgentError> {
        let agent = self
            .agents
            .get_mut(id)
            .ok_or_else(|| AgentError::AgentNotFound(id.clone()))?;
        let tracker = self
            .trackers
            .get_mut(id)
            .ok_or_else(|| AgentError::SanityTrackerMissing(id.clone()))?;
        Ok((agent, tracker))
    }

    /// Every agent, ordered by ID.
    pub fn agents(&self) -> impl ExactSizeIterator<Item = &Agent> {
        self.agents.values()
    }

    /// Number of agents on the roster.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    /// Add a team. Every member must already be on the roster.
    pub fn insert_team(&mut self, team: Team) -> Result<(), AgentError> {
        if self.teams.contains_key(&team.id) {
            return Err(AgentError::DuplicateTeam(team.id));
        }
        if let Some(missing) = team.members.iter().find(|m| !self.agents.contains_key(*m)) {
            return Err(AgentError::UnknownMember {
                team: team.id.clone(),
                agent: missing.clone(),
            });
        }
        self.teams.insert(team.id.clone(), team);
        Ok(())
    }

    /// Look up a team.
    pub fn team(&self, id: &TeamId) -> Result<&Team, AgentError> {
        self.teams
            .get(id)
            .ok_or_else(|| AgentError::TeamNotFound(id.clone()))
    }

    /// Mutable access to a team.
    pub fn team_mut(&mut self, id: &TeamId) -> Result<&mut Team, AgentError> {
        self.teams
            .get_mut(id)
            .ok_or_else(|| AgentError::TeamNotFound(id.clone()))
    }

    /// Every team, ordered by ID.
    pub fn teams(&self) -> impl ExactSizeIterator<Item = &Team> {
        self.teams.values()
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// Add a mission.
    pub fn insert_mission(&mut self, mission: Mission) -> Result<(), CoreError> {
        if self.missions.iter().any(|m| m.id == mission.id) {
            return Err(CoreError::DuplicateMission(mission.id));
        }
        self.missions.push(mission);
        Ok(())
    }

    /// Look up a mission.
    pub fn mission(&self, id: &MissionId) -> Result<&Mission, CoreError> {
        self.missions
            .iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| CoreError::MissionNotFound(id.clone()))
    }

    /// Mutable access to a mission.
    pub fn mission_mut(&mut self, id: &MissionId) -> Result<&mut Mission, CoreError> {
        self.missions
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| CoreError::MissionNotFound(id.clone()))
    }

    /// Every mission, in registration order.
    pub fn missions(&self) -> impl ExactSizeIterator<Item = &Mission> {
        self.missions.iter()
    }

    /// The most recently registered mission that is still active.
    pub fn current_mission(&self) -> Option<&Mission> {
        self.missions
            .iter()
            .rev()
            .find(|m| m.status == MissionStatus::Active)
    }

    // -----------------------------------------------------------------------
    // Threats
    // -----------------------------------------------------------------------

    /// Add a threat.
    pub fn insert_threat(&mut self, threat: Threat) -> Result<(), CoreError> {
        if self.threats.contains_key(&threat.id) {
            return Err(CoreError::DuplicateThreat(threat.id));
        }
        self.threats.insert(threat.id.clone(), threat);
        Ok(())
    }

    /// Look up a threat.
    pub fn threat(&self, id: &ThreatId) -> Result<&Threat, CoreError> {
        self.threats
            .get(id)
            .ok_or_else(|| CoreError::ThreatNotFound(id.clone()))
    }

    /// Mutable access to a threat.
    pub fn threat_mut(&mut self, id: &ThreatId) -> Result<&mut Threat, CoreError> {
        self.threats
            .get_mut(id)
            .ok_or_else(|| CoreError::ThreatNotFound(id.clone()))
    }

    /// Every threat, ordered by ID.
    pub fn threats(&self) -> impl ExactSizeIterator<Item = &Threat> {
        self.threats.values()
    }

    /// Active threats, highest rating first; ties keep ID order.
    pub fn active_threats(&self) -> Vec<&Threat> {
        let mut active: Vec<&Threat> = self
            .threats
            .values()
            .filter(|t| t.status == ThreatStatus::Active)
            .collect();
        active.sort_by(|a, b| b.threat_level.cmp(&a.threat_level));
        active
    }
}
