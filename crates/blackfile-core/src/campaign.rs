//! The campaign aggregate.
//!
//! A [`Campaign`] owns everything a session mutates: the entity store, the
//! global threat monitor, the narrative queue, the dice, and the free-form
//! world state. Hosts create one per session and hand it to a
//! [`Dispatcher`](crate::dispatch::Dispatcher) or drive it directly.
//!
//! Every operation validates references before mutating, so a failed call
//! leaves the campaign unchanged.

use std::collections::BTreeMap;

use blackfile_agents::{
    AgentError, AgentRegistration, AgentUpdate, CoverOutcome, SanityOutcome, TeamDynamicsOutcome,
    TeamDynamicsUpdate, UpdateEffect, apply_cover_pressure, apply_update, create_team,
    manage_team_dynamics, modify_sanity, recover_sanity, register_agent,
};
use blackfile_types::{
    Agent, AgentId, ContainmentStatus, ContextSnapshot, MissionId, MissionStatus,
    NarrativeElement, NarrativeId, NarrativeKind, NarrativeState, SanityLoss, Severity, TeamId,
    ThreatId, ThreatLevel, ThreatRating, ThreatStatus,
};
use tracing::info;

use crate::config::BlackfileConfig;
use crate::dice::{Dice, DiceRoll, DiceSpec};
use crate::error::CoreError;
use crate::narrative::NarrativeQueue;
use crate::retention::RingLog;
use crate::roster::{MissionRegistration, TeamRegistration, ThreatRegistration};
use crate::store::EntityStore;
use crate::threat::{ThreatCause, ThreatMonitor, ThreatTransition};

/// All mutable state of one campaign session.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub(crate) config: BlackfileConfig,
    pub(crate) store: EntityStore,
    pub(crate) threat: ThreatMonitor,
    pub(crate) narrative: NarrativeQueue,
    pub(crate) dice: Dice,
    pub(crate) world_state: BTreeMap<String, serde_json::Value>,
    pub(crate) atmosphere: String,
    pub(crate) context_history: RingLog<ContextSnapshot>,
    pub(crate) snapshot_sequence: u64,
}

impl Default for Campaign {
    fn default() -> Self {
        Self::empty(BlackfileConfig::default())
    }
}

impl Campaign {
    /// Create a campaign and register the configured roster.
    ///
    /// # Errors
    ///
    /// Fails if the roster contains duplicate IDs or a team names an agent
    /// that is not on it.
    pub fn new(config: BlackfileConfig) -> Result<Self, CoreError> {
        let roster = config.roster.clone();
        let mut campaign = Self::empty(config);

        for agent in roster.agents {
            campaign.register_agent(agent)?;
        }
        for team in roster.teams {
            campaign.create_team(team)?;
        }
        for mission in roster.missions {
            campaign.register_mission(mission)?;
        }
        for threat in roster.threats {
            campaign.register_threat(threat)?;
        }

        info!(
            campaign = %campaign.config.campaign.name,
            agents = campaign.store.agent_count(),
            teams = campaign.store.teams().len(),
            missions = campaign.store.missions().len(),
            threats = campaign.store.threats().len(),
            "campaign initialised"
        );
        Ok(campaign)
    }

    /// Create a campaign with nothing registered.
    pub fn empty(config: BlackfileConfig) -> Self {
        Self {
            store: EntityStore::new(),
            threat: ThreatMonitor::new(config.dispatch.threat_history_capacity),
            narrative: NarrativeQueue::new(),
            dice: Dice::new(config.campaign.dice_seed),
            world_state: config.campaign.world_state.clone(),
            atmosphere: config.campaign.atmosphere.clone(),
            context_history: RingLog::with_capacity(config.retention.context_history_capacity),
            snapshot_sequence: 0,
            config,
        }
    }

    /// The configuration this campaign runs under.
    pub const fn config(&self) -> &BlackfileConfig {
        &self.config
    }

    /// Read access to the entity store.
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Read access to the global threat monitor.
    pub const fn threat_monitor(&self) -> &ThreatMonitor {
        &self.threat
    }

    /// Current global alert state.
    pub const fn threat_level(&self) -> ThreatLevel {
        self.threat.level()
    }

    /// Read access to the narrative queue.
    pub const fn narrative(&self) -> &NarrativeQueue {
        &self.narrative
    }

    /// Archived context snapshots, oldest first.
    pub const fn context_history(&self) -> &RingLog<ContextSnapshot> {
        &self.context_history
    }

    // -----------------------------------------------------------------------
    // Agents
    // -----------------------------------------------------------------------

    /// Register an agent and its sanity tracker.
    pub fn register_agent(&mut self, input: AgentRegistration) -> Result<AgentId, CoreError> {
        let (agent, tracker) = register_agent(input, &self.config.agents);
        let id = agent.id.clone();
        self.store.insert_agent(agent, tracker)?;
        info!(agent_id = %id, "agent registered");
        Ok(id)
    }

    /// Look up an agent.
    pub fn agent(&self, id: &AgentId) -> Result<&Agent, CoreError> {
        Ok(self.store.agent(id)?)
    }

    /// Apply a typed update to an agent.
    ///
    /// Peers referenced by the update must be on the roster.
    pub fn update_agent(
        &mut self,
        id: &AgentId,
        update: AgentUpdate,
    ) -> Result<UpdateEffect, CoreError> {
        if let Some(peer) = update.referenced_peer()
            && !self.store.contains_agent(peer)
        {
            return Err(AgentError::InvalidBond {
                reason: format!("unknown peer agent {peer}"),
            }
            .into());
        }
        let (agent, tracker) = self.store.agent_pair_mut(id)?;
        Ok(apply_update(agent, tracker, update, &self.config.agents)?)
    }

    /// Apply a sanity delta through the sanity state machine.
    pub fn modify_sanity(
        &mut self,
        id: &AgentId,
        delta: i64,
        loss: SanityLoss,
    ) -> Result<SanityOutcome, CoreError> {
        let (agent, tracker) = self.store.agent_pair_mut(id)?;
        Ok(modify_sanity(agent, tracker, delta, loss, &self.config.agents)?)
    }

    /// Restore sanity from the agent's temporary-loss pool.
    pub fn recover_sanity(&mut self, id: &AgentId, amount: u32) -> Result<SanityOutcome, CoreError> {
        let (agent, tracker) = self.store.agent_pair_mut(id)?;
        Ok(recover_sanity(agent, tracker, amount)?)
    }

    /// Apply pressure (or decompression) to an agent's cover.
    pub fn apply_cover_pressure(
        &mut self,
        id: &AgentId,
        pressure: i64,
    ) -> Result<CoverOutcome, CoreError> {
        let (agent, _) = self.store.agent_pair_mut(id)?;
        Ok(apply_cover_pressure(agent, pressure))
    }

    /// Mark an agent inactive. Agents are never removed.
    pub fn retire_agent(&mut self, id: &AgentId) -> Result<(), CoreError> {
        self.update_agent(id, AgentUpdate::Retire)?;
        info!(agent_id = %id, "agent retired");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Teams
    // -----------------------------------------------------------------------

    /// Create a team from agents already on the roster.
    pub fn create_team(&mut self, input: TeamRegistration) -> Result<TeamId, CoreError> {
        let members = input.member_ids();
        let team = create_team(
            input.team_id(),
            input.name,
            members,
            input.morale,
            input.cohesion,
            &self.config.teams,
        );
        let id = team.id.clone();
        let size = team.members.len();
        self.store.insert_team(team)?;
        info!(team_id = %id, members = size, "team created");
        Ok(id)
    }

    /// Apply morale, cohesion, and casualty changes to a team.
    pub fn manage_team_dynamics(
        &mut self,
        id: &TeamId,
        update: TeamDynamicsUpdate,
    ) -> Result<TeamDynamicsOutcome, CoreError> {
        let team = self.store.team_mut(id)?;
        Ok(manage_team_dynamics(team, update, &self.config.teams))
    }

    // -----------------------------------------------------------------------
    // Missions
    // -----------------------------------------------------------------------

    /// Register a mission.
    pub fn register_mission(&mut self, input: MissionRegistration) -> Result<MissionId, CoreError> {
        let mission = input.into_mission();
        let id = mission.id.clone();
        self.store.insert_mission(mission)?;
        info!(mission_id = %id, "mission registered");
        Ok(id)
    }

    /// Move a mission through its lifecycle.
    pub fn set_mission_status(
        &mut self,
        id: &MissionId,
        status: MissionStatus,
    ) -> Result<(), CoreError> {
        self.store.mission_mut(id)?.status = status;
        info!(mission_id = %id, ?status, "mission status changed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Threats
    // -----------------------------------------------------------------------

    /// Register a threat entity.
    pub fn register_threat(&mut self, input: ThreatRegistration) -> Result<ThreatId, CoreError> {
        let threat = input.into_threat();
        let id = threat.id.clone();
        self.store.insert_threat(threat)?;
        info!(threat_id = %id, "threat registered");
        Ok(id)
    }

    /// Shift a threat's rating; the result is clamped to `[1, 10]`.
    pub fn adjust_threat_level(
        &mut self,
        id: &ThreatId,
        delta: i64,
    ) -> Result<ThreatRating, CoreError> {
        let threat = self.store.threat_mut(id)?;
        threat.threat_level = threat.threat_level.saturating_shift(delta);
        info!(threat_id = %id, delta, level = threat.threat_level.get(), "threat rating adjusted");
        Ok(threat.threat_level)
    }

    /// Set a threat's status.
    pub fn set_threat_status(&mut self, id: &ThreatId, status: ThreatStatus) -> Result<(), CoreError> {
        self.store.threat_mut(id)?.status = status;
        info!(threat_id = %id, ?status, "threat status changed");
        Ok(())
    }

    /// Set a threat's containment state.
    pub fn set_containment(
        &mut self,
        id: &ThreatId,
        containment: ContainmentStatus,
    ) -> Result<(), CoreError> {
        self.store.threat_mut(id)?.containment_status = containment;
        info!(threat_id = %id, ?containment, "containment changed");
        Ok(())
    }

    /// Set the global level from a containment severity.
    pub fn apply_severity(&mut self, severity: Option<Severity>) -> ThreatTransition {
        self.threat.apply_severity(severity)
    }

    /// Raise the global level to at least ELEVATED.
    pub fn raise_alert(&mut self, cause: ThreatCause) -> ThreatTransition {
        let stand_down = self.config.dispatch.alert_can_stand_down;
        self.threat.raise_alert(cause, stand_down)
    }

    /// Step the global level one up.
    pub fn escalate(&mut self) -> ThreatTransition {
        self.threat.escalate()
    }

    // -----------------------------------------------------------------------
    // Narrative, world state, dice
    // -----------------------------------------------------------------------

    /// Queue a narrative element.
    pub fn inject_narrative(
        &mut self,
        kind: NarrativeKind,
        content: impl Into<String>,
        intensity: i64,
    ) -> NarrativeElement {
        self.narrative.inject(kind, content, intensity)
    }

    /// Latch a narrative element as delivered.
    pub fn mark_delivered(&mut self, id: &NarrativeId) -> Result<&NarrativeElement, CoreError> {
        self.narrative.mark_delivered(id)
    }

    /// Narrative queue summary.
    pub fn narrative_state(&self) -> NarrativeState {
        self.narrative.state()
    }

    /// Set a world-state entry, returning the previous value.
    pub fn set_world_state(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.world_state.insert(key.into(), value)
    }

    /// Free-form world state.
    pub const fn world_state(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.world_state
    }

    /// Replace the atmosphere note.
    pub fn set_atmosphere(&mut self, atmosphere: impl Into<String>) {
        self.atmosphere = atmosphere.into();
    }

    /// Roll dice.
    pub fn roll(&mut self, spec: DiceSpec) -> DiceRoll {
        self.dice.roll(spec)
    }
}
