//! Context snapshots.
//!
//! A snapshot copies the parts of a campaign a presentation layer needs:
//! the roster, teams, the current mission, active threats (most dangerous
//! first), the narrative summary, and world state. Each snapshot built is
//! also archived in the campaign's bounded context history.

use blackfile_types::{ContextSnapshot, SnapshotId, SnapshotMetadata};
use chrono::Utc;
use tracing::debug;

use crate::campaign::Campaign;

impl Campaign {
    /// Build a snapshot of the campaign and archive it.
    pub fn build_context(&mut self) -> ContextSnapshot {
        self.snapshot_sequence = self.snapshot_sequence.saturating_add(1);
        let snapshot = self.snapshot();
        debug!(
            snapshot_id = %snapshot.id,
            sequence = snapshot.metadata.sequence,
            pending = snapshot.narrative.pending_narrative.len(),
            "context snapshot built"
        );
        self.context_history.push(snapshot.clone());
        snapshot
    }

    /// The most recently archived snapshot.
    pub fn last_context(&self) -> Option<&ContextSnapshot> {
        self.context_history.last()
    }

    fn snapshot(&self) -> ContextSnapshot {
        let store = &self.store;
        let campaign = &self.config.campaign;

        ContextSnapshot {
            id: SnapshotId::generate(),
            timestamp: Utc::now(),
            agents: store.agents().cloned().collect(),
            teams: store.teams().cloned().collect(),
            current_mission: store.current_mission().cloned(),
            active_threats: store.active_threats().into_iter().cloned().collect(),
            narrative: self.narrative.state(),
            world_state: self.world_state.clone(),
            atmosphere: self.atmosphere.clone(),
            briefing_level: campaign.briefing_level.clone(),
            clearance: campaign.clearance.clone(),
            metadata: SnapshotMetadata {
                campaign: campaign.name.clone(),
                threat_level: self.threat.level(),
                agent_count: store.agent_count(),
                team_count: store.teams().len(),
                mission_count: store.missions().len(),
                threat_count: store.threats().len(),
                sequence: self.snapshot_sequence,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use blackfile_agents::AgentRegistration;
    use blackfile_types::{MissionStatus, NarrativeKind, ThreatLevel};

    use crate::config::BlackfileConfig;
    use crate::roster::{MissionRegistration, ThreatRegistration};

    use super::*;

    fn threat(id: &str, level: i64) -> ThreatRegistration {
        ThreatRegistration {
            id: Some(String::from(id)),
            threat_level: Some(level),
            ..ThreatRegistration::default()
        }
    }

    #[test]
    fn snapshot_contents() {
        let mut campaign = Campaign::default();
        campaign
            .register_agent(AgentRegistration {
                id: Some(String::from("A1")),
                ..AgentRegistration::default()
            })
            .unwrap();
        campaign.register_threat(threat("T1", 4)).unwrap();
        campaign.register_threat(threat("T2", 8)).unwrap();
        campaign
            .register_mission(MissionRegistration {
                id: Some(String::from("M1")),
                ..MissionRegistration::default()
            })
            .unwrap();
        campaign
            .register_mission(MissionRegistration {
                id: Some(String::from("M2")),
                status: Some(MissionStatus::Planning),
                ..MissionRegistration::default()
            })
            .unwrap();
        campaign.inject_narrative(NarrativeKind::Scene, "rain on the window", 4);
        campaign.set_world_state("weather", serde_json::json!("storm"));
        campaign.escalate();

        let snapshot = campaign.build_context();
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.active_threats[0].id.as_str(), "T2");
        assert_eq!(snapshot.current_mission.unwrap().id.as_str(), "M1");
        assert_eq!(snapshot.narrative.scenes, 1);
        assert_eq!(snapshot.narrative.pending_narrative.len(), 1);
        assert_eq!(snapshot.world_state["weather"], "storm");
        assert_eq!(snapshot.metadata.threat_level, ThreatLevel::Elevated);
        assert_eq!(snapshot.metadata.mission_count, 2);
        assert_eq!(snapshot.clearance, "CONFIDENTIAL");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let mut campaign = Campaign::default();
        let json = serde_json::to_value(campaign.build_context()).unwrap();
        assert!(json.get("activeThreats").is_some());
        assert!(json.get("currentMission").unwrap().is_null());
        assert!(json["narrative"].get("pendingNarrative").is_some());
        assert_eq!(json["metadata"]["threatLevel"], "NORMAL");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut campaign = Campaign::default();
        let before = campaign.build_context();
        campaign.inject_narrative(NarrativeKind::Clue, "a matchbook", 5);
        assert_eq!(before.narrative.clues, 0);
        assert_eq!(campaign.build_context().narrative.clues, 1);
    }

    #[test]
    fn history_is_bounded() {
        let mut config = BlackfileConfig::default();
        config.retention.context_history_capacity = 3;
        let mut campaign = Campaign::empty(config);
        for _ in 0..5 {
            campaign.build_context();
        }
        assert_eq!(campaign.context_history().len(), 3);
        let sequences: Vec<_> = campaign
            .context_history()
            .iter()
            .map(|s| s.metadata.sequence)
            .collect();
        assert_eq!(sequences, vec![3, 4, 5]);
        assert_eq!(campaign.last_context().unwrap().metadata.sequence, 5);
    }
}
