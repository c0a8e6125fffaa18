//! Registration inputs for teams, missions, and threats.
//!
//! Like [`AgentRegistration`], these are the loose shapes read from the
//! `roster` section of the configuration file or handed over by a host.
//! Absent fields take defaults; bounded fields are clamped.

use blackfile_agents::AgentRegistration;
use blackfile_types::{
    AgentId, ContainmentStatus, Mission, MissionId, MissionParameters, MissionStatus, TeamId,
    Threat, ThreatId, ThreatRating, ThreatStatus,
};
use chrono::Utc;
use serde::Deserialize;

/// Input for creating a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamRegistration {
    /// Identifier; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Member agent IDs; each must be on the roster.
    pub members: Vec<String>,
    /// Starting morale, clamped.
    pub morale: Option<i64>,
    /// Starting cohesion, clamped.
    pub cohesion: Option<i64>,
}

impl TeamRegistration {
    /// The team ID, generated when absent.
    pub fn team_id(&self) -> TeamId {
        self.id.as_deref().map_or_else(TeamId::generate, TeamId::from)
    }

    /// Member IDs as typed identifiers.
    pub fn member_ids(&self) -> Vec<AgentId> {
        self.members.iter().map(|m| AgentId::new(m.as_str())).collect()
    }
}

/// Input for registering a mission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissionRegistration {
    /// Identifier; generated when absent.
    pub id: Option<String>,
    /// Operation name.
    pub name: Option<String>,
    /// Stated objectives.
    pub objectives: Vec<String>,
    /// Lifecycle status; defaults to active.
    pub status: Option<MissionStatus>,
    /// Operating parameters; missing fields take defaults.
    pub parameters: MissionParameters,
}

impl MissionRegistration {
    /// Build the mission record.
    pub fn into_mission(self) -> Mission {
        Mission {
            id: self.id.map_or_else(MissionId::generate, MissionId::new),
            name: self.name.unwrap_or_else(|| String::from("Unnamed Operation")),
            objectives: self.objectives,
            status: self.status.unwrap_or_default(),
            parameters: self.parameters,
            registered_at: Utc::now(),
        }
    }
}

/// Input for registering a threat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreatRegistration {
    /// Identifier; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Free-form classification.
    pub classification: Option<String>,
    /// Danger rating, clamped to `[1, 10]`.
    pub threat_level: Option<i64>,
    /// Status; defaults to active.
    pub status: Option<ThreatStatus>,
    /// Containment state; defaults to uncontained.
    pub containment_status: Option<ContainmentStatus>,
}

impl ThreatRegistration {
    /// Build the threat record.
    pub fn into_threat(self) -> Threat {
        Threat {
            id: self.id.map_or_else(ThreatId::generate, ThreatId::new),
            name: self.name.unwrap_or_else(|| String::from("Unidentified Threat")),
            classification: self.classification.unwrap_or_else(|| String::from("unknown")),
            threat_level: self
                .threat_level
                .map_or_else(ThreatRating::default, ThreatRating::clamped),
            status: self.status.unwrap_or_default(),
            containment_status: self.containment_status.unwrap_or_default(),
        }
    }
}

/// Entities registered when a campaign starts.
///
/// Agents are registered first, then teams (whose members must exist),
/// then missions and threats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Agents to register.
    pub agents: Vec<AgentRegistration>,
    /// Teams to create.
    pub teams: Vec<TeamRegistration>,
    /// Missions to register, in order.
    pub missions: Vec<MissionRegistration>,
    /// Threats to register.
    pub threats: Vec<ThreatRegistration>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn mission_defaults() {
        let mission = MissionRegistration::default().into_mission();
        assert_eq!(mission.status, MissionStatus::Active);
        assert_eq!(mission.name, "Unnamed Operation");
        assert_eq!(mission.parameters, MissionParameters::default());
    }

    #[test]
    fn threat_level_clamped_on_registration() {
        let threat = ThreatRegistration {
            id: Some(String::from("T1")),
            threat_level: Some(42),
            ..ThreatRegistration::default()
        }
        .into_threat();
        assert_eq!(threat.threat_level.get(), 10);
        assert_eq!(threat.status, ThreatStatus::Active);
        assert_eq!(threat.containment_status, ContainmentStatus::Uncontained);

        let low = ThreatRegistration {
            threat_level: Some(-1),
            ..ThreatRegistration::default()
        }
        .into_threat();
        assert_eq!(low.threat_level.get(), 1);
    }

    #[test]
    fn roster_parses_from_yaml() {
        let yaml = r#"
agents:
  - id: A1
    name: Vega
    maxSanity: 70
teams:
  - id: ALPHA
    name: Alpha
    members: [A1]
    morale: 120
missions:
  - id: M1
    name: Operation Lantern
    parameters:
      priority: high
threats:
  - id: T1
    threatLevel: 7
    containmentStatus: partial
"#;
        let roster: RosterConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(roster.agents.len(), 1);
        assert_eq!(roster.teams[0].member_ids(), vec![AgentId::new("A1")]);
        assert_eq!(roster.teams[0].morale, Some(120));
        let mission = roster.missions[0].clone().into_mission();
        assert_eq!(mission.parameters.timeframe, "72 hours");
        let threat = roster.threats[0].clone().into_threat();
        assert_eq!(threat.containment_status, ContainmentStatus::Partial);
    }
}
