//! Enumeration types for the Blackfile campaign core.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Operational status of an agent.
///
/// Agents are never removed from the roster; retirement sets
/// [`AgentStatus::Inactive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Fit for duty.
    #[default]
    Active,
    /// Sanity fully depleted; cannot act until recovered by the game master.
    Incapacitated,
    /// Physically hurt but still on the roster.
    Injured,
    /// Cover blown or otherwise exposed to the opposition.
    Compromised,
    /// Whereabouts unknown.
    Missing,
    /// Retired from play.
    Inactive,
}

impl AgentStatus {
    /// Parse a status token case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "incapacitated" => Some(Self::Incapacitated),
            "injured" => Some(Self::Injured),
            "compromised" => Some(Self::Compromised),
            "missing" => Some(Self::Missing),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// Kind of sanity threshold crossing recorded by a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum BreakpointKind {
    /// Sanity dropped below the critical fraction of maximum.
    Critical,
    /// Sanity reached zero.
    CompleteBreak,
}

/// Whether a sanity loss can later be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum SanityLoss {
    /// Lasting damage. Recovery never restores it.
    #[default]
    Permanent,
    /// Shock that feeds the temporary-loss pool and can be recovered.
    Temporary,
}

/// Derived state of an agent's cover identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum CoverStatus {
    /// Stress below 40.
    Secure,
    /// Stress 40 to 69.
    Strained,
    /// Stress 70 to 99.
    Exposed,
    /// Stress at 100; the cover is gone.
    Blown,
}

// ---------------------------------------------------------------------------
// Teams and missions
// ---------------------------------------------------------------------------

/// Derived status of a team, recomputed whenever dynamics are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    /// Morale above 50.
    #[default]
    Operational,
    /// Morale at or below 50.
    Compromised,
}

/// Lifecycle status of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    /// Briefed but not yet under way.
    Planning,
    /// In progress.
    #[default]
    Active,
    /// Objectives met.
    Complete,
    /// Objectives lost.
    Failed,
    /// Called off.
    Aborted,
}

/// Priority band of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum MissionPriority {
    /// Background tasking.
    Low,
    /// Normal tasking.
    #[default]
    Standard,
    /// Takes precedence over standard tasking.
    High,
    /// Drop everything.
    Critical,
}

// ---------------------------------------------------------------------------
// Threats
// ---------------------------------------------------------------------------

/// Status of a tracked threat entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ThreatStatus {
    /// Still a danger.
    #[default]
    Active,
    /// Destroyed or dispersed.
    Neutralized,
    /// Held in containment.
    Contained,
}

/// Containment state of a threat entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ContainmentStatus {
    /// No containment in place.
    #[default]
    Uncontained,
    /// Containment partially effective.
    Partial,
    /// Fully contained.
    Full,
    /// Containment failed after being established.
    Breached,
}

/// Global campaign alert state.
///
/// Ordered so that `Normal < Elevated < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    /// Business as usual.
    #[default]
    Normal,
    /// Heightened readiness.
    Elevated,
    /// Full alert.
    Critical,
}

impl core::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Normal => "NORMAL",
            Self::Elevated => "ELEVATED",
            Self::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// Severity supplied with a containment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Minor.
    Low,
    /// Moderate.
    Medium,
    /// Serious.
    High,
    /// Catastrophic.
    Critical,
}

impl Severity {
    /// Parse a severity token case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

/// The four narrative channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum NarrativeKind {
    /// A framed scene.
    Scene,
    /// Mood and sensory detail.
    Atmosphere,
    /// An investigative lead.
    Clue,
    /// A plot reveal.
    Revelation,
}

impl NarrativeKind {
    /// Parse a narrative kind token case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "scene" => Some(Self::Scene),
            "atmosphere" => Some(Self::Atmosphere),
            "clue" => Some(Self::Clue),
            "revelation" => Some(Self::Revelation),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands and operations
// ---------------------------------------------------------------------------

/// Outcome status of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    /// The command was carried out.
    Success,
    /// The command was rejected or failed.
    Error,
}

/// What kind of record a command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// `INVESTIGATE`
    Investigation,
    /// `ENGAGE`
    Engagement,
    /// `RETREAT`
    Retreat,
    /// `CONTAIN`
    Containment,
    /// `RESEARCH`
    Research,
    /// `DEBRIEF`
    Debrief,
    /// `REPORT`
    Report,
    /// `ALERT`
    Alert,
    /// `SANITIZE`
    Sanitization,
    /// `CONFIG`
    ConfigUpdate,
    /// `ROLL`
    DiceRoll,
}

/// Status carried by an operation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// Investigation under way.
    Active,
    /// Agent committed against a threat.
    Engaged,
    /// Retreat carried out.
    Executed,
    /// Containment established.
    Secured,
    /// Research under way.
    InProgress,
    /// Debrief awaiting evaluation.
    PendingEvaluation,
    /// Report filed.
    Filed,
    /// Alert issued.
    Issued,
    /// Sanitization under way.
    Processing,
    /// Configuration request echoed back.
    Acknowledged,
    /// Dice rolled.
    Rolled,
}

impl OperationStatus {
    /// Whether an operation in this status still counts as ongoing.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::Active
                | Self::Engaged
                | Self::InProgress
                | Self::Processing
                | Self::PendingEvaluation
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn threat_levels_are_ordered() {
        assert!(ThreatLevel::Normal < ThreatLevel::Elevated);
        assert!(ThreatLevel::Elevated < ThreatLevel::Critical);
    }

    #[test]
    fn wire_names() {
        assert_eq!(serde_json::to_string(&ThreatLevel::Elevated).unwrap(), "\"ELEVATED\"");
        assert_eq!(serde_json::to_string(&CommandStatus::Success).unwrap(), "\"SUCCESS\"");
        assert_eq!(
            serde_json::to_string(&OperationStatus::PendingEvaluation).unwrap(),
            "\"PENDING_EVALUATION\""
        );
        assert_eq!(
            serde_json::to_string(&BreakpointKind::CompleteBreak).unwrap(),
            "\"complete_break\""
        );
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!(Severity::from_token("high"), Some(Severity::High));
        assert_eq!(Severity::from_token("Critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_token("apocalyptic"), None);
        assert_eq!(NarrativeKind::from_token("CLUE"), Some(NarrativeKind::Clue));
        assert_eq!(AgentStatus::from_token("Missing"), Some(AgentStatus::Missing));
    }

    #[test]
    fn active_operation_statuses() {
        assert!(OperationStatus::Engaged.is_active());
        assert!(OperationStatus::PendingEvaluation.is_active());
        assert!(!OperationStatus::Executed.is_active());
        assert!(!OperationStatus::Filed.is_active());
    }
}
