//! Global threat-level escalation.
//!
//! The campaign-wide alert state moves `NORMAL -> ELEVATED -> CRITICAL`
//! through three independent entry points:
//!
//! | Entry point | Rule |
//! |-------------|------|
//! | Severity (`CONTAIN`) | Direct set: CRITICAL -> CRITICAL, HIGH/MEDIUM -> ELEVATED, LOW/none -> NORMAL |
//! | Alert (`ALERT`, anomaly keyword on `ENGAGE`) | At least ELEVATED; lowers CRITICAL only when stand-down is enabled |
//! | Escalate (`ESCALATE`) | One step up; CRITICAL is absorbing |
//!
//! Every call records a [`ThreatTransition`], including no-op transitions,
//! so the sequence of alert decisions can be audited.

use blackfile_types::{Severity, ThreatLevel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::retention::RingLog;

/// What drove a threat-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCause {
    /// Severity supplied with a containment order.
    Severity,
    /// An explicit alert.
    Alert,
    /// An engagement against something matching an anomaly keyword.
    AnomalyKeyword,
    /// An explicit escalation.
    Escalation,
}

/// One recorded decision of the threat machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatTransition {
    /// Level before.
    pub from: ThreatLevel,
    /// Level after.
    pub to: ThreatLevel,
    /// What drove it.
    pub cause: ThreatCause,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

impl ThreatTransition {
    /// Whether the level actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Next level up. CRITICAL is absorbing.
pub const fn escalate(level: ThreatLevel) -> ThreatLevel {
    match level {
        ThreatLevel::Normal => ThreatLevel::Elevated,
        ThreatLevel::Elevated | ThreatLevel::Critical => ThreatLevel::Critical,
    }
}

/// Level implied by a containment severity.
pub const fn level_for_severity(severity: Option<Severity>) -> ThreatLevel {
    match severity {
        Some(Severity::Critical) => ThreatLevel::Critical,
        Some(Severity::High | Severity::Medium) => ThreatLevel::Elevated,
        Some(Severity::Low) | None => ThreatLevel::Normal,
    }
}

/// Level after an alert. With `stand_down`, CRITICAL drops to ELEVATED.
pub fn alert_level(level: ThreatLevel, stand_down: bool) -> ThreatLevel {
    if stand_down {
        ThreatLevel::Elevated
    } else {
        level.max(ThreatLevel::Elevated)
    }
}

/// The campaign's global alert state and its transition log.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatMonitor {
    level: ThreatLevel,
    transitions: RingLog<ThreatTransition>,
}

impl ThreatMonitor {
    /// Start at NORMAL, retaining up to `capacity` transitions.
    pub fn new(capacity: usize) -> Self {
        Self {
            level: ThreatLevel::Normal,
            transitions: RingLog::with_capacity(capacity),
        }
    }

    /// Current level.
    pub const fn level(&self) -> ThreatLevel {
        self.level
    }

    /// Recorded transitions, oldest first.
    pub const fn transitions(&self) -> &RingLog<ThreatTransition> {
        &self.transitions
    }

    /// Direct set from a containment severity.
    pub fn apply_severity(&mut self, severity: Option<Severity>) -> ThreatTransition {
        self.transition(level_for_severity(severity), ThreatCause::Severity)
    }

    /// Raise to ELEVATED from an alert or anomaly keyword.
    pub fn raise_alert(&mut self, cause: ThreatCause, stand_down: bool) -> ThreatTransition {
        self.transition(alert_level(self.level, stand_down), cause)
    }

    /// Step one level up.
    pub fn escalate(&mut self) -> ThreatTransition {
        self.transition(escalate(self.level), ThreatCause::Escalation)
    }

    fn transition(&mut self, to: ThreatLevel, cause: ThreatCause) -> ThreatTransition {
        let record = ThreatTransition {
            from: self.level,
            to,
            cause,
            timestamp: Utc::now(),
        };
        if record.changed() {
            info!(from = %record.from, to = %record.to, ?cause, "threat level changed");
        }
        self.level = to;
        self.transitions.push(record.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_is_monotonic_and_absorbing() {
        let level = escalate(escalate(escalate(ThreatLevel::Normal)));
        assert_eq!(level, ThreatLevel::Critical);
        assert_eq!(escalate(ThreatLevel::Critical), ThreatLevel::Critical);
        assert_eq!(escalate(ThreatLevel::Normal), ThreatLevel::Elevated);
    }

    #[test]
    fn severity_is_a_direct_set() {
        assert_eq!(level_for_severity(Some(Severity::Critical)), ThreatLevel::Critical);
        assert_eq!(level_for_severity(Some(Severity::High)), ThreatLevel::Elevated);
        assert_eq!(level_for_severity(Some(Severity::Medium)), ThreatLevel::Elevated);
        assert_eq!(level_for_severity(Some(Severity::Low)), ThreatLevel::Normal);
        assert_eq!(level_for_severity(None), ThreatLevel::Normal);

        let mut monitor = ThreatMonitor::new(10);
        monitor.escalate();
        monitor.escalate();
        let t = monitor.apply_severity(Some(Severity::Low));
        assert_eq!(t.from, ThreatLevel::Critical);
        assert_eq!(monitor.level(), ThreatLevel::Normal);
    }

    #[test]
    fn alert_keeps_critical_unless_standing_down() {
        assert_eq!(alert_level(ThreatLevel::Normal, false), ThreatLevel::Elevated);
        assert_eq!(alert_level(ThreatLevel::Elevated, false), ThreatLevel::Elevated);
        assert_eq!(alert_level(ThreatLevel::Critical, false), ThreatLevel::Critical);
        assert_eq!(alert_level(ThreatLevel::Critical, true), ThreatLevel::Elevated);
        assert_eq!(alert_level(ThreatLevel::Normal, true), ThreatLevel::Elevated);
    }

    #[test]
    fn every_decision_is_recorded() {
        let mut monitor = ThreatMonitor::new(10);
        monitor.escalate();
        monitor.raise_alert(ThreatCause::Alert, false);
        monitor.escalate();
        monitor.escalate();
        assert_eq!(monitor.transitions().len(), 4);
        let changed = monitor.transitions().iter().filter(|t| t.changed()).count();
        assert_eq!(changed, 2);
    }
}
