//! Configuration constants and defaults for agent and team mechanics.
//!
//! These values mirror the `agents` and `teams` sections of
//! `blackfile-config.yaml`. Every field has a default, so a partial YAML
//! section only overrides what it names.

use serde::Deserialize;

/// Tunables for agent registration and the sanity state machine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum sanity for agents registered without one (default: 100).
    pub default_max_sanity: u32,

    /// Sanity below this percentage of maximum records a critical
    /// breakpoint (default: 25).
    ///
    /// Stored as a whole percentage (0--100) so the comparison stays in
    /// integer arithmetic: `current * 100 < max * critical_ratio_pct`.
    pub critical_ratio_pct: u32,

    /// Name given to agents registered without one.
    pub default_name: String,

    /// Role given to agents registered without one.
    pub default_role: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_max_sanity: 100,
            critical_ratio_pct: 25,
            default_name: String::from("Unknown Agent"),
            default_role: String::from("Field Agent"),
        }
    }
}

impl AgentConfig {
    /// Whether `current` sits below the critical fraction of `max`.
    pub fn is_critical(&self, current: u32, max: u32) -> bool {
        let lhs = u64::from(current).saturating_mul(100);
        let rhs = u64::from(max).saturating_mul(u64::from(self.critical_ratio_pct));
        lhs < rhs
    }
}

/// Tunables for team morale and cohesion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Morale lost per casualty (default: 5).
    pub casualty_penalty_per_head: u32,

    /// Ceiling on the casualty morale penalty (default: 30).
    pub casualty_penalty_cap: u32,

    /// A team is operational while morale is strictly above this
    /// (default: 50).
    pub operational_morale_threshold: u8,

    /// Morale for teams created without one (default: 75).
    pub starting_morale: u8,

    /// Cohesion for teams created without one (default: 75).
    pub starting_cohesion: u8,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            casualty_penalty_per_head: 5,
            casualty_penalty_cap: 30,
            operational_morale_threshold: 50,
            starting_morale: 75,
            starting_cohesion: 75,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let agents = AgentConfig::default();
        assert_eq!(agents.default_max_sanity, 100);
        assert_eq!(agents.critical_ratio_pct, 25);

        let teams = TeamConfig::default();
        assert_eq!(teams.casualty_penalty_per_head, 5);
        assert_eq!(teams.casualty_penalty_cap, 30);
        assert_eq!(teams.operational_morale_threshold, 50);
    }

    #[test]
    fn critical_threshold_is_strict() {
        let cfg = AgentConfig::default();
        // 25% of 100 is 25: 24 is critical, 25 is not.
        assert!(cfg.is_critical(24, 100));
        assert!(!cfg.is_critical(25, 100));
        // 25% of 70 is 17.5: 17 is critical, 18 is not.
        assert!(cfg.is_critical(17, 70));
        assert!(!cfg.is_critical(18, 70));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: AgentConfig = serde_json::from_str(r#"{"critical_ratio_pct": 30}"#).unwrap();
        assert_eq!(cfg.critical_ratio_pct, 30);
        assert_eq!(cfg.default_max_sanity, 100);
    }
}
