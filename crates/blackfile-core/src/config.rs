//! Configuration loading and typed config structures for a Blackfile
//! campaign.
//!
//! The canonical configuration lives in `blackfile-config.yaml`. Every
//! section and field has a default, so an empty file (or no file at all)
//! yields a working campaign.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use blackfile_agents::{AgentConfig, TeamConfig};
use serde::Deserialize;

use crate::roster::RosterConfig;

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "BLACKFILE_CONFIG";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "blackfile-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level campaign configuration.
///
/// Mirrors the structure of `blackfile-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlackfileConfig {
    /// Campaign presentation settings and the dice seed.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Agent registration and sanity tunables.
    #[serde(default)]
    pub agents: AgentConfig,

    /// Team morale tunables.
    #[serde(default)]
    pub teams: TeamConfig,

    /// Command dispatcher settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Bounded archive sizes.
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Logging configuration for the host.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Entities registered at startup.
    #[serde(default)]
    pub roster: RosterConfig,
}

impl BlackfileConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. An empty string yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Configuration path: `BLACKFILE_CONFIG` if set, otherwise
    /// `blackfile-config.yaml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }
}

/// Campaign presentation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CampaignConfig {
    /// Campaign name, stamped into snapshot metadata.
    #[serde(default = "default_campaign_name")]
    pub name: String,

    /// Briefing depth reported in context snapshots.
    #[serde(default = "default_briefing_level")]
    pub briefing_level: String,

    /// Clearance reported in context snapshots.
    #[serde(default = "default_clearance")]
    pub clearance: String,

    /// Opening atmosphere note.
    #[serde(default = "default_atmosphere")]
    pub atmosphere: String,

    /// Seed for the dice roller. Unset means OS entropy.
    #[serde(default)]
    pub dice_seed: Option<u64>,

    /// Free-form world state copied into every snapshot.
    #[serde(default)]
    pub world_state: BTreeMap<String, serde_json::Value>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            name: default_campaign_name(),
            briefing_level: default_briefing_level(),
            clearance: default_clearance(),
            atmosphere: default_atmosphere(),
            dice_seed: None,
            world_state: BTreeMap::new(),
        }
    }
}

fn default_campaign_name() -> String {
    String::from("Blackfile")
}

fn default_briefing_level() -> String {
    String::from("standard")
}

fn default_clearance() -> String {
    String::from("CONFIDENTIAL")
}

fn default_atmosphere() -> String {
    String::from("quiet")
}

/// Command dispatcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchConfig {
    /// Audit entries retained (default: 100).
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Operation records retained (default: 1000).
    #[serde(default = "default_operation_log_capacity")]
    pub operation_log_capacity: usize,

    /// Threat-level transitions retained (default: 100).
    #[serde(default = "default_threat_history_capacity")]
    pub threat_history_capacity: usize,

    /// Words that mark an `ENGAGE` target as anomalous. Matched
    /// case-insensitively as substrings.
    #[serde(default = "default_anomaly_keywords")]
    pub anomaly_keywords: Vec<String>,

    /// Whether an alert may lower CRITICAL to ELEVATED (default: false).
    #[serde(default)]
    pub alert_can_stand_down: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            audit_capacity: default_audit_capacity(),
            operation_log_capacity: default_operation_log_capacity(),
            threat_history_capacity: default_threat_history_capacity(),
            anomaly_keywords: default_anomaly_keywords(),
            alert_can_stand_down: false,
        }
    }
}

impl DispatchConfig {
    /// Whether `text` contains any anomaly keyword.
    pub fn is_anomalous(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.anomaly_keywords
            .iter()
            .filter(|k| !k.is_empty())
            .any(|k| lowered.contains(&k.to_lowercase()))
    }
}

const fn default_audit_capacity() -> usize {
    100
}

const fn default_operation_log_capacity() -> usize {
    1000
}

const fn default_threat_history_capacity() -> usize {
    100
}

fn default_anomaly_keywords() -> Vec<String> {
    ["anomal", "paranormal", "entity", "eldritch", "cryptid", "unknown"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Bounded archive sizes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetentionConfig {
    /// Context snapshots retained (default: 50).
    #[serde(default = "default_context_history_capacity")]
    pub context_history_capacity: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            context_history_capacity: default_context_history_capacity(),
        }
    }
}

const fn default_context_history_capacity() -> usize {
    50
}

/// Logging configuration for the host binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = BlackfileConfig::parse("").unwrap();
        assert_eq!(config, BlackfileConfig::default());
        assert_eq!(config.dispatch.audit_capacity, 100);
        assert_eq!(config.dispatch.operation_log_capacity, 1000);
        assert_eq!(config.retention.context_history_capacity, 50);
        assert_eq!(config.agents.default_max_sanity, 100);
        assert!(!config.dispatch.alert_can_stand_down);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let yaml = r"
campaign:
  name: Night Shift
  dice_seed: 1234
dispatch:
  audit_capacity: 5
  alert_can_stand_down: true
agents:
  critical_ratio_pct: 30
";
        let config = BlackfileConfig::parse(yaml).unwrap();
        assert_eq!(config.campaign.name, "Night Shift");
        assert_eq!(config.campaign.dice_seed, Some(1234));
        assert_eq!(config.campaign.clearance, "CONFIDENTIAL");
        assert_eq!(config.dispatch.audit_capacity, 5);
        assert_eq!(config.dispatch.operation_log_capacity, 1000);
        assert!(config.dispatch.alert_can_stand_down);
        assert_eq!(config.agents.critical_ratio_pct, 30);
        assert_eq!(config.agents.default_max_sanity, 100);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = BlackfileConfig::parse("dispatch: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn anomaly_keywords_match_case_insensitively() {
        let dispatch = DispatchConfig::default();
        assert!(dispatch.is_anomalous("Anomalous signal"));
        assert!(dispatch.is_anomalous("an ELDRITCH thing"));
        assert!(!dispatch.is_anomalous("giant squid"));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            let config = BlackfileConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
