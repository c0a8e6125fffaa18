//! End-to-end tests for command dispatch over a seeded campaign.
//!
//! Every scenario drives a [`Dispatcher`] through `process` and checks
//! both the response envelope and the campaign state behind it.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use blackfile_agents::AgentRegistration;
use blackfile_core::dispatch::tokenize;
use blackfile_core::{BlackfileConfig, Campaign, Dispatcher};
use blackfile_types::{AgentId, AgentStatus, BreakpointKind, CommandStatus, SanityLoss, ThreatLevel};

const ROSTER: &str = r"
campaign:
  name: Test Night
  dice_seed: 17
roster:
  agents:
    - id: A1
      name: Vega
      sanity: 70
      maxSanity: 70
    - id: A2
      name: Okafor
  teams:
    - id: ALPHA
      name: Alpha
      members: [A1, A2]
      morale: 80
";

fn dispatcher() -> Dispatcher {
    let config = BlackfileConfig::parse(ROSTER).unwrap();
    Dispatcher::new(Campaign::new(config).unwrap())
}

#[test]
fn tokenizer_keeps_quoted_threat_together() {
    assert_eq!(
        tokenize(r#"ENGAGE A1 "giant squid" loud"#),
        vec!["ENGAGE", "A1", "giant squid", "loud"]
    );
}

#[test]
fn missing_required_argument_leaves_store_unchanged() {
    let mut d = dispatcher();
    let store = d.campaign().store().clone();
    let level = d.campaign().threat_level();

    for line in [
        "INVESTIGATE",
        "ENGAGE",
        "ENGAGE A1",
        "RETREAT",
        "CONTAIN",
        "RESEARCH",
        "DEBRIEF",
        "ALERT",
        "SANITIZE",
        "CONFIG",
    ] {
        let response = d.process(line);
        assert_eq!(response.status, CommandStatus::Error, "{line} should be rejected");
        assert!(response.message.starts_with("Missing required argument"), "{line}");
        assert!(response.data.is_none());
    }

    assert_eq!(d.campaign().store(), &store);
    assert_eq!(d.campaign().threat_level(), level);
    assert!(d.operations().is_empty());
}

#[test]
fn unknown_command_is_not_audited() {
    let mut d = dispatcher();
    d.process("HELP");
    let before = d.audit_log().len();

    let response = d.process("UNKNOWNCMD");
    assert_eq!(response.status, CommandStatus::Error);
    assert_eq!(response.message, "Unknown command: UNKNOWNCMD");
    assert_eq!(d.audit_log().len(), before);
}

#[test]
fn audit_keeps_most_recent_hundred() {
    let mut d = dispatcher();
    for i in 0..105 {
        let response = d.process(&format!("INVESTIGATE site-{i}"));
        assert!(response.is_success());
    }

    let audit = d.audit_log();
    assert_eq!(audit.len(), 100);
    let first = audit.iter().next().unwrap();
    let last = audit.last().unwrap();
    assert_eq!(first.args, vec!["site-5"]);
    assert_eq!(last.args, vec!["site-104"]);
    assert!(audit.iter().all(|e| e.command == "INVESTIGATE"));
}

#[test]
fn faults_do_not_touch_state_or_audit() {
    let mut d = dispatcher();
    let store = d.campaign().store().clone();

    for line in ["ENGAGE ghost cultists", "RETREAT ghost", "DEBRIEF ghost", "STATUS ghost"] {
        let response = d.process(line);
        assert_eq!(response.message, "Command execution failed: agent not found: ghost");
    }
    assert!(d.audit_log().is_empty());
    assert!(d.operations().is_empty());
    assert_eq!(d.campaign().store(), &store);
}

#[test]
fn threat_level_escalation_sequence() {
    let mut d = dispatcher();
    assert_eq!(d.campaign().threat_level(), ThreatLevel::Normal);

    d.process(r#"ENGAGE A1 "paranormal presence""#);
    assert_eq!(d.campaign().threat_level(), ThreatLevel::Elevated);

    d.process("ESCALATE");
    d.process("ESCALATE");
    d.process("ESCALATE");
    assert_eq!(d.campaign().threat_level(), ThreatLevel::Critical);

    // Alerts do not stand down a critical state by default.
    d.process("ALERT cult");
    assert_eq!(d.campaign().threat_level(), ThreatLevel::Critical);

    d.process("CONTAIN relic low");
    assert_eq!(d.campaign().threat_level(), ThreatLevel::Normal);

    let changes = d
        .campaign()
        .threat_monitor()
        .transitions()
        .iter()
        .filter(|t| t.changed())
        .count();
    assert_eq!(changes, 3);
}

#[test]
fn sanity_break_from_seeded_roster() {
    let mut d = dispatcher();
    let a1 = AgentId::new("A1");

    let outcome = d.campaign_mut().modify_sanity(&a1, -75, SanityLoss::Permanent).unwrap();
    assert_eq!(outcome.current, 0);
    assert_eq!(outcome.breakpoint, Some(BreakpointKind::CompleteBreak));

    let data = d.process("STATUS A1").data.unwrap();
    let status = &data["status"];
    assert_eq!(status["agent"]["agent"]["status"], "incapacitated");
    assert_eq!(status["agent"]["sanity"]["current"], 0);
    assert_eq!(
        status["agent"]["sanity"]["breakpoints"].as_array().unwrap().len(),
        1
    );
    assert_eq!(d.campaign().agent(&a1).unwrap().status, AgentStatus::Incapacitated);
}

#[test]
fn registered_agents_are_usable_immediately() {
    let mut d = dispatcher();
    d.campaign_mut()
        .register_agent(AgentRegistration {
            id: Some(String::from("A3")),
            name: Some(String::from("Marsh")),
            ..AgentRegistration::default()
        })
        .unwrap();

    let response = d.process("RETREAT A3 \"the old chapel\"");
    assert_eq!(response.message, "Marsh retreating to the old chapel");
    let data = response.data.unwrap();
    assert_eq!(data["retreat"]["status"], "EXECUTED");
}

#[test]
fn envelope_serializes_with_iso_timestamp() {
    let mut d = dispatcher();
    let json = serde_json::to_value(d.process("ESCALATE")).unwrap();
    assert_eq!(json["status"], "SUCCESS");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    let json = serde_json::to_value(d.process("")).unwrap();
    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["message"], "No command provided");
    assert!(json["data"].is_null());
}

#[test]
fn context_snapshot_after_commands() {
    let mut d = dispatcher();
    d.process("ALERT sighting");
    let snapshot = d.build_context();
    assert_eq!(snapshot.metadata.campaign, "Test Night");
    assert_eq!(snapshot.metadata.threat_level, ThreatLevel::Elevated);
    assert_eq!(snapshot.agents.len(), 2);
    assert_eq!(snapshot.teams[0].id.as_str(), "ALPHA");
    assert_eq!(d.campaign().context_history().len(), 1);
}

#[test]
fn seeded_rolls_are_reproducible() {
    let mut a = dispatcher();
    let mut b = dispatcher();
    for _ in 0..5 {
        let ra = a.process("ROLL 4d10").data.unwrap();
        let rb = b.process("ROLL 4d10").data.unwrap();
        assert_eq!(ra["roll"]["details"], rb["roll"]["details"]);
    }
}
