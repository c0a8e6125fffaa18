//! Built-in command handlers.
//!
//! Each handler checks its required arguments first and answers a missing
//! one with an `ERROR` response before anything is mutated. Commands that
//! name an agent look it up before recording anything, so an unknown agent
//! surfaces as a fault with the campaign untouched.
//!
//! | Command | Record status | Global threat effect |
//! |---------|---------------|----------------------|
//! | `INVESTIGATE` | `ACTIVE` | none |
//! | `ENGAGE` | `ENGAGED` | at least ELEVATED on an anomaly keyword |
//! | `RETREAT` | `EXECUTED` | none |
//! | `CONTAIN` | `SECURED` | set from severity |
//! | `RESEARCH` | `IN_PROGRESS` | none |
//! | `DEBRIEF` | `PENDING_EVALUATION` | none |
//! | `REPORT` | `FILED` | none |
//! | `ALERT` | `ISSUED` | at least ELEVATED |
//! | `SANITIZE` | `PROCESSING` | none |
//! | `CONFIG` | `ACKNOWLEDGED` | none |
//! | `ROLL` | `ROLLED` | none |
//! | `ESCALATE` | no record | one step up |

use blackfile_types::{AgentId, CommandResponse, OperationKind, OperationStatus, Severity};
use serde::Serialize;
use tracing::info;

use super::{DispatchState, Handler, HandlerResult};
use crate::dice::DiceSpec;
use crate::threat::ThreatCause;

/// Every built-in command, by name.
pub const BUILTINS: &[(&str, Handler)] = &[
    ("INVESTIGATE", execute_investigate),
    ("ENGAGE", execute_engage),
    ("RETREAT", execute_retreat),
    ("CONTAIN", execute_contain),
    ("RESEARCH", execute_research),
    ("STATUS", execute_status),
    ("DEBRIEF", execute_debrief),
    ("REPORT", execute_report),
    ("ALERT", execute_alert),
    ("ESCALATE", execute_escalate),
    ("SANITIZE", execute_sanitize),
    ("HELP", execute_help),
    ("CONFIG", execute_config),
    ("ROLL", execute_roll),
];

/// Usage line and summary for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandHelp {
    /// Command name.
    pub command: &'static str,
    /// Argument synopsis.
    pub usage: &'static str,
    /// What the command does.
    pub summary: &'static str,
}

/// Help text for the built-in commands.
pub const HELP: &[CommandHelp] = &[
    CommandHelp {
        command: "INVESTIGATE",
        usage: "INVESTIGATE <target> [method]",
        summary: "Open an investigation",
    },
    CommandHelp {
        command: "ENGAGE",
        usage: "ENGAGE <agentId> <threat> [tactic]",
        summary: "Commit an agent against a threat",
    },
    CommandHelp {
        command: "RETREAT",
        usage: "RETREAT <agentId> [destination]",
        summary: "Pull an agent out",
    },
    CommandHelp {
        command: "CONTAIN",
        usage: "CONTAIN <objectType> [LOW|MEDIUM|HIGH|CRITICAL]",
        summary: "Secure an object and set the threat level from severity",
    },
    CommandHelp {
        command: "RESEARCH",
        usage: "RESEARCH <subject>",
        summary: "Start research on a subject",
    },
    CommandHelp {
        command: "STATUS",
        usage: "STATUS [agentId]",
        summary: "Threat level, active operations, recent commands",
    },
    CommandHelp {
        command: "DEBRIEF",
        usage: "DEBRIEF <agentId>",
        summary: "Queue an agent debrief for evaluation",
    },
    CommandHelp {
        command: "REPORT",
        usage: "REPORT [summary...]",
        summary: "File a classified report",
    },
    CommandHelp {
        command: "ALERT",
        usage: "ALERT <threatType>",
        summary: "Issue an alert and raise the threat level",
    },
    CommandHelp {
        command: "ESCALATE",
        usage: "ESCALATE",
        summary: "Raise the threat level one step",
    },
    CommandHelp {
        command: "SANITIZE",
        usage: "SANITIZE <target>",
        summary: "Begin sanitizing a site or record",
    },
    CommandHelp {
        command: "HELP",
        usage: "HELP",
        summary: "List commands",
    },
    CommandHelp {
        command: "CONFIG",
        usage: "CONFIG <setting> [value]",
        summary: "Acknowledge a configuration request (not persisted)",
    },
    CommandHelp {
        command: "ROLL",
        usage: "ROLL [NdS]",
        summary: "Roll dice (default 1d20)",
    },
];

/// Default expression for `ROLL`.
const DEFAULT_DICE: &str = "1d20";

/// Number of audit entries `STATUS` reports.
const STATUS_RECENT_COMMANDS: usize = 5;

fn usage(command: &str) -> &'static str {
    HELP.iter()
        .find(|h| h.command == command)
        .map_or("", |h| h.usage)
}

/// Validated rejection for a missing required argument.
fn missing(command: &str, argument: &str) -> CommandResponse {
    CommandResponse::error(format!(
        "Missing required argument: {argument}. Usage: {}",
        usage(command)
    ))
}

/// Required argument at `index`, or the rejection to return.
fn required<'a>(
    args: &'a [String],
    index: usize,
    command: &str,
    argument: &str,
) -> Result<&'a str, CommandResponse> {
    args.get(index)
        .map(String::as_str)
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| missing(command, argument))
}

/// All arguments joined, or the rejection to return when there are none.
fn required_text(args: &[String], command: &str, argument: &str) -> Result<String, CommandResponse> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        Err(missing(command, argument))
    } else {
        Ok(text)
    }
}

/// Single-key payload object.
fn payload<T: Serialize>(key: &str, value: &T) -> Result<serde_json::Value, serde_json::Error> {
    let mut map = serde_json::Map::new();
    map.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(serde_json::Value::Object(map))
}

macro_rules! try_arg {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(rejection) => return Ok(rejection),
        }
    };
}

/// `INVESTIGATE <target> [method]`
pub fn execute_investigate(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let target = try_arg!(required(args, 0, "INVESTIGATE", "target"));
    let method = args.get(1).map_or("standard", String::as_str);

    let record = state.record(
        OperationKind::Investigation,
        OperationStatus::Active,
        target,
        None,
        serde_json::json!({ "method": method }),
    );
    Ok(CommandResponse::success(
        format!("Investigation opened: {target}"),
        payload("investigation", &record)?,
    ))
}

/// `ENGAGE <agentId> <threat> [tactic]`
pub fn execute_engage(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let agent_id = AgentId::new(try_arg!(required(args, 0, "ENGAGE", "agentId")));
    let threat = try_arg!(required(args, 1, "ENGAGE", "threat"));
    let tactic = args.get(2).map_or("standard", String::as_str);

    let agent_name = state.campaign().agent(&agent_id)?.name.clone();
    let anomalous = state.campaign().config().dispatch.is_anomalous(threat);
    if anomalous {
        state.campaign_mut().raise_alert(ThreatCause::AnomalyKeyword);
    }
    let threat_level = state.campaign().threat_level();

    let record = state.record(
        OperationKind::Engagement,
        OperationStatus::Engaged,
        threat,
        Some(agent_id),
        serde_json::json!({
            "tactic": tactic,
            "anomalous": anomalous,
            "threatLevel": threat_level,
        }),
    );
    info!(agent = %agent_name, %threat, anomalous, "agent engaged");
    Ok(CommandResponse::success(
        format!("{agent_name} engaged {threat}"),
        payload("engagement", &record)?,
    ))
}

/// `RETREAT <agentId> [destination]`
pub fn execute_retreat(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let agent_id = AgentId::new(try_arg!(required(args, 0, "RETREAT", "agentId")));
    let destination = args.get(1).map_or("safe house", String::as_str);

    let agent_name = state.campaign().agent(&agent_id)?.name.clone();
    let record = state.record(
        OperationKind::Retreat,
        OperationStatus::Executed,
        destination,
        Some(agent_id),
        serde_json::json!({ "destination": destination }),
    );
    Ok(CommandResponse::success(
        format!("{agent_name} retreating to {destination}"),
        payload("retreat", &record)?,
    ))
}

/// `CONTAIN <objectType> [severity]`
pub fn execute_contain(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let object_type = try_arg!(required(args, 0, "CONTAIN", "objectType"));
    let severity = match args.get(1) {
        None => None,
        Some(token) => match Severity::from_token(token) {
            Some(severity) => Some(severity),
            None => {
                return Ok(CommandResponse::error(format!(
                    "Unknown severity: {token}. Expected LOW, MEDIUM, HIGH, or CRITICAL"
                )));
            }
        },
    };

    let transition = state.campaign_mut().apply_severity(severity);
    let record = state.record(
        OperationKind::Containment,
        OperationStatus::Secured,
        object_type,
        None,
        serde_json::json!({
            "severity": severity,
            "threatLevel": transition.to,
            "previousThreatLevel": transition.from,
        }),
    );
    Ok(CommandResponse::success(
        format!("Containment secured: {object_type} (threat level {})", transition.to),
        payload("containment", &record)?,
    ))
}

/// `RESEARCH <subject>`
pub fn execute_research(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let subject = try_arg!(required_text(args, "RESEARCH", "subject"));
    let record = state.record(
        OperationKind::Research,
        OperationStatus::InProgress,
        subject.clone(),
        None,
        serde_json::Value::Null,
    );
    Ok(CommandResponse::success(
        format!("Research started: {subject}"),
        payload("research", &record)?,
    ))
}

/// `STATUS [agentId]`
pub fn execute_status(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let agent = match args.first() {
        Some(raw) => {
            let id = AgentId::new(raw.as_str());
            let agent = state.campaign().agent(&id)?;
            let tracker = state.campaign().store().tracker(&id)?;
            Some(serde_json::json!({
                "agent": agent,
                "sanity": {
                    "current": tracker.current,
                    "max": tracker.max,
                    "temporaryLoss": tracker.temporary_loss,
                    "breakpoints": tracker.breakpoints,
                },
            }))
        }
        None => None,
    };

    let threat_level = state.campaign().threat_level();
    let recent: Vec<_> = state
        .audit_log()
        .latest(STATUS_RECENT_COMMANDS)
        .cloned()
        .collect();
    let status = serde_json::json!({
        "threatLevel": threat_level,
        "activeOperations": state.active_operation_count(),
        "recentCommands": recent,
        "agent": agent,
    });

    Ok(CommandResponse::success(
        format!("Threat level {threat_level}"),
        payload("status", &status)?,
    ))
}

/// `DEBRIEF <agentId>`
pub fn execute_debrief(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let agent_id = AgentId::new(try_arg!(required(args, 0, "DEBRIEF", "agentId")));
    let agent = state.campaign().agent(&agent_id)?;
    let agent_name = agent.name.clone();
    let details = serde_json::json!({
        "agentStatus": agent.status,
        "sanity": agent.sanity,
        "stressLevel": agent.stress_level,
    });

    let record = state.record(
        OperationKind::Debrief,
        OperationStatus::PendingEvaluation,
        agent_name.clone(),
        Some(agent_id),
        details,
    );
    Ok(CommandResponse::success(
        format!("Debrief scheduled for {agent_name}"),
        payload("debrief", &record)?,
    ))
}

/// `REPORT [summary...]`
pub fn execute_report(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let summary = if args.is_empty() {
        String::from("No summary provided")
    } else {
        args.join(" ")
    };
    let clearance = state.campaign().config().campaign.clearance.clone();

    let record = state.record(
        OperationKind::Report,
        OperationStatus::Filed,
        "classified report",
        None,
        serde_json::json!({ "classification": clearance, "summary": summary }),
    );
    Ok(CommandResponse::success("Report filed", payload("report", &record)?))
}

/// `ALERT <threatType>`
pub fn execute_alert(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let threat_type = try_arg!(required_text(args, "ALERT", "threatType"));
    let transition = state.campaign_mut().raise_alert(ThreatCause::Alert);

    let record = state.record(
        OperationKind::Alert,
        OperationStatus::Issued,
        threat_type.clone(),
        None,
        serde_json::json!({
            "threatLevel": transition.to,
            "previousThreatLevel": transition.from,
        }),
    );
    Ok(CommandResponse::success(
        format!("Alert issued: {threat_type} (threat level {})", transition.to),
        payload("alert", &record)?,
    ))
}

/// `ESCALATE`
pub fn execute_escalate(state: &mut DispatchState, _args: &[String]) -> HandlerResult {
    let transition = state.campaign_mut().escalate();
    let escalation = serde_json::json!({
        "from": transition.from,
        "to": transition.to,
        "changed": transition.changed(),
        "timestamp": transition.timestamp,
    });
    Ok(CommandResponse::success(
        format!("Threat level {}", transition.to),
        payload("escalation", &escalation)?,
    ))
}

/// `SANITIZE <target>`
pub fn execute_sanitize(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let target = try_arg!(required_text(args, "SANITIZE", "target"));
    let record = state.record(
        OperationKind::Sanitization,
        OperationStatus::Processing,
        target.clone(),
        None,
        serde_json::Value::Null,
    );
    Ok(CommandResponse::success(
        format!("Sanitization in progress: {target}"),
        payload("sanitization", &record)?,
    ))
}

/// `HELP`
pub fn execute_help(_state: &mut DispatchState, _args: &[String]) -> HandlerResult {
    Ok(CommandResponse::success("Available commands", payload("help", &HELP)?))
}

/// `CONFIG <setting> [value]`
///
/// Echoes the request back; nothing is changed.
pub fn execute_config(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let setting = try_arg!(required(args, 0, "CONFIG", "setting"));
    let value = args.get(1).map(String::as_str);

    let record = state.record(
        OperationKind::ConfigUpdate,
        OperationStatus::Acknowledged,
        setting,
        None,
        serde_json::json!({ "setting": setting, "value": value, "persisted": false }),
    );
    Ok(CommandResponse::success(
        format!("Configuration request acknowledged: {setting}"),
        payload("config", &record)?,
    ))
}

/// `ROLL [NdS]`
pub fn execute_roll(state: &mut DispatchState, args: &[String]) -> HandlerResult {
    let expression = args.first().map_or(DEFAULT_DICE, String::as_str);
    let spec = match DiceSpec::parse(expression) {
        Ok(spec) => spec,
        Err(e) => return Ok(CommandResponse::error(e.to_string())),
    };

    let roll = state.campaign_mut().roll(spec);
    let record = state.record(
        OperationKind::DiceRoll,
        OperationStatus::Rolled,
        spec.to_string(),
        None,
        serde_json::json!({ "rolls": roll.rolls, "total": roll.total }),
    );
    Ok(CommandResponse::success(
        format!("Rolled {spec}: {}", roll.total),
        payload("roll", &record)?,
    ))
}
