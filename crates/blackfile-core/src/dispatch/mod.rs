//! Text command dispatch.
//!
//! [`Dispatcher::process`] is the single entry point: it tokenizes a line,
//! resolves the upper-cased command name in the [`CommandRegistry`], and
//! runs the handler against the [`DispatchState`]. Every call returns a
//! [`CommandResponse`]; a bad command never stops the dispatcher.
//!
//! | Outcome | Response | Audited |
//! |---------|----------|---------|
//! | Empty input | `ERROR "No command provided"` | no |
//! | Unregistered name | `ERROR "Unknown command: NAME"` | no |
//! | Handler returns `Ok` (success or validated rejection) | as returned | yes |
//! | Handler returns `Err` | `ERROR "Command execution failed: reason"` | no |
//!
//! Handlers validate required arguments and referenced entities before
//! mutating anything, so rejections and faults leave state untouched.
//!
//! # Submodules
//!
//! - [`handlers`] -- One `execute_*` function per built-in command.
//! - [`tokenize`] -- Whitespace and double-quote tokenizer.

pub mod handlers;
pub mod tokenize;

use std::collections::BTreeMap;

use blackfile_agents::AgentError;
use blackfile_types::{
    AgentId, AuditEntry, CommandResponse, ContextSnapshot, OperationId, OperationKind,
    OperationRecord, OperationStatus,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::campaign::Campaign;
use crate::error::CoreError;
use crate::retention::RingLog;

pub use tokenize::tokenize;

/// Errors a handler raises instead of returning a response.
///
/// The dispatcher turns these into `"Command execution failed: ..."`
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A campaign operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An agent or team operation failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// A payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Anything else a handler cannot recover from.
    #[error("internal error: {0}")]
    Internal(String),
}

/// What every handler returns.
pub type HandlerResult = Result<CommandResponse, CommandError>;

/// A command handler. Receives the arguments after the command name.
pub type Handler = fn(&mut DispatchState, &[String]) -> HandlerResult;

/// Maps upper-cased command names to handlers.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl CommandRegistry {
    /// A registry with no commands.
    pub const fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// A registry with every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, handler) in handlers::BUILTINS {
            registry.register(name, *handler);
        }
        registry
    }

    /// Register a handler under `name` (case-insensitive), returning the
    /// handler it replaces.
    pub fn register(&mut self, name: &str, handler: Handler) -> Option<Handler> {
        self.handlers.insert(name.to_uppercase(), handler)
    }

    /// Look up a handler by upper-cased name.
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

/// State handlers operate on: the campaign plus the dispatcher's logs.
#[derive(Debug, Clone)]
pub struct DispatchState {
    campaign: Campaign,
    audit: RingLog<AuditEntry>,
    operations: RingLog<OperationRecord>,
}

impl DispatchState {
    /// Wrap a campaign, sizing the logs from its configuration.
    pub fn new(campaign: Campaign) -> Self {
        let dispatch = &campaign.config().dispatch;
        let audit = RingLog::with_capacity(dispatch.audit_capacity);
        let operations = RingLog::with_capacity(dispatch.operation_log_capacity);
        Self {
            campaign,
            audit,
            operations,
        }
    }

    /// The campaign.
    pub const fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    /// Mutable access to the campaign.
    pub const fn campaign_mut(&mut self) -> &mut Campaign {
        &mut self.campaign
    }

    /// Audited commands, oldest first.
    pub const fn audit_log(&self) -> &RingLog<AuditEntry> {
        &self.audit
    }

    /// Operation records, oldest first.
    pub const fn operations(&self) -> &RingLog<OperationRecord> {
        &self.operations
    }

    /// Number of retained operations still in an ongoing status.
    pub fn active_operation_count(&self) -> usize {
        self.operations.iter().filter(|op| op.status.is_active()).count()
    }

    /// Append an operation record and return a copy of it.
    pub fn record(
        &mut self,
        kind: OperationKind,
        status: OperationStatus,
        subject: impl Into<String>,
        agent_id: Option<AgentId>,
        details: serde_json::Value,
    ) -> OperationRecord {
        let record = OperationRecord {
            id: OperationId::generate(),
            kind,
            status,
            subject: subject.into(),
            agent_id,
            details,
            timestamp: Utc::now(),
        };
        debug!(operation_id = %record.id, ?kind, ?status, "operation recorded");
        self.operations.push(record.clone());
        record
    }
}

/// Parses command text and routes it to handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
    state: DispatchState,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Campaign::default())
    }
}

impl Dispatcher {
    /// A dispatcher with the built-in commands over `campaign`.
    pub fn new(campaign: Campaign) -> Self {
        Self::with_registry(campaign, CommandRegistry::with_builtins())
    }

    /// A dispatcher with a custom registry.
    pub fn with_registry(campaign: Campaign, registry: CommandRegistry) -> Self {
        Self {
            registry,
            state: DispatchState::new(campaign),
        }
    }

    /// Add or replace a command on this dispatcher.
    pub fn register(&mut self, name: &str, handler: Handler) -> Option<Handler> {
        self.registry.register(name, handler)
    }

    /// The command registry.
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Handler-visible state.
    pub const fn state(&self) -> &DispatchState {
        &self.state
    }

    /// The campaign.
    pub const fn campaign(&self) -> &Campaign {
        self.state.campaign()
    }

    /// Mutable access to the campaign, for host-driven operations.
    pub const fn campaign_mut(&mut self) -> &mut Campaign {
        self.state.campaign_mut()
    }

    /// Audited commands, oldest first.
    pub const fn audit_log(&self) -> &RingLog<AuditEntry> {
        self.state.audit_log()
    }

    /// Operation records, oldest first.
    pub const fn operations(&self) -> &RingLog<OperationRecord> {
        self.state.operations()
    }

    /// Build and archive a context snapshot.
    pub fn build_context(&mut self) -> ContextSnapshot {
        self.state.campaign.build_context()
    }

    /// Run one line of command text.
    pub fn process(&mut self, input: &str) -> CommandResponse {
        let tokens = tokenize(input);
        let Some((name, args)) = tokens.split_first().filter(|(name, _)| !name.is_empty())
        else {
            warn!("empty command");
            return CommandResponse::error("No command provided");
        };

        let command = name.to_uppercase();
        let Some(handler) = self.registry.get(&command) else {
            warn!(%command, "unknown command");
            return CommandResponse::error(format!("Unknown command: {command}"));
        };

        debug!(%command, ?args, "dispatching command");
        match handler(&mut self.state, args) {
            Ok(response) => {
                if !response.is_success() {
                    warn!(%command, message = %response.message, "command rejected");
                }
                self.state.audit.push(AuditEntry {
                    timestamp: response.timestamp,
                    command,
                    args: args.to_vec(),
                    status: response.status,
                });
                response
            }
            Err(e) => {
                warn!(%command, error = %e, "command failed");
                CommandResponse::error(format!("Command execution failed: {e}"))
            }
        }
    }
}
