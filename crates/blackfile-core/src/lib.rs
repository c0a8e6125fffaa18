//! Campaign store, threshold state machines, and command dispatch for
//! Blackfile.
//!
//! This crate owns the mutable side of a campaign session. A host builds a
//! [`Campaign`] from [`BlackfileConfig`], wraps it in a [`Dispatcher`],
//! and feeds it command text; every call returns a
//! [`CommandResponse`](blackfile_types::CommandResponse).
//!
//! # Modules
//!
//! - [`campaign`] -- The [`Campaign`] aggregate and its operations
//! - [`config`] -- Configuration loading from `blackfile-config.yaml`
//! - [`context`] -- Context snapshots for presentation layers
//! - [`dice`] -- Seedable uniform dice rolls
//! - [`dispatch`] -- Tokenizer, command registry, handlers, audit log
//! - [`error`] -- Error types for campaign operations ([`CoreError`])
//! - [`narrative`] -- The four-channel narrative queue
//! - [`retention`] -- Fixed-capacity logs ([`RingLog`])
//! - [`roster`] -- Registration inputs for teams, missions, and threats
//! - [`store`] -- The entity store
//! - [`threat`] -- Global threat-level escalation

pub mod campaign;
pub mod config;
pub mod context;
pub mod dice;
pub mod dispatch;
pub mod error;
pub mod narrative;
pub mod retention;
pub mod roster;
pub mod store;
pub mod threat;

pub use campaign::Campaign;
pub use config::{BlackfileConfig, ConfigError};
pub use dice::{Dice, DiceRoll, DiceSpec};
pub use dispatch::{CommandError, CommandRegistry, DispatchState, Dispatcher, Handler, HandlerResult};
pub use error::CoreError;
pub use narrative::NarrativeQueue;
pub use retention::RingLog;
pub use roster::{MissionRegistration, RosterConfig, TeamRegistration, ThreatRegistration};
pub use store::EntityStore;
pub use threat::{ThreatCause, ThreatMonitor, ThreatTransition};
