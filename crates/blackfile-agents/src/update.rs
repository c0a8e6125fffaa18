//! Typed agent status updates.
//!
//! Every mutation a host can request on an agent is one variant of
//! [`AgentUpdate`]. Bounded values are clamped when the update is built;
//! everything that can be checked without the roster is checked by the
//! constructors, and [`apply_update`] re-checks what depends on the target
//! agent before touching it.

use blackfile_types::{
    Agent, AgentId, AgentStatus, Bond, BondStrength, Percentage, SanityLoss, SanityTracker,
};
use tracing::debug;

use crate::config::AgentConfig;
use crate::cover::{CoverOutcome, apply_cover_pressure};
use crate::error::AgentError;
use crate::sanity::{SanityOutcome, modify_sanity};

/// A single requested change to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentUpdate {
    /// Move sanity to an absolute value; routed through the sanity machine.
    SetSanity(u32),
    /// Change operational status.
    SetStatus(AgentStatus),
    /// Overwrite stress directly.
    SetStress(Percentage),
    /// Apply cover pressure (positive) or decompression (negative).
    CoverPressure(i64),
    /// Enter or leave cover.
    SetCoverActive(bool),
    /// Shift a named resource counter; saturates at zero.
    AdjustResource {
        /// Counter name.
        name: String,
        /// Signed change.
        delta: i64,
    },
    /// Add or replace a bond with a peer.
    AddBond(Bond),
    /// Mark the agent inactive.
    Retire,
}

impl AgentUpdate {
    /// Stress update, clamped to `[0, 100]`.
    pub fn stress(raw: i64) -> Self {
        Self::SetStress(Percentage::clamped(raw))
    }

    /// Resource adjustment. The counter name must not be blank.
    pub fn resource(name: impl Into<String>, delta: i64) -> Result<Self, AgentError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AgentError::InvalidUpdate {
                reason: String::from("resource name is empty"),
            });
        }
        Ok(Self::AdjustResource { name, delta })
    }

    /// Bond with a peer, strength clamped to `[0, 10]`.
    pub fn bond(
        peer: AgentId,
        relationship: impl Into<String>,
        strength: i64,
    ) -> Result<Self, AgentError> {
        let relationship = relationship.into();
        if relationship.trim().is_empty() {
            return Err(AgentError::InvalidBond {
                reason: String::from("relationship is empty"),
            });
        }
        Ok(Self::AddBond(Bond {
            peer,
            relationship,
            strength: BondStrength::clamped(strength),
        }))
    }

    /// The peer referenced by this update, if any.
    ///
    /// The store uses this to check the peer is on the roster before
    /// applying.
    pub const fn referenced_peer(&self) -> Option<&AgentId> {
        match self {
            Self::AddBond(bond) => Some(&bond.peer),
            _ => None,
        }
    }
}

/// What an applied update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEffect {
    /// Sanity moved through the state machine.
    Sanity(SanityOutcome),
    /// Cover stress was re-scored.
    Cover(CoverOutcome),
    /// A plain field change.
    Applied,
}

/// Apply an update to an agent and its tracker.
pub fn apply_update(
    agent: &mut Agent,
    tracker: &mut SanityTracker,
    update: AgentUpdate,
    config: &AgentConfig,
) -> Result<UpdateEffect, AgentError> {
    let effect = match update {
        AgentUpdate::SetSanity(target) => {
            let delta = i64::from(target).saturating_sub(i64::from(agent.sanity.current));
            UpdateEffect::Sanity(modify_sanity(
                agent,
                tracker,
                delta,
                SanityLoss::Permanent,
                config,
            )?)
        }
        AgentUpdate::SetStatus(status) => {
            agent.status = status;
            UpdateEffect::Applied
        }
        AgentUpdate::SetStress(stress) => {
            agent.stress_level = stress;
            UpdateEffect::Applied
        }
        AgentUpdate::CoverPressure(pressure) => {
            UpdateEffect::Cover(apply_cover_pressure(agent, pressure))
        }
        AgentUpdate::SetCoverActive(active) => {
            let cover = agent
                .cover
                .as_mut()
                .ok_or_else(|| AgentError::NoCoverIdentity(agent.id.clone()))?;
            cover.active = active;
            UpdateEffect::Applied
        }
        AgentUpdate::AdjustResource { name, delta } => {
            let counter = agent.resources.entry(name).or_insert(0);
            let next = i64::from(*counter).saturating_add(delta).clamp(0, i64::from(u32::MAX));
            *counter = u32::try_from(next).unwrap_or(0);
            UpdateEffect::Applied
        }
        AgentUpdate::AddBond(bond) => {
            if bond.peer == agent.id {
                return Err(AgentError::InvalidBond {
                    reason: format!("agent {} cannot bond with itself", agent.id),
                });
            }
            if let Some(existing) = agent.bonds.iter_mut().find(|b| b.peer == bond.peer) {
                *existing = bond;
            } else {
                agent.bonds.push(bond);
            }
            UpdateEffect::Applied
        }
        AgentUpdate::Retire => {
            agent.status = AgentStatus::Inactive;
            UpdateEffect::Applied
        }
    };

    debug!(agent_id = %agent.id, ?effect, "agent update applied");
    Ok(effect)
}
