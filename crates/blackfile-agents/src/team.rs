//! Team morale, cohesion, and casualty dynamics.
//!
//! Applying dynamics:
//!
//! 1. Supplied morale and cohesion are clamped to `[0, 100]` and stored
//! 2. The casualty delta is added to the running casualty count
//! 3. While the count is non-zero, `min(cap, count * per_head)` is
//!    subtracted from morale, after step 1, on every call
//! 4. Status is re-derived: operational while morale is above the threshold
//!
//! Step 3 re-derives the penalty from the cumulative count each time
//! dynamics are applied; it is not a one-off decrement per casualty event.

use blackfile_types::{AgentId, Percentage, Team, TeamId, TeamStatus};
use tracing::{debug, info};

use crate::config::TeamConfig;

/// A requested change to a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamDynamicsUpdate {
    /// New morale, clamped.
    pub morale: Option<i64>,
    /// New cohesion, clamped.
    pub cohesion: Option<i64>,
    /// Casualties suffered since the last update.
    pub casualties: u32,
}

/// Result of applying team dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamDynamicsOutcome {
    /// Morale after the casualty penalty.
    pub morale: Percentage,
    /// Cohesion after the update.
    pub cohesion: Percentage,
    /// Casualty count after the update.
    pub casualty_count: u32,
    /// Penalty subtracted from morale on this call.
    pub casualty_penalty: u32,
    /// Derived status.
    pub status: TeamStatus,
    /// Whether the status differs from before the call.
    pub status_changed: bool,
}

/// Morale penalty for a cumulative casualty count.
pub fn casualty_penalty(casualty_count: u32, config: &TeamConfig) -> u32 {
    casualty_count
        .saturating_mul(config.casualty_penalty_per_head)
        .min(config.casualty_penalty_cap)
}

/// Derive team status from morale.
pub const fn derive_status(morale: Percentage, config: &TeamConfig) -> TeamStatus {
    if morale.get() > config.operational_morale_threshold {
        TeamStatus::Operational
    } else {
        TeamStatus::Compromised
    }
}

/// Build a new team. Membership checks belong to the store.
pub fn create_team(
    id: TeamId,
    name: impl Into<String>,
    members: Vec<AgentId>,
    morale: Option<i64>,
    cohesion: Option<i64>,
    config: &TeamConfig,
) -> Team {
    let morale = morale.map_or_else(
        || Percentage::clamped(i64::from(config.starting_morale)),
        Percentage::clamped,
    );
    let cohesion = cohesion.map_or_else(
        || Percentage::clamped(i64::from(config.starting_cohesion)),
        Percentage::clamped,
    );
    Team {
        id,
        name: name.into(),
        members,
        morale,
        cohesion,
        casualty_count: 0,
        status: derive_status(morale, config),
    }
}

/// Apply morale, cohesion, and casualty changes to a team.
pub fn manage_team_dynamics(
    team: &mut Team,
    update: TeamDynamicsUpdate,
    config: &TeamConfig,
) -> TeamDynamicsOutcome {
    let previous_status = team.status;

    if let Some(morale) = update.morale {
        team.morale = Percentage::clamped(morale);
    }
    if let Some(cohesion) = update.cohesion {
        team.cohesion = Percentage::clamped(cohesion);
    }

    team.casualty_count = team.casualty_count.saturating_add(update.casualties);

    let penalty = if team.casualty_count > 0 {
        casualty_penalty(team.casualty_count, config)
    } else {
        0
    };
    team.morale = team.morale.saturating_shift(-i64::from(penalty));
    team.status = derive_status(team.morale, config);

    let status_changed = team.status != previous_status;
    if status_changed {
        info!(team_id = %team.id, status = ?team.status, morale = team.morale.get(), "team status changed");
    }
    debug!(
        team_id = %team.id,
        morale = team.morale.get(),
        cohesion = team.cohesion.get(),
        casualty_count = team.casualty_count,
        penalty,
        "team dynamics applied"
    );

    TeamDynamicsOutcome {
        morale: team.morale,
        cohesion: team.cohesion,
        casualty_count: team.casualty_count,
        casualty_penalty: penalty,
        status: team.status,
        status_changed,
    }
}
