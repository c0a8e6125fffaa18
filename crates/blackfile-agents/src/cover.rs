//! Cover-identity stress scoring.
//!
//! Pressure on an agent's cover (a suspicious question, a checked
//! reference, a face from the past) raises `stress_level`. A deep cover
//! absorbs some of it: every legend, field of expertise, and safe house
//! mitigates 5% of incoming pressure, up to 50%. Decompression (negative
//! pressure) is never mitigated.
//!
//! | Stress | Status |
//! |--------|--------|
//! | 0--39 | secure |
//! | 40--69 | strained |
//! | 70--99 | exposed |
//! | 100 | blown |
//!
//! A blown cover is deactivated and the agent becomes compromised, unless
//! already incapacitated.

use blackfile_types::{Agent, AgentStatus, CoverIdentity, CoverStatus, Percentage};
use tracing::{debug, warn};

/// Mitigation granted per supporting artifact, in percent.
const MITIGATION_PER_ARTIFACT: usize = 5;

/// Ceiling on total mitigation, in percent.
const MAX_MITIGATION_PCT: usize = 50;

/// Result of applying pressure to a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverOutcome {
    /// Stress before the change.
    pub previous: Percentage,
    /// Stress after the change.
    pub stress: Percentage,
    /// Derived status after the change.
    pub status: CoverStatus,
    /// Whether this change blew an active cover.
    pub blown: bool,
}

/// Derived cover status for a stress level.
pub const fn cover_status(stress: Percentage) -> CoverStatus {
    match stress.get() {
        0..=39 => CoverStatus::Secure,
        40..=69 => CoverStatus::Strained,
        70..=99 => CoverStatus::Exposed,
        _ => CoverStatus::Blown,
    }
}

/// Percentage of positive pressure a cover absorbs.
pub fn mitigation_pct(cover: &CoverIdentity) -> i64 {
    let artifacts = cover
        .legends
        .len()
        .saturating_add(cover.field_expertise.len())
        .saturating_add(cover.safe_houses.len());
    let pct = artifacts.saturating_mul(MITIGATION_PER_ARTIFACT).min(MAX_MITIGATION_PCT);
    i64::try_from(pct).unwrap_or(0)
}

/// Apply cover pressure to an agent's stress level.
pub fn apply_cover_pressure(agent: &mut Agent, pressure: i64) -> CoverOutcome {
    let previous = agent.stress_level;

    let effective = match agent.cover.as_ref() {
        Some(cover) if cover.active && pressure > 0 => {
            let kept = 100_i64.saturating_sub(mitigation_pct(cover));
            pressure.saturating_mul(kept) / 100
        }
        _ => pressure,
    };

    let stress = previous.saturating_shift(effective);
    agent.stress_level = stress;
    let status = cover_status(stress);

    let mut blown = false;
    if status == CoverStatus::Blown
        && let Some(cover) = agent.cover.as_mut()
        && cover.active
    {
        cover.active = false;
        blown = true;
        if agent.status != AgentStatus::Incapacitated {
            agent.status = AgentStatus::Compromised;
        }
        warn!(agent_id = %agent.id, alias = %cover.alias, "cover blown");
    }

    debug!(
        agent_id = %agent.id,
        pressure,
        effective,
        previous = previous.get(),
        stress = stress.get(),
        "cover pressure applied"
    );

    CoverOutcome {
        previous,
        stress,
        status,
        blown,
    }
}
