//! Sanity degradation, breakdown, and recovery.
//!
//! The sanity state machine:
//!
//! - New sanity is `clamp(current + delta, 0, max)`
//! - Every change appends a history entry, including a zero delta
//! - Reaching 0 appends a `complete_break` breakpoint and incapacitates
//!   the agent
//! - Otherwise, landing below the critical fraction of max appends a
//!   `critical` breakpoint with no status change
//! - Recovery only draws from the temporary-loss pool and never exceeds max
//!
//! Breakpoints accumulate: every dip below the threshold records a new one.
//! History and breakpoint lists are append-only.

use blackfile_types::{
    Agent, AgentStatus, Breakpoint, BreakpointKind, SanityHistoryEntry, SanityLoss, SanityTracker,
};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::AgentConfig;
use crate::error::AgentError;

/// Result of one sanity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityOutcome {
    /// Sanity before the change.
    pub previous: u32,
    /// Sanity after the change.
    pub current: u32,
    /// Threshold crossing recorded by this change, if any.
    pub breakpoint: Option<BreakpointKind>,
}

fn ensure_paired(agent: &Agent, tracker: &SanityTracker) -> Result<(), AgentError> {
    if agent.id == tracker.agent_id {
        Ok(())
    } else {
        Err(AgentError::TrackerMismatch {
            agent: agent.id.clone(),
            tracker: tracker.agent_id.clone(),
        })
    }
}

/// Apply a sanity delta to an agent.
///
/// # Order of operations
///
/// 1. Clamp `current + delta` into `[0, max]`
/// 2. Feed the temporary-loss pool if the loss is temporary
/// 3. Mirror the result into the tracker and append history
/// 4. Record a breakpoint (and incapacitate on a complete break)
pub fn modify_sanity(
    agent: &mut Agent,
    tracker: &mut SanityTracker,
    delta: i64,
    loss: SanityLoss,
    config: &AgentConfig,
) -> Result<SanityOutcome, AgentError> {
    ensure_paired(agent, tracker)?;

    let previous = agent.sanity.current;
    let max = agent.sanity.max;
    let target = i64::from(previous).saturating_add(delta).clamp(0, i64::from(max));
    let current = u32::try_from(target).unwrap_or(0);

    if loss == SanityLoss::Temporary && current < previous {
        let lost = previous.saturating_sub(current);
        tracker.temporary_loss = tracker.temporary_loss.saturating_add(lost);
    }

    agent.sanity.current = current;
    tracker.current = current;
    tracker.max = max;

    let now = Utc::now();
    tracker.history.push(SanityHistoryEntry {
        timestamp: now,
        delta,
        previous,
        current,
    });

    let breakpoint = if current == 0 {
        agent.status = AgentStatus::Incapacitated;
        warn!(agent_id = %agent.id, previous, "complete sanity break, agent incapacitated");
        Some(BreakpointKind::CompleteBreak)
    } else if config.is_critical(current, max) {
        info!(agent_id = %agent.id, current, max, "sanity critical");
        Some(BreakpointKind::Critical)
    } else {
        None
    };

    if let Some(kind) = breakpoint {
        tracker.breakpoints.push(Breakpoint {
            kind,
            timestamp: now,
            sanity: current,
        });
    }

    debug!(agent_id = %agent.id, delta, previous, current, "sanity modified");

    Ok(SanityOutcome {
        previous,
        current,
        breakpoint,
    })
}

/// Restore sanity from the temporary-loss pool.
///
/// Restores `min(amount, pool, max - current)`. Permanent losses are never
/// restored. A history entry is appended with the restored amount as delta.
pub fn recover_sanity(
    agent: &mut Agent,
    tracker: &mut SanityTracker,
    amount: u32,
) -> Result<SanityOutcome, AgentError> {
    ensure_paired(agent, tracker)?;

    let previous = agent.sanity.current;
    let headroom = agent.sanity.max.saturating_sub(previous);
    let restored = amount.min(tracker.temporary_loss).min(headroom);
    let current = previous.saturating_add(restored);

    tracker.temporary_loss = tracker.temporary_loss.saturating_sub(restored);
    agent.sanity.current = current;
    tracker.current = current;
    tracker.history.push(SanityHistoryEntry {
        timestamp: Utc::now(),
        delta: i64::from(restored),
        previous,
        current,
    });

    debug!(agent_id = %agent.id, requested = amount, restored, current, "sanity recovered");

    Ok(SanityOutcome {
        previous,
        current,
        breakpoint: None,
    })
}
