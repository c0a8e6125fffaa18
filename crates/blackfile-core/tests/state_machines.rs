//! Range and monotonicity checks for the threshold state machines.
//!
//! These sweep inputs across and beyond the valid intervals and check the
//! clamping and append-only guarantees hold after every step.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use blackfile_agents::{AgentRegistration, AgentUpdate, TeamDynamicsUpdate};
use blackfile_core::threat::escalate;
use blackfile_core::{Campaign, TeamRegistration, ThreatRegistration};
use blackfile_types::{AgentId, SanityLoss, TeamId, ThreatLevel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn campaign_with_agent(sanity: i64, max: u32) -> (Campaign, AgentId) {
    let mut campaign = Campaign::default();
    let id = campaign
        .register_agent(AgentRegistration {
            id: Some(String::from("A1")),
            sanity: Some(sanity),
            max_sanity: Some(max),
            ..AgentRegistration::default()
        })
        .unwrap();
    (campaign, id)
}

#[test]
fn sanity_stays_within_bounds() {
    let mut rng = StdRng::seed_from_u64(0x00B1_AC4F);
    for _ in 0..50 {
        let max = rng.random_range(1..=150_u32);
        let start = rng.random_range(-20..=200_i64);
        let (mut campaign, id) = campaign_with_agent(start, max);

        let mut history_len = 0;
        let mut breakpoints_len = 0;
        for _ in 0..40 {
            let delta = rng.random_range(-120..=120_i64);
            let loss = if rng.random_bool(0.5) {
                SanityLoss::Temporary
            } else {
                SanityLoss::Permanent
            };
            campaign.modify_sanity(&id, delta, loss).unwrap();
            if rng.random_bool(0.2) {
                campaign.recover_sanity(&id, rng.random_range(0..=50)).unwrap();
            }

            let agent = campaign.agent(&id).unwrap();
            let tracker = campaign.store().tracker(&id).unwrap();
            assert!(agent.sanity.current <= agent.sanity.max);
            assert_eq!(tracker.current, agent.sanity.current);
            assert!(tracker.history.len() > history_len);
            assert!(tracker.breakpoints.len() >= breakpoints_len);
            history_len = tracker.history.len();
            breakpoints_len = tracker.breakpoints.len();
        }
    }
}

#[test]
fn complete_break_recorded_once_per_crossing() {
    let (mut campaign, id) = campaign_with_agent(70, 70);
    let outcome = campaign.modify_sanity(&id, -75, SanityLoss::Permanent).unwrap();
    assert_eq!(outcome.current, 0);

    let tracker = campaign.store().tracker(&id).unwrap();
    assert_eq!(tracker.breakpoints.len(), 1);
    assert_eq!(tracker.breakpoints[0].sanity, 0);
}

#[test]
fn percentages_and_ratings_clamp_for_any_input() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut campaign = Campaign::default();
    campaign
        .register_agent(AgentRegistration {
            id: Some(String::from("A1")),
            ..AgentRegistration::default()
        })
        .unwrap();
    let a1 = AgentId::new("A1");
    let team = campaign
        .create_team(TeamRegistration {
            id: Some(String::from("ALPHA")),
            members: vec![String::from("A1")],
            ..TeamRegistration::default()
        })
        .unwrap();
    let threat = campaign
        .register_threat(ThreatRegistration {
            id: Some(String::from("T1")),
            threat_level: Some(5),
            ..ThreatRegistration::default()
        })
        .unwrap();

    let mut casualties = 0;
    for _ in 0..200 {
        let raw = rng.random_range(-1000..=1000_i64);

        let rating = campaign.adjust_threat_level(&threat, raw).unwrap();
        assert!((1..=10).contains(&rating.get()));

        let outcome = campaign
            .manage_team_dynamics(
                &team,
                TeamDynamicsUpdate {
                    morale: Some(raw),
                    cohesion: Some(-raw),
                    casualties: rng.random_range(0..=2),
                },
            )
            .unwrap();
        assert!(outcome.morale.get() <= 100);
        assert!(outcome.cohesion.get() <= 100);
        assert!(outcome.casualty_count >= casualties);
        casualties = outcome.casualty_count;

        campaign.apply_cover_pressure(&a1, raw).unwrap();
        campaign.update_agent(&a1, AgentUpdate::stress(raw)).unwrap();
        assert!(campaign.agent(&a1).unwrap().stress_level.get() <= 100);
    }
}

#[test]
fn casualty_penalty_is_rederived_each_call() {
    let mut campaign = Campaign::default();
    campaign
        .register_agent(AgentRegistration {
            id: Some(String::from("A1")),
            ..AgentRegistration::default()
        })
        .unwrap();
    campaign
        .create_team(TeamRegistration {
            id: Some(String::from("ALPHA")),
            members: vec![String::from("A1")],
            morale: Some(90),
            ..TeamRegistration::default()
        })
        .unwrap();
    let team = TeamId::new("ALPHA");
    let one = TeamDynamicsUpdate {
        casualties: 1,
        ..TeamDynamicsUpdate::default()
    };

    let first = campaign.manage_team_dynamics(&team, one).unwrap();
    let second = campaign.manage_team_dynamics(&team, one).unwrap();
    assert_eq!(first.casualty_penalty, 5);
    assert_eq!(second.casualty_penalty, 10);
    assert_eq!(second.casualty_count, 2);
    assert_eq!(second.morale.get(), 75);
}

#[test]
fn escalation_is_absorbing() {
    assert_eq!(escalate(escalate(escalate(ThreatLevel::Normal))), ThreatLevel::Critical);
    assert_eq!(escalate(ThreatLevel::Critical), ThreatLevel::Critical);
}

#[test]
fn narrative_delivery_latches() {
    let mut campaign = Campaign::default();
    let clue = campaign.inject_narrative(blackfile_types::NarrativeKind::Clue, "ledger page", 12);
    assert_eq!(clue.intensity.get(), 10);
    assert!(campaign.mark_delivered(&clue.id).unwrap().delivered);
    assert!(campaign.mark_delivered(&clue.id).unwrap().delivered);
    assert!(campaign.narrative_state().pending_narrative.is_empty());
    assert_eq!(campaign.narrative_state().clues, 1);
}
