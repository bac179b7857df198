use super::types::{DeltaOutcome, RiskBand, RiskState, UserStatus};
use super::risk_ledger::{LedgerPolicy, RiskLedger};
use crate::logic::incident::IncidentKind;
use crate::logic::random::ScriptedSource;
use crate::logic::users::UserProfile;

fn two_users() -> Vec<UserProfile> {
    vec![
        UserProfile::new("A", "developer"),
        UserProfile::new("B", "sales"),
    ]
}

/// Bonus roll never fires
fn ledger() -> RiskLedger {
    RiskLedger::with_random(
        two_users(),
        LedgerPolicy::default(),
        Box::new(ScriptedSource::constant(0.99)),
    )
}

fn lock(ledger: &mut RiskLedger, user: &str) {
    ledger.apply_delta(user, 20);
    assert!(ledger.check_and_raise(user).is_some());
}

#[test]
fn test_initial_state() {
    let l = ledger();
    assert_eq!(l.state("A"), Some(&RiskState::default()));
    assert_eq!(l.state("A").unwrap().status, UserStatus::Active);
}

#[test]
fn test_score_never_negative() {
    let mut l = ledger();
    for delta in [-5, 3, -100, 7, -1, i64::MIN / 2] {
        l.apply_delta("A", delta);
        // u32 cannot go below zero; check the clamp kept the value sane
        assert!(l.state("A").unwrap().score <= 10);
    }
    assert_eq!(l.apply_delta("A", -3), DeltaOutcome::Applied { new_score: 0 });
}

#[test]
fn test_unknown_user_is_ignored() {
    let mut l = ledger();
    assert_eq!(l.apply_delta("Z", 5), DeltaOutcome::UnknownUser);
    assert!(l.check_and_raise("Z").is_none());
}

#[test]
fn test_locked_user_accrues_nothing() {
    let mut l = ledger();
    lock(&mut l, "A");
    let before = l.state("A").unwrap().clone();

    assert_eq!(l.apply_delta("A", 15), DeltaOutcome::Locked);
    assert_eq!(l.apply_delta("A", 0), DeltaOutcome::Locked);
    assert_eq!(l.state("A").unwrap(), &before);
}

#[test]
fn test_threshold_boundary() {
    let mut l = ledger();
    l.apply_delta("A", 19);
    assert!(l.check_and_raise("A").is_none());
    assert_eq!(l.state("A").unwrap().status, UserStatus::Active);

    l.apply_delta("A", 1);
    let incident = l.check_and_raise("A").unwrap();
    assert_eq!(incident.kind, IncidentKind::Threshold);
    assert_eq!(incident.score_at_trigger, 20);

    let state = l.state("A").unwrap();
    assert_eq!(state.status, UserStatus::Locked);
    assert_eq!(state.score, 0);
}

#[test]
fn test_lock_after_raise_survives_next_decay() {
    let mut l = ledger();
    lock(&mut l, "A");

    let report = l.decay_tick();
    assert!(report.unlocked.is_empty());
    assert_eq!(l.state("A").unwrap().status, UserStatus::Locked);

    // Nothing can push the score up again, so the lock is permanent
    for _ in 0..10 {
        l.apply_delta("A", 10);
        l.decay_tick();
    }
    assert_eq!(l.state("A").unwrap().status, UserStatus::Locked);
}

#[test]
fn test_decay_floor_and_status_at_zero() {
    let mut l = ledger();
    l.apply_delta("A", 2);
    l.decay_tick();
    assert_eq!(l.state("A").unwrap().score, 1);
    l.decay_tick();
    l.decay_tick();
    assert_eq!(l.state("A").unwrap().score, 0);
    assert_eq!(l.state("B").unwrap().score, 0);
    assert_eq!(l.state("B").unwrap().status, UserStatus::Active);
}

#[test]
fn test_decay_points_only_for_active() {
    let mut l = ledger();
    lock(&mut l, "A");
    let locked_points = l.state("A").unwrap().security_points;

    l.decay_tick();
    assert_eq!(l.state("A").unwrap().security_points, locked_points);
    // B: score 0, still rewarded
    assert_eq!(l.state("B").unwrap().security_points, 0.5);
}

#[test]
fn test_security_points_from_deltas() {
    let mut l = ledger();
    l.apply_delta("A", 0);
    assert_eq!(l.state("A").unwrap().security_points, 1.0);
    l.apply_delta("A", 5);
    assert_eq!(l.state("A").unwrap().security_points, 1.5);
    l.apply_delta("A", 8);
    assert_eq!(l.state("A").unwrap().security_points, 1.5);
}

#[test]
fn test_penalty_awards_nothing() {
    let mut l = RiskLedger::with_random(
        two_users(),
        LedgerPolicy::default(),
        Box::new(ScriptedSource::constant(0.0)),
    );
    assert_eq!(l.apply_penalty("A", 6), DeltaOutcome::Applied { new_score: 6 });
    assert_eq!(l.state("A").unwrap().security_points, 0.0);

    lock(&mut l, "B");
    assert_eq!(l.apply_penalty("B", 8), DeltaOutcome::Locked);
    assert_eq!(l.state("B").unwrap().score, 0);
}

#[test]
fn test_bonus_roll_is_injectable() {
    let mut l = RiskLedger::with_random(
        two_users(),
        LedgerPolicy::default(),
        Box::new(ScriptedSource::constant(0.0)),
    );
    l.apply_delta("A", 0);
    assert_eq!(l.state("A").unwrap().security_points, 1.5);
    // Above the low band: no bonus even with a winning roll
    l.apply_delta("A", 8);
    assert_eq!(l.state("A").unwrap().security_points, 1.5);
}

#[test]
fn test_reset_all_is_idempotent() {
    let mut l = ledger();
    lock(&mut l, "A");
    l.apply_delta("B", 0);
    l.apply_delta("B", 12);

    l.reset_all();
    for id in ["A", "B"] {
        assert_eq!(l.state(id), Some(&RiskState::default()));
    }
    l.reset_all();
    for id in ["A", "B"] {
        assert_eq!(l.state(id), Some(&RiskState::default()));
    }
}

#[test]
fn test_snapshot_bands() {
    let mut l = ledger();
    l.apply_delta("A", 5);
    l.apply_delta("B", 16);
    let snap = l.snapshot();
    assert_eq!(snap[0].user_id, "A");
    assert_eq!(snap[0].band, RiskBand::Low);
    assert_eq!(snap[1].band, RiskBand::High);

    l.apply_delta("B", 4);
    l.check_and_raise("B");
    assert_eq!(l.snapshot()[1].band, RiskBand::Locked);
}
