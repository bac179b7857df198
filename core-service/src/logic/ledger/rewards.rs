//! Security Points
//!
//! Positive reinforcement counter. Has no effect on locking.

use crate::logic::config::RewardConfig;
use crate::logic::random::RandomSource;
use super::types::UserStatus;

/// Points for one applied delta.
///
/// `delta` is the pre-clamp value, `new_score` the post-update score.
pub fn activity_award(
    delta: i64,
    new_score: u32,
    risk_low: u32,
    cfg: &RewardConfig,
    random: &mut dyn RandomSource,
) -> f64 {
    let mut points = 0.0;

    if delta == 0 {
        points += cfg.normal_activity;
    } else if delta == cfg.low_risk_delta {
        points += cfg.low_risk_activity;
    }

    // Stochastic bonus, independent of the flat awards
    if new_score <= risk_low && random.chance(cfg.bonus_chance) {
        points += cfg.bonus_points;
    }

    points
}

/// Points for one decay cycle; only ACTIVE users earn them
pub fn decay_award(status: UserStatus, cfg: &RewardConfig) -> f64 {
    match status {
        UserStatus::Active => cfg.per_decay_cycle,
        UserStatus::Locked => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::random::ScriptedSource;

    const NO_BONUS: f64 = 0.99;
    const BONUS: f64 = 0.01;

    #[test]
    fn test_flat_awards() {
        let cfg = RewardConfig::default();
        let mut rng = ScriptedSource::constant(NO_BONUS);
        assert_eq!(activity_award(0, 0, 5, &cfg, &mut rng), 1.0);
        assert_eq!(activity_award(5, 5, 5, &cfg, &mut rng), 0.5);
        assert_eq!(activity_award(8, 8, 5, &cfg, &mut rng), 0.0);
        assert_eq!(activity_award(10, 12, 5, &cfg, &mut rng), 0.0);
    }

    #[test]
    fn test_bonus_only_in_low_band() {
        let cfg = RewardConfig::default();
        let mut rng = ScriptedSource::constant(BONUS);
        assert_eq!(activity_award(0, 0, 5, &cfg, &mut rng), 1.5);
        assert_eq!(activity_award(5, 5, 5, &cfg, &mut rng), 1.0);
        assert_eq!(activity_award(8, 8, 5, &cfg, &mut rng), 0.0);
    }

    #[test]
    fn test_decay_award_active_only() {
        let cfg = RewardConfig::default();
        assert_eq!(decay_award(UserStatus::Active, &cfg), 0.5);
        assert_eq!(decay_award(UserStatus::Locked, &cfg), 0.0);
    }
}
