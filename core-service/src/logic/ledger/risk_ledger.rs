//! Risk Ledger
//!
//! Single writer for all per-user risk state. Callers never touch a
//! `RiskState` directly; every mutation goes through the operations here.

use std::collections::HashMap;

use crate::logic::config::{EngineConfig, RewardConfig};
use crate::logic::incident::Incident;
use crate::logic::random::{RandomSource, RngSource};
use crate::logic::users::UserProfile;

use super::rewards::{activity_award, decay_award};
use super::types::{
    DecayReport, DeltaOutcome, RiskBand, RiskState, ScoreMap, UserRiskView, UserStatus,
};

/// Ledger parameters, taken from `EngineConfig`
#[derive(Debug, Clone)]
pub struct LedgerPolicy {
    pub risk_threshold: u32,
    pub risk_low: u32,
    pub risk_medium: u32,
    pub decay_amount: u32,
    pub rewards: RewardConfig,
}

impl From<&EngineConfig> for LedgerPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            risk_threshold: config.risk_threshold,
            risk_low: config.risk_low,
            risk_medium: config.risk_medium,
            decay_amount: config.decay_amount,
            rewards: config.rewards.clone(),
        }
    }
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

pub struct RiskLedger {
    users: Vec<UserProfile>,
    states: HashMap<String, RiskState>,
    policy: LedgerPolicy,
    random: Box<dyn RandomSource>,
}

impl RiskLedger {
    pub fn new(users: Vec<UserProfile>, policy: LedgerPolicy) -> Self {
        Self::with_random(users, policy, Box::new(RngSource::from_entropy()))
    }

    /// Inject the source used for the stochastic bonus
    pub fn with_random(
        users: Vec<UserProfile>,
        policy: LedgerPolicy,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let states = users
            .iter()
            .map(|u| (u.user_id.clone(), RiskState::default()))
            .collect();
        Self {
            users,
            states,
            policy,
            random,
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// `new_score = max(0, old_score + delta)`; a no-op for LOCKED users.
    ///
    /// Security points are awarded from the pre-clamp `delta` and the
    /// post-update score.
    pub fn apply_delta(&mut self, user_id: &str, delta: i64) -> DeltaOutcome {
        let outcome = self.shift(user_id, delta);
        if let DeltaOutcome::Applied { new_score } = outcome {
            let award = activity_award(
                delta,
                new_score,
                self.policy.risk_low,
                &self.policy.rewards,
                self.random.as_mut(),
            );
            if let Some(state) = self.states.get_mut(user_id) {
                state.security_points += award;
            }
        }
        outcome
    }

    /// Same clamping and lock rule as `apply_delta`, without any award.
    /// Used for detector and sentiment penalties.
    pub fn apply_penalty(&mut self, user_id: &str, delta: i64) -> DeltaOutcome {
        self.shift(user_id, delta)
    }

    fn shift(&mut self, user_id: &str, delta: i64) -> DeltaOutcome {
        let Some(state) = self.states.get_mut(user_id) else {
            return DeltaOutcome::UnknownUser;
        };
        if state.status == UserStatus::Locked {
            return DeltaOutcome::Locked;
        }

        let new_score = (state.score as i64)
            .saturating_add(delta)
            .clamp(0, u32::MAX as i64) as u32;
        state.score = new_score;
        DeltaOutcome::Applied { new_score }
    }

    /// Decay every score by the fixed amount (floor 0).
    ///
    /// ACTIVE users earn the decay award whatever their score. A LOCKED
    /// user whose score goes from nonzero to exactly 0 becomes ACTIVE;
    /// this is the only way back from LOCKED. A user locked by
    /// `check_and_raise` already sits at 0, so the next tick does not
    /// unlock them.
    pub fn decay_tick(&mut self) -> DecayReport {
        let mut report = DecayReport::default();

        for user in &self.users {
            let Some(state) = self.states.get_mut(&user.user_id) else {
                continue;
            };
            let old_score = state.score;
            state.score = old_score.saturating_sub(self.policy.decay_amount);
            state.security_points += decay_award(state.status, &self.policy.rewards);

            if state.status == UserStatus::Locked && state.score == 0 && old_score > 0 {
                state.status = UserStatus::Active;
                log::info!("{} unlocked by decay", user.user_id);
                report.unlocked.push(user.user_id.clone());
            }
        }

        report
    }

    /// Raise a threshold incident when `score >= threshold`: the user is
    /// LOCKED and the score reset to 0.
    pub fn check_and_raise(&mut self, user_id: &str) -> Option<Incident> {
        let role = self.role(user_id)?.to_string();
        let state = self.states.get_mut(user_id)?;
        if state.score < self.policy.risk_threshold {
            return None;
        }

        let incident = Incident::threshold(user_id, &role, state.score);
        state.status = UserStatus::Locked;
        state.score = 0;
        Some(incident)
    }

    /// Overwrite one user's state; reaches states the public API cannot
    #[cfg(test)]
    pub(crate) fn seed_state(&mut self, user_id: &str, state: RiskState) {
        self.states.insert(user_id.to_string(), state);
    }

    /// Restore every user to `{0, ACTIVE, 0.0}`. History lives elsewhere.
    pub fn reset_all(&mut self) {
        for state in self.states.values_mut() {
            *state = RiskState::default();
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self, user_id: &str) -> Option<&RiskState> {
        self.states.get(user_id)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.states.contains_key(user_id)
    }

    pub fn is_active(&self, user_id: &str) -> bool {
        self.states
            .get(user_id)
            .map_or(false, |s| s.status == UserStatus::Active)
    }

    pub fn role(&self, user_id: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.role.as_str())
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn scores(&self) -> ScoreMap {
        self.states
            .iter()
            .map(|(id, s)| (id.clone(), s.score))
            .collect()
    }

    /// Roster-ordered view for presentation
    pub fn snapshot(&self) -> Vec<UserRiskView> {
        self.users
            .iter()
            .filter_map(|u| {
                let state = self.states.get(&u.user_id)?;
                Some(UserRiskView {
                    user_id: u.user_id.clone(),
                    role: u.role.clone(),
                    score: state.score,
                    status: state.status,
                    security_points: state.security_points,
                    band: RiskBand::of(state, self.policy.risk_low, self.policy.risk_medium),
                })
            })
            .collect()
    }
}
