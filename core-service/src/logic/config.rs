//! Engine Configuration
//!
//! Tunables for scoring, decay, the outlier model and sentiment.
//! Layered as: defaults -> optional JSON file -> environment overrides.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::logic::users::UserProfile;

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Static roster, created at start and never deleted during a run
    pub users: Vec<UserProfile>,

    /// Score at or above which an incident is raised
    pub risk_threshold: u32,
    /// Upper bound of the low band (inclusive)
    pub risk_low: u32,
    /// Upper bound of the medium band (inclusive)
    pub risk_medium: u32,

    pub decay_amount: u32,
    pub decay_interval_ms: u64,
    pub simulation_interval_ms: u64,

    pub ai: ModelConfig,
    pub sentiment: SentimentConfig,
    pub rewards: RewardConfig,
}

/// Outlier model parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub contamination: f64,
    pub min_samples: usize,
    pub anomaly_penalty: i64,
    pub retrain_interval: u64,
    pub seed: u64,
    pub estimators: usize,
}

/// Communication sentiment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub negative_threshold: f64,
    pub positive_threshold: f64,
    pub negative_penalty: i64,
    pub probability: f64,
}

/// Security point awards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Award for a zero-risk activity
    pub normal_activity: f64,
    /// Award when the delta equals `low_risk_delta`
    pub low_risk_activity: f64,
    pub low_risk_delta: i64,
    /// Award per decay cycle to ACTIVE users
    pub per_decay_cycle: f64,
    pub bonus_chance: f64,
    pub bonus_points: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            users: UserProfile::default_roster(),
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            risk_low: DEFAULT_RISK_LOW,
            risk_medium: DEFAULT_RISK_MEDIUM,
            decay_amount: DEFAULT_DECAY_AMOUNT,
            decay_interval_ms: DEFAULT_DECAY_INTERVAL_MS,
            simulation_interval_ms: DEFAULT_SIMULATION_INTERVAL_MS,
            ai: ModelConfig::default(),
            sentiment: SentimentConfig::default(),
            rewards: RewardConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_AI_CONTAMINATION,
            min_samples: DEFAULT_AI_MIN_SAMPLES,
            anomaly_penalty: DEFAULT_AI_ANOMALY_PENALTY,
            retrain_interval: DEFAULT_AI_RETRAIN_INTERVAL,
            seed: DEFAULT_AI_SEED,
            estimators: DEFAULT_AI_ESTIMATORS,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            negative_threshold: DEFAULT_NEGATIVE_SENTIMENT_THRESHOLD,
            positive_threshold: DEFAULT_POSITIVE_SENTIMENT_THRESHOLD,
            negative_penalty: DEFAULT_NEGATIVE_SENTIMENT_PENALTY,
            probability: DEFAULT_SENTIMENT_PROBABILITY,
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            normal_activity: 1.0,
            low_risk_activity: 0.5,
            low_risk_delta: 5,
            per_decay_cycle: 0.5,
            bonus_chance: 0.1,
            bonus_points: 0.5,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file (missing fields keep their defaults), then apply env overrides
    pub fn load(path: Option<&Path>) -> EngineResult<Self> {
        let mut config = match path {
            Some(p) => {
                let data = std::fs::read(p)
                    .map_err(|e| EngineError::Config(format!("{}: {}", p.display(), e)))?;
                serde_json::from_slice::<EngineConfig>(&data)
                    .map_err(|e| EngineError::Config(format!("{}: {}", p.display(), e)))?
            }
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Override selected fields from the environment
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("INSIDER_RISK_THRESHOLD") {
            self.risk_threshold = v;
        }
        if let Some(v) = env_parse("INSIDER_DECAY_INTERVAL_MS") {
            self.decay_interval_ms = v;
        }
        if let Some(v) = env_parse("INSIDER_SIMULATION_INTERVAL_MS") {
            self.simulation_interval_ms = v;
        }
        if let Some(v) = env_parse("INSIDER_AI_RETRAIN_INTERVAL") {
            self.ai.retrain_interval = v;
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.users.is_empty() {
            return Err(EngineError::Config("roster is empty".to_string()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.users.iter().find(|u| !seen.insert(u.user_id.as_str())) {
            return Err(EngineError::Config(format!(
                "duplicate user_id in roster: {}",
                dup.user_id
            )));
        }
        if self.risk_threshold == 0 {
            return Err(EngineError::Config("risk_threshold must be > 0".to_string()));
        }
        if self.risk_low > self.risk_medium {
            return Err(EngineError::Config(format!(
                "risk_low ({}) above risk_medium ({})",
                self.risk_low, self.risk_medium
            )));
        }
        if !(self.ai.contamination > 0.0 && self.ai.contamination <= 0.5) {
            return Err(EngineError::Config(format!(
                "contamination {} outside (0, 0.5]",
                self.ai.contamination
            )));
        }
        if self.ai.estimators == 0 {
            return Err(EngineError::Config("estimators must be > 0".to_string()));
        }
        for (name, p) in [
            ("sentiment.probability", self.sentiment.probability),
            ("rewards.bonus_chance", self.rewards.bonus_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EngineError::Config(format!("{} {} outside [0, 1]", name, p)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
