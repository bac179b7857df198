//! Central Configuration Constants
//!
//! Single source of truth for engine defaults.
//! Runtime overrides go through `EngineConfig` and the env helpers below.

use std::path::PathBuf;

/// Score at which an incident is raised and the user is locked
pub const DEFAULT_RISK_THRESHOLD: u32 = 20;

/// Upper bound of the low (green) risk band
pub const DEFAULT_RISK_LOW: u32 = 5;

/// Upper bound of the medium (yellow) risk band
pub const DEFAULT_RISK_MEDIUM: u32 = 15;

/// Points removed from every user per decay cycle
pub const DEFAULT_DECAY_AMOUNT: u32 = 1;

/// Decay cycle (milliseconds)
pub const DEFAULT_DECAY_INTERVAL_MS: u64 = 5_000;

/// Delay between simulated activities (milliseconds)
pub const DEFAULT_SIMULATION_INTERVAL_MS: u64 = 1_200;

/// Expected share of outliers in the training corpus
pub const DEFAULT_AI_CONTAMINATION: f64 = 0.1;

/// Corpus size required before the outlier model is fitted
pub const DEFAULT_AI_MIN_SAMPLES: usize = 10;

/// Risk added when the outlier model flags a user
pub const DEFAULT_AI_ANOMALY_PENALTY: i64 = 8;

/// Processed activities between two model fits
pub const DEFAULT_AI_RETRAIN_INTERVAL: u64 = 50;

/// Seed for the outlier model
pub const DEFAULT_AI_SEED: u64 = 42;

/// Trees in the isolation forest
pub const DEFAULT_AI_ESTIMATORS: usize = 100;

/// Polarity strictly below this is Negative
pub const DEFAULT_NEGATIVE_SENTIMENT_THRESHOLD: f64 = 0.0;

/// Polarity strictly above this is Positive
pub const DEFAULT_POSITIVE_SENTIMENT_THRESHOLD: f64 = 0.1;

/// Risk added for a negative message
pub const DEFAULT_NEGATIVE_SENTIMENT_PENALTY: i64 = 6;

/// Chance that a processed activity also samples a message
pub const DEFAULT_SENTIMENT_PROBABILITY: f64 = 0.3;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Insider Threat Predictor";

/// Directory name under the local data dir
pub const DATA_DIR_NAME: &str = "insider-risk";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Parse an env var, `None` when unset or malformed
pub fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Data directory for the JSONL side channel
pub fn get_data_dir() -> PathBuf {
    std::env::var("INSIDER_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DATA_DIR_NAME)
        })
}
