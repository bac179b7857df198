//! Ledger Types
//!
//! Data structures only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// user_id -> current score
pub type ScoreMap = BTreeMap<String, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Accumulates risk from activities
    Active,
    /// Accrues no risk from any source
    Locked,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Locked => "LOCKED",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    pub score: u32,
    pub status: UserStatus,
    /// Monotonic except on full reset
    pub security_points: f64,
}

impl Default for RiskState {
    fn default() -> Self {
        Self {
            score: 0,
            status: UserStatus::Active,
            security_points: 0.0,
        }
    }
}

/// Display band (green / yellow / red / locked)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Locked,
}

impl RiskBand {
    pub fn of(state: &RiskState, low: u32, medium: u32) -> Self {
        if state.status == UserStatus::Locked {
            RiskBand::Locked
        } else if state.score <= low {
            RiskBand::Low
        } else if state.score <= medium {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}

/// One row of the presentation snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRiskView {
    pub user_id: String,
    pub role: String,
    pub score: u32,
    pub status: UserStatus,
    pub security_points: f64,
    pub band: RiskBand,
}

/// Result of `apply_delta`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    Applied { new_score: u32 },
    /// No-op: locked users accrue nothing
    Locked,
    UnknownUser,
}

impl DeltaOutcome {
    pub fn new_score(&self) -> Option<u32> {
        match self {
            DeltaOutcome::Applied { new_score } => Some(*new_score),
            _ => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, DeltaOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecayReport {
    /// Users moved LOCKED -> ACTIVE by this tick
    pub unlocked: Vec<String>,
}
