//! Engine Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::activity::ActivityLogEntry;
use crate::logic::events::UpdateKind;
use crate::logic::incident::Incident;
use crate::logic::ledger::UserRiskView;
use crate::logic::model::DetectorStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_activities: u64,
    pub average_score: f64,
    pub max_score: u32,
    /// Users with `score >= threshold`
    pub high_risk_users: usize,
    pub incident_count: usize,
}

/// What presentation gets after every step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineUpdate {
    pub kind: UpdateKind,
    pub timestamp: DateTime<Utc>,
    /// Roster order
    pub users: Vec<UserRiskView>,
    pub latest_entry: Option<ActivityLogEntry>,
    /// Incidents raised by this step, in order
    pub new_incidents: Vec<Incident>,
    /// Users unlocked by this step (decay only)
    pub unlocked: Vec<String>,
    pub stats: EngineStats,
    /// Outlier model readiness after this step
    pub model: DetectorStatus,
}
