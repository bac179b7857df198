use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentKind {
    /// Score reached the alert threshold, user locked
    Threshold,
    /// Outlier model flagged the user, penalty applied
    AiAnomaly,
}

impl IncidentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentKind::Threshold => "threshold",
            IncidentKind::AiAnomaly => "ai_anomaly",
        }
    }
}

/// Immutable once created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    pub incident_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub score_at_trigger: u32,
    pub message: String,
    pub kind: IncidentKind,
}

impl Incident {
    pub fn threshold(user_id: &str, role: &str, score: u32) -> Self {
        Self {
            incident_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            score_at_trigger: score,
            message: format!(
                "HIGH-RISK ALERT: {} ({}) triggered security incident - Account LOCKED",
                user_id, role
            ),
            kind: IncidentKind::Threshold,
        }
    }

    pub fn ai_anomaly(user_id: &str, role: &str, score: u32, penalty: i64) -> Self {
        Self {
            incident_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            score_at_trigger: score,
            message: format!(
                "AI ALERT: {} ({}) - Anomalous behavior detected by Isolation Forest (+{} risk)",
                user_id, role, penalty
            ),
            kind: IncidentKind::AiAnomaly,
        }
    }
}
