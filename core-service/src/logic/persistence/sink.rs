use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::logic::activity::Event;
use crate::logic::incident::Incident;
use crate::logic::ledger::UserRiskView;

/// Full per-user risk state at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub timestamp: DateTime<Utc>,
    pub users: Vec<UserRiskView>,
}

impl RiskSnapshot {
    pub fn now(users: Vec<UserRiskView>) -> Self {
        Self {
            timestamp: Utc::now(),
            users,
        }
    }
}

pub trait PersistenceSink: Send + Sync {
    fn save_event(&self, event: &Event) -> EngineResult<()>;
    fn save_incident(&self, incident: &Incident) -> EngineResult<()>;
    fn save_risk_snapshot(&self, snapshot: &RiskSnapshot) -> EngineResult<()>;
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PersistenceSink for NullSink {
    fn save_event(&self, _event: &Event) -> EngineResult<()> {
        Ok(())
    }

    fn save_incident(&self, _incident: &Incident) -> EngineResult<()> {
        Ok(())
    }

    fn save_risk_snapshot(&self, _snapshot: &RiskSnapshot) -> EngineResult<()> {
        Ok(())
    }
}
