//! Risk Engine
//!
//! Single owner of ledger, detector, incident history and activity log.
//! Steps never overlap: the runner calls one method at a time.

use chrono::Utc;

use crate::error::{EngineError, EngineResult};
use crate::logic::activity::{resolve_delta, ActivityLog, ActivityLogEntry, Event};
use crate::logic::config::EngineConfig;
use crate::logic::events::UpdateKind;
use crate::logic::incident::{Incident, IncidentRecorder};
use crate::logic::ledger::{LedgerPolicy, RiskLedger, UserRiskView};
use crate::logic::model::OutlierDetector;
use crate::logic::persistence::{NullSink, PersistenceSink, RiskSnapshot};
use crate::logic::random::{RandomSource, RngSource};
use crate::logic::sentiment::{pick_message, SentimentReading};

use super::types::{EngineStats, EngineUpdate};

pub struct RiskEngine {
    config: EngineConfig,
    ledger: RiskLedger,
    detector: OutlierDetector,
    incidents: IncidentRecorder,
    activity_log: ActivityLog,
    total_activities: u64,
    /// Sentiment gate and message pick
    random: Box<dyn RandomSource>,
    sink: Box<dyn PersistenceSink>,
}

impl RiskEngine {
    /// Entropy-seeded randomness, no persistence
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Self::with_parts(
            config,
            Box::new(NullSink),
            Box::new(RngSource::from_entropy()),
            Box::new(RngSource::from_entropy()),
        )
    }

    /// `ledger_random` drives the reward bonus, `random` the sentiment gate
    pub fn with_parts(
        config: EngineConfig,
        sink: Box<dyn PersistenceSink>,
        ledger_random: Box<dyn RandomSource>,
        random: Box<dyn RandomSource>,
    ) -> EngineResult<Self> {
        config.validate()?;
        let ledger = RiskLedger::with_random(
            config.users.clone(),
            LedgerPolicy::from(&config),
            ledger_random,
        );
        Ok(Self {
            detector: OutlierDetector::new(config.ai.clone()),
            ledger,
            incidents: IncidentRecorder::new(),
            activity_log: ActivityLog::new(),
            total_activities: 0,
            random,
            sink,
            config,
        })
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    /// Run one event through the pipeline.
    ///
    /// Only an invalid event is an error; it leaves every piece of state
    /// untouched.
    pub fn process_event(&mut self, event: Event) -> EngineResult<EngineUpdate> {
        let kind = event.validate(self.ledger.users()).map_err(|e| {
            log::warn!("Rejected event: {}", e);
            EngineError::from(e)
        })?;
        let user_id = event.user_id.clone();
        let mut raised = Vec::new();

        // 1. Activity delta (LOCKED users accrue nothing)
        let delta = resolve_delta(kind, event.risk_increase);
        let applied = if self.ledger.apply_delta(&user_id, delta).is_applied() {
            delta
        } else {
            0
        };
        self.total_activities += 1;

        let description = match &event.details {
            Some(details) => format!("{} ({})", kind.description(), details),
            None => kind.description().to_string(),
        };
        self.activity_log.append(ActivityLogEntry {
            timestamp: event.timestamp,
            user_id: user_id.clone(),
            description,
            risk_delta: applied,
        });

        // 2. Outlier check
        if self.ledger.is_active(&user_id)
            && self.detector.is_anomalous(&user_id, &self.ledger.scores())
        {
            let penalty = self.config.ai.anomaly_penalty;
            if let Some(new_score) = self.ledger.apply_penalty(&user_id, penalty).new_score() {
                let role = self.role_of(&user_id);
                self.record(Incident::ai_anomaly(&user_id, &role, new_score, penalty), &mut raised);
            }
            self.raise_if_due(&user_id, &mut raised);
        }

        // 3. Communication sentiment
        if self.random.chance(self.config.sentiment.probability) {
            self.analyze_sentiment(&user_id);
            self.raise_if_due(&user_id, &mut raised);
        }

        // 4. Final threshold check
        self.raise_if_due(&user_id, &mut raised);

        // 5. Corpus and retrain cadence
        self.detector.sample(&self.ledger.scores());
        if self.detector.activities_since_training() >= self.detector.retrain_interval() {
            self.detector.maybe_train();
            self.detector.reset_countdown();
        } else {
            self.detector.note_activity();
        }

        if let Err(e) = self.sink.save_event(&event) {
            log::error!("Failed to persist event: {}", e);
        }

        Ok(self.update(UpdateKind::Activity, raised, Vec::new()))
    }

    fn analyze_sentiment(&mut self, user_id: &str) {
        if !self.ledger.is_active(user_id) {
            return;
        }
        let message = pick_message(self.random.as_mut());
        let reading = SentimentReading::analyze(message, &self.config.sentiment);
        let penalty = reading.risk_delta(&self.config.sentiment);
        if penalty != 0 {
            self.ledger.apply_penalty(user_id, penalty);
        }

        self.activity_log
            .append(ActivityLogEntry::new(user_id, reading.describe(), penalty));
        self.total_activities += 1;
    }

    /// Decay every user; offers a risk snapshot to the sink
    pub fn decay_tick(&mut self) -> EngineUpdate {
        let report = self.ledger.decay_tick();

        let snapshot = RiskSnapshot::now(self.ledger.snapshot());
        if let Err(e) = self.sink.save_risk_snapshot(&snapshot) {
            log::error!("Failed to persist risk snapshot: {}", e);
        }

        self.update(UpdateKind::Decay, Vec::new(), report.unlocked)
    }

    /// Back to a fresh start: scores, history and model
    pub fn reset(&mut self) -> EngineUpdate {
        self.ledger.reset_all();
        self.activity_log.clear();
        self.incidents.clear();
        self.total_activities = 0;
        self.detector = OutlierDetector::new(self.config.ai.clone());
        log::info!("All risk scores, logs and incidents cleared");

        self.update(UpdateKind::Reset, Vec::new(), Vec::new())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn raise_if_due(&mut self, user_id: &str, raised: &mut Vec<Incident>) {
        if let Some(incident) = self.ledger.check_and_raise(user_id) {
            self.record(incident, raised);
        }
    }

    fn record(&mut self, incident: Incident, raised: &mut Vec<Incident>) {
        if let Err(e) = self.sink.save_incident(&incident) {
            log::error!("Failed to persist incident: {}", e);
        }
        self.incidents.record(incident.clone());
        raised.push(incident);
    }

    fn role_of(&self, user_id: &str) -> String {
        self.ledger.role(user_id).unwrap_or_default().to_string()
    }

    fn update(
        &self,
        kind: UpdateKind,
        new_incidents: Vec<Incident>,
        unlocked: Vec<String>,
    ) -> EngineUpdate {
        EngineUpdate {
            kind,
            timestamp: Utc::now(),
            users: self.ledger.snapshot(),
            latest_entry: self.activity_log.latest().cloned(),
            new_incidents,
            unlocked,
            stats: self.stats(),
            model: self.detector.status(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn stats(&self) -> EngineStats {
        let scores = self.ledger.scores();
        let count = scores.len().max(1) as f64;
        EngineStats {
            total_activities: self.total_activities,
            average_score: scores.values().map(|&s| s as f64).sum::<f64>() / count,
            max_score: scores.values().copied().max().unwrap_or(0),
            high_risk_users: scores
                .values()
                .filter(|&&s| s >= self.config.risk_threshold)
                .count(),
            incident_count: self.incidents.len(),
        }
    }

    pub fn snapshot(&self) -> Vec<UserRiskView> {
        self.ledger.snapshot()
    }

    pub fn ledger(&self) -> &RiskLedger {
        &self.ledger
    }

    #[cfg(test)]
    pub(crate) fn ledger_mut(&mut self) -> &mut RiskLedger {
        &mut self.ledger
    }

    pub fn detector(&self) -> &OutlierDetector {
        &self.detector
    }

    pub fn incidents(&self) -> &IncidentRecorder {
        &self.incidents
    }

    pub fn activity_log(&self) -> &ActivityLog {
        &self.activity_log
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn total_activities(&self) -> u64 {
        self.total_activities
    }
}
