//! Incident Recorder
//!
//! Append-on-trigger observer. Holds nothing but the incident sequence;
//! the lock transition itself belongs to the ledger.

use std::collections::HashMap;

use super::types::{Incident, IncidentKind};

#[derive(Debug, Default)]
pub struct IncidentRecorder {
    // Arrival order; views reverse it
    incidents: Vec<Incident>,
}

impl IncidentRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, incident: Incident) {
        match incident.kind {
            IncidentKind::Threshold => log::warn!(
                "[INCIDENT] {} locked at score {}",
                incident.user_id,
                incident.score_at_trigger
            ),
            IncidentKind::AiAnomaly => log::warn!(
                "[AI ANOMALY] {} flagged at score {}",
                incident.user_id,
                incident.score_at_trigger
            ),
        }
        self.incidents.push(incident);
    }

    /// Most-recent-first
    pub fn incidents(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.iter().rev()
    }

    pub fn latest(&self) -> Option<&Incident> {
        self.incidents.last()
    }

    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Incident> {
        self.incidents().filter(move |i| i.user_id == user_id)
    }

    pub fn count_by_kind(&self) -> HashMap<IncidentKind, usize> {
        let mut counts = HashMap::new();
        for incident in &self.incidents {
            *counts.entry(incident.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Only used by a full reset
    pub fn clear(&mut self) {
        self.incidents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut rec = IncidentRecorder::new();
        rec.record(Incident::threshold("user_A", "developer", 23));
        rec.record(Incident::ai_anomaly("user_B", "sales", 12, 8));

        let users: Vec<&str> = rec.incidents().map(|i| i.user_id.as_str()).collect();
        assert_eq!(users, vec!["user_B", "user_A"]);
        assert_eq!(rec.latest().unwrap().kind, IncidentKind::AiAnomaly);
    }

    #[test]
    fn test_messages() {
        let t = Incident::threshold("user_A", "developer", 23);
        assert_eq!(
            t.message,
            "HIGH-RISK ALERT: user_A (developer) triggered security incident - Account LOCKED"
        );
        let a = Incident::ai_anomaly("user_C", "analyst", 9, 8);
        assert!(a.message.contains("(+8 risk)"));
        assert_eq!(a.kind, IncidentKind::AiAnomaly);
    }

    #[test]
    fn test_counts_and_filter() {
        let mut rec = IncidentRecorder::new();
        rec.record(Incident::threshold("user_A", "developer", 20));
        rec.record(Incident::threshold("user_B", "sales", 21));
        rec.record(Incident::ai_anomaly("user_A", "developer", 8, 8));

        let counts = rec.count_by_kind();
        assert_eq!(counts[&IncidentKind::Threshold], 2);
        assert_eq!(counts[&IncidentKind::AiAnomaly], 1);
        assert_eq!(rec.for_user("user_A").count(), 2);

        rec.clear();
        assert!(rec.is_empty());
    }
}
