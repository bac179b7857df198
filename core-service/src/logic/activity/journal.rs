//! Activity Log
//!
//! Append-only; entries are never edited after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub description: String,
    /// Delta actually applied (0 for a LOCKED user)
    pub risk_delta: i64,
}

impl ActivityLogEntry {
    pub fn new(user_id: &str, description: impl Into<String>, risk_delta: i64) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            description: description.into(),
            risk_delta,
        }
    }
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityLogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ActivityLogEntry) {
        self.entries.push(entry);
    }

    /// Most-recent-first
    pub fn entries(&self) -> impl Iterator<Item = &ActivityLogEntry> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&ActivityLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut log = ActivityLog::new();
        log.append(ActivityLogEntry::new("user_A", "Normal Activity", 0));
        log.append(ActivityLogEntry::new("user_B", "File Download Detected", 5));

        let users: Vec<&str> = log.entries().map(|e| e.user_id.as_str()).collect();
        assert_eq!(users, vec!["user_B", "user_A"]);
        assert_eq!(log.latest().unwrap().risk_delta, 5);

        log.clear();
        assert!(log.is_empty());
    }
}
