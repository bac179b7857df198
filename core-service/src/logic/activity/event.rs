//! Activity Events
//!
//! The normalized event shape accepted by the engine. Field aliasing and
//! file parsing belong to whoever produces events; here an event is only
//! checked against the roster and the activity table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidEvent;
use crate::logic::users::UserProfile;
use super::types::ActivityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    /// Activity key, e.g. `file_download`
    pub activity_kind: String,
    /// Replaces the table delta when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_increase: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Event {
    pub fn new(user_id: &str, kind: ActivityKind) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            activity_kind: kind.as_str().to_string(),
            risk_increase: None,
            details: None,
        }
    }

    pub fn with_risk_increase(mut self, delta: i64) -> Self {
        self.risk_increase = Some(delta);
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// User first, then kind
    pub fn validate(&self, roster: &[UserProfile]) -> Result<ActivityKind, InvalidEvent> {
        if !roster.iter().any(|u| u.user_id == self.user_id) {
            return Err(InvalidEvent::UnknownUser(self.user_id.clone()));
        }
        self.activity_kind.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let roster = UserProfile::default_roster();

        let ok = Event::new("user_B", ActivityKind::FileDownload);
        assert_eq!(ok.validate(&roster), Ok(ActivityKind::FileDownload));

        let ghost = Event::new("user_Z", ActivityKind::Normal);
        assert_eq!(
            ghost.validate(&roster),
            Err(InvalidEvent::UnknownUser("user_Z".to_string()))
        );

        let mut odd = Event::new("user_A", ActivityKind::Normal);
        odd.activity_kind = "print_job".to_string();
        assert_eq!(
            odd.validate(&roster),
            Err(InvalidEvent::UnknownActivity("print_job".to_string()))
        );
    }

    #[test]
    fn test_optional_fields_from_json() {
        let event: Event = serde_json::from_str(
            r#"{"timestamp":"2024-05-01T10:00:00Z","user_id":"user_A","activity_kind":"normal"}"#,
        )
        .unwrap();
        assert_eq!(event.risk_increase, None);
        assert_eq!(event.details, None);

        let json = serde_json::to_string(&event.clone().with_risk_increase(3)).unwrap();
        assert!(json.contains("\"risk_increase\":3"));
        assert!(!json.contains("details"));
    }
}
