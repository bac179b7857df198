//! User Roster
//!
//! Users are created once from a static roster and never deleted during a run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    /// Descriptive only, never used for scoring
    pub role: String,
}

impl UserProfile {
    pub fn new(user_id: &str, role: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            role: role.to_string(),
        }
    }

    pub fn default_roster() -> Vec<UserProfile> {
        vec![
            UserProfile::new("user_A", "developer"),
            UserProfile::new("user_B", "sales"),
            UserProfile::new("user_C", "analyst"),
            UserProfile::new("user_D", "admin"),
        ]
    }
}
