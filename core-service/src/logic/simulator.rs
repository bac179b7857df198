//! Event Simulator
//!
//! Stand-in event source: a random roster user performs a random activity.

use crate::logic::activity::{ActivityKind, Event};
use crate::logic::random::{RandomSource, RngSource};
use crate::logic::users::UserProfile;

pub struct EventSimulator {
    user_ids: Vec<String>,
    random: Box<dyn RandomSource>,
}

impl EventSimulator {
    pub fn new(roster: &[UserProfile]) -> Self {
        Self::with_random(roster, Box::new(RngSource::from_entropy()))
    }

    pub fn with_random(roster: &[UserProfile], random: Box<dyn RandomSource>) -> Self {
        Self {
            user_ids: roster.iter().map(|u| u.user_id.clone()).collect(),
            random,
        }
    }

    /// `None` only for an empty roster
    pub fn next_event(&mut self) -> Option<Event> {
        if self.user_ids.is_empty() {
            return None;
        }
        let user = &self.user_ids[self.random.pick(self.user_ids.len())];
        let kind = ActivityKind::ALL[self.random.pick(ActivityKind::ALL.len())];
        Some(Event::new(user, kind))
    }
}
