//! Update Emitter
//!
//! Fan-out of engine updates to any number of listeners over a tokio
//! broadcast channel. Emitting with nobody listening is a silent no-op.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::logic::engine::EngineUpdate;

/// Buffered updates per slow subscriber before it starts lagging
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event names
pub mod events {
    pub const RISK_ACTIVITY: &str = "risk:activity";
    pub const RISK_DECAY: &str = "risk:decay";
    pub const RISK_RESET: &str = "risk:reset";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Activity,
    Decay,
    Reset,
}

impl UpdateKind {
    pub fn event_name(&self) -> &'static str {
        match self {
            UpdateKind::Activity => events::RISK_ACTIVITY,
            UpdateKind::Decay => events::RISK_DECAY,
            UpdateKind::Reset => events::RISK_RESET,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateEmitter {
    tx: broadcast::Sender<EngineUpdate>,
}

impl UpdateEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineUpdate> {
        self.tx.subscribe()
    }

    /// Returns how many listeners got the update
    pub fn emit(&self, update: EngineUpdate) -> usize {
        let name = update.kind.event_name();
        match self.tx.send(update) {
            Ok(n) => n,
            Err(_) => {
                log::trace!("No listeners, '{}' dropped", name);
                0
            }
        }
    }
}

impl Default for UpdateEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
