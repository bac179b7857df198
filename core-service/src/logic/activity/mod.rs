//! Activity Module
//!
//! Activity kinds, their risk table, the event shape accepted at the
//! ingestion boundary and the append-only activity log.
//!
//! ## Structure
//! - `types`: `ActivityKind` and its keys/descriptions
//! - `rules`: the static risk table
//! - `classifier`: delta resolution (table or per-event override)
//! - `event`: normalized `Event` and its validation
//! - `journal`: `ActivityLogEntry` / `ActivityLog`

pub mod types;
pub mod rules;
pub mod classifier;
pub mod event;
pub mod journal;

pub use types::ActivityKind;
pub use rules::RISK_RULES;
pub use classifier::{risk_delta, resolve_delta};
pub use event::Event;
pub use journal::{ActivityLog, ActivityLogEntry};
