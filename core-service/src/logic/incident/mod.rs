//! Incident Module
//!
//! Immutable incident records and the append-only recorder that keeps them.

pub mod types;
pub mod recorder;

pub use types::{Incident, IncidentKind};
pub use recorder::IncidentRecorder;
