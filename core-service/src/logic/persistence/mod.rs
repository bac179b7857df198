//! Persistence Module - Best-effort side channel
//!
//! The engine offers every processed event, every incident and periodic
//! risk snapshots to a sink. Sink failures are logged by the caller and
//! never touch in-memory state.

pub mod sink;
pub mod jsonl;

pub use sink::{NullSink, PersistenceSink, RiskSnapshot};
pub use jsonl::{read_records, JsonlSink};
