//! Insider Risk Core
//!
//! Per-user risk accumulation, decay, outlier flagging and incident
//! raising over a stream of activity events.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{EngineError, EngineResult};
