//! Engine Module - Event processing pipeline
//!
//! `RiskEngine` runs one event through classifier, ledger, detector and
//! sentiment in a fixed order, and reports what changed.

pub mod types;
pub mod risk_engine;


pub use types::{EngineStats, EngineUpdate};
pub use risk_engine::RiskEngine;
