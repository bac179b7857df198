//! Ledger Module - Per-user risk state
//!
//! Sole owner of every `RiskState`. Applies deltas, decay and the
//! lock/unlock transitions; awards security points along the way.
//!
//! ## Structure
//! - `types`: RiskState, UserStatus, RiskBand, snapshot rows
//! - `rewards`: security point award policy
//! - `risk_ledger`: the `RiskLedger` itself

pub mod types;
pub mod rewards;
pub mod risk_ledger;

#[cfg(test)]
mod tests;

pub use types::{DecayReport, DeltaOutcome, RiskBand, RiskState, ScoreMap, UserRiskView, UserStatus};
pub use risk_ledger::{LedgerPolicy, RiskLedger};
