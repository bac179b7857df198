//! Logic Module - Business Logic & Engines
//!
//! ## Layout
//! - `activity/` - activity kinds, risk table, events, activity log
//! - `ledger/` - per-user risk state (sole writer)
//! - `model/` - feature corpus, isolation forest, outlier detector
//! - `sentiment/` - communication polarity
//! - `incident/` - incident records
//! - `engine/` - the event pipeline tying the above together
//! - `runner` - periodic driver (tokio)
//! - `persistence/` - JSONL side channel

// Foundations
pub mod config;
pub mod users;
pub mod random;

// Components
pub mod activity;
pub mod ledger;
pub mod model;
pub mod sentiment;
pub mod incident;

// Orchestration
pub mod engine;
pub mod events;
pub mod simulator;
pub mod runner;
pub mod persistence;
