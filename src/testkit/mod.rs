//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`backend`] - [`ScriptedBackend`](backend::ScriptedBackend), an in-memory
//!   [`StrategyBackend`](crate::port::outbound::backend::StrategyBackend).
//! - [`domain`] - Builders for wallets, rosters, and execution results.
//! - [`observer`] - [`RecordingObserver`](observer::RecordingObserver) for
//!   asserting what a run reported.

pub mod backend;
pub mod domain;
pub mod observer;
