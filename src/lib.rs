//! Stratagem - wallet strategy execution orchestrator.
//!
//! Submits one batch of trading strategies across a selection of wallets to
//! a backend, then reduces the response into a per-wallet summary and an
//! operator log. Strategy mechanics live in the backend; this crate owns
//! selection, parameter panels, the run lifecycle, and presentation.
//!
//! # Modules
//!
//! - [`core::domain`] - Wallets, strategies, parameter schemas, requests,
//!   results, and the summary reduction
//! - [`core::service::orchestrator`] - Run state machine and driver
//! - [`port`] - The [`StrategyBackend`](port::outbound::backend::StrategyBackend) trait
//! - [`adapter::outbound::http`] - reqwest implementation of the backend
//! - [`adapter::inbound::cli`] - The `stratagem` command line
//! - [`infrastructure::config`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use stratagem::adapter::outbound::http::{ApiConfig, HttpBackend};
//! use stratagem::core::domain::{ExecutionMode, SelectionState, StrategyKind};
//! use stratagem::core::service::orchestrator::Orchestrator;
//! use stratagem::port::outbound::backend::StrategyBackend;
//!
//! # async fn demo() -> stratagem::error::Result<()> {
//! let backend = Arc::new(HttpBackend::from_config(&ApiConfig::default()));
//! let wallets = backend.list_wallets().await?;
//!
//! let mut selection = SelectionState::new(wallets, StrategyKind::KNOWN.to_vec());
//! selection.select_all(true);
//! selection.set_strategy(&StrategyKind::MultiHop, true)?;
//!
//! let mut orchestrator = Orchestrator::new(backend);
//! let run = orchestrator
//!     .execute(&selection, ExecutionMode::Parallel, &mut (), std::future::pending())
//!     .await?;
//! println!("{:?}", run.summary());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
