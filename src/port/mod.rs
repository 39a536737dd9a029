//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Orchestrator       │
//!                    │   Domain + Service      │
//!                    └────────────┬────────────┘
//!                                 │
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │ StrategyBackend │
//!                        │     Adapter     │
//!                        └─────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`StrategyBackend`](outbound::backend::StrategyBackend) - Batch execution
//!   and wallet roster

pub mod outbound;
