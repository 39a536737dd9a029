//! Application services driving the domain.

pub mod orchestrator;

pub use orchestrator::{
    Checkpoint, Orchestrator, Progress, RunContext, RunEvent, RunObserver, RunPhase,
};
