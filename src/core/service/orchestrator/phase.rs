//! Run lifecycle state machine.
//!
//! ```text
//! Idle ─validate─▶ Validating ─reject─▶ Idle
//!                      │
//!                   dispatch
//!                      ▼
//!                 Dispatched ─response_err─▶ Failed
//!                      │
//!                 response_ok
//!                      ▼
//!              ResponseReceived ─response_err─▶ Failed
//!                      │
//!                    render
//!                      ▼
//!                  Summarized
//! ```
//!
//! `cancel` is accepted from `Dispatched` and `ResponseReceived` and lands in
//! `Summarized`. Terminal phases accept `validate`, which starts a new run.

use serde::Serialize;

use crate::error::RunError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Validating,
    Dispatched,
    ResponseReceived,
    Summarized,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunEvent {
    Validate,
    Reject,
    Dispatch,
    ResponseOk,
    ResponseErr,
    Render,
    Cancel,
}

impl RunPhase {
    /// Apply an event, returning the next phase.
    ///
    /// # Errors
    ///
    /// [`RunError::RunInFlight`] when a new run is attempted while one is in
    /// flight, [`RunError::InvalidTransition`] for any other illegal event.
    pub fn apply(self, event: RunEvent) -> Result<Self, RunError> {
        use RunEvent as E;
        use RunPhase as P;

        match (self, event) {
            (P::Idle | P::Summarized | P::Failed, E::Validate) => Ok(P::Validating),
            (P::Validating, E::Reject) => Ok(P::Idle),
            (P::Validating, E::Dispatch) => Ok(P::Dispatched),
            (P::Dispatched, E::ResponseOk) => Ok(P::ResponseReceived),
            (P::Dispatched | P::ResponseReceived, E::ResponseErr) => Ok(P::Failed),
            (P::ResponseReceived, E::Render) => Ok(P::Summarized),
            (P::Dispatched | P::ResponseReceived, E::Cancel) => Ok(P::Summarized),
            (phase, E::Validate) if phase.is_in_flight() => Err(RunError::RunInFlight),
            (from, event) => Err(RunError::InvalidTransition { from, event }),
        }
    }

    /// Waiting on the backend.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Dispatched | Self::ResponseReceived)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Summarized | Self::Failed)
    }
}
