//! Wallet strategy execution orchestrator.
//!
//! One run submits a single batch request covering every selected wallet
//! and strategy, then reduces the response into a [`SummaryView`] and an
//! [`ExecutionLog`](crate::core::domain::ExecutionLog). The backend fans
//! the batch out; there is no client-side concurrency beyond the one
//! round trip.
//!
//! Cancellation does not abort the request. It marks the run as cancelled,
//! unblocks completion, and keeps listening for the real outcome so the log
//! records whatever the backend eventually did.

mod context;
mod phase;
mod progress;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing::{debug, info, warn};

pub use context::{RunContext, RunObserver};
pub use phase::{RunEvent, RunPhase};
pub use progress::{Checkpoint, Progress};

use crate::core::domain::{
    summarize, ExecutionMode, ExecutionRequest, ExecutionResult, SelectionState, Severity,
    SummaryView,
};
use crate::error::{Error, Result, RunError, TransportError};
use crate::port::outbound::backend::StrategyBackend;

pub const MSG_STARTED: &str = "Starting execution of selected strategies...";
pub const MSG_COMPLETED: &str = "Execution completed successfully!";
pub const MSG_CANCELLED: &str = "Execution cancelled by user";

/// Default time to keep waiting for the backend after a cancel.
pub const DEFAULT_CANCEL_GRACE: Duration = Duration::from_secs(5);

type CallOutcome = std::result::Result<ExecutionResult, TransportError>;

/// Drives orchestration runs against a backend, one at a time.
pub struct Orchestrator {
    backend: Arc<dyn StrategyBackend>,
    cancel_grace: Duration,
    phase: RunPhase,
    context: Option<RunContext>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(backend: Arc<dyn StrategyBackend>) -> Self {
        Self {
            backend,
            cancel_grace: DEFAULT_CANCEL_GRACE,
            phase: RunPhase::Idle,
            context: None,
        }
    }

    /// How long to keep waiting for the in-flight response after a cancel.
    #[must_use]
    pub fn with_cancel_grace(mut self, grace: Duration) -> Self {
        self.cancel_grace = grace;
        self
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The current (or most recent) run.
    #[must_use]
    pub fn context(&self) -> Option<&RunContext> {
        self.context.as_ref()
    }

    fn transition(&mut self, event: RunEvent) -> std::result::Result<(), RunError> {
        let next = self.phase.apply(event)?;
        debug!(from = ?self.phase, to = ?next, ?event, "Run transition");
        self.phase = next;
        Ok(())
    }

    /// The current run's context; `event` names what needed it.
    fn context_mut(&mut self, event: RunEvent) -> Result<&mut RunContext> {
        let phase = self.phase;
        self.context
            .as_mut()
            .ok_or(Error::Run(RunError::InvalidTransition { from: phase, event }))
    }

    /// Check preconditions and snapshot the selection.
    ///
    /// Validation failures return to `Idle` without touching the previous
    /// run's log or summary and without any network traffic.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty selection, [`Error::Run`] if a run
    /// is already in flight.
    pub fn validate(
        &mut self,
        selection: &SelectionState,
        mode: ExecutionMode,
    ) -> Result<ExecutionRequest> {
        self.transition(RunEvent::Validate)?;
        match selection.build_request(mode) {
            Ok(request) => Ok(request),
            Err(err) => {
                self.transition(RunEvent::Reject)?;
                warn!(error = %err, "Submission rejected");
                Err(err.into())
            }
        }
    }

    /// Start a new run for `request`, replacing the previous log and summary.
    ///
    /// # Errors
    ///
    /// [`Error::Run`] unless called right after a successful [`Self::validate`].
    pub fn dispatch(
        &mut self,
        request: ExecutionRequest,
        observer: &mut dyn RunObserver,
    ) -> Result<()> {
        self.transition(RunEvent::Dispatch)?;

        let context = self.context.insert(RunContext::new(request));
        observer.on_reset();
        observer.on_summary(context.summary());
        observer.on_progress(context.progress());

        info!(
            run_id = %context.run_id(),
            wallets = context.request().wallet_ids().len(),
            strategies = context.request().strategy_types().len(),
            mode = %context.request().mode(),
            "Dispatching batch"
        );
        context.append(Severity::Info, MSG_STARTED, observer);
        context.advance(Checkpoint::Dispatched, observer);
        Ok(())
    }

    /// The backend answered. A `success:false` body fails the run.
    ///
    /// After a cancel the outcome is only logged; phase and summary stay.
    ///
    /// # Errors
    ///
    /// [`Error::Run`] when no run is waiting for a response.
    pub fn response_ok(
        &mut self,
        result: ExecutionResult,
        observer: &mut dyn RunObserver,
    ) -> Result<()> {
        if self.is_cancelled() {
            let context = self.context_mut(RunEvent::ResponseOk)?;
            if result.success {
                context.append(Severity::Info, MSG_COMPLETED, observer);
            } else {
                context.append(
                    Severity::Error,
                    format!("Error: {}", result.error_message()),
                    observer,
                );
            }
            context.set_late_result(result);
            return Ok(());
        }

        self.transition(RunEvent::ResponseOk)?;
        self.context_mut(RunEvent::ResponseOk)?
            .advance(Checkpoint::ResponseReceived, observer);

        if !result.success {
            self.transition(RunEvent::ResponseErr)?;
            let context = self.context_mut(RunEvent::ResponseErr)?;
            let message = result.error_message().to_string();
            context.append(Severity::Error, format!("Error: {message}"), observer);
            context.show(SummaryView::failure(message), observer);
            context.fail_progress(observer);
            context.enable_completion();
            return Ok(());
        }

        self.transition(RunEvent::Render)?;
        let context = self.context_mut(RunEvent::Render)?;
        context.append(Severity::Info, MSG_COMPLETED, observer);
        context.show(summarize(&result), observer);
        context.advance(Checkpoint::Rendered, observer);
        context.enable_completion();
        info!(
            run_id = %context.run_id(),
            total_profit = %result.total_profit,
            wallets = result.wallets.len(),
            "Batch summarized"
        );
        Ok(())
    }

    /// The request failed in transport or the body could not be read.
    ///
    /// # Errors
    ///
    /// [`Error::Run`] when no run is waiting for a response.
    pub fn response_err(
        &mut self,
        error: &TransportError,
        observer: &mut dyn RunObserver,
    ) -> Result<()> {
        let message = format!("Error: {error}");

        if self.is_cancelled() {
            self.context_mut(RunEvent::ResponseErr)?
                .append(Severity::Error, message, observer);
            return Ok(());
        }

        self.transition(RunEvent::ResponseErr)?;
        let context = self.context_mut(RunEvent::ResponseErr)?;
        context.append(Severity::Error, message, observer);
        context.show(SummaryView::failure(error.to_string()), observer);
        context.fail_progress(observer);
        context.enable_completion();
        Ok(())
    }

    /// Stop waiting on the current run. The request itself keeps going.
    ///
    /// # Errors
    ///
    /// [`Error::Run`] unless a run is in flight.
    pub fn cancel(&mut self, observer: &mut dyn RunObserver) -> Result<()> {
        self.transition(RunEvent::Cancel)?;
        let context = self.context_mut(RunEvent::Cancel)?;
        context.mark_cancelled();
        context.append(Severity::Warning, MSG_CANCELLED, observer);
        context.show(SummaryView::cancelled(), observer);
        context.enable_completion();
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.phase == RunPhase::Summarized
            && self.context.as_ref().is_some_and(RunContext::is_cancelled)
    }

    fn settle(
        &mut self,
        joined: std::result::Result<CallOutcome, JoinError>,
        observer: &mut dyn RunObserver,
    ) -> Result<()> {
        match joined {
            Ok(Ok(result)) => self.response_ok(result, observer),
            Ok(Err(err)) => self.response_err(&err, observer),
            Err(err) => self.response_err(
                &TransportError::Other(format!("request task failed: {err}")),
                observer,
            ),
        }
    }

    /// Run one full orchestration: validate, dispatch, await, reduce.
    ///
    /// `cancel` resolving before the response arrives cancels the run; the
    /// response is then awaited for up to the cancel grace period and
    /// logged if it shows up.
    ///
    /// # Errors
    ///
    /// Validation and state machine errors. Transport and backend failures
    /// are not errors here: they end the run in [`RunPhase::Failed`].
    pub async fn execute<F>(
        &mut self,
        selection: &SelectionState,
        mode: ExecutionMode,
        observer: &mut dyn RunObserver,
        cancel: F,
    ) -> Result<&RunContext>
    where
        F: Future<Output = ()>,
    {
        let request = self.validate(selection, mode)?;
        self.dispatch(request.clone(), observer)?;

        let backend = Arc::clone(&self.backend);
        let mut call = tokio::spawn(async move { backend.execute_batch(&request).await });

        tokio::pin!(cancel);
        let joined = tokio::select! {
            joined = &mut call => Some(joined),
            () = &mut cancel => None,
        };

        match joined {
            Some(joined) => self.settle(joined, observer)?,
            None => {
                self.cancel(observer)?;
                match tokio::time::timeout(self.cancel_grace, call).await {
                    Ok(joined) => self.settle(joined, observer)?,
                    Err(_) => warn!(
                        grace = ?self.cancel_grace,
                        "Request still in flight after cancel; no longer waiting"
                    ),
                }
            }
        }

        let phase = self.phase;
        self.context
            .as_ref()
            .ok_or(Error::Run(RunError::InvalidTransition {
                from: phase,
                event: RunEvent::Render,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{StrategyKind, StrategyOutcome, Wallet, WalletId, WalletResult};
    use crate::testkit::backend::ScriptedBackend;
    use rust_decimal_macros::dec;

    fn selection() -> SelectionState {
        let mut state = SelectionState::new(
            vec![
                Wallet::new(WalletId::new(1), "0xaaaaaaaaaaaaaaaaaaaa", "ethereum", true),
                Wallet::new(WalletId::new(2), "0xbbbbbbbbbbbbbbbbbbbb", "polygon", true),
            ],
            StrategyKind::KNOWN.to_vec(),
        );
        state.select_all(false);
        state.set_strategy(&StrategyKind::MultiHop, true).unwrap();
        state
    }

    fn orchestrator(backend: ScriptedBackend) -> Orchestrator {
        Orchestrator::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn successful_run_summarizes() {
        let result = ExecutionResult::completed(
            dec!(12.5),
            vec![WalletResult::new("0xabc...1234", "ethereum", dec!(12.5))
                .with_outcome(StrategyOutcome::succeeded(StrategyKind::MultiHop, dec!(12.5)))],
        );
        let mut orchestrator = orchestrator(ScriptedBackend::new().with_result(result));

        let context = orchestrator
            .execute(&selection(), ExecutionMode::Parallel, &mut (), std::future::pending())
            .await
            .unwrap();

        assert!(context.completion_enabled());
        assert_eq!(context.progress().percent(), 100);
        assert_eq!(context.log().len(), 2);
        assert_eq!(context.log().entries()[0].message, MSG_STARTED);
        assert_eq!(context.log().entries()[1].message, MSG_COMPLETED);
        assert_eq!(context.summary().wallet_cards().len(), 1);
        assert_eq!(orchestrator.phase(), RunPhase::Summarized);
    }

    #[tokio::test]
    async fn rejected_body_fails_run() {
        let mut orchestrator = orchestrator(
            ScriptedBackend::new().with_result(ExecutionResult::rejected("insufficient liquidity")),
        );

        let context = orchestrator
            .execute(&selection(), ExecutionMode::Parallel, &mut (), std::future::pending())
            .await
            .unwrap();

        assert_eq!(
            context.summary(),
            &SummaryView::failure("insufficient liquidity")
        );
        assert_eq!(context.log().count(Severity::Error), 1);
        assert!(context.progress().is_failed());
        assert_eq!(orchestrator.phase(), RunPhase::Failed);
    }

    #[tokio::test]
    async fn empty_selection_makes_no_call() {
        let backend = Arc::new(ScriptedBackend::new());
        let mut orchestrator = Orchestrator::new(backend.clone());
        let empty = SelectionState::new(vec![], StrategyKind::KNOWN.to_vec());

        let err = orchestrator
            .execute(&empty, ExecutionMode::Parallel, &mut (), std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(backend.calls(), 0);
        assert_eq!(orchestrator.phase(), RunPhase::Idle);
        assert!(orchestrator.context().is_none());
    }

    #[test]
    fn events_out_of_order_are_rejected() {
        let mut orchestrator = orchestrator(ScriptedBackend::new());
        assert!(matches!(
            orchestrator.cancel(&mut ()),
            Err(Error::Run(RunError::InvalidTransition { .. }))
        ));
        assert!(orchestrator
            .response_ok(ExecutionResult::completed(dec!(1), vec![]), &mut ())
            .is_err());
    }

    #[test]
    fn missing_context_names_the_event_that_needed_it() {
        let mut orchestrator = orchestrator(ScriptedBackend::new());
        orchestrator.phase = RunPhase::Dispatched;

        match orchestrator.cancel(&mut ()) {
            Err(Error::Run(RunError::InvalidTransition { event, .. })) => {
                assert_eq!(event, RunEvent::Cancel);
            }
            other => panic!("expected invalid transition, got {other:?}"),
        }

        orchestrator.phase = RunPhase::Dispatched;
        let err = orchestrator
            .response_err(&TransportError::Other("reset".into()), &mut ())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Run(RunError::InvalidTransition {
                event: RunEvent::ResponseErr,
                ..
            })
        ));
    }
}
