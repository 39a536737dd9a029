//! `stratagem run`: build a selection, submit one batch, print the summary.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::ProgressBar;
use serde_json::json;
use tracing::{info, warn};

use super::command::RunArgs;
use super::{output, prompt, render};
use crate::adapter::outbound::http::HttpBackend;
use crate::core::domain::{LogEntry, SelectionState, SummaryView, PENDING_MESSAGE};
use crate::core::service::orchestrator::{Orchestrator, Progress, RunObserver, RunPhase};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::backend::StrategyBackend;

/// Exit status of a completed `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Summarized,
    Failed,
    Cancelled,
}

impl RunOutcome {
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Summarized => 0,
            Self::Failed => 1,
            Self::Cancelled => 130,
        }
    }
}

/// Drives the terminal while a run is in flight.
pub struct TerminalObserver {
    bar: ProgressBar,
    grace: Duration,
}

impl TerminalObserver {
    /// `grace` is how long a cancelled run keeps waiting for the backend.
    #[must_use]
    pub fn new(grace: Duration) -> Self {
        Self {
            bar: output::progress_bar(),
            grace,
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl RunObserver for TerminalObserver {
    fn on_reset(&mut self) {
        self.bar.reset();
    }

    fn on_log(&mut self, entry: &LogEntry) {
        self.bar.suspend(|| output::log_entry(entry));
    }

    fn on_progress(&mut self, progress: Progress) {
        if progress.is_failed() {
            output::progress_failed(&self.bar);
        }
        self.bar.set_position(u64::from(progress.percent()));
    }

    fn on_summary(&mut self, summary: &SummaryView) {
        match summary {
            SummaryView::Pending => self.bar.set_message(PENDING_MESSAGE),
            SummaryView::Cancelled { .. } => self.bar.set_message(grace_notice(self.grace)),
            _ => self.bar.set_message(""),
        }
    }
}

/// Bar message while a cancelled run waits out the grace period.
fn grace_notice(grace: Duration) -> String {
    format!("cancelled, waiting up to {grace:?} for the backend (Ctrl-C again to exit)")
}

/// Resolves on the first Ctrl-C. Never resolves if the handler cannot be
/// installed.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C; cancellation disabled");
        std::future::pending::<()>().await;
    }
}

/// Cancel on the first Ctrl-C; a second one exits without waiting for the
/// backend.
async fn interrupt() {
    ctrl_c().await;
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Second Ctrl-C; exiting without waiting for the backend");
            std::process::exit(RunOutcome::Cancelled.exit_code());
        }
    });
}

/// Apply `run` flags to a fresh selection.
///
/// # Errors
///
/// [`SelectionError`](crate::error::SelectionError) for unknown or disabled
/// wallets, unregistered strategies, and bad parameter values.
pub fn apply_args(selection: &mut SelectionState, args: &RunArgs) -> Result<()> {
    if args.active_only {
        selection.toggle_active_only_filter(true);
    }
    if args.all_wallets {
        selection.select_all(args.active_only);
    }
    for id in &args.wallets {
        selection.set_wallet(*id, true)?;
    }
    for strategy in &args.strategies {
        selection.set_strategy(strategy, true)?;
    }
    for param in &args.params {
        selection.set_param(&param.strategy, &param.name, &param.value)?;
    }
    Ok(())
}

/// Execute the `run` command.
pub async fn execute(config_path: &Path, args: &RunArgs) -> Result<RunOutcome> {
    let config = super::load_config(config_path)?;
    config.require_csrf_token()?;

    let backend: Arc<dyn StrategyBackend> = Arc::new(HttpBackend::from_config(&config.api));
    execute_with_backend(&config, backend, args, interrupt()).await
}

/// Execute `run` against any backend. `cancel` resolving mid-flight cancels
/// the run.
pub async fn execute_with_backend<F>(
    config: &Config,
    backend: Arc<dyn StrategyBackend>,
    args: &RunArgs,
    cancel: F,
) -> Result<RunOutcome>
where
    F: Future<Output = ()>,
{
    let spinner = output::spinner("Fetching wallets...");
    let roster = match backend.list_wallets().await {
        Ok(roster) => {
            output::spinner_success(&spinner, &format!("Fetched {} wallets", roster.len()));
            roster
        }
        Err(err) => {
            output::spinner_fail(&spinner, "Failed to fetch wallets");
            return Err(err.into());
        }
    };

    let mut selection = SelectionState::new(roster, config.execution.registry());
    let mode = if args.interactive {
        prompt::fill(&mut selection, config.execution.default_mode)?
    } else {
        apply_args(&mut selection, args)?;
        args.mode.unwrap_or(config.execution.default_mode)
    };

    info!(
        wallets = selection.selected_wallet_count(),
        strategies = selection.selected_strategy_count(),
        %mode,
        backend = backend.name(),
        "Run requested"
    );

    let grace = config.execution.cancel_grace();
    let mut orchestrator = Orchestrator::new(backend).with_cancel_grace(grace);
    let mut observer = TerminalObserver::new(grace);
    let result = orchestrator
        .execute(&selection, mode, &mut observer, cancel)
        .await
        .map(|_| ());
    observer.finish();
    result?;

    let phase = orchestrator.phase();
    let context = orchestrator
        .context()
        .ok_or_else(|| Error::Other("run finished without a context".into()))?;

    let outcome = if context.is_cancelled() {
        RunOutcome::Cancelled
    } else if phase == RunPhase::Failed {
        RunOutcome::Failed
    } else {
        RunOutcome::Summarized
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "run",
            "run_id": context.run_id(),
            "phase": phase,
            "request": context.request(),
            "summary": context.summary(),
            "late_result": context.late_result(),
        }));
    } else {
        render::summary(context.summary());
    }

    Ok(outcome)
}
