//! Per-run state and the observer hook used by renderers.

use serde::Serialize;
use uuid::Uuid;

use super::progress::{Checkpoint, Progress};
use crate::core::domain::{
    ExecutionLog, ExecutionRequest, ExecutionResult, LogEntry, Severity, SummaryView,
};

/// Receives run updates as they happen. All methods default to no-ops.
pub trait RunObserver {
    /// A new run started; previous log and summary are gone.
    fn on_reset(&mut self) {}

    fn on_log(&mut self, _entry: &LogEntry) {}

    fn on_progress(&mut self, _progress: Progress) {}

    fn on_summary(&mut self, _summary: &SummaryView) {}
}

impl RunObserver for () {}

/// Everything one orchestration run owns. Created at dispatch, replaced by
/// the next run.
#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    run_id: Uuid,
    request: ExecutionRequest,
    log: ExecutionLog,
    summary: SummaryView,
    progress: Progress,
    completion_enabled: bool,
    cancelled: bool,
    /// Result that arrived after the user cancelled.
    late_result: Option<ExecutionResult>,
}

impl RunContext {
    pub(super) fn new(request: ExecutionRequest) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            request,
            log: ExecutionLog::new(),
            summary: SummaryView::Pending,
            progress: Progress::default(),
            completion_enabled: false,
            cancelled: false,
            late_result: None,
        }
    }

    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[must_use]
    pub fn request(&self) -> &ExecutionRequest {
        &self.request
    }

    #[must_use]
    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    #[must_use]
    pub fn summary(&self) -> &SummaryView {
        &self.summary
    }

    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Whether the operator can close out the run.
    #[must_use]
    pub const fn completion_enabled(&self) -> bool {
        self.completion_enabled
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn late_result(&self) -> Option<&ExecutionResult> {
        self.late_result.as_ref()
    }

    pub(super) fn append(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        observer: &mut dyn RunObserver,
    ) {
        let entry = self.log.push(severity, message);
        match severity {
            Severity::Info => tracing::info!(run_id = %self.run_id, "{}", entry.message),
            Severity::Warning => tracing::warn!(run_id = %self.run_id, "{}", entry.message),
            Severity::Error => tracing::error!(run_id = %self.run_id, "{}", entry.message),
        }
        observer.on_log(entry);
    }

    pub(super) fn advance(&mut self, checkpoint: Checkpoint, observer: &mut dyn RunObserver) {
        self.progress.advance(checkpoint);
        observer.on_progress(self.progress);
    }

    pub(super) fn fail_progress(&mut self, observer: &mut dyn RunObserver) {
        self.progress.fail();
        observer.on_progress(self.progress);
    }

    pub(super) fn show(&mut self, summary: SummaryView, observer: &mut dyn RunObserver) {
        self.summary = summary;
        observer.on_summary(&self.summary);
    }

    pub(super) fn enable_completion(&mut self) {
        self.completion_enabled = true;
    }

    pub(super) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub(super) fn set_late_result(&mut self, result: ExecutionResult) {
        self.late_result = Some(result);
    }
}
