//! Observer that records every update.

use crate::core::domain::{LogEntry, SummaryView};
use crate::core::service::orchestrator::{Progress, RunObserver};

/// One observer callback, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Reset,
    Log(String),
    Progress(u8),
    Summary(SummaryView),
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub resets: usize,
    pub logs: Vec<LogEntry>,
    pub progress: Vec<Progress>,
    pub summaries: Vec<SummaryView>,
    /// Every callback across all runs, in order.
    pub events: Vec<Observed>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percent values reported, in order.
    pub fn percents(&self) -> Vec<u8> {
        self.progress.iter().map(Progress::percent).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.logs.iter().map(|entry| entry.message.as_str()).collect()
    }

    /// Events since the most recent reset, reset included.
    pub fn current_run(&self) -> &[Observed] {
        let start = self
            .events
            .iter()
            .rposition(|event| *event == Observed::Reset)
            .unwrap_or(0);
        &self.events[start..]
    }
}

impl RunObserver for RecordingObserver {
    fn on_reset(&mut self) {
        self.resets += 1;
        self.events.push(Observed::Reset);
    }

    fn on_log(&mut self, entry: &LogEntry) {
        self.logs.push(entry.clone());
        self.events.push(Observed::Log(entry.message.clone()));
    }

    fn on_progress(&mut self, progress: Progress) {
        self.progress.push(progress);
        self.events.push(Observed::Progress(progress.percent()));
    }

    fn on_summary(&mut self, summary: &SummaryView) {
        self.summaries.push(summary.clone());
        self.events.push(Observed::Summary(summary.clone()));
    }
}
