//! Fixed progress checkpoints.
//!
//! The backend does not stream progress, so the indicator only moves at
//! phase boundaries.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    Start,
    Dispatched,
    ResponseReceived,
    Rendered,
}

impl Checkpoint {
    #[must_use]
    pub const fn percent(self) -> u8 {
        match self {
            Self::Start => 0,
            Self::Dispatched => 25,
            Self::ResponseReceived => 75,
            Self::Rendered => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    checkpoint: Checkpoint,
    failed: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            checkpoint: Checkpoint::Start,
            failed: false,
        }
    }
}

impl Progress {
    /// Move forward to `checkpoint`. Never moves backwards.
    pub fn advance(&mut self, checkpoint: Checkpoint) {
        self.checkpoint = self.checkpoint.max(checkpoint);
    }

    /// Jump to the end and flag the run as failed.
    pub fn fail(&mut self) {
        self.checkpoint = Checkpoint::Rendered;
        self.failed = true;
    }

    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    #[must_use]
    pub const fn percent(&self) -> u8 {
        self.checkpoint.percent()
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.checkpoint, Checkpoint::Rendered)
    }
}
