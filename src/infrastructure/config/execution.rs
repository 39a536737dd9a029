//! `[execution]` section: run defaults and the strategy registry.

use std::time::Duration;

use serde::Deserialize;

use crate::core::domain::{ExecutionMode, StrategyKind};

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionConfig {
    /// Mode used when `run` is not given `--mode`.
    #[serde(default)]
    pub default_mode: ExecutionMode,
    /// Registered strategy tags, in display order.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<String>,
    /// How long to keep listening for the backend after a cancel.
    #[serde(default = "default_cancel_grace_ms")]
    pub cancel_grace_ms: u64,
}

fn default_strategies() -> Vec<String> {
    StrategyKind::KNOWN
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

const fn default_cancel_grace_ms() -> u64 {
    5_000
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_mode: ExecutionMode::default(),
            strategies: default_strategies(),
            cancel_grace_ms: default_cancel_grace_ms(),
        }
    }
}

impl ExecutionConfig {
    /// The strategy registry, normalized.
    #[must_use]
    pub fn registry(&self) -> Vec<StrategyKind> {
        self.strategies
            .iter()
            .map(|tag| StrategyKind::from_tag(tag))
            .collect()
    }

    #[must_use]
    pub const fn cancel_grace(&self) -> Duration {
        Duration::from_millis(self.cancel_grace_ms)
    }
}
