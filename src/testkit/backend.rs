//! Scripted [`StrategyBackend`] for orchestrator tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::domain::{ExecutionRequest, ExecutionResult, Wallet};
use crate::error::TransportError;
use crate::port::outbound::backend::StrategyBackend;

/// A backend with pre-loaded batch responses and a fixed roster.
///
/// Each `execute_batch` call pops the next scripted response; an exhausted
/// script answers with a transport error. Every submitted request is kept
/// for inspection.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<ExecutionResult, TransportError>>>,
    wallets: Vec<Wallet>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ExecutionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            wallets: Vec::new(),
            delay: None,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_result(self, result: ExecutionResult) -> Self {
        self.responses.lock().push_back(Ok(result));
        self
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn with_wallets(mut self, wallets: Vec<Wallet>) -> Self {
        self.wallets = wallets;
        self
    }

    /// Hold every batch response for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `execute_batch` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().clone()
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StrategyBackend for ScriptedBackend {
    async fn execute_batch(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        let response = self.responses.lock().pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| Err(TransportError::Other("no scripted response".into())))
    }

    async fn list_wallets(&self) -> Result<Vec<Wallet>, TransportError> {
        Ok(self.wallets.clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
