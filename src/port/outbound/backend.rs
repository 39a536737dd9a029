//! Strategy backend port.
//!
//! The backend owns strategy mechanics. This side only submits a batch and
//! reads the wallet roster.

use async_trait::async_trait;

use crate::core::domain::{ExecutionRequest, ExecutionResult, Wallet};
use crate::error::TransportError;

/// Remote service that executes strategy batches.
///
/// Implementations must not retry [`execute_batch`](Self::execute_batch):
/// a resubmitted batch executes strategies twice.
#[async_trait]
pub trait StrategyBackend: Send + Sync {
    /// Submit one batch and return the decoded response body.
    ///
    /// A well-formed `success:false` body is `Ok`; only transport failures
    /// and unreadable bodies are `Err`.
    async fn execute_batch(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, TransportError>;

    /// Fetch the wallet roster in backend order.
    async fn list_wallets(&self) -> Result<Vec<Wallet>, TransportError>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}
