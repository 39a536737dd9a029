//! reqwest-backed strategy backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::dto::WalletsResponse;
use super::settings::ApiConfig;
use crate::core::domain::{ExecutionRequest, ExecutionResult, Wallet};
use crate::error::TransportError;
use crate::port::outbound::backend::StrategyBackend;

/// Header carrying the anti-forgery token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// HTTP client for the strategy backend.
pub struct HttpBackend {
    http: HttpClient,
    execute_url: String,
    wallets_url: String,
    csrf_token: Option<String>,
    session_cookie: Option<String>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl HttpBackend {
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            execute_url: config.execute_url(),
            wallets_url: config.wallets_url(),
            csrf_token: config.csrf_token.clone(),
            session_cookie: config.session_cookie.clone(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    async fn get_with_retry<T>(&self, url: &str) -> Result<T, TransportError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let mut request = self.http.get(url);
            if let Some(cookie) = &self.session_cookie {
                request = request.header(COOKIE, cookie);
            }
            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = response.error_for_status()?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

#[async_trait]
impl StrategyBackend for HttpBackend {
    async fn execute_batch(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, TransportError> {
        info!(url = %self.execute_url, "Submitting strategy batch");

        let mut builder = self.http.post(&self.execute_url).json(request);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie);
        }

        // Single attempt: the backend may already have executed strategies.
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Batch response received");

        // Error statuses still carry a `{success:false, error}` body.
        serde_json::from_str(&body).map_err(|err| TransportError::MalformedResponse {
            status,
            reason: err.to_string(),
        })
    }

    async fn list_wallets(&self) -> Result<Vec<Wallet>, TransportError> {
        info!(url = %self.wallets_url, "Fetching wallet roster");

        let response: WalletsResponse = self.get_with_retry(&self.wallets_url).await?;
        if !response.success {
            return Err(TransportError::Other(
                response
                    .error
                    .unwrap_or_else(|| "wallet roster unavailable".to_string()),
            ));
        }

        debug!(count = response.wallets.len(), "Fetched wallets");
        Ok(response.wallets.into_iter().map(Wallet::from).collect())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
