//! Strategy backend API configuration.

use serde::Deserialize;

pub const DEFAULT_EXECUTE_PATH: &str = "/api/execute/wallet_strategies";
pub const DEFAULT_WALLETS_PATH: &str = "/api/wallets";

/// Environment variable holding the anti-forgery token.
pub const CSRF_TOKEN_ENV: &str = "STRATAGEM_CSRF_TOKEN";
/// Environment variable holding an optional session cookie.
pub const SESSION_COOKIE_ENV: &str = "STRATAGEM_SESSION_COOKIE";

/// `[api]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://localhost:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_execute_path")]
    pub execute_path: String,
    #[serde(default = "default_wallets_path")]
    pub wallets_path: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Attempts for read-only calls. The batch call is never retried.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Loaded from [`CSRF_TOKEN_ENV`], never from the file.
    #[serde(skip)]
    pub csrf_token: Option<String>,
    /// Loaded from [`SESSION_COOKIE_ENV`], never from the file.
    #[serde(skip)]
    pub session_cookie: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".into()
}

fn default_execute_path() -> String {
    DEFAULT_EXECUTE_PATH.into()
}

fn default_wallets_path() -> String {
    DEFAULT_WALLETS_PATH.into()
}

// Strategy batches run server-side before the response is written.
const fn default_timeout_ms() -> u64 {
    120_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            execute_path: default_execute_path(),
            wallets_path: default_wallets_path(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            csrf_token: None,
            session_cookie: None,
        }
    }
}

impl ApiConfig {
    /// Read secrets from the environment, treating blank values as unset.
    pub fn load_secrets_from_env(&mut self) {
        self.csrf_token = non_blank_env(CSRF_TOKEN_ENV);
        self.session_cookie = non_blank_env(SESSION_COOKIE_ENV);
    }

    #[must_use]
    pub fn execute_url(&self) -> String {
        join(&self.base_url, &self.execute_path)
    }

    #[must_use]
    pub fn wallets_url(&self) -> String {
        join(&self.base_url, &self.wallets_path)
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
