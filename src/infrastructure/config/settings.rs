//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; secrets (`STRATAGEM_CSRF_TOKEN`,
//! `STRATAGEM_SESSION_COOKIE`) come from the environment only.
//!
//! # Example
//!
//! ```no_run
//! use stratagem::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::execution::ExecutionConfig;
use super::logging::LoggingConfig;
use crate::adapter::outbound::http::settings::{ApiConfig, CSRF_TOKEN_ENV};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields a config pointing at a
/// local backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Backend endpoints, timeouts, and credentials.
    #[serde(default)]
    pub api: ApiConfig,

    /// Run defaults and the strategy registry.
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads credentials from the environment, never from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.api.load_secrets_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Any error from [`Config::load`] other than the file not existing.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(err) if err.kind() == ErrorKind::NotFound => Self::parse_toml(""),
            Err(err) => Err(ConfigError::ReadFile(err).into()),
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let api = &self.api;
        if api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        match Url::parse(&api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                }
                .into());
            }
            Err(err) => {
                return Err(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: err.to_string(),
                }
                .into());
            }
        }
        for (field, path) in [
            ("execute_path", &api.execute_path),
            ("wallets_path", &api.wallets_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must start with '/'".to_string(),
                }
                .into());
            }
        }
        if api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if api.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let strategies = &self.execution.strategies;
        if strategies.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "strategies",
                reason: "at least one strategy must be registered".to_string(),
            }
            .into());
        }
        let mut seen = HashSet::new();
        for kind in self.execution.registry() {
            if kind.as_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "strategies",
                    reason: "strategy tags must not be blank".to_string(),
                }
                .into());
            }
            if !seen.insert(kind.normalized()) {
                return Err(ConfigError::InvalidValue {
                    field: "strategies",
                    reason: format!("duplicate strategy '{kind}'"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// The anti-forgery token, required before anything is submitted.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingField`] when `STRATAGEM_CSRF_TOKEN` is unset.
    #[allow(clippy::result_large_err)]
    pub fn require_csrf_token(&self) -> Result<&str> {
        self.api.csrf_token.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: CSRF_TOKEN_ENV,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{ExecutionMode, StrategyKind};
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.execution.default_mode, ExecutionMode::Parallel);
        assert_eq!(config.execution.registry(), StrategyKind::KNOWN.to_vec());
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
[api]
base_url = "https://backend.example"
timeout_ms = 30000

[execution]
default_mode = "sequential"
strategies = ["flash_loan", "multi-hop"]
cancel_grace_ms = 250

[logging]
level = "debug"
format = "json"
"#;
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.execution.default_mode, ExecutionMode::Sequential);
        assert_eq!(
            config.execution.registry(),
            vec![StrategyKind::FlashLoan, StrategyKind::MultiHop]
        );
        assert_eq!(config.execution.cancel_grace().as_millis(), 250);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = Config::parse_toml("[api]\nbase_url = \"not a url\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "base_url",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_relative_paths() {
        let result = Config::parse_toml("[api]\nexecute_path = \"api/execute\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "execute_path",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_duplicate_strategies_after_normalizing() {
        let result =
            Config::parse_toml("[execution]\nstrategies = [\"multi_hop\", \"Multi-Hop\"]\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "strategies",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_empty_registry() {
        let result = Config::parse_toml("[execution]\nstrategies = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = Config::parse_toml("[api]\ntimeout_ms = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "timeout_ms",
                ..
            }))
        ));
    }
}
