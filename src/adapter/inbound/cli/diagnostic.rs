//! Miette-based error diagnostics for CLI error presentation.
//!
//! Maps crate errors onto diagnostics with source context and help text.
//! The struct fields are read by miette's derive macros when rendering.

use std::path::Path;

use miette::{Diagnostic, Report, SourceSpan};
use thiserror::Error;

use crate::adapter::outbound::http::settings::CSRF_TOKEN_ENV;
use crate::error::{ConfigError, Error, SelectionError};

/// Configuration file error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(stratagem::config))]
pub struct ConfigSourceError {
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigSourceError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Configuration error without a source location.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(stratagem::config))]
pub struct ConfigValueError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Rejected wallet or strategy selection.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(stratagem::selection))]
pub struct SelectionDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

impl SelectionDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Backend connection error.
#[derive(Debug, Error, Diagnostic)]
#[error("backend request failed: {message}")]
#[diagnostic(
    code(stratagem::connection),
    help("check that the backend is running and `api.base_url` points at it")
)]
pub struct ConnectionError {
    pub message: String,
}

/// Build a renderable report for `err`.
///
/// `config_path` is re-read for TOML syntax errors so the report can point
/// at the offending span.
#[must_use]
pub fn report(err: Error, config_path: &Path) -> Report {
    match err {
        Error::Config(ConfigError::Parse(parse)) => {
            let source = std::fs::read_to_string(config_path).ok();
            match (parse.span(), source) {
                (Some(span), Some(src)) => Report::new(
                    ConfigSourceError::new(parse.message(), src, span.start, span.len())
                        .with_help(format!("fix the TOML in {}", config_path.display())),
                ),
                _ => Report::new(ConfigValueError {
                    message: parse.to_string(),
                    help: None,
                }),
            }
        }
        Error::Config(ConfigError::MissingField { field }) if field == CSRF_TOKEN_ENV => {
            Report::new(ConfigValueError {
                message: format!("missing required environment variable {field}"),
                help: Some(format!(
                    "export {field} or add it to .env; the backend rejects submissions without it"
                )),
            })
        }
        Error::Config(config) => Report::new(ConfigValueError {
            message: config.to_string(),
            help: Some(format!("check {}", config_path.display())),
        }),
        Error::Validation(validation) => Report::new(
            SelectionDiagnostic::new(validation.to_string()).with_help(
                "pass --wallet or --all-wallets with at least one --strategy, or use --interactive",
            ),
        ),
        Error::Selection(selection) => {
            let help = selection_help(&selection);
            Report::new(SelectionDiagnostic::new(selection.to_string()).with_help(help))
        }
        Error::Transport(transport) => Report::new(ConnectionError {
            message: transport.to_string(),
        }),
        other => miette::miette!("{other}"),
    }
}

fn selection_help(err: &SelectionError) -> String {
    match err {
        SelectionError::UnknownWallet(_) => "run `stratagem wallets` to see wallet ids".into(),
        SelectionError::WalletDisabled(_) => {
            "inactive wallets cannot be picked with --active-only".into()
        }
        SelectionError::UnknownStrategy(_) => {
            "run `stratagem strategies list` to see registered strategies".into()
        }
        SelectionError::StrategyNotSelected(strategy) => {
            format!("add --strategy {strategy} to set its parameters")
        }
        SelectionError::UnknownParameter { strategy, .. }
        | SelectionError::InvalidParameter { strategy, .. } => {
            format!("run `stratagem strategies show {strategy}` to see its parameters")
        }
    }
}
