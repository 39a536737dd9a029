//! `stratagem check config`: validate configuration without submitting.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::adapter::outbound::http::settings::{CSRF_TOKEN_ENV, SESSION_COOKIE_ENV};
use crate::error::Result;

/// Validate the configuration file and report credential presence.
pub fn execute_config(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let registry = config.execution.registry();
    let csrf_present = config.api.csrf_token.is_some();
    let cookie_present = config.api.session_cookie.is_some();

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": config_path.display().to_string(),
            "file_present": config_path.exists(),
            "execute_url": config.api.execute_url(),
            "wallets_url": config.api.wallets_url(),
            "default_mode": config.execution.default_mode,
            "strategies": registry,
            "csrf_token_present": csrf_present,
            "session_cookie_present": cookie_present,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", config_path.display());
    if config_path.exists() {
        output::success("Configuration file is valid");
    } else {
        output::warning("Configuration file not found; using defaults");
    }

    output::section("Summary");
    output::field("Execute", config.api.execute_url());
    output::field("Wallets", config.api.wallets_url());
    output::field("Timeout", format!("{} ms", config.api.timeout_ms));
    output::field("Mode", config.execution.default_mode);
    let tags: Vec<String> = registry.iter().map(ToString::to_string).collect();
    output::field("Strategies", tags.join(", "));

    if csrf_present {
        output::success("CSRF token detected");
    } else {
        output::warning(&format!(
            "{CSRF_TOKEN_ENV} not set (required for `stratagem run`)"
        ));
    }
    if cookie_present {
        output::success("Session cookie detected");
    } else {
        output::field("Cookie", format!("{SESSION_COOKIE_ENV} not set"));
    }

    output::success("Configuration check complete");
    Ok(())
}
