use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.toml` file that lives as long as the
/// returned handle.
pub fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("stratagem-config-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes())
        .expect("write temp config");
    file
}

/// Minimal config pointing at `base_url`.
pub fn config_for(base_url: &str) -> String {
    format!(
        "[api]\nbase_url = \"{base_url}\"\ntimeout_ms = 5000\nretry_max_attempts = 1\n\n\
         [execution]\ncancel_grace_ms = 200\n"
    )
}
