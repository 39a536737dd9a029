//! Strategy listing and parameter schemas.

use std::path::Path;

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::core::domain::{schema_for, FieldKind, ParamSchema, StrategyKind};
use crate::error::{Result, SelectionError};

#[derive(Tabled)]
struct StrategyRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Panel")]
    title: String,
    #[tabled(rename = "Fields")]
    fields: usize,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

fn describe(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Number => "number".to_string(),
        FieldKind::Select { options } => {
            let values: Vec<&str> = options.iter().map(|o| o.value).collect();
            format!("one of {}", values.join(", "))
        }
    }
}

/// Field table for one schema, `None` when it has no fields.
#[must_use]
pub fn field_table(schema: &ParamSchema) -> Option<String> {
    if schema.fields.is_empty() {
        return None;
    }
    let rows = schema.fields.iter().map(|field| FieldRow {
        name: field.name,
        label: field.label,
        input: describe(&field.kind),
        default: field.default,
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    Some(table.to_string())
}

/// List registered strategies.
pub fn list(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let registry = config.execution.registry();

    if output::is_json() {
        let strategies: Vec<_> = registry.iter().map(schema_for).collect();
        output::json_output(json!({
            "command": "strategies.list",
            "strategies": strategies,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Registered strategies");

    let rows = registry.iter().map(|kind| {
        let schema = schema_for(kind);
        StrategyRow {
            tag: kind.to_string(),
            title: schema.title,
            fields: schema.fields.len(),
        }
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::lines(&table.to_string());

    output::hint(&format!(
        "run {} for parameters",
        output::highlight("stratagem strategies show <tag>")
    ));

    Ok(())
}

/// Show the parameter panel of one strategy.
///
/// # Errors
///
/// [`SelectionError::UnknownStrategy`] when the tag is not registered.
pub fn show(config_path: &Path, tag: &str) -> Result<()> {
    let config = super::load_config(config_path)?;
    let kind = StrategyKind::from_tag(tag);
    if !config.execution.registry().contains(&kind) {
        return Err(SelectionError::UnknownStrategy(kind).into());
    }
    let schema = schema_for(&kind);

    if output::is_json() {
        output::json_output(json!({
            "command": "strategies.show",
            "schema": schema,
            "defaults": schema.defaults(),
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&schema.title);
    match field_table(&schema) {
        Some(table) => output::lines(&table),
        None => output::note("This strategy takes no parameters"),
    }
    if !kind.is_known() {
        output::hint("custom strategies are passed to the backend without parameters");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table_lists_options_and_defaults() {
        let table = field_table(&schema_for(&StrategyKind::MultiHop)).unwrap();
        assert!(table.contains("max_hops"));
        assert!(table.contains("one of 2, 3, 4, 5"));
        assert!(table.contains("10000"));
    }

    #[test]
    fn unknown_tags_have_no_field_table() {
        let schema = schema_for(&StrategyKind::from_tag("momentum_swing"));
        assert_eq!(schema.title, "momentum swing Parameters");
        assert!(field_table(&schema).is_none());
    }
}
