//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use sift_diagnostics::SiftError;
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    JsonPretty,
    Table,
    Text,
}

impl OutputFormat {
    /// Parse a `--format` value, falling back to `default` when absent
    pub fn from_flag(flag: Option<&str>, default: Self) -> Result<Self> {
        let Some(flag) = flag else {
            return Ok(default);
        };
        match flag.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "json-pretty" => Ok(Self::JsonPretty),
            "table" => Ok(Self::Table),
            "text" => Ok(Self::Text),
            other => anyhow::bail!(
                "Unknown output format '{}'. Expected json, pretty, table or text",
                other
            ),
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stderr().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Render every error as a diagnostic against the query text
pub fn format_diagnostics(error: &SiftError, query: &str) -> Vec<String> {
    error
        .clone()
        .into_errors()
        .iter()
        .map(|e| e.to_diagnostic().render(Some(query)))
        .collect()
}

/// Print diagnostics to stderr and turn the failure into a CLI error
pub fn report(error: SiftError, query: &str) -> anyhow::Error {
    let rendered = format_diagnostics(&error, query);
    for diagnostic in &rendered {
        eprintln!("{}\n", diagnostic);
    }
    anyhow::anyhow!("{} error(s) in query", rendered.len())
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{}", content)
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Format JSON value for output
pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format a list of JSON objects as a field/value table
pub fn format_records_table(records: &[Value]) -> String {
    if records.is_empty() {
        return "(no records)".to_string();
    }
    let rows: Vec<FieldRow> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| match record {
            Value::Object(fields) => fields
                .iter()
                .map(|(field, value)| FieldRow {
                    index: index + 1,
                    field: field.clone(),
                    value: format_value(value),
                })
                .collect(),
            other => vec![FieldRow {
                index: index + 1,
                field: String::new(),
                value: format_value(other),
            }],
        })
        .collect();
    Table::new(rows).with(Style::modern()).to_string()
}

/// Format a row set with a modern table style
pub fn format_table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::modern()).to_string()
}

/// Format a simple value for display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(obj) => format!("{{}} with {} fields", obj.len()),
    }
}
