//! Parse command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;
use tabled::Tabled;

/// Configuration for parse command
pub struct ParseConfig {
    pub query: String,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

#[derive(Tabled)]
struct ClauseRow {
    #[tabled(rename = "Clause")]
    clause: usize,
    #[tabled(rename = "Aggregate")]
    aggregate: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Parse the query and print its descriptors
pub fn parse(config: ParseConfig) -> Result<()> {
    let content = render(&config)?;
    output::write_output(&content, config.output_file.as_deref())
}

/// Render the parsed descriptors in the configured format
pub fn render(config: &ParseConfig) -> Result<String> {
    let descriptors = sift_parser::parse_query(&config.query)
        .map_err(|e| output::report(e, &config.query))?;
    tracing::debug!(clauses = descriptors.len(), "Parsed query");

    match config.output_format {
        OutputFormat::Text => Ok(descriptors
            .iter()
            .map(|d| d.inner.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => Ok(output::format_table(
            descriptors
                .iter()
                .enumerate()
                .map(|(clause, d)| ClauseRow {
                    clause,
                    aggregate: d.inner.aggregate().map(|m| m.to_string()).unwrap_or_default(),
                    path: d.inner.property_path().to_string(),
                    operator: d.inner.operator().to_string(),
                    value: d.inner.value().to_string(),
                })
                .collect(),
        )),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let clauses = descriptors
                .iter()
                .enumerate()
                .map(|(clause, d)| -> Result<Value> {
                    Ok(json!({
                        "clause": clause,
                        "span": d.span,
                        "descriptor": serde_json::to_value(&d.inner)?,
                    }))
                })
                .collect::<Result<Vec<Value>>>()?;
            output::format_json(
                &Value::Array(clauses),
                config.output_format == OutputFormat::JsonPretty,
            )
        }
    }
}
