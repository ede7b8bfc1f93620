//! Explain command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use sift_eval::DynamicQueryBuilder;
use sift_ir::JsonSerializer;
use std::path::PathBuf;
use tabled::Tabled;

/// Configuration for explain command
pub struct ExplainConfig {
    pub query: String,
    pub model: PathBuf,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "Operand")]
    operand: String,
}

/// Compile the query and print its predicate expression
pub fn explain(config: ExplainConfig) -> Result<()> {
    let content = render(&config)?;
    output::write_output(&content, config.output_file.as_deref())
}

/// Render the compiled expression in the configured format
pub fn render(config: &ExplainConfig) -> Result<String> {
    let schema = super::load_schema(&config.model)?;
    let predicate = DynamicQueryBuilder::new()
        .build_with(&schema, &config.query)
        .map_err(|e| output::report(e, &config.query))?;
    let expression = predicate.expression();

    match config.output_format {
        OutputFormat::Text => Ok(expression.to_string()),
        OutputFormat::Table => Ok(output::format_table(
            expression
                .comparisons()
                .into_iter()
                .map(|c| ComparisonRow {
                    path: c.path.clone(),
                    operator: c.operator.to_string(),
                    shape: c.shape.to_string(),
                    operand: c.operand.to_string(),
                })
                .collect(),
        )),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = JsonSerializer::new().to_value(expression)?;
            output::format_json(&value, config.output_format == OutputFormat::JsonPretty)
        }
    }
}
