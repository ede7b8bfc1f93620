//! Filter command implementation

use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use sift_eval::{DynamicQueryBuilder, OrderBy, Page, Query, QuerySource, SortDirection};
use std::path::PathBuf;

/// Configuration for filter command
pub struct FilterConfig {
    pub query: String,
    pub model: PathBuf,
    /// JSON array or newline-delimited JSON
    pub data: PathBuf,
    pub order_by: Option<String>,
    pub descending: bool,
    pub skip: Option<usize>,
    pub take: Option<usize>,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Filter records and print the matching page
pub fn filter(config: FilterConfig) -> Result<()> {
    let (content, page) = render(&config)?;
    output::write_output(&content, config.output_file.as_deref())?;
    eprintln!("{} of {} matching record(s)", page.items.len(), page.total);
    Ok(())
}

/// Run the query and render the page in the configured format
pub fn render(config: &FilterConfig) -> Result<(String, Page<Value>)> {
    let schema = super::load_schema(&config.model)?;
    let records = sift_model::read_records(&config.data)
        .with_context(|| format!("Failed to load records: {}", config.data.display()))?;

    let predicate = DynamicQueryBuilder::new()
        .build_with(&schema, &config.query)
        .map_err(|e| output::report(e, &config.query))?;

    let mut query = Query::new().filter(predicate);
    if let Some(path) = &config.order_by {
        let direction = if config.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let order = OrderBy::property(&schema, path, direction)
            .with_context(|| format!("Cannot order by '{}'", path))?;
        query = query.order_by(order);
    }
    if let Some(skip) = config.skip {
        query = query.skip(skip);
    }
    if let Some(take) = config.take {
        query = query.take(take);
    }

    let page = records.query(&query);
    tracing::debug!(total = page.total, returned = page.items.len(), "Filtered records");
    let page = Page {
        items: page.items.into_iter().cloned().collect::<Vec<_>>(),
        total: page.total,
    };

    let content = match config.output_format {
        OutputFormat::Json | OutputFormat::JsonPretty => output::format_json(
            &json!({ "total": page.total, "items": page.items }),
            config.output_format == OutputFormat::JsonPretty,
        )?,
        OutputFormat::Table => output::format_records_table(&page.items),
        OutputFormat::Text => page
            .items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok((content, page))
}
