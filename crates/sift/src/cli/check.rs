//! Check command implementation

use super::output;
use anyhow::Result;
use colored::Colorize;
use sift_diagnostics::SiftError;
use sift_eval::{BuilderOptions, DynamicQueryBuilder};
use sift_parser::ParseMode;
use std::path::PathBuf;

/// Configuration for check command
pub struct CheckConfig {
    pub query: String,
    /// Record model to compile against; without it only the syntax is checked
    pub model: Option<PathBuf>,
    pub verbose: bool,
}

/// Check a query, reporting every problem found
pub fn check(config: CheckConfig) -> Result<()> {
    let errors = collect_errors(&config)?;

    if errors.is_empty() {
        println!("{}", output::format_success("Query is valid"));
        return Ok(());
    }

    for error in &errors {
        eprintln!("{}\n", error.to_diagnostic().render(Some(&config.query)));
    }
    eprintln!(
        "{} Found {}",
        "Check failed:".red().bold(),
        format!("{} error(s)", errors.len()).red()
    );
    anyhow::bail!("Query has {} error(s)", errors.len())
}

/// Collect syntax errors, then compile errors when a model is given.
///
/// Compilation only runs once every clause parses.
pub fn collect_errors(config: &CheckConfig) -> Result<Vec<SiftError>> {
    let parsed = sift_parser::parse_with_mode(&config.query, ParseMode::Analysis);
    if config.verbose {
        eprintln!(
            "Parsed {} clause(s), {} malformed",
            parsed.descriptors.len(),
            parsed.errors.len()
        );
    }
    if !parsed.is_success() {
        return Ok(parsed.errors);
    }

    let Some(model) = &config.model else {
        return Ok(Vec::new());
    };
    let schema = super::load_schema(model)?;
    let builder = DynamicQueryBuilder::with_options(BuilderOptions::analysis());
    Ok(match builder.build_with(&schema, &config.query) {
        Ok(_) => Vec::new(),
        Err(err) => err.into_errors(),
    })
}
