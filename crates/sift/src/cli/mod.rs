//! CLI functionality for the sift tool
//!
//! This module contains all CLI-related functionality including:
//! - Query parsing and checking
//! - Predicate explanation
//! - Filtering JSON records
//! - Logging and output formatting

pub mod check;
pub mod explain;
pub mod filter;
pub mod logging;
pub mod output;
pub mod parse;

use anyhow::{Context, Result};
use sift_eval::Schema;
use sift_model::RecordModel;
use std::path::Path;

/// Load a record model and build its schema
pub(crate) fn load_schema(path: &Path) -> Result<Schema<serde_json::Value>> {
    let model = RecordModel::from_file(path)
        .with_context(|| format!("Failed to load model: {}", path.display()))?;
    tracing::debug!(model = %model.name, properties = model.properties.len(), "Loaded model");
    Ok(model.schema()?)
}
