//! Sift record models
//!
//! This crate provides:
//! - [`RecordModel`]: filterable properties of JSON documents, loaded from JSON
//! - Schemas over [`serde_json::Value`] built from a model
//! - Record loading from JSON arrays and newline-delimited JSON

pub mod error;
pub mod model;
pub mod records;

pub use error::{ModelError, ModelResult};
pub use model::{PropertySpec, RecordModel, ShapeKind};
pub use records::{parse_records, read_records};
