//! Dynamic predicate compiler for Rust records
//!
//! This crate turns text-encoded filter conditions into reusable predicates:
//! - Parsing `[aggregate:]path:operator:value` clauses
//! - Resolving dotted property paths through registered schemas
//! - Coercing raw values into the property's shape
//! - Aggregating conditions into a predicate IR and lowering it to a closure
//!
//! # Example
//!
//! ```
//! use sift::{Record, Schema};
//! use std::sync::LazyLock;
//!
//! struct Item {
//!     score: f64,
//!     tags: Vec<String>,
//! }
//!
//! static ITEM: LazyLock<Schema<Item>> = LazyLock::new(|| {
//!     Schema::builder("Item")
//!         .scalar("Score", |i: &Item| &i.score)
//!         .sequence("Tags", |i: &Item| &i.tags)
//!         .build()
//! });
//!
//! impl Record for Item {
//!     fn schema() -> &'static Schema<Self> {
//!         &ITEM
//!     }
//! }
//!
//! let items = vec![
//!     Item { score: 3.0, tags: vec!["x".into()] },
//!     Item { score: 5.0, tags: vec!["y".into()] },
//! ];
//! let predicate = sift::compile::<Item>(r#"score:GreaterThanOrEqual:4; tags:Contains:"y""#)?;
//! assert_eq!(predicate.filter(&items).count(), 1);
//! # Ok::<(), sift::SiftError>(())
//! ```

// Re-export all public APIs from internal crates
pub use sift_ast as ast;
pub use sift_diagnostics as diagnostics;
pub use sift_eval as eval;
pub use sift_ir as ir;
pub use sift_model as model;
pub use sift_parser as parser;
pub use sift_types as types;

// Convenience re-exports
pub use sift_ast::{AggregateMode, DynamicValue, Operator, QueryDescriptor};
pub use sift_diagnostics::{Result, SiftError};
pub use sift_eval::{
    BuilderOptions, CompiledPredicate, DynamicQueryBuilder, OrderBy, Page, Query, QuerySource,
    Record, Schema, SortDirection,
};
pub use sift_ir::Predicate;
pub use sift_parser::{parse_query, ParseMode};
pub use sift_types::scalar_enum;

/// Compile query text against `R`'s schema with default options
pub fn compile<R: Record>(query: &str) -> Result<CompiledPredicate<R>> {
    DynamicQueryBuilder::new().build::<R>(query)
}

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
