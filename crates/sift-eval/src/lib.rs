//! Sift predicate compiler and in-memory evaluation
//!
//! This crate turns filter queries into typed predicates over registered
//! record types:
//!
//! - **Schemas**: [`Schema`] tables built once per record type, with
//!   scalar, nullable, sequence, nested and computed properties
//! - **Resolution**: exact then case-insensitive path lookup, memoized
//! - **Operators**: per-shape matchers comparing borrowed record data
//! - **Aggregation**: per-property `And`/`Or` folding, groups joined by AND
//! - **Building**: [`DynamicQueryBuilder`] from text or descriptors
//! - **Sources**: ordering and paging over in-memory slices
//!
//! # Example
//!
//! ```ignore
//! use sift_eval::{DynamicQueryBuilder, Schema};
//!
//! let schema = Schema::builder("Order")
//!     .scalar("Score", |o: &Order| &o.score)
//!     .sequence("Tags", |o: &Order| &o.tags)
//!     .build();
//!
//! let predicate = DynamicQueryBuilder::new()
//!     .build_with(&schema, "score:GreaterThanOrEqual:5.0; tags:Contains:x")?;
//! let hits: Vec<&Order> = predicate.filter(&orders).collect();
//! ```
//!
//! # Evaluation rules
//!
//! - Null values never satisfy an ordering operator
//! - `Equal` with a null operand matches null properties
//! - Sequence equality is ordered and length-checked

pub mod aggregate;
pub mod builder;
pub mod compiled;
pub mod lower;
pub mod operators;
pub mod property;
pub mod resolver;
pub mod schema;
pub mod source;

pub use aggregate::{Condition, aggregate};
pub use builder::{BuilderOptions, DynamicQueryBuilder};
pub use compiled::CompiledPredicate;
pub use lower::lower;
pub use operators::{ensure_supported, is_supported};
pub use property::{
    Accessor, DynamicProperty, Matcher, NullableProperty, NullableSequenceProperty,
    OptionalAccessor, PropertyAccess, Reader, ScalarProperty, SequenceProperty,
};
pub use resolver::{ResolvedProperty, resolve};
pub use schema::{Record, Schema, SchemaBuilder};
pub use source::{OrderBy, Page, Query, QuerySource, SortDirection};
