//! Sift predicate IR
//!
//! This crate provides:
//! - The [`Predicate`] tree produced by compiling a filter query
//! - The [`PredicateVisitor`] interface for query-engine adapters
//! - Infix rendering ([`InfixRenderer`]) and JSON serialization

pub mod model;
pub mod serialize;
pub mod visitor;

pub use model::*;
pub use serialize::{IrSerializer, JsonSerializer, SerializeError};
pub use visitor::{InfixRenderer, PredicateVisitor};
