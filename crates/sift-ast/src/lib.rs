//! Sift query vocabulary
//!
//! This crate defines the data a filter query is made of before any record
//! type is involved: the closed operator and aggregate-mode vocabularies, the
//! dynamically typed raw value, and the [`QueryDescriptor`] carrying one
//! condition.

mod descriptor;
mod operator;
mod value;

pub use descriptor::*;
pub use operator::*;
pub use value::*;

/// A node with source span information
pub type Spanned<T> = sift_diagnostics::Spanned<T>;
