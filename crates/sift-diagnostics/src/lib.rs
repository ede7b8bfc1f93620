//! Sift diagnostics and error handling
//!
//! This crate provides the error infrastructure shared by every stage of the
//! predicate compiler: numbered error codes, source locations inside the query
//! text, and renderable diagnostics.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for sift operations
pub type Result<T> = std::result::Result<T, SiftError>;
