//! Sift query text parser using winnow
//!
//! A query is a list of clauses separated by `;`:
//!
//! ```text
//! score:GreaterThanOrEqual:5.0; tags:Contains:"x"; Or:tags:Contains:"y"
//! ```
//!
//! Each clause becomes one [`QueryDescriptor`]. Keywords are matched ignoring
//! ASCII case and whitespace around every token is ignored.

mod clause;
mod combinators;
mod query;

pub use query::{parse_with_mode, split_clauses, CLAUSE_SEPARATOR};

use sift_ast::{QueryDescriptor, Spanned};
use sift_diagnostics::{Result, SiftError};

/// Parser mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop at the first malformed clause
    #[default]
    Fast,
    /// Report every malformed clause (for tooling)
    Analysis,
}

/// Parse result with collected errors
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Descriptors of the clauses that parsed, in query order
    pub descriptors: Vec<Spanned<QueryDescriptor>>,
    /// One error per malformed clause (at most one in fast mode)
    pub errors: Vec<SiftError>,
}

impl ParseResult {
    /// Check if parsing succeeded without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to a result; several errors are reported as
    /// [`SiftError::Multiple`]
    pub fn into_result(self) -> Result<Vec<Spanned<QueryDescriptor>>> {
        let mut errors = self.errors;
        match errors.len() {
            0 => Ok(self.descriptors),
            1 => Err(errors.remove(0)),
            _ => Err(SiftError::Multiple(errors)),
        }
    }
}

/// Parse query text, failing on the first malformed clause
pub fn parse_query(query: &str) -> Result<Vec<Spanned<QueryDescriptor>>> {
    parse_with_mode(query, ParseMode::Fast).into_result()
}

/// Parse query text into bare descriptors
pub fn parse_descriptors(query: &str) -> Result<Vec<QueryDescriptor>> {
    Ok(parse_query(query)?
        .into_iter()
        .map(Spanned::into_inner)
        .collect())
}
