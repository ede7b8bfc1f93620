//! Operator expression factory
//!
//! This module builds the closure for one comparison, split by how the
//! property is read:
//! - `scalar`: statically typed scalar and nullable fields
//! - `sequence`: statically typed arrays and collections
//! - `dynamic`: properties read as owned [`TypedValue`]s at runtime
//!
//! [`TypedValue`]: sift_types::TypedValue

pub(crate) mod dynamic;
pub(crate) mod scalar;
pub(crate) mod sequence;

use sift_ast::Operator;
use sift_diagnostics::{Result, SiftError};
use sift_types::Shape;

/// Check if `operator` has a meaning for a property of `shape`
pub fn is_supported(operator: Operator, shape: Shape) -> bool {
    if shape.is_sequence() {
        matches!(
            operator,
            Operator::Equal | Operator::NotEqual | Operator::Contains
        )
    } else {
        operator != Operator::Contains
    }
}

/// Fail with `UnsupportedOperator` unless `operator` applies to `shape`
pub fn ensure_supported(operator: Operator, shape: Shape, path: &str) -> Result<()> {
    if is_supported(operator, shape) {
        Ok(())
    } else {
        Err(SiftError::unsupported_operator(operator, shape, path))
    }
}
