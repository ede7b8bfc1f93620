//! Array and collection comparisons

use super::scalar::{convert_all, convert_one, convert_optional};
use crate::property::{Accessor, Matcher};
use sift_ast::Operator;
use sift_diagnostics::{Result, SiftError};
use sift_types::{ElementSequence, NullableElementSequence, Scalar, Shape, TypedValue};
use std::sync::Arc;

/// Ordered, length-checked equality against the expected elements
fn sequence_eq<S: ElementSequence>(actual: &S, expected: &[S::Element]) -> bool {
    actual.len() == expected.len() && actual.elements().zip(expected).all(|(a, b)| a == b)
}

/// Same as [`sequence_eq`], with null elements equal only to null
fn nullable_sequence_eq<S: NullableElementSequence>(
    actual: &S,
    expected: &[Option<S::Element>],
) -> bool {
    actual.len() == expected.len()
        && actual
            .elements()
            .zip(expected)
            .all(|(a, b)| a == b.as_ref())
}

pub(crate) fn matcher<R: 'static, S: ElementSequence>(
    path: &str,
    operator: Operator,
    operand: &TypedValue,
    get: Accessor<R, S>,
) -> Result<Matcher<R>> {
    let matcher: Matcher<R> = match operator {
        Operator::Equal => {
            let expected: Vec<S::Element> = convert_all(path, operand)?;
            Arc::new(move |record: &R| sequence_eq(get(record), &expected))
        }
        Operator::NotEqual => {
            let expected: Vec<S::Element> = convert_all(path, operand)?;
            Arc::new(move |record: &R| !sequence_eq(get(record), &expected))
        }
        Operator::Contains => {
            let element: S::Element = convert_one(path, operand)?;
            Arc::new(move |record: &R| get(record).elements().any(|e| *e == element))
        }
        other => {
            return Err(SiftError::unsupported_operator(
                other,
                Shape::sequence(S::KIND, S::Element::kind()),
                path,
            ));
        }
    };
    Ok(matcher)
}

/// Matcher for sequences of optional elements; `Contains:null` looks for a
/// missing element
pub(crate) fn nullable_matcher<R: 'static, S: NullableElementSequence>(
    path: &str,
    operator: Operator,
    operand: &TypedValue,
    get: Accessor<R, S>,
) -> Result<Matcher<R>> {
    let matcher: Matcher<R> = match (operator, operand) {
        (Operator::Equal, _) => {
            let expected: Vec<Option<S::Element>> = convert_optional(path, operand)?;
            Arc::new(move |record: &R| nullable_sequence_eq(get(record), &expected))
        }
        (Operator::NotEqual, _) => {
            let expected: Vec<Option<S::Element>> = convert_optional(path, operand)?;
            Arc::new(move |record: &R| !nullable_sequence_eq(get(record), &expected))
        }
        (Operator::Contains, TypedValue::Null) => {
            Arc::new(move |record: &R| get(record).elements().any(|e| e.is_none()))
        }
        (Operator::Contains, _) => {
            let element: S::Element = convert_one(path, operand)?;
            Arc::new(move |record: &R| get(record).elements().any(|e| e == Some(&element)))
        }
        (other, _) => {
            return Err(SiftError::unsupported_operator(
                other,
                Shape::nullable_sequence(S::KIND, S::Element::kind()),
                path,
            ));
        }
    };
    Ok(matcher)
}
