//! Comparisons over values read at runtime
//!
//! Used for records without a static field layout. Values are compared with
//! [`ScalarValue`]'s partial ordering, so mismatched kinds never match.

use crate::property::{Matcher, Reader};
use sift_ast::Operator;
use sift_types::{ScalarValue, Shape, TypedValue};
use std::cmp::Ordering;
use std::sync::Arc;

fn same(a: &ScalarValue, b: &ScalarValue) -> bool {
    a.partial_cmp(b) == Some(Ordering::Equal)
}

/// Element equality where null matches only null
fn same_element(a: Option<&ScalarValue>, b: Option<&ScalarValue>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn all_same(actual: &TypedValue, expected: &TypedValue) -> bool {
    actual.len() == expected.len()
        && actual
            .elements()
            .zip(expected.elements())
            .all(|(a, b)| same_element(a, b))
}

fn scalar_eq(actual: &TypedValue, expected: &TypedValue) -> bool {
    match (actual, expected) {
        (TypedValue::Null, TypedValue::Null) => true,
        (TypedValue::Single(a), TypedValue::Single(b)) => same(a, b),
        _ => false,
    }
}

fn ordered(actual: &TypedValue, expected: &ScalarValue, accept: fn(Ordering) -> bool) -> bool {
    actual
        .single()
        .and_then(|value| value.partial_cmp(expected))
        .is_some_and(accept)
}

/// Build a matcher; support of `operator` for `shape` is checked by the caller
pub(crate) fn matcher<R: 'static>(
    shape: Shape,
    operator: Operator,
    operand: &TypedValue,
    read: Reader<R>,
) -> Matcher<R> {
    let operand = operand.clone();
    if shape.is_sequence() {
        return match operator {
            Operator::Contains => Arc::new(move |record: &R| {
                let wanted = operand.single();
                read(record).elements().any(|v| same_element(v, wanted))
            }),
            Operator::NotEqual => Arc::new(move |record: &R| !all_same(&read(record), &operand)),
            _ => Arc::new(move |record: &R| all_same(&read(record), &operand)),
        };
    }

    let accept: fn(Ordering) -> bool = match operator {
        Operator::LessThan => Ordering::is_lt,
        Operator::LessThanOrEqual => Ordering::is_le,
        Operator::GreaterThan => Ordering::is_gt,
        Operator::GreaterThanOrEqual => Ordering::is_ge,
        Operator::Equal => {
            return Arc::new(move |record: &R| scalar_eq(&read(record), &operand));
        }
        Operator::NotEqual => {
            return Arc::new(move |record: &R| !scalar_eq(&read(record), &operand));
        }
        _ => {
            return Arc::new(move |record: &R| {
                let value = read(record);
                operand
                    .elements()
                    .any(|member| same_element(value.single(), member))
            });
        }
    };
    match operand {
        TypedValue::Single(expected) => {
            Arc::new(move |record: &R| ordered(&read(record), &expected, accept))
        }
        _ => Arc::new(|_: &R| false),
    }
}
