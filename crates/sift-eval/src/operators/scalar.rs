//! Scalar and nullable comparisons
//!
//! Operands are converted once into the field's own type; the matchers then
//! compare borrowed record data with the native `PartialEq`/`PartialOrd`.

use crate::property::{Accessor, Matcher, OptionalAccessor};
use sift_ast::Operator;
use sift_diagnostics::{Result, SFT0200, SiftError};
use sift_types::{Scalar, TypedValue};
use std::cmp::Ordering;
use std::sync::Arc;

fn mismatch<T: Scalar>(path: &str, operand: &TypedValue) -> SiftError {
    SiftError::coercion(
        SFT0200,
        path,
        T::kind().name(),
        operand.to_string(),
        "operand does not match the property type",
    )
}

pub(crate) fn convert_one<T: Scalar>(path: &str, operand: &TypedValue) -> Result<T> {
    operand
        .single()
        .and_then(T::from_value)
        .ok_or_else(|| mismatch::<T>(path, operand))
}

/// Convert every element, keeping nulls in position
pub(crate) fn convert_optional<T: Scalar>(
    path: &str,
    operand: &TypedValue,
) -> Result<Vec<Option<T>>> {
    match operand {
        TypedValue::Null => Err(mismatch::<T>(path, operand)),
        _ => operand
            .elements()
            .map(|value| match value {
                Some(value) => T::from_value(value)
                    .map(Some)
                    .ok_or_else(|| mismatch::<T>(path, operand)),
                None => Ok(None),
            })
            .collect(),
    }
}

pub(crate) fn convert_all<T: Scalar>(path: &str, operand: &TypedValue) -> Result<Vec<T>> {
    convert_optional(path, operand)?
        .into_iter()
        .map(|value| value.ok_or_else(|| mismatch::<T>(path, operand)))
        .collect()
}

/// Orderings an operator accepts
fn accepted(operator: Operator) -> fn(Ordering) -> bool {
    match operator {
        Operator::LessThan => Ordering::is_lt,
        Operator::LessThanOrEqual => Ordering::is_le,
        Operator::GreaterThan => Ordering::is_gt,
        _ => Ordering::is_ge,
    }
}

/// Matcher for a non-optional field
pub(crate) fn required<R: 'static, T: Scalar>(
    path: &str,
    operator: Operator,
    operand: &TypedValue,
    get: Accessor<R, T>,
) -> Result<Matcher<R>> {
    let matcher: Matcher<R> = match operator {
        Operator::ContainsOnValue => {
            let set: Vec<T> = convert_all(path, operand)?;
            Arc::new(move |record: &R| set.contains(get(record)))
        }
        Operator::Equal => {
            let value: T = convert_one(path, operand)?;
            Arc::new(move |record: &R| *get(record) == value)
        }
        Operator::NotEqual => {
            let value: T = convert_one(path, operand)?;
            Arc::new(move |record: &R| *get(record) != value)
        }
        _ => {
            let value: T = convert_one(path, operand)?;
            let accept = accepted(operator);
            Arc::new(move |record: &R| get(record).partial_cmp(&value).is_some_and(accept))
        }
    };
    Ok(matcher)
}

/// Matcher for an `Option` field; a null operand only means something for
/// equality.
pub(crate) fn optional<R: 'static, T: Scalar>(
    path: &str,
    operator: Operator,
    operand: &TypedValue,
    get: OptionalAccessor<R, T>,
) -> Result<Matcher<R>> {
    let matcher: Matcher<R> = match (operator, operand) {
        (Operator::Equal, TypedValue::Null) => Arc::new(move |record: &R| get(record).is_none()),
        (Operator::NotEqual, TypedValue::Null) => {
            Arc::new(move |record: &R| get(record).is_some())
        }
        (_, TypedValue::Null) => Arc::new(|_: &R| false),
        (Operator::ContainsOnValue, _) => {
            let set: Vec<Option<T>> = convert_optional(path, operand)?;
            Arc::new(move |record: &R| {
                let value = get(record);
                set.iter().any(|member| member.as_ref() == value)
            })
        }
        (Operator::Equal, _) => {
            let value: T = convert_one(path, operand)?;
            Arc::new(move |record: &R| get(record) == Some(&value))
        }
        (Operator::NotEqual, _) => {
            let value: T = convert_one(path, operand)?;
            Arc::new(move |record: &R| get(record) != Some(&value))
        }
        _ => {
            let value: T = convert_one(path, operand)?;
            let accept = accepted(operator);
            Arc::new(move |record: &R| {
                get(record)
                    .and_then(|v| v.partial_cmp(&value))
                    .is_some_and(accept)
            })
        }
    };
    Ok(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_types::ScalarValue;

    struct Row {
        n: i32,
        m: Option<i32>,
    }

    fn read_n(row: &Row) -> &i32 {
        &row.n
    }

    fn read_m(row: &Row) -> Option<&i32> {
        row.m.as_ref()
    }

    fn n() -> Accessor<Row, i32> {
        Arc::new(read_n)
    }

    fn m() -> OptionalAccessor<Row, i32> {
        Arc::new(read_m)
    }

    #[test]
    fn test_ordering_operators() {
        let five = TypedValue::Single(ScalarValue::Int(5));
        let row = Row { n: 5, m: None };
        let le = required("n", Operator::LessThanOrEqual, &five, n()).unwrap();
        let lt = required("n", Operator::LessThan, &five, n()).unwrap();
        assert!(le(&row));
        assert!(!lt(&row));
    }

    #[test]
    fn test_null_never_ordered() {
        let five = TypedValue::Single(ScalarValue::Int(5));
        let row = Row { n: 0, m: None };
        for op in [Operator::LessThan, Operator::GreaterThanOrEqual] {
            assert!(!optional("m", op, &five, m()).unwrap()(&row));
            assert!(!optional("m", op, &TypedValue::Null, m()).unwrap()(&row));
        }
        assert!(optional("m", Operator::Equal, &TypedValue::Null, m()).unwrap()(&row));
        assert!(optional("m", Operator::NotEqual, &five, m()).unwrap()(&row));
    }

    #[test]
    fn test_value_set_with_null_member() {
        let set = TypedValue::Optional(vec![None, Some(ScalarValue::Int(10))]);
        let contains = optional("m", Operator::ContainsOnValue, &set, m()).unwrap();
        assert!(contains(&Row { n: 0, m: None }));
        assert!(contains(&Row { n: 0, m: Some(10) }));
        assert!(!contains(&Row { n: 0, m: Some(5) }));

        let plain = TypedValue::Many(vec![ScalarValue::Int(10)]);
        let contains = optional("m", Operator::ContainsOnValue, &plain, m()).unwrap();
        assert!(!contains(&Row { n: 0, m: None }));
    }

    #[test]
    fn test_operand_type_mismatch() {
        let text = TypedValue::Single(ScalarValue::text("5"));
        let err = required("n", Operator::Equal, &text, n()).err().unwrap();
        assert_eq!(err.code(), SFT0200);
    }
}
