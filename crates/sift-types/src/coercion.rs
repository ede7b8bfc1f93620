//! Conversion of raw query values into typed operands
//!
//! The coercer knows the resolved shape of the target property and the
//! operator the value is used with. It decides whether one value or a value
//! set is expected and converts every raw value into the element kind.

use crate::{ScalarKind, ScalarValue, Shape, TypedValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sift_ast::{DynamicValue, Operator};
use sift_diagnostics::{
    ErrorCode, Result, SFT0200, SFT0201, SFT0202, SFT0203, SFT0204, SiftError,
};
use std::num::IntErrorKind;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Failed conversion before the property context is attached
struct Failure {
    code: ErrorCode,
    reason: String,
}

impl Failure {
    fn new(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self::new(SFT0200, reason)
    }
}

type Converted<T> = std::result::Result<T, Failure>;

/// Stateless raw-to-typed value converter
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCoercer;

impl ValueCoercer {
    pub fn new() -> Self {
        Self
    }

    /// Coerce `raw` for use with `operator` against a property of `shape`
    pub fn coerce(
        &self,
        path: &str,
        raw: &DynamicValue,
        shape: Shape,
        operator: Operator,
    ) -> Result<TypedValue> {
        let kind = shape.element();
        let nullable = shape.admits_null();
        match (shape, operator) {
            (Shape::Scalar(_) | Shape::Nullable(_), Operator::ContainsOnValue) => {
                self.coerce_many(path, raw, kind, nullable)
            }
            (Shape::Scalar(_), _) => self.coerce_single(path, raw, kind, false),
            (Shape::Nullable(_), _) => self.coerce_single(path, raw, kind, true),
            (_, Operator::Contains) => self.coerce_single(path, raw, kind, nullable),
            (_, Operator::Equal | Operator::NotEqual) => {
                self.coerce_many(path, raw, kind, nullable)
            }
            // Left for operator validation to reject
            _ if raw.is_multi_value() => self.coerce_many(path, raw, kind, nullable),
            _ => self.coerce_single(path, raw, kind, true),
        }
    }

    fn coerce_single(
        &self,
        path: &str,
        raw: &DynamicValue,
        kind: ScalarKind,
        nullable: bool,
    ) -> Result<TypedValue> {
        let Some(value) = raw.as_single() else {
            let reason = if raw.elements().is_empty() {
                "an empty list is not a single value"
            } else {
                "multiple values are not allowed with this operator"
            };
            return Err(SiftError::coercion(
                SFT0203,
                path,
                kind.name(),
                raw.to_string(),
                reason,
            ));
        };
        match value {
            DynamicValue::Null if nullable => Ok(TypedValue::Null),
            _ => self.coerce_scalar(path, value, kind).map(TypedValue::Single),
        }
    }

    /// Coerce every element. Nulls are kept in position when the target
    /// admits them; the result is `Optional` only if one is present.
    fn coerce_many(
        &self,
        path: &str,
        raw: &DynamicValue,
        kind: ScalarKind,
        nullable: bool,
    ) -> Result<TypedValue> {
        let values = raw
            .elements()
            .iter()
            .map(|element| match element {
                DynamicValue::Null if nullable => Ok(None),
                DynamicValue::Null => Err(SiftError::coercion(
                    SFT0201,
                    path,
                    kind.name(),
                    raw.to_string(),
                    "null is not allowed inside a value list",
                )),
                _ => self.coerce_scalar(path, element, kind).map(Some),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TypedValue::from_optional(values))
    }

    /// Convert one raw value into the element kind
    pub fn coerce_scalar(
        &self,
        path: &str,
        raw: &DynamicValue,
        kind: ScalarKind,
    ) -> Result<ScalarValue> {
        convert(raw, kind).map_err(|failure| {
            SiftError::coercion(
                failure.code,
                path,
                kind.name(),
                raw.to_string(),
                failure.reason,
            )
        })
    }
}

fn convert(raw: &DynamicValue, kind: ScalarKind) -> Converted<ScalarValue> {
    let lexeme = match raw {
        DynamicValue::Null => {
            return Err(Failure::new(
                SFT0201,
                "null is only allowed for nullable properties",
            ));
        }
        DynamicValue::Sequence(_) => {
            return Err(Failure::new(SFT0203, "expected a single value"));
        }
        DynamicValue::Boolean(b) => {
            return match kind {
                ScalarKind::Boolean => Ok(ScalarValue::Bool(*b)),
                ScalarKind::Text => Ok(ScalarValue::Text(b.to_string())),
                _ => Err(Failure::invalid(format!("a boolean is not a {kind}"))),
            };
        }
        DynamicValue::Number(s) | DynamicValue::Text(s) => s.as_str(),
    };

    match kind {
        ScalarKind::Boolean => boolean(lexeme),
        k if k.is_integer() => integer(lexeme.trim(), k),
        ScalarKind::Float32 => float32(lexeme.trim()),
        ScalarKind::Float64 => float64(lexeme.trim()),
        ScalarKind::Decimal => decimal(lexeme.trim()),
        ScalarKind::Char => {
            let mut chars = lexeme.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(ScalarValue::Char(c)),
                _ => Err(Failure::invalid("expected exactly one character")),
            }
        }
        ScalarKind::Text => Ok(ScalarValue::Text(lexeme.to_string())),
        ScalarKind::Date => NaiveDate::parse_from_str(lexeme.trim(), DATE_FORMAT)
            .map(ScalarValue::Date)
            .map_err(|e| Failure::invalid(format!("expected a date as YYYY-MM-DD ({e})"))),
        ScalarKind::DateTime => date_time(lexeme.trim()),
        ScalarKind::Timestamp => DateTime::parse_from_rfc3339(lexeme.trim())
            .map(|ts| ScalarValue::Timestamp(ts.with_timezone(&Utc)))
            .map_err(|e| Failure::invalid(format!("expected an RFC 3339 timestamp ({e})"))),
        ScalarKind::Enumeration(ty) => {
            let text = lexeme.trim();
            let by_name = ty.variant(text);
            let by_ordinal = || {
                text.parse::<usize>()
                    .ok()
                    .and_then(|i| ty.variants.get(i).map(|name| (i, *name)))
            };
            by_name
                .or_else(by_ordinal)
                .map(|(ordinal, name)| ScalarValue::Enum {
                    type_name: ty.name,
                    name,
                    ordinal,
                })
                .ok_or_else(|| {
                    Failure::new(
                        SFT0204,
                        format!("expected one of: {}", ty.variants.join(", ")),
                    )
                })
        }
        // Integer kinds are handled by the guard above
        _ => Err(Failure::invalid(format!("unsupported kind {kind}"))),
    }
}

fn boolean(lexeme: &str) -> Converted<ScalarValue> {
    let text = lexeme.trim();
    if text.eq_ignore_ascii_case("true") {
        Ok(ScalarValue::Bool(true))
    } else if text.eq_ignore_ascii_case("false") {
        Ok(ScalarValue::Bool(false))
    } else {
        Err(Failure::invalid("expected true or false"))
    }
}

fn integer_bounds(kind: ScalarKind) -> (i128, i128) {
    match kind {
        ScalarKind::Int8 => (i8::MIN.into(), i8::MAX.into()),
        ScalarKind::Int16 => (i16::MIN.into(), i16::MAX.into()),
        ScalarKind::Int32 => (i32::MIN.into(), i32::MAX.into()),
        ScalarKind::UInt8 => (0, u8::MAX.into()),
        ScalarKind::UInt16 => (0, u16::MAX.into()),
        ScalarKind::UInt32 => (0, u32::MAX.into()),
        ScalarKind::UInt64 => (0, u64::MAX.into()),
        _ => (i64::MIN.into(), i64::MAX.into()),
    }
}

fn integer(lexeme: &str, kind: ScalarKind) -> Converted<ScalarValue> {
    let out_of_range = || {
        let (min, max) = integer_bounds(kind);
        Failure::new(SFT0202, format!("value must be between {min} and {max}"))
    };
    let value = lexeme.parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => Failure::invalid("expected an integer"),
    })?;

    let (min, max) = integer_bounds(kind);
    if value < min || value > max {
        return Err(out_of_range());
    }
    let scalar = if min == 0 {
        u64::try_from(value).map(ScalarValue::UInt).ok()
    } else {
        i64::try_from(value).map(ScalarValue::Int).ok()
    };
    scalar.ok_or_else(out_of_range)
}

fn names_infinity(lexeme: &str) -> bool {
    lexeme.to_ascii_lowercase().contains("inf")
}

fn float32(lexeme: &str) -> Converted<ScalarValue> {
    let value = lexeme
        .parse::<f32>()
        .map_err(|_| Failure::invalid("expected a number"))?;
    if value.is_infinite() && !names_infinity(lexeme) {
        return Err(Failure::new(SFT0202, "value exceeds the Float32 range"));
    }
    Ok(ScalarValue::Float(f64::from(value)))
}

fn float64(lexeme: &str) -> Converted<ScalarValue> {
    let value = lexeme
        .parse::<f64>()
        .map_err(|_| Failure::invalid("expected a number"))?;
    if value.is_infinite() && !names_infinity(lexeme) {
        return Err(Failure::new(SFT0202, "value exceeds the Float64 range"));
    }
    Ok(ScalarValue::Float(value))
}

fn decimal(lexeme: &str) -> Converted<ScalarValue> {
    Decimal::from_str(lexeme)
        .or_else(|_| Decimal::from_scientific(lexeme))
        .map(ScalarValue::Decimal)
        .map_err(|e| Failure::invalid(format!("expected a decimal number ({e})")))
}

fn date_time(lexeme: &str) -> Converted<ScalarValue> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(lexeme, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(lexeme, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(ScalarValue::DateTime)
        .ok_or_else(|| Failure::invalid("expected an ISO 8601 date-time"))
}
