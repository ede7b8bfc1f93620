//! Runtime scalar values

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A coerced scalar operand.
///
/// Integer kinds share the widest signed or unsigned representation and both
/// float kinds are held as `f64`; [`Scalar::from_value`](crate::Scalar)
/// narrows back to the property's own type.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
    Char(char),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Enum {
        type_name: &'static str,
        name: &'static str,
        ordinal: usize,
    },
}

impl ScalarValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Enum { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use ScalarValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.partial_cmp(b),
            (Int(a), Int(b)) => a.partial_cmp(b),
            (UInt(a), UInt(b)) => a.partial_cmp(b),
            (Int(a), UInt(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (UInt(a), Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Decimal(a), Decimal(b)) => a.partial_cmp(b),
            (Char(a), Char(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => a.partial_cmp(b),
            (Date(a), Date(b)) => a.partial_cmp(b),
            (DateTime(a), DateTime(b)) => a.partial_cmp(b),
            (Timestamp(a), Timestamp(b)) => a.partial_cmp(b),
            (
                Enum { type_name: ta, ordinal: a, .. },
                Enum { type_name: tb, ordinal: b, .. },
            ) if ta == tb => a.partial_cmp(b),
            _ => None,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    write!(f, "\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Renders the value as a query literal
impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Char(c) => write_quoted(f, &c.to_string()),
            Self::Text(s) => write_quoted(f, s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Enum { name, .. } => f.write_str(name),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::UInt(u) => serializer.serialize_u64(*u),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Decimal(d) => Serialize::serialize(d, serializer),
            Self::Char(c) => serializer.serialize_char(*c),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Date(d) => d.serialize(serializer),
            Self::DateTime(dt) => dt.serialize(serializer),
            Self::Timestamp(ts) => ts.serialize(serializer),
            Self::Enum { name, .. } => serializer.serialize_str(name),
        }
    }
}

/// Comparison operand after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Single(ScalarValue),
    /// Ordered values: a membership set or a whole sequence
    Many(Vec<ScalarValue>),
    /// Ordered values with at least one null, for targets that admit null
    Optional(Vec<Option<ScalarValue>>),
}

impl TypedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn single(&self) -> Option<&ScalarValue> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    /// `Optional` when a null is present, `Many` otherwise
    pub fn from_optional(values: Vec<Option<ScalarValue>>) -> Self {
        if values.iter().any(Option::is_none) {
            Self::Optional(values)
        } else {
            Self::Many(values.into_iter().flatten().collect())
        }
    }

    /// Elements of a `Many` or `Optional`, or the single value as one
    /// element. `Null` has no elements.
    pub fn elements(&self) -> impl Iterator<Item = Option<&ScalarValue>> {
        let (present, optional): (&[ScalarValue], &[Option<ScalarValue>]) = match self {
            Self::Null => (&[], &[]),
            Self::Single(value) => (std::slice::from_ref(value), &[]),
            Self::Many(values) => (values.as_slice(), &[]),
            Self::Optional(values) => (&[], values.as_slice()),
        };
        present
            .iter()
            .map(Some)
            .chain(optional.iter().map(Option::as_ref))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Single(_) => 1,
            Self::Many(values) => values.len(),
            Self::Optional(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Single(value) => write!(f, "{value}"),
            Self::Many(_) | Self::Optional(_) => {
                f.write_str("[")?;
                for (i, value) in self.elements().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match value {
                        Some(value) => write!(f, "{value}")?,
                        None => f.write_str("null")?,
                    }
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Single(value) => value.serialize(serializer),
            Self::Many(_) | Self::Optional(_) => {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for value in self.elements() {
                    seq.serialize_element(&value)?;
                }
                seq.end()
            }
        }
    }
}
