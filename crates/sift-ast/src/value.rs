//! Dynamically typed raw values carried by descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw value of a condition as written in the query text.
///
/// Nothing is known about the target property at this point, so numbers keep
/// their lexeme and are only parsed once the property type is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DynamicValue {
    Null,
    Boolean(bool),
    /// Numeric literal, verbatim
    Number(String),
    Text(String),
    /// Bracketed list of values
    Sequence(Vec<DynamicValue>),
}

impl DynamicValue {
    pub fn number(lexeme: impl Into<String>) -> Self {
        Self::Number(lexeme.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Check if the value was written as a bracketed list
    pub fn is_multi_value(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The elements of a list, or the value itself as a one-element slice
    pub fn elements(&self) -> &[DynamicValue] {
        match self {
            Self::Sequence(items) => items,
            single => std::slice::from_ref(single),
        }
    }

    /// Unwrap a one-element list; other values are returned unchanged
    pub fn as_single(&self) -> Option<&DynamicValue> {
        match self {
            Self::Sequence(items) if items.len() == 1 => items.first(),
            Self::Sequence(_) => None,
            single => Some(single),
        }
    }

    /// Name of the value's kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Sequence(_) => "list",
        }
    }
}

/// Renders the value in query-text syntax; text is always quoted.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(lexeme) => f.write_str(lexeme),
            Self::Text(text) => {
                f.write_str("\"")?;
                for ch in text.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("\"")
            }
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DynamicValue {
                fn from(value: $ty) -> Self {
                    Self::Number(value.to_string())
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_unwraps_one_element_list() {
        let one = DynamicValue::from(vec![5]);
        assert!(one.is_multi_value());
        assert_eq!(one.as_single(), Some(&DynamicValue::number("5")));
        assert_eq!(DynamicValue::from(vec![1, 2]).as_single(), None);
        assert_eq!(DynamicValue::Null.as_single(), Some(&DynamicValue::Null));
    }

    #[test]
    fn test_elements_of_scalar() {
        let value = DynamicValue::text("x");
        assert_eq!(value.elements(), &[DynamicValue::text("x")]);
    }

    #[test]
    fn test_display_quotes_text() {
        let value = DynamicValue::Sequence(vec![
            DynamicValue::text("say \"hi\""),
            DynamicValue::number("-1.5e3"),
            DynamicValue::Null,
            DynamicValue::Boolean(true),
        ]);
        assert_eq!(value.to_string(), r#"["say \"hi\"", -1.5e3, null, true]"#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(DynamicValue::from(None::<i32>), DynamicValue::Null);
        assert_eq!(DynamicValue::from(Some(2.5f64)), DynamicValue::number("2.5"));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&DynamicValue::number("42")).unwrap();
        assert_eq!(json, r#"{"kind":"number","value":"42"}"#);
    }
}
