//! Predicate serialization
//!
//! JSON output is meant for tooling and for engines that consume the filter
//! out of process. The IR is produced by compilation only, so there is no
//! reading side.

use std::io::Write;

use crate::model::Predicate;

/// Errors that can occur during serialization
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for predicate serializers
pub trait IrSerializer {
    /// Serialize a predicate to a string
    fn serialize(&self, predicate: &Predicate) -> Result<String, SerializeError>;

    /// Serialize a predicate to a writer
    fn serialize_to_writer<W: Write>(
        &self,
        predicate: &Predicate,
        mut writer: W,
    ) -> Result<(), SerializeError> {
        let text = self.serialize(predicate)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// JSON serializer for the predicate IR
#[derive(Debug, Default, Clone)]
pub struct JsonSerializer {
    /// Whether to produce pretty-printed output
    pub pretty: bool,
}

impl JsonSerializer {
    /// Create a new JSON serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new JSON serializer with pretty-printing enabled
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Serialize into a JSON value tree
    pub fn to_value(&self, predicate: &Predicate) -> Result<serde_json::Value, SerializeError> {
        Ok(serde_json::to_value(predicate)?)
    }
}

impl IrSerializer for JsonSerializer {
    fn serialize(&self, predicate: &Predicate) -> Result<String, SerializeError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(predicate)?
        } else {
            serde_json::to_string(predicate)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comparison;
    use pretty_assertions::assert_eq;
    use sift_ast::Operator;
    use sift_types::{ScalarKind, ScalarValue, Shape, TypedValue};

    fn sample() -> Predicate {
        Predicate::or(
            Comparison::new(
                "Score",
                Operator::GreaterThanOrEqual,
                Shape::Scalar(ScalarKind::Float64),
                TypedValue::Single(ScalarValue::Float(5.0)),
            )
            .into(),
            Comparison::new(
                "Tags",
                Operator::Equal,
                Shape::Collection(ScalarKind::Text),
                TypedValue::Many(vec![ScalarValue::text("x")]),
            )
            .into(),
        )
    }

    #[test]
    fn test_json_serialization() {
        let json = JsonSerializer::new().serialize(&sample()).unwrap();
        insta::assert_snapshot!(json, @r#"{"type":"Or","left":{"type":"Compare","path":"Score","operator":"GreaterThanOrEqual","shape":"Float64","operand":5.0},"right":{"type":"Compare","path":"Tags","operator":"Equal","shape":"Collection<Text>","operand":["x"]}}"#);
    }

    #[test]
    fn test_json_pretty_serialization() {
        let json = JsonSerializer::pretty().serialize(&Predicate::always()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "type": "Literal",
          "value": true
        }
        "#);
    }

    #[test]
    fn test_null_elements_serialize_in_place() {
        let p: Predicate = Comparison::new(
            "Rank",
            Operator::ContainsOnValue,
            Shape::Nullable(ScalarKind::Int64),
            TypedValue::Optional(vec![None, Some(ScalarValue::Int(10))]),
        )
        .into();
        let value = JsonSerializer::new().to_value(&p).unwrap();
        assert_eq!(value["operand"], serde_json::json!([null, 10]));
        assert_eq!(value["shape"], "Int64?");
    }

    #[test]
    fn test_serialize_to_writer() {
        let mut buffer = Vec::new();
        JsonSerializer::new()
            .serialize_to_writer(&Predicate::literal(false), &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), r#"{"type":"Literal","value":false}"#);
    }
}
