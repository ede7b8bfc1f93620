//! Record model definitions
//!
//! A record model describes the filterable properties of JSON documents:
//!
//! ```json
//! {
//!   "name": "Order",
//!   "properties": {
//!     "Id": { "type": "int64" },
//!     "Customer.Name": { "type": "text" },
//!     "Discount": { "type": "decimal", "shape": "nullable" },
//!     "Tags": { "type": "text", "shape": "collection" }
//!   }
//! }
//! ```

use crate::error::{ModelError, ModelResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sift_ast::{DynamicValue, PropertyPath};
use sift_eval::Schema;
use sift_types::{ScalarKind, Shape, TypedValue, ValueCoercer};
use std::path::Path;

/// How a model property holds its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Scalar,
    Nullable,
    Array,
    Collection,
    /// Array whose items may be null
    NullableArray,
    /// Collection whose items may be null
    NullableCollection,
}

/// One property of a record model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Scalar kind name, e.g. `int64` or `timestamp`
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub shape: ShapeKind,
}

impl PropertySpec {
    pub fn new(type_name: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            type_name: type_name.into(),
            shape,
        }
    }

    /// Resolve the declared type into a shape
    pub fn to_shape(&self) -> Option<Shape> {
        let kind = ScalarKind::from_name(&self.type_name)?;
        Some(match self.shape {
            ShapeKind::Scalar => Shape::Scalar(kind),
            ShapeKind::Nullable => Shape::Nullable(kind),
            ShapeKind::Array => Shape::Array(kind),
            ShapeKind::Collection => Shape::Collection(kind),
            ShapeKind::NullableArray => Shape::NullableArray(kind),
            ShapeKind::NullableCollection => Shape::NullableCollection(kind),
        })
    }
}

/// Filterable properties of a JSON document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Dotted paths in registration order
    pub properties: IndexMap<String, PropertySpec>,
}

impl RecordModel {
    /// Load a model from a JSON string
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a model from file, choosing the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some(ext) => Err(ModelError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Expected .json",
                ext
            ))),
            None => Err(ModelError::UnsupportedFormat(
                "No file extension found. Expected .json".to_string(),
            )),
        }
    }

    /// Check every property path and type name
    pub fn validate(&self) -> ModelResult<()> {
        for (path, property) in &self.properties {
            PropertyPath::new(path).map_err(|e| ModelError::InvalidPath {
                path: path.clone(),
                message: e.to_string(),
            })?;
            if property.to_shape().is_none() {
                return Err(ModelError::UnknownType {
                    property: path.clone(),
                    type_name: property.type_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Build a schema whose accessors walk a JSON document by path segment.
    ///
    /// Missing nodes and nodes that do not convert to the declared type read
    /// as null.
    pub fn schema(&self) -> ModelResult<Schema<Value>> {
        let mut builder = Schema::builder(self.name.clone());
        for (path, property) in &self.properties {
            let shape = property.to_shape().ok_or_else(|| ModelError::UnknownType {
                property: path.clone(),
                type_name: property.type_name.clone(),
            })?;
            let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
            let label = path.clone();
            builder = builder.computed(path, shape, move |document: &Value| {
                read_node(document, &segments)
                    .map_or(TypedValue::Null, |node| convert_node(&label, node, shape))
            });
        }
        log::debug!("Built schema for model {} ({} properties)", self.name, self.properties.len());
        Ok(builder.build())
    }
}

fn read_node<'a>(document: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(document, |node, segment| node.as_object()?.get(segment))
}

fn to_dynamic(node: &Value) -> Option<DynamicValue> {
    match node {
        Value::Bool(b) => Some(DynamicValue::Boolean(*b)),
        Value::Number(n) => Some(DynamicValue::number(n.to_string())),
        Value::String(s) => Some(DynamicValue::text(s.clone())),
        _ => None,
    }
}

fn convert_node(path: &str, node: &Value, shape: Shape) -> TypedValue {
    let coercer = ValueCoercer::new();
    let kind = shape.element();
    let scalar = |value: &Value| {
        to_dynamic(value).and_then(|raw| coercer.coerce_scalar(path, &raw, kind).ok())
    };

    if shape.is_sequence() {
        let element = |value: &Value| match value {
            Value::Null if shape.admits_null() => Some(None),
            _ => scalar(value).map(Some),
        };
        match node.as_array() {
            Some(items) => items
                .iter()
                .map(element)
                .collect::<Option<Vec<_>>>()
                .map_or(TypedValue::Null, TypedValue::from_optional),
            None => TypedValue::Null,
        }
    } else {
        scalar(node).map_or(TypedValue::Null, TypedValue::Single)
    }
}
