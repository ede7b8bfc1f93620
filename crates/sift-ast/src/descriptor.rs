//! Query descriptors and property paths

use crate::{AggregateMode, DynamicValue, Operator};
use serde::{Deserialize, Serialize};
use sift_diagnostics::{Result, SiftError};
use smallvec::SmallVec;
use std::fmt;

/// Dotted path into a record type, e.g. `Owner.Address.City`.
///
/// Never blank and never contains an empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyPath {
    text: String,
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    /// Separator between path segments
    pub const SEPARATOR: char = '.';

    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let path = path.as_ref().trim();
        if path.is_empty() {
            return Err(SiftError::invalid_descriptor(
                "property path must not be empty or whitespace",
            ));
        }

        let segments = path
            .split(Self::SEPARATOR)
            .map(str::trim)
            .map(|segment| {
                if segment.is_empty() {
                    Err(SiftError::invalid_descriptor(format!(
                        "property path '{path}' contains an empty segment"
                    )))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<SmallVec<[String; 4]>>>()?;

        Ok(Self {
            text: segments.join("."),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = SiftError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.text
    }
}

impl AsRef<str> for PropertyPath {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// One filter condition: `[aggregate:]path:operator:value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aggregate: Option<AggregateMode>,
    operator: Operator,
    property_path: PropertyPath,
    value: DynamicValue,
}

impl QueryDescriptor {
    /// Create a descriptor, validating the property path
    pub fn new(
        aggregate: Option<AggregateMode>,
        operator: Operator,
        property_path: impl AsRef<str>,
        value: impl Into<DynamicValue>,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            aggregate,
            operator,
            PropertyPath::new(property_path)?,
            value.into(),
        ))
    }

    /// Create a descriptor from an already validated path
    pub fn from_parts(
        aggregate: Option<AggregateMode>,
        operator: Operator,
        property_path: PropertyPath,
        value: DynamicValue,
    ) -> Self {
        Self {
            aggregate,
            operator,
            property_path,
            value,
        }
    }

    pub fn aggregate(&self) -> Option<AggregateMode> {
        self.aggregate
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn property_path(&self) -> &PropertyPath {
        &self.property_path
    }

    pub fn value(&self) -> &DynamicValue {
        &self.value
    }

    /// Check if the value is a bracketed list
    pub fn is_multi_value(&self) -> bool {
        self.value.is_multi_value()
    }
}

/// Renders the descriptor as a query clause that parses back to itself.
impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mode) = self.aggregate {
            write!(f, "{mode}:")?;
        }
        write!(f, "{}:{}:{}", self.property_path, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_path_rejected(#[case] path: &str) {
        let err = QueryDescriptor::new(None, Operator::Equal, path, 1).unwrap_err();
        assert!(matches!(err, SiftError::InvalidDescriptor { .. }));
    }

    #[rstest]
    #[case("owner..name")]
    #[case(".name")]
    #[case("owner.")]
    fn test_empty_segment_rejected(#[case] path: &str) {
        assert!(PropertyPath::new(path).is_err());
    }

    #[test]
    fn test_path_segments_are_trimmed() {
        let path = PropertyPath::new(" Owner . Name ").unwrap();
        assert_eq!(path.segments(), &["Owner".to_string(), "Name".to_string()]);
        assert_eq!(path.as_str(), "Owner.Name");
        assert_eq!(path.depth(), 2);
    }

    #[test]
    fn test_descriptor_display() {
        let desc = QueryDescriptor::new(
            Some(AggregateMode::Or),
            Operator::ContainsOnValue,
            "status",
            vec!["Active", "Pending"],
        )
        .unwrap();
        assert_eq!(desc.to_string(), r#"Or:status:ContainsOnValue:["Active", "Pending"]"#);
        assert!(desc.is_multi_value());
    }

    #[test]
    fn test_path_deserialize_validates() {
        let err = serde_json::from_str::<PropertyPath>(r#""  ""#);
        assert!(err.is_err());
        let path: PropertyPath = serde_json::from_str(r#""a.b""#).unwrap();
        assert_eq!(path.depth(), 2);
    }
}
