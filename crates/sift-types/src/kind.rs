//! Scalar kinds

use serde::{Serialize, Serializer};
use std::fmt;

/// A closed enumeration type known to the type system
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: &'static str,
    /// Variant names in declaration order; the index is the ordinal
    pub variants: &'static [&'static str],
}

impl EnumType {
    /// Find a variant by name: exact match first, then ignoring ASCII case
    pub fn variant(&self, name: &str) -> Option<(usize, &'static str)> {
        let position = self
            .variants
            .iter()
            .position(|v| *v == name)
            .or_else(|| self.variants.iter().position(|v| v.eq_ignore_ascii_case(name)))?;
        Some((position, self.variants[position]))
    }
}

/// Element type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    Char,
    Text,
    /// Calendar date without time zone
    Date,
    /// Date and time without time zone
    DateTime,
    /// UTC instant
    Timestamp,
    Enumeration(&'static EnumType),
}

impl ScalarKind {
    /// Kinds that can be named in a record model
    pub const NAMED: [ScalarKind; 17] = [
        Self::Boolean,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::Decimal,
        Self::Char,
        Self::Text,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Decimal => "Decimal",
            Self::Char => "Char",
            Self::Text => "Text",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Timestamp => "Timestamp",
            Self::Enumeration(ty) => ty.name,
        }
    }

    /// Look up a built-in kind by name, ignoring ASCII case.
    ///
    /// A few common aliases are accepted (`int`, `long`, `double`, `string`).
    pub fn from_name(name: &str) -> Option<Self> {
        let alias = match name.to_ascii_lowercase().as_str() {
            "bool" => Some(Self::Boolean),
            "int" | "integer" => Some(Self::Int32),
            "long" => Some(Self::Int64),
            "float" => Some(Self::Float32),
            "double" | "number" => Some(Self::Float64),
            "string" => Some(Self::Text),
            _ => None,
        };
        alias.or_else(|| {
            Self::NAMED
                .into_iter()
                .find(|kind| kind.name().eq_ignore_ascii_case(name))
        })
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64 | Self::Decimal)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ScalarKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
