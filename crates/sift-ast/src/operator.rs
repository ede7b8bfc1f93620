//! Comparison operators and aggregate modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equality; whole-sequence equality on sequences
    Equal,
    /// Negated equality
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// Sequence property contains the given element
    Contains,
    /// Scalar property is one of the given values
    ContainsOnValue,
}

impl Operator {
    /// Every operator, in keyword order
    pub const ALL: [Operator; 8] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Contains,
        Self::ContainsOnValue,
    ];

    /// Keyword used in query text
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::Contains => "Contains",
            Self::ContainsOnValue => "ContainsOnValue",
        }
    }

    /// Infix symbol used when rendering predicates
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Contains => "contains",
            Self::ContainsOnValue => "in",
        }
    }

    /// Look up an operator keyword, ignoring ASCII case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Check if this is one of the ordering operators
    pub const fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }

    /// Check if this operator tests membership
    pub const fn is_membership(&self) -> bool {
        matches!(self, Self::Contains | Self::ContainsOnValue)
    }

    /// The operator whose result is always the logical negation of this one
    /// over non-null operands, if any
    pub const fn complement(&self) -> Option<Self> {
        match self {
            Self::Equal => Some(Self::NotEqual),
            Self::NotEqual => Some(Self::Equal),
            Self::LessThan => Some(Self::GreaterThanOrEqual),
            Self::GreaterThanOrEqual => Some(Self::LessThan),
            Self::LessThanOrEqual => Some(Self::GreaterThan),
            Self::GreaterThan => Some(Self::LessThanOrEqual),
            Self::Contains | Self::ContainsOnValue => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How a condition combines with the preceding condition on the same property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateMode {
    And,
    Or,
}

impl AggregateMode {
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }

    /// Look up an aggregate keyword, ignoring ASCII case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if keyword.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }
}

impl fmt::Display for AggregateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
