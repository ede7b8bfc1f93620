//! Predicate IR structures
//!
//! A compiled filter is a small boolean tree whose leaves compare one
//! resolved property against a typed operand. The tree is what query-engine
//! adapters translate; the in-memory evaluator lowers it into a closure.

use serde::Serialize;
use sift_ast::Operator;
use sift_types::{Shape, TypedValue};

/// Boolean predicate over a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Predicate {
    /// Constant result; `true` accepts every record
    Literal { value: bool },
    Compare(Comparison),
    And {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Or {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
}

/// One property compared against a typed operand
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Canonical registered path
    pub path: String,
    pub operator: Operator,
    pub shape: Shape,
    pub operand: TypedValue,
}

impl Comparison {
    pub fn new(
        path: impl Into<String>,
        operator: Operator,
        shape: Shape,
        operand: TypedValue,
    ) -> Self {
        Self {
            path: path.into(),
            operator,
            shape,
            operand,
        }
    }
}

impl Predicate {
    pub const fn literal(value: bool) -> Self {
        Self::Literal { value }
    }

    /// The predicate accepting every record
    pub const fn always() -> Self {
        Self::literal(true)
    }

    pub fn and(left: Predicate, right: Predicate) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Left-fold predicates with AND; empty input yields `Literal(true)`
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        predicates
            .into_iter()
            .reduce(Self::and)
            .unwrap_or_else(Self::always)
    }

    /// Number of comparison leaves
    pub fn comparison_count(&self) -> usize {
        match self {
            Self::Literal { .. } => 0,
            Self::Compare(_) => 1,
            Self::And { left, right } | Self::Or { left, right } => {
                left.comparison_count() + right.comparison_count()
            }
        }
    }

    /// Comparison leaves in evaluation order
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut leaves = Vec::new();
        self.collect_comparisons(&mut leaves);
        leaves
    }

    fn collect_comparisons<'a>(&'a self, leaves: &mut Vec<&'a Comparison>) {
        match self {
            Self::Literal { .. } => {}
            Self::Compare(comparison) => leaves.push(comparison),
            Self::And { left, right } | Self::Or { left, right } => {
                left.collect_comparisons(leaves);
                right.collect_comparisons(leaves);
            }
        }
    }
}

impl From<Comparison> for Predicate {
    fn from(comparison: Comparison) -> Self {
        Self::Compare(comparison)
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::always()
    }
}
