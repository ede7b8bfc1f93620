//! Visitor interface for predicate translation

use crate::model::{Comparison, Predicate};
use std::fmt;

/// Translator from the predicate IR into another representation.
///
/// Binary nodes hand over their children unvisited so an implementation can
/// choose the traversal order and inspect child structure (for parenthesizing,
/// short-circuiting or pushing negation down).
pub trait PredicateVisitor {
    type Output;

    fn visit_literal(&mut self, value: bool) -> Self::Output;

    fn visit_comparison(&mut self, comparison: &Comparison) -> Self::Output;

    fn visit_and(&mut self, left: &Predicate, right: &Predicate) -> Self::Output;

    fn visit_or(&mut self, left: &Predicate, right: &Predicate) -> Self::Output;
}

impl Predicate {
    /// Dispatch this node to the visitor
    pub fn accept<V: PredicateVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Literal { value } => visitor.visit_literal(*value),
            Self::Compare(comparison) => visitor.visit_comparison(comparison),
            Self::And { left, right } => visitor.visit_and(left, right),
            Self::Or { left, right } => visitor.visit_or(left, right),
        }
    }
}

/// Renders a predicate as infix text, e.g. `score >= 5.0 AND (a == 1 OR a == 2)`
#[derive(Debug, Default, Clone, Copy)]
pub struct InfixRenderer;

impl InfixRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, predicate: &Predicate) -> String {
        predicate.accept(self)
    }

    fn operand(&mut self, child: &Predicate, parenthesize: bool) -> String {
        let text = child.accept(self);
        if parenthesize {
            format!("({text})")
        } else {
            text
        }
    }
}

impl PredicateVisitor for InfixRenderer {
    type Output = String;

    fn visit_literal(&mut self, value: bool) -> String {
        value.to_string()
    }

    fn visit_comparison(&mut self, comparison: &Comparison) -> String {
        format!(
            "{} {} {}",
            comparison.path,
            comparison.operator.symbol(),
            comparison.operand
        )
    }

    fn visit_and(&mut self, left: &Predicate, right: &Predicate) -> String {
        let left = self.operand(left, matches!(left, Predicate::Or { .. }));
        let right = self.operand(right, !matches!(right, Predicate::Compare(_) | Predicate::Literal { .. }));
        format!("{left} AND {right}")
    }

    fn visit_or(&mut self, left: &Predicate, right: &Predicate) -> String {
        let left = self.operand(left, false);
        let right = self.operand(right, matches!(right, Predicate::Or { .. }));
        format!("{left} OR {right}")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&InfixRenderer.render(self))
    }
}
