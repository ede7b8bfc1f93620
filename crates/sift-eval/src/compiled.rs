//! Compiled predicates

use crate::property::Matcher;
use sift_ir::Predicate;
use std::fmt;
use std::sync::Arc;

/// A filter ready to run: the lowered closure together with the IR it was
/// lowered from. Cloning shares both.
pub struct CompiledPredicate<R> {
    expression: Arc<Predicate>,
    matcher: Matcher<R>,
}

impl<R> Clone for CompiledPredicate<R> {
    fn clone(&self) -> Self {
        Self {
            expression: self.expression.clone(),
            matcher: self.matcher.clone(),
        }
    }
}

impl<R: 'static> CompiledPredicate<R> {
    pub(crate) fn new(expression: Predicate, matcher: Matcher<R>) -> Self {
        Self {
            expression: Arc::new(expression),
            matcher,
        }
    }

    /// The predicate accepting every record
    pub fn always() -> Self {
        Self::new(Predicate::always(), Arc::new(|_: &R| true))
    }

    /// Test one record
    pub fn matches(&self, record: &R) -> bool {
        (self.matcher)(record)
    }

    /// The predicate as a plain closure
    pub fn as_fn(&self) -> impl Fn(&R) -> bool + Clone + Send + Sync + use<R> {
        let matcher = self.matcher.clone();
        move |record: &R| matcher(record)
    }

    /// Keep the matching records, preserving order.
    ///
    /// The iterator holds its own handle on the matcher, so it may outlive
    /// this predicate.
    pub fn filter<'r, I>(&self, records: I) -> impl Iterator<Item = &'r R> + use<'r, R, I>
    where
        I: IntoIterator<Item = &'r R>,
    {
        let matcher = self.matcher.clone();
        records.into_iter().filter(move |record| matcher(record))
    }

    /// The IR for translation by other engines
    pub fn expression(&self) -> &Predicate {
        &self.expression
    }
}

impl<R> fmt::Debug for CompiledPredicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Display for CompiledPredicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}
