//! Lowering of the predicate IR into a closure

use crate::compiled::CompiledPredicate;
use crate::property::Matcher;
use crate::resolver::resolve;
use crate::schema::Schema;
use sift_diagnostics::Result;
use sift_ir::{Comparison, Predicate, PredicateVisitor};
use std::sync::Arc;

/// Builds one matcher per comparison and joins them with short-circuiting
/// `&&`/`||`.
struct Lowerer<'a, R> {
    schema: &'a Schema<R>,
}

impl<R: 'static> PredicateVisitor for Lowerer<'_, R> {
    type Output = Result<Matcher<R>>;

    fn visit_literal(&mut self, value: bool) -> Self::Output {
        Ok(Arc::new(move |_: &R| value))
    }

    fn visit_comparison(&mut self, comparison: &Comparison) -> Self::Output {
        let property = resolve(self.schema, &comparison.path, false)?;
        property
            .access
            .matcher(&property.path, comparison.operator, &comparison.operand)
    }

    fn visit_and(&mut self, left: &Predicate, right: &Predicate) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(Arc::new(move |record: &R| left(record) && right(record)))
    }

    fn visit_or(&mut self, left: &Predicate, right: &Predicate) -> Self::Output {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(Arc::new(move |record: &R| left(record) || right(record)))
    }
}

/// Lower `predicate` against `schema`.
///
/// Comparison paths must be canonical registered paths, as produced by the
/// query builder.
pub fn lower<R: 'static>(predicate: Predicate, schema: &Schema<R>) -> Result<CompiledPredicate<R>> {
    let matcher = predicate.accept(&mut Lowerer { schema })?;
    Ok(CompiledPredicate::new(predicate, matcher))
}
