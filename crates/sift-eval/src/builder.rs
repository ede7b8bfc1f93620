//! Dynamic query builder
//!
//! Turns query text or descriptors into a [`CompiledPredicate`]. Every clause
//! is resolved against the schema, its value coerced for the property shape
//! and the operator checked against that shape; the clauses are then
//! aggregated and lowered.

use crate::aggregate::{Condition, aggregate};
use crate::compiled::CompiledPredicate;
use crate::lower::lower;
use crate::operators::ensure_supported;
use crate::resolver::resolve;
use crate::schema::{Record, Schema};
use sift_ast::QueryDescriptor;
use sift_diagnostics::{Result, SiftError};
use sift_ir::{Comparison, Predicate};
use sift_parser::{ParseMode, parse_with_mode};
use sift_types::ValueCoercer;

/// Builder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// `Analysis` reports every failing clause instead of the first
    pub parse_mode: ParseMode,
    /// Fall back to ASCII case-insensitive path matching
    pub case_insensitive: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Fast,
            case_insensitive: true,
        }
    }
}

impl BuilderOptions {
    pub fn analysis() -> Self {
        Self {
            parse_mode: ParseMode::Analysis,
            ..Self::default()
        }
    }
}

/// Compiles filter queries into predicates
#[derive(Debug, Clone, Default)]
pub struct DynamicQueryBuilder {
    options: BuilderOptions,
    coercer: ValueCoercer,
}

impl DynamicQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            coercer: ValueCoercer::new(),
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Compile `query` for a record type with a registered schema
    pub fn build<R: Record>(&self, query: &str) -> Result<CompiledPredicate<R>> {
        self.build_with(R::schema(), query)
    }

    /// Compile `query` against an explicit schema
    pub fn build_with<R: 'static>(&self, schema: &Schema<R>, query: &str) -> Result<CompiledPredicate<R>> {
        let descriptors = parse_with_mode(query, self.options.parse_mode).into_result()?;
        log::debug!("Parsed {} clauses for {}", descriptors.len(), schema.name());
        self.compile(schema, descriptors.iter().map(|d| &d.inner))
    }

    /// Compile descriptors built programmatically; clause indices are
    /// positions in `descriptors`.
    pub fn compile_descriptors<R: 'static>(
        &self,
        schema: &Schema<R>,
        descriptors: &[QueryDescriptor],
    ) -> Result<CompiledPredicate<R>> {
        self.compile(schema, descriptors.iter())
    }

    fn compile<'a, R: 'static>(
        &self,
        schema: &Schema<R>,
        descriptors: impl Iterator<Item = &'a QueryDescriptor>,
    ) -> Result<CompiledPredicate<R>> {
        let mut conditions = Vec::new();
        let mut errors = Vec::new();

        for (index, descriptor) in descriptors.enumerate() {
            match self.condition(schema, descriptor) {
                Ok(condition) => conditions.push(condition),
                Err(err) => {
                    errors.push(err.at_clause(index));
                    if self.options.parse_mode == ParseMode::Fast {
                        break;
                    }
                }
            }
        }

        match errors.len() {
            0 => {}
            1 => return Err(errors.remove(0)),
            _ => return Err(SiftError::Multiple(errors)),
        }

        let predicate = aggregate(conditions);
        log::debug!("Compiled predicate for {}: {}", schema.name(), predicate);
        lower(predicate, schema)
    }

    fn condition<R>(&self, schema: &Schema<R>, descriptor: &QueryDescriptor) -> Result<Condition> {
        let property = resolve(
            schema,
            descriptor.property_path().as_str(),
            self.options.case_insensitive,
        )?;
        let operand = self.coercer.coerce(
            &property.path,
            descriptor.value(),
            property.shape,
            descriptor.operator(),
        )?;
        ensure_supported(descriptor.operator(), property.shape, &property.path)?;
        log::trace!(
            "Clause {} resolved to {} ({})",
            descriptor,
            property.path,
            property.shape
        );

        let comparison = Comparison::new(
            property.path,
            descriptor.operator(),
            property.shape,
            operand,
        );
        Ok(Condition::new(
            comparison.path.clone(),
            descriptor.aggregate(),
            Predicate::Compare(comparison),
        ))
    }
}
