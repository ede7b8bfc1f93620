//! Single clause parser
//!
//! A clause is `[aggregate:]path:operator:value`. The aggregate prefix is
//! recognised only when the field after the path is an operator keyword, so a
//! property literally named `And` still parses as a path.

use crate::combinators::{classify_bare, eat, field, list_item, quoted, separator, ws, Input};
use sift_ast::{AggregateMode, DynamicValue, Operator, PropertyPath, QueryDescriptor, Spanned};
use sift_diagnostics::{
    ErrorCode, Span, SFT0001, SFT0002, SFT0003, SFT0004, SFT0005, SFT0006, SFT0007,
};
use winnow::prelude::*;

/// Failure inside one clause; the span is relative to the clause text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClauseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

/// Parse one clause into a descriptor
pub(crate) fn parse_clause(source: &str) -> Result<QueryDescriptor, ClauseError> {
    ClauseParser {
        source,
        input: source,
    }
    .parse()
}

struct ClauseParser<'a> {
    source: &'a str,
    input: Input<'a>,
}

impl<'a> ClauseParser<'a> {
    fn offset(&self) -> usize {
        self.source.len() - self.input.len()
    }

    fn error(&self, code: ErrorCode, span: Span, message: impl Into<String>) -> ClauseError {
        ClauseError {
            code,
            message: message.into(),
            span,
        }
    }

    /// Error spanning from `start` to the end of the clause
    fn error_from(&self, code: ErrorCode, start: usize, message: impl Into<String>) -> ClauseError {
        self.error(code, Span::new(start, self.source.len().max(start)), message)
    }

    fn parse(mut self) -> Result<QueryDescriptor, ClauseError> {
        let first = self
            .field()
            .ok_or_else(|| self.error_from(SFT0003, self.offset(), "expected a property path"))?;
        self.expect_separator(first.inner)?;

        let second = self
            .field()
            .ok_or_else(|| self.error_from(SFT0002, self.offset(), "expected an operator"))?;
        self.expect_separator(second.inner)?;

        if let Some(mode) = AggregateMode::from_keyword(first.inner) {
            if let Some(operator) = self.operator_field() {
                let path = self.path(&second)?;
                let value = self.value()?;
                return Ok(QueryDescriptor::from_parts(Some(mode), operator, path, value));
            }
        }

        let Some(operator) = Operator::from_keyword(second.inner) else {
            if self.operator_field().is_some() {
                return Err(self.error(
                    SFT0001,
                    first.span,
                    format!("unknown aggregate mode '{}'", first.inner),
                ));
            }
            return Err(self.error(
                SFT0002,
                second.span,
                format!("unknown operator '{}'", second.inner),
            ));
        };

        let path = self.path(&first)?;
        let value = self.value()?;
        Ok(QueryDescriptor::from_parts(None, operator, path, value))
    }

    fn field(&mut self) -> Option<Spanned<&'a str>> {
        ws(&mut self.input).ok()?;
        let start = self.offset();
        let text = field.parse_next(&mut self.input).ok()?;
        Some(Spanned::new(text, Span::new(start, self.offset())))
    }

    fn expect_separator(&mut self, after: &str) -> Result<(), ClauseError> {
        if separator(&mut self.input) {
            Ok(())
        } else {
            Err(self.error_from(SFT0001, self.offset(), format!("expected ':' after '{after}'")))
        }
    }

    /// Try `operator:`; restores the input when the next field is not one
    fn operator_field(&mut self) -> Option<Operator> {
        let checkpoint = self.input;
        let operator = self
            .field()
            .and_then(|f| Operator::from_keyword(f.inner))
            .filter(|_| separator(&mut self.input));
        if operator.is_none() {
            self.input = checkpoint;
        }
        operator
    }

    fn path(&self, field: &Spanned<&'a str>) -> Result<PropertyPath, ClauseError> {
        let invalid = |reason: String| self.error(SFT0003, field.span, reason);
        let path = PropertyPath::new(field.inner).map_err(|_| {
            invalid(format!("'{}' is not a valid property path", field.inner))
        })?;
        if let Some(segment) = path
            .segments()
            .iter()
            .find(|s| !s.starts_with(|c: char| c.is_alphabetic() || c == '_'))
        {
            return Err(invalid(format!(
                "path segment '{segment}' must start with a letter or '_'"
            )));
        }
        Ok(path)
    }

    fn value(&mut self) -> Result<DynamicValue, ClauseError> {
        let _ = ws(&mut self.input);
        let start = self.offset();
        let value = match self.input.chars().next() {
            None => return Err(self.error(SFT0004, Span::point(start), "missing value")),
            Some('[') => self.list()?,
            Some('"' | '\'') => self.quoted(start)?,
            Some(_) => {
                let rest = self.input.trim_end();
                self.input = "";
                classify_bare(rest)
            }
        };

        let _ = ws(&mut self.input);
        if !self.input.is_empty() {
            return Err(self.error_from(SFT0007, self.offset(), "unexpected input after value"));
        }
        Ok(value)
    }

    fn quoted(&mut self, start: usize) -> Result<DynamicValue, ClauseError> {
        quoted
            .parse_next(&mut self.input)
            .map(DynamicValue::Text)
            .map_err(|_| self.error_from(SFT0005, start, "unterminated string literal"))
    }

    fn list(&mut self) -> Result<DynamicValue, ClauseError> {
        let start = self.offset();
        eat(&mut self.input, '[');
        let _ = ws(&mut self.input);
        if eat(&mut self.input, ']') {
            return Ok(DynamicValue::Sequence(Vec::new()));
        }

        let mut items = Vec::new();
        loop {
            let _ = ws(&mut self.input);
            let item_start = self.offset();
            let item = match self.input.chars().next() {
                None => return Err(self.error_from(SFT0006, start, "missing closing ']'")),
                Some('"' | '\'') => self.quoted(item_start)?,
                Some('[') => {
                    return Err(self.error_from(
                        SFT0004,
                        item_start,
                        "nested lists are not supported",
                    ));
                }
                Some(_) => {
                    let text = list_item
                        .parse_next(&mut self.input)
                        .unwrap_or_default()
                        .trim();
                    if text.is_empty() {
                        return Err(self.error(
                            SFT0004,
                            Span::point(item_start),
                            "empty list element",
                        ));
                    }
                    classify_bare(text)
                }
            };
            items.push(item);

            let _ = ws(&mut self.input);
            if eat(&mut self.input, ',') {
                continue;
            }
            if eat(&mut self.input, ']') {
                return Ok(DynamicValue::Sequence(items));
            }
            return match self.input.chars().next() {
                None => Err(self.error_from(SFT0006, start, "missing closing ']'")),
                Some(other) => Err(self.error_from(
                    SFT0004,
                    self.offset(),
                    format!("expected ',' or ']' in list, found '{other}'"),
                )),
            };
        }
    }
}
