//! Sift error types

use crate::{ErrorCode, SourceLocation, SFT0001, SFT0100, SFT0300, SFT0400};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Compilation cannot proceed
    Error,
    /// Suspicious input that still compiles
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A renderable diagnostic with location and help
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
    /// Position in the query text, when known
    pub location: Option<SourceLocation>,
    /// Zero-based clause index the diagnostic belongs to
    pub clause: Option<usize>,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            clause: None,
            help: code.info().help.map(str::to_owned),
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_clause(mut self, clause: usize) -> Self {
        self.clause = Some(clause);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic for a terminal.
    ///
    /// When `source` is given and the diagnostic has a location, the offending
    /// line is echoed with a caret marker underneath.
    pub fn render(&self, source: Option<&str>) -> String {
        let mut out = format!("{}[{}]: {}", self.severity_label(), self.code, self.message);
        if let Some(clause) = self.clause {
            out.push_str(&format!("\n  --> clause {clause}"));
            if let Some(loc) = &self.location {
                out.push_str(&format!(" at {loc}"));
            }
        }
        if let (Some(source), Some(loc)) = (source, &self.location) {
            if let Some(line) = source.lines().nth(loc.line.saturating_sub(1)) {
                let width = line.chars().count().saturating_sub(loc.column - 1);
                let marks = loc.length.clamp(1, width.max(1));
                out.push_str(&format!(
                    "\n   |\n   | {line}\n   | {}{}",
                    " ".repeat(loc.column - 1),
                    "^".repeat(marks)
                ));
            }
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n   = help: {help}"));
        }
        out
    }

    #[cfg(feature = "colored")]
    fn severity_label(&self) -> String {
        use colored::Colorize;
        match self.severity {
            Severity::Error => "error".red().bold().to_string(),
            Severity::Warning => "warning".yellow().bold().to_string(),
        }
    }

    #[cfg(not(feature = "colored"))]
    fn severity_label(&self) -> String {
        self.severity.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.severity, self.code, self.message)?;
        if let Some(clause) = self.clause {
            write!(f, " (clause {clause})")?;
        }
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Main sift error type
///
/// Every failure of query compilation is reported through one of these
/// variants. Errors raised while compiling a particular clause carry the
/// zero-based clause index, see [`SiftError::at_clause`].
#[derive(Debug, Clone, Error)]
pub enum SiftError {
    /// A clause does not match the query grammar
    #[error("{code}: malformed clause {clause} '{text}': {message}")]
    MalformedQueryText {
        code: ErrorCode,
        clause: usize,
        /// Raw clause text, trimmed
        text: String,
        message: String,
        location: Option<SourceLocation>,
    },

    /// A path segment does not name a registered property
    #[error(
        "{code}: property '{segment}' not found on {type_name} while resolving '{path}'{}",
        clause_tag(.clause)
    )]
    PropertyNotFound {
        code: ErrorCode,
        type_name: String,
        path: String,
        segment: String,
        clause: Option<usize>,
    },

    /// A raw value cannot be converted to the property's type
    #[error(
        "{code}: cannot use {raw} as {expected} for '{path}': {reason}{}",
        clause_tag(.clause)
    )]
    ValueCoercion {
        code: ErrorCode,
        path: String,
        expected: String,
        raw: String,
        reason: String,
        clause: Option<usize>,
    },

    /// The operator has no meaning for the property's shape
    #[error(
        "{code}: operator {operator} is not supported for {shape} property '{path}'{}",
        clause_tag(.clause)
    )]
    UnsupportedOperator {
        code: ErrorCode,
        operator: String,
        shape: String,
        path: String,
        clause: Option<usize>,
    },

    /// A descriptor was constructed from invalid parts
    #[error("{code}: {message}")]
    InvalidDescriptor { code: ErrorCode, message: String },

    /// Multiple errors collected in analysis mode
    #[error("Multiple errors: {}", .0.len())]
    Multiple(Vec<SiftError>),
}

/// ` (clause N)` suffix for errors tagged with a clause index
fn clause_tag(clause: &Option<usize>) -> String {
    clause.map_or_else(String::new, |index| format!(" (clause {index})"))
}

impl SiftError {
    /// Create a malformed clause error
    pub fn malformed(
        code: ErrorCode,
        clause: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedQueryText {
            code,
            clause,
            text: text.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Create a malformed clause error pointing into the query text
    pub fn malformed_at(
        code: ErrorCode,
        clause: usize,
        text: impl Into<String>,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::MalformedQueryText {
            code,
            clause,
            text: text.into(),
            message: message.into(),
            location: Some(location),
        }
    }

    /// Create a property resolution error
    pub fn property_not_found(
        type_name: impl Into<String>,
        path: impl Into<String>,
        segment: impl Into<String>,
    ) -> Self {
        Self::PropertyNotFound {
            code: SFT0100,
            type_name: type_name.into(),
            path: path.into(),
            segment: segment.into(),
            clause: None,
        }
    }

    /// Create a value coercion error
    pub fn coercion(
        code: ErrorCode,
        path: impl Into<String>,
        expected: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ValueCoercion {
            code,
            path: path.into(),
            expected: expected.into(),
            raw: raw.into(),
            reason: reason.into(),
            clause: None,
        }
    }

    /// Create an unsupported operator error
    pub fn unsupported_operator(
        operator: impl fmt::Display,
        shape: impl fmt::Display,
        path: impl Into<String>,
    ) -> Self {
        Self::UnsupportedOperator {
            code: SFT0300,
            operator: operator.to_string(),
            shape: shape.to_string(),
            path: path.into(),
            clause: None,
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            code: SFT0400,
            message: message.into(),
        }
    }

    /// Tag the error with the clause it was raised for.
    ///
    /// Parse errors already know their clause and are left untouched.
    pub fn at_clause(mut self, index: usize) -> Self {
        match &mut self {
            Self::PropertyNotFound { clause, .. }
            | Self::ValueCoercion { clause, .. }
            | Self::UnsupportedOperator { clause, .. } => *clause = Some(index),
            Self::MalformedQueryText { .. } | Self::InvalidDescriptor { .. } | Self::Multiple(_) => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedQueryText { code, .. }
            | Self::PropertyNotFound { code, .. }
            | Self::ValueCoercion { code, .. }
            | Self::UnsupportedOperator { code, .. }
            | Self::InvalidDescriptor { code, .. } => *code,
            Self::Multiple(errors) => errors.first().map_or(SFT0001, SiftError::code),
        }
    }

    /// Zero-based index of the offending clause, if known
    pub fn clause(&self) -> Option<usize> {
        match self {
            Self::MalformedQueryText { clause, .. } => Some(*clause),
            Self::PropertyNotFound { clause, .. }
            | Self::ValueCoercion { clause, .. }
            | Self::UnsupportedOperator { clause, .. } => *clause,
            Self::InvalidDescriptor { .. } => None,
            Self::Multiple(errors) => errors.first().and_then(SiftError::clause),
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::MalformedQueryText { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Flatten into individual errors
    pub fn into_errors(self) -> Vec<SiftError> {
        match self {
            Self::Multiple(errors) => errors.into_iter().flat_map(SiftError::into_errors).collect(),
            other => vec![other],
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            Self::MalformedQueryText { text, message, .. } => format!("{message} in '{text}'"),
            Self::PropertyNotFound { type_name, path, segment, .. } => {
                format!("no property '{segment}' on {type_name} (path '{path}')")
            }
            Self::ValueCoercion { path, expected, raw, reason, .. } => {
                format!("cannot use {raw} as {expected} for '{path}': {reason}")
            }
            Self::UnsupportedOperator { operator, shape, path, .. } => {
                format!("{operator} is not supported for {shape} property '{path}'")
            }
            Self::InvalidDescriptor { message, .. } => message.clone(),
            Self::Multiple(errors) => match errors.first() {
                Some(first) => return first.to_diagnostic(),
                None => "Unknown error".to_string(),
            },
        };

        let mut diag = Diagnostic::error(self.code(), message);
        if let Some(clause) = self.clause() {
            diag = diag.with_clause(clause);
        }
        if let Some(loc) = self.location() {
            diag = diag.with_location(loc.clone());
        }
        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SFT0002, SFT0202};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_at_clause_tags_compile_errors() {
        let err = SiftError::property_not_found("Sample", "owner.nmae", "nmae").at_clause(2);
        assert_eq!(err.clause(), Some(2));
        assert_eq!(err.code(), SFT0100);
    }

    #[test]
    fn test_at_clause_keeps_parse_clause() {
        let err = SiftError::malformed(SFT0002, 1, "score:Bogus:5", "unknown operator 'Bogus'");
        assert_eq!(err.at_clause(7).clause(), Some(1));
    }

    #[test]
    fn test_error_display() {
        let err = SiftError::coercion(SFT0202, "id", "Int8", "300", "out of range");
        assert_eq!(err.to_string(), "SFT0202: cannot use 300 as Int8 for 'id': out of range");
        assert_eq!(
            err.at_clause(3).to_string(),
            "SFT0202: cannot use 300 as Int8 for 'id': out of range (clause 3)"
        );
        let err = SiftError::unsupported_operator("LessThan", "Text[]", "tags").at_clause(0);
        assert_eq!(
            err.to_string(),
            "SFT0300: operator LessThan is not supported for Text[] property 'tags' (clause 0)"
        );
        let err = SiftError::property_not_found("Sample", "owner.nmae", "nmae").at_clause(1);
        assert!(err.to_string().ends_with("while resolving 'owner.nmae' (clause 1)"));
    }

    #[test]
    fn test_multiple_flattens() {
        let err = SiftError::Multiple(vec![
            SiftError::malformed(SFT0001, 0, "a", "x"),
            SiftError::Multiple(vec![SiftError::malformed(SFT0002, 3, "b", "y")]),
        ]);
        assert_eq!(err.clause(), Some(0));
        assert_eq!(err.into_errors().len(), 2);
    }

    #[test]
    fn test_render_marks_location() {
        let diag = Diagnostic::error(SFT0002, "unknown operator 'Bogus'")
            .with_clause(0)
            .with_location(SourceLocation::new(1, 7, 6, 5))
            .with_help("check the operator name");
        let rendered = diag.render(Some("score:Bogus:5"));
        assert!(rendered.contains("clause 0 at 1:7"));
        assert!(rendered.contains("   | score:Bogus:5\n   |       ^^^^^"));
        assert!(rendered.ends_with("= help: check the operator name"));
    }
}
