//! Sift error codes following a structured numbering system
//!
//! Error code ranges:
//! - SFT0001-SFT0099: Query text errors (syntax)
//! - SFT0100-SFT0199: Property resolution errors
//! - SFT0200-SFT0299: Value coercion errors
//! - SFT0300-SFT0399: Operator errors
//! - SFT0400-SFT0499: Descriptor and input errors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a query text error (0001-0099)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a property resolution error (0100-0199)
    pub const fn is_resolution_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a value coercion error (0200-0299)
    pub const fn is_coercion_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is an operator error (0300-0399)
    pub const fn is_operator_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a descriptor or input error (0400-0499)
    pub const fn is_input_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SFT{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Query text errors (0001-0099)
    map.insert(1, ErrorInfo::new("Malformed clause")
        .with_help("Clauses have the form [And|Or:]path:Operator:value"));
    map.insert(2, ErrorInfo::new("Unknown operator")
        .with_help("Expected one of Equal, NotEqual, LessThan, LessThanOrEqual, GreaterThan, GreaterThanOrEqual, Contains, ContainsOnValue"));
    map.insert(3, ErrorInfo::new("Invalid property path"));
    map.insert(4, ErrorInfo::new("Invalid value literal"));
    map.insert(5, ErrorInfo::new("Unterminated string literal"));
    map.insert(6, ErrorInfo::new("Missing closing bracket"));
    map.insert(7, ErrorInfo::new("Unexpected trailing input"));

    // Property resolution errors (0100-0199)
    map.insert(100, ErrorInfo::new("Property not found")
        .with_help("Property paths are matched against the registered schema of the record type"));

    // Value coercion errors (0200-0299)
    map.insert(200, ErrorInfo::new("Invalid value for property type"));
    map.insert(201, ErrorInfo::new("Null not allowed")
        .with_help("Only nullable properties accept null"));
    map.insert(202, ErrorInfo::new("Numeric value out of range"));
    map.insert(203, ErrorInfo::new("Multiple values not allowed")
        .with_help("Use ContainsOnValue to match a property against several values"));
    map.insert(204, ErrorInfo::new("Unknown enumeration variant"));

    // Operator errors (0300-0399)
    map.insert(300, ErrorInfo::new("Operator not supported for property shape"));

    // Descriptor and input errors (0400-0499)
    map.insert(400, ErrorInfo::new("Invalid query descriptor"));

    map
});

// Query text errors
pub const SFT0001: ErrorCode = ErrorCode::new(1);
pub const SFT0002: ErrorCode = ErrorCode::new(2);
pub const SFT0003: ErrorCode = ErrorCode::new(3);
pub const SFT0004: ErrorCode = ErrorCode::new(4);
pub const SFT0005: ErrorCode = ErrorCode::new(5);
pub const SFT0006: ErrorCode = ErrorCode::new(6);
pub const SFT0007: ErrorCode = ErrorCode::new(7);

// Property resolution errors
pub const SFT0100: ErrorCode = ErrorCode::new(100);

// Value coercion errors
pub const SFT0200: ErrorCode = ErrorCode::new(200);
pub const SFT0201: ErrorCode = ErrorCode::new(201);
pub const SFT0202: ErrorCode = ErrorCode::new(202);
pub const SFT0203: ErrorCode = ErrorCode::new(203);
pub const SFT0204: ErrorCode = ErrorCode::new(204);

// Operator errors
pub const SFT0300: ErrorCode = ErrorCode::new(300);

// Descriptor and input errors
pub const SFT0400: ErrorCode = ErrorCode::new(400);
