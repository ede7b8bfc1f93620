//! Model loading errors

/// Error loading a record model or record data
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown type '{type_name}' for property '{property}'")]
    UnknownType { property: String, type_name: String },

    #[error("Invalid property path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Invalid record on line {line}: {source}")]
    InvalidRecord {
        line: usize,
        source: serde_json::Error,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
