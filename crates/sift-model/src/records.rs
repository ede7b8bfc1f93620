//! Record data loading
//!
//! Records are read either from a JSON array or from newline-delimited JSON
//! (one document per line, blank lines ignored).

use crate::error::{ModelError, ModelResult};
use serde_json::Value;
use std::path::Path;

/// Parse records from text, detecting the layout from the first character
pub fn parse_records(text: &str) -> ModelResult<Vec<Value>> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ModelError::InvalidRecord {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Read records from a `.json` or `.ndjson`/`.jsonl` file
pub fn read_records(path: impl AsRef<Path>) -> ModelResult<Vec<Value>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json" | "ndjson" | "jsonl") => {
            let records = parse_records(&std::fs::read_to_string(path)?)?;
            log::debug!("Loaded {} records from {}", records.len(), path.display());
            Ok(records)
        }
        other => Err(ModelError::UnsupportedFormat(format!(
            "Unsupported data file extension: {}. Expected .json, .ndjson or .jsonl",
            other.map_or_else(|| "none".to_string(), |ext| format!(".{ext}"))
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_and_ndjson() {
        assert_eq!(parse_records("[{\"a\": 1}, {\"a\": 2}]").unwrap().len(), 2);
        let ndjson = "{\"a\": 1}\n\n{\"a\": 2}\n";
        assert_eq!(parse_records(ndjson).unwrap(), vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_ndjson_error_names_line() {
        let err = parse_records("{\"a\": 1}\n{oops}\n").unwrap_err();
        assert!(matches!(err, ModelError::InvalidRecord { line: 2, .. }), "{}", err);
    }
}
