//! Property path resolution
//!
//! Paths are looked up exactly first. Failing that, and when enabled, paths
//! are compared ignoring ASCII case; the first registered match wins and the
//! result is memoized on the schema.

use crate::property::PropertyAccess;
use crate::schema::Schema;
use sift_diagnostics::{Result, SiftError};
use sift_types::Shape;
use std::fmt;
use std::sync::Arc;

/// A path resolved against a schema
pub struct ResolvedProperty<R> {
    /// Canonical registered path
    pub path: String,
    pub shape: Shape,
    pub access: Arc<dyn PropertyAccess<R>>,
}

impl<R> Clone for ResolvedProperty<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            shape: self.shape,
            access: self.access.clone(),
        }
    }
}

impl<R> fmt::Debug for ResolvedProperty<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProperty")
            .field("path", &self.path)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Resolve `path` against `schema`
pub fn resolve<R>(schema: &Schema<R>, path: &str, case_insensitive: bool) -> Result<ResolvedProperty<R>> {
    let path = path.trim();
    let index = schema
        .properties
        .get_index_of(path)
        .or_else(|| case_insensitive.then(|| resolve_folded(schema, path)).flatten());

    match index.and_then(|i| schema.properties.get_index(i)) {
        Some((canonical, access)) => {
            log::trace!("Resolved '{}' to '{}' on {}", path, canonical, schema.name());
            Ok(ResolvedProperty {
                path: canonical.clone(),
                shape: access.shape(),
                access: access.clone(),
            })
        }
        None => Err(SiftError::property_not_found(
            schema.name(),
            path,
            missing_segment(schema, path, case_insensitive),
        )),
    }
}

fn resolve_folded<R>(schema: &Schema<R>, path: &str) -> Option<usize> {
    let key = path.to_ascii_lowercase();
    if let Some(index) = schema.folded.read().get(&key) {
        return Some(*index);
    }
    let index = schema
        .properties
        .keys()
        .position(|registered| registered.eq_ignore_ascii_case(path))?;
    // Racing builds insert the same index
    schema.folded.write().insert(key, index);
    Some(index)
}

/// First segment of `path` that leads to no registered property
fn missing_segment<R>(schema: &Schema<R>, path: &str, case_insensitive: bool) -> String {
    let segments: Vec<&str> = path.split('.').map(str::trim).collect();
    let matches = |registered: &str, prefix: &str| {
        let head = registered.get(..prefix.len());
        let boundary = registered.len() == prefix.len()
            || registered.as_bytes().get(prefix.len()) == Some(&b'.');
        boundary
            && head.is_some_and(|head| {
                if case_insensitive {
                    head.eq_ignore_ascii_case(prefix)
                } else {
                    head == prefix
                }
            })
    };

    let mut prefix = String::new();
    for segment in &segments {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);
        if !schema.paths().any(|registered| matches(registered, &prefix)) {
            return (*segment).to_string();
        }
    }
    segments.last().copied().unwrap_or(path).to_string()
}

impl<R> Schema<R> {
    /// Resolve `path`, falling back to a case-insensitive match
    pub fn resolve(&self, path: &str) -> Result<ResolvedProperty<R>> {
        resolve(self, path, true)
    }

    /// Resolve `path` requiring an exact match
    pub fn resolve_exact(&self, path: &str) -> Result<ResolvedProperty<R>> {
        resolve(self, path, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Item {
        id: i64,
        name: String,
    }

    struct Holder {
        item: Item,
    }

    fn schema() -> Schema<Holder> {
        let item = Schema::builder("Item")
            .scalar("Id", |i: &Item| &i.id)
            .scalar("Name", |i: &Item| &i.name)
            .build();
        Schema::builder("Holder")
            .nested("Item", |h: &Holder| &h.item, &item)
            .scalar("id", |h: &Holder| &h.item.id)
            .build()
    }

    #[test]
    fn test_exact_before_case_insensitive() {
        let schema = schema();
        assert_eq!(schema.resolve("id").unwrap().path, "id");
        assert_eq!(schema.resolve("item.NAME").unwrap().path, "Item.Name");
        assert!(schema.folded.read().contains_key("item.name"));
        assert!(schema.resolve_exact("item.NAME").is_err());
    }

    #[test]
    fn test_first_registered_wins_when_ambiguous() {
        let schema = Schema::builder("Pair")
            .scalar("Value", |p: &(i32, i32)| &p.0)
            .scalar("VALUE", |p: &(i32, i32)| &p.1)
            .build();
        assert_eq!(schema.resolve("value").unwrap().path, "Value");
    }

    #[test]
    fn test_missing_segment_is_reported() {
        let schema = schema();
        match schema.resolve("Item.Owner.Name").unwrap_err() {
            SiftError::PropertyNotFound {
                type_name,
                segment,
                path,
                ..
            } => {
                assert_eq!(type_name, "Holder");
                assert_eq!(segment, "Owner");
                assert_eq!(path, "Item.Owner.Name");
            }
            other => panic!("Expected PropertyNotFound, got {:?}", other),
        }
        match schema.resolve("Item").unwrap_err() {
            SiftError::PropertyNotFound { segment, .. } => assert_eq!(segment, "Item"),
            other => panic!("Expected PropertyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_access_reads_child() {
        let schema = schema();
        let holder = Holder {
            item: Item {
                id: 7,
                name: "seven".into(),
            },
        };
        let resolved = schema.resolve("Item.Id").unwrap();
        assert_eq!(resolved.shape.to_string(), "Int64");
        assert_eq!(
            resolved.access.read(&holder),
            sift_types::TypedValue::Single(sift_types::ScalarValue::Int(7))
        );
    }
}
