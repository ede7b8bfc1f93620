//! Record schemas
//!
//! A [`Schema`] is the registration table of one record type: every
//! filterable path mapped to its accessor, in registration order. Nested
//! record schemas are flattened into the parent under a prefix.

use crate::property::{
    Accessor, DynamicProperty, NestedProperty, NullableProperty, NullableSequenceProperty,
    PropertyAccess, ScalarProperty, SequenceProperty,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use sift_types::{ElementSequence, NullableElementSequence, Scalar, Shape, TypedValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A record type with a statically registered schema.
///
/// ```ignore
/// static SCHEMA: LazyLock<Schema<Order>> = LazyLock::new(|| {
///     Schema::builder("Order")
///         .scalar("Id", |o: &Order| &o.id)
///         .build()
/// });
///
/// impl Record for Order {
///     fn schema() -> &'static Schema<Self> {
///         &SCHEMA
///     }
/// }
/// ```
pub trait Record: Sized + Send + Sync + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// Registration table for `R`
pub struct Schema<R> {
    name: String,
    pub(crate) properties: IndexMap<String, Arc<dyn PropertyAccess<R>>>,
    /// Lowercased path to property index
    pub(crate) folded: RwLock<HashMap<String, usize>>,
}

impl<R: 'static> Schema<R> {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder<R> {
        SchemaBuilder {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }
}

impl<R> Schema<R> {
    /// Type name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Registered paths in registration order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Registered paths with their shapes
    pub fn shapes(&self) -> impl Iterator<Item = (&str, Shape)> {
        self.properties
            .iter()
            .map(|(path, access)| (path.as_str(), access.shape()))
    }

    /// Accessor registered under exactly `path`
    pub fn get(&self, path: &str) -> Option<&Arc<dyn PropertyAccess<R>>> {
        self.properties.get(path)
    }

    /// Read a property by exact path; `None` when not registered
    pub fn read(&self, record: &R, path: &str) -> Option<TypedValue> {
        self.get(path).map(|access| access.read(record))
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("properties", &self.shapes().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Schema`]. Registering a path twice replaces the accessor.
pub struct SchemaBuilder<R> {
    name: String,
    properties: IndexMap<String, Arc<dyn PropertyAccess<R>>>,
}

impl<R: 'static> SchemaBuilder<R> {
    /// Register a scalar field
    pub fn scalar<T, F>(self, path: &str, get: F) -> Self
    where
        T: Scalar,
        F: Fn(&R) -> &T + Send + Sync + 'static,
    {
        self.property(path, ScalarProperty::new(get))
    }

    /// Register an `Option` field
    pub fn nullable<T, F>(self, path: &str, get: F) -> Self
    where
        T: Scalar,
        F: Fn(&R) -> Option<&T> + Send + Sync + 'static,
    {
        self.property(path, NullableProperty::new(get))
    }

    /// Register an array or collection field
    pub fn sequence<S, F>(self, path: &str, get: F) -> Self
    where
        S: ElementSequence,
        F: Fn(&R) -> &S + Send + Sync + 'static,
    {
        self.property(path, SequenceProperty::new(get))
    }

    /// Register an array or collection of `Option` elements
    pub fn nullable_sequence<S, F>(self, path: &str, get: F) -> Self
    where
        S: NullableElementSequence,
        F: Fn(&R) -> &S + Send + Sync + 'static,
    {
        self.property(path, NullableSequenceProperty::new(get))
    }

    /// Register every property of `child` under `prefix`
    pub fn nested<C, F>(mut self, prefix: &str, get: F, child: &Schema<C>) -> Self
    where
        C: 'static,
        F: Fn(&R) -> &C + Send + Sync + 'static,
    {
        let parent: Accessor<R, C> = Arc::new(get);
        let prefix = prefix.trim();
        for (path, access) in &child.properties {
            let nested = NestedProperty::new(parent.clone(), access.clone());
            self.properties
                .insert(format!("{prefix}.{path}"), Arc::new(nested));
        }
        self
    }

    /// Register a property computed at runtime
    pub fn computed<F>(self, path: &str, shape: Shape, read: F) -> Self
    where
        F: Fn(&R) -> TypedValue + Send + Sync + 'static,
    {
        self.property(path, DynamicProperty::new(shape, read))
    }

    /// Register a custom accessor
    pub fn property(mut self, path: &str, access: impl PropertyAccess<R> + 'static) -> Self {
        self.properties
            .insert(path.trim().to_string(), Arc::new(access));
        self
    }

    pub fn build(self) -> Schema<R> {
        log::debug!(
            "Registered {} properties for {}",
            self.properties.len(),
            self.name
        );
        Schema {
            name: self.name,
            properties: self.properties,
            folded: RwLock::new(HashMap::new()),
        }
    }
}
