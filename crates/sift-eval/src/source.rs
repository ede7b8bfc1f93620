//! Query sources
//!
//! A [`QuerySource`] evaluates a [`Query`]: an optional compiled predicate,
//! ordering directives and paging. Slices and vectors are the in-memory
//! source; other stores implement the trait by translating the predicate IR.

use crate::compiled::CompiledPredicate;
use crate::resolver::{ResolvedProperty, resolve};
use crate::schema::Schema;
use sift_diagnostics::Result;
use sift_types::{ScalarValue, TypedValue};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// One ordering directive
pub struct OrderBy<R> {
    compare: Comparator<R>,
    direction: SortDirection,
    label: String,
}

impl<R> Clone for OrderBy<R> {
    fn clone(&self) -> Self {
        Self {
            compare: self.compare.clone(),
            direction: self.direction,
            label: self.label.clone(),
        }
    }
}

/// Null elements sort before values
fn compare_elements(a: Option<&ScalarValue>, b: Option<&ScalarValue>) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Nulls first, then by value; sequences compare element by element
fn compare_values(a: &TypedValue, b: &TypedValue) -> Ordering {
    match (a, b) {
        (TypedValue::Null, TypedValue::Null) => Ordering::Equal,
        (TypedValue::Null, _) => Ordering::Less,
        (_, TypedValue::Null) => Ordering::Greater,
        _ => a
            .elements()
            .zip(b.elements())
            .map(|(x, y)| compare_elements(x, y))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
    }
}

impl<R: 'static> OrderBy<R> {
    /// Order by a key computed from the record; `Option` keys sort `None`
    /// first.
    pub fn key<K, F>(key: F, direction: SortDirection) -> Self
    where
        K: PartialOrd,
        F: Fn(&R) -> K + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(move |a: &R, b: &R| {
                key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal)
            }),
            direction,
            label: "key".to_string(),
        }
    }

    /// Order by a registered property
    pub fn property(schema: &Schema<R>, path: &str, direction: SortDirection) -> Result<Self> {
        let ResolvedProperty { path, access, .. } = resolve(schema, path, true)?;
        Ok(Self {
            compare: Arc::new(move |a: &R, b: &R| compare_values(&access.read(a), &access.read(b))),
            direction,
            label: path,
        })
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        let ordering = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl<R> fmt::Debug for OrderBy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy")
            .field("key", &self.label)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Filter, ordering and paging to run against a source
pub struct Query<R> {
    pub predicate: Option<CompiledPredicate<R>>,
    pub order: Vec<OrderBy<R>>,
    pub skip: usize,
    pub take: Option<usize>,
}

impl<R> Default for Query<R> {
    fn default() -> Self {
        Self {
            predicate: None,
            order: Vec::new(),
            skip: 0,
            take: None,
        }
    }
}

impl<R> Query<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: CompiledPredicate<R>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Add an ordering directive; earlier directives take precedence
    pub fn order_by(mut self, order: OrderBy<R>) -> Self {
        self.order.push(order);
        self
    }

    pub fn skip(mut self, count: usize) -> Self {
        self.skip = count;
        self
    }

    pub fn take(mut self, count: usize) -> Self {
        self.take = Some(count);
        self
    }
}

impl<R> fmt::Debug for Query<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("predicate", &self.predicate)
            .field("order", &self.order)
            .field("skip", &self.skip)
            .field("take", &self.take)
            .finish()
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching records before paging
    pub total: usize,
}

/// Something a [`Query`] can run against
pub trait QuerySource<R> {
    fn query(&self, query: &Query<R>) -> Page<&R>;
}

impl<R: 'static> QuerySource<R> for [R] {
    fn query(&self, query: &Query<R>) -> Page<&R> {
        let mut matching: Vec<&R> = match &query.predicate {
            Some(predicate) => predicate.filter(self).collect(),
            None => self.iter().collect(),
        };
        let total = matching.len();

        if !query.order.is_empty() {
            matching.sort_by(|a, b| {
                query
                    .order
                    .iter()
                    .map(|order| order.compare(a, b))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        let items = matching
            .into_iter()
            .skip(query.skip)
            .take(query.take.unwrap_or(usize::MAX))
            .collect();
        log::debug!("Query matched {} records", total);
        Page { items, total }
    }
}

impl<R: 'static> QuerySource<R> for Vec<R> {
    fn query(&self, query: &Query<R>) -> Page<&R> {
        self.as_slice().query(query)
    }
}
