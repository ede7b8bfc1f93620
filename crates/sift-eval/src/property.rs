//! Registered property accessors
//!
//! Every registered path owns one [`PropertyAccess`] implementation. It knows
//! the property's [`Shape`] and turns a typed operand into a [`Matcher`] that
//! reads the record directly.

use crate::operators::{self, dynamic, scalar, sequence};
use sift_ast::Operator;
use sift_diagnostics::Result;
use sift_types::{ElementSequence, NullableElementSequence, Scalar, Shape, TypedValue};
use std::sync::Arc;

/// Compiled test over one record
pub type Matcher<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Borrowing accessor for a field
pub type Accessor<R, T> = Arc<dyn Fn(&R) -> &T + Send + Sync>;

/// Borrowing accessor for an optional field
pub type OptionalAccessor<R, T> = Arc<dyn Fn(&R) -> Option<&T> + Send + Sync>;

/// Dynamic reader producing an owned value
pub type Reader<R> = Arc<dyn Fn(&R) -> TypedValue + Send + Sync>;

/// Access to one property of `R`
pub trait PropertyAccess<R>: Send + Sync {
    fn shape(&self) -> Shape;

    /// Build a matcher for `operator` against an operand coerced for this shape
    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>>;

    /// Read the property as an owned dynamic value
    fn read(&self, record: &R) -> TypedValue;
}

/// Plain scalar field
pub struct ScalarProperty<R, T> {
    get: Accessor<R, T>,
}

impl<R, T> ScalarProperty<R, T> {
    pub fn new(get: impl Fn(&R) -> &T + Send + Sync + 'static) -> Self {
        Self { get: Arc::new(get) }
    }
}

impl<R: 'static, T: Scalar> PropertyAccess<R> for ScalarProperty<R, T> {
    fn shape(&self) -> Shape {
        Shape::Scalar(T::kind())
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>> {
        operators::ensure_supported(operator, self.shape(), path)?;
        scalar::required(path, operator, operand, self.get.clone())
    }

    fn read(&self, record: &R) -> TypedValue {
        TypedValue::Single((self.get)(record).to_value())
    }
}

/// `Option<T>` field
pub struct NullableProperty<R, T> {
    get: OptionalAccessor<R, T>,
}

impl<R, T> NullableProperty<R, T> {
    pub fn new(get: impl Fn(&R) -> Option<&T> + Send + Sync + 'static) -> Self {
        Self { get: Arc::new(get) }
    }
}

impl<R: 'static, T: Scalar> PropertyAccess<R> for NullableProperty<R, T> {
    fn shape(&self) -> Shape {
        Shape::Nullable(T::kind())
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>> {
        operators::ensure_supported(operator, self.shape(), path)?;
        scalar::optional(path, operator, operand, self.get.clone())
    }

    fn read(&self, record: &R) -> TypedValue {
        (self.get)(record).map_or(TypedValue::Null, |value| TypedValue::Single(value.to_value()))
    }
}

/// Array or collection field
pub struct SequenceProperty<R, S> {
    get: Accessor<R, S>,
}

impl<R, S> SequenceProperty<R, S> {
    pub fn new(get: impl Fn(&R) -> &S + Send + Sync + 'static) -> Self {
        Self { get: Arc::new(get) }
    }
}

impl<R: 'static, S: ElementSequence> PropertyAccess<R> for SequenceProperty<R, S> {
    fn shape(&self) -> Shape {
        Shape::sequence(S::KIND, S::Element::kind())
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>> {
        operators::ensure_supported(operator, self.shape(), path)?;
        sequence::matcher(path, operator, operand, self.get.clone())
    }

    fn read(&self, record: &R) -> TypedValue {
        TypedValue::Many((self.get)(record).elements().map(Scalar::to_value).collect())
    }
}

/// Array or collection field with optional elements
pub struct NullableSequenceProperty<R, S> {
    get: Accessor<R, S>,
}

impl<R, S> NullableSequenceProperty<R, S> {
    pub fn new(get: impl Fn(&R) -> &S + Send + Sync + 'static) -> Self {
        Self { get: Arc::new(get) }
    }
}

impl<R: 'static, S: NullableElementSequence> PropertyAccess<R> for NullableSequenceProperty<R, S> {
    fn shape(&self) -> Shape {
        Shape::nullable_sequence(S::KIND, S::Element::kind())
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>> {
        operators::ensure_supported(operator, self.shape(), path)?;
        sequence::nullable_matcher(path, operator, operand, self.get.clone())
    }

    fn read(&self, record: &R) -> TypedValue {
        TypedValue::from_optional(
            (self.get)(record)
                .elements()
                .map(|element| element.map(Scalar::to_value))
                .collect(),
        )
    }
}

/// Property computed at runtime, for records without static field types
/// (JSON documents, maps).
pub struct DynamicProperty<R> {
    shape: Shape,
    read: Reader<R>,
}

impl<R> DynamicProperty<R> {
    /// `read` must produce values of `shape`: `Null` or `Single` for scalars,
    /// `Many` (or `Optional` when elements admit null) for sequences.
    pub fn new(shape: Shape, read: impl Fn(&R) -> TypedValue + Send + Sync + 'static) -> Self {
        Self {
            shape,
            read: Arc::new(read),
        }
    }
}

impl<R: 'static> PropertyAccess<R> for DynamicProperty<R> {
    fn shape(&self) -> Shape {
        self.shape
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<R>> {
        operators::ensure_supported(operator, self.shape, path)?;
        Ok(dynamic::matcher(self.shape, operator, operand, self.read.clone()))
    }

    fn read(&self, record: &R) -> TypedValue {
        (self.read)(record)
    }
}

/// Property of a nested record, reached through its parent field
pub(crate) struct NestedProperty<P, C> {
    parent: Accessor<P, C>,
    child: Arc<dyn PropertyAccess<C>>,
}

impl<P, C> NestedProperty<P, C> {
    pub(crate) fn new(parent: Accessor<P, C>, child: Arc<dyn PropertyAccess<C>>) -> Self {
        Self { parent, child }
    }
}

impl<P: 'static, C: 'static> PropertyAccess<P> for NestedProperty<P, C> {
    fn shape(&self) -> Shape {
        self.child.shape()
    }

    fn matcher(&self, path: &str, operator: Operator, operand: &TypedValue) -> Result<Matcher<P>> {
        let inner = self.child.matcher(path, operator, operand)?;
        let parent = self.parent.clone();
        Ok(Arc::new(move |record: &P| inner(parent(record))))
    }

    fn read(&self, record: &P) -> TypedValue {
        self.child.read((self.parent)(record))
    }
}
