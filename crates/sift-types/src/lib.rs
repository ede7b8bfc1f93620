//! Sift type system
//!
//! This crate describes the values a filter can compare against:
//! - [`ScalarKind`]: the closed set of element types a property may have
//! - [`Shape`]: scalar, nullable, array or collection of a kind, with
//!   sequences optionally holding null elements
//! - [`ScalarValue`] / [`TypedValue`]: coerced comparison operands
//! - [`Scalar`] / [`ElementSequence`] / [`NullableElementSequence`]: the
//!   bridge from Rust field types
//! - [`ValueCoercer`]: raw query values to typed operands

pub mod coercion;
mod kind;
mod scalar;
mod shape;
mod value;

pub use coercion::ValueCoercer;
pub use kind::*;
pub use scalar::*;
pub use shape::*;
pub use value::*;
