//! Bridge from Rust field types to scalar kinds

use crate::{ScalarKind, ScalarValue, SequenceKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::fmt::Debug;

/// A Rust type usable as a property element.
///
/// `from_value` converts a coerced operand back into the concrete type so
/// comparisons run on borrowed record data without conversion per call.
pub trait Scalar: Clone + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    fn kind() -> ScalarKind;

    fn to_value(&self) -> ScalarValue;

    /// `None` when the value does not belong to this type
    fn from_value(value: &ScalarValue) -> Option<Self>;
}

macro_rules! signed_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$kind
            }

            fn to_value(&self) -> ScalarValue {
                ScalarValue::Int(i64::from(*self))
            }

            fn from_value(value: &ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::Int(i) => <$ty>::try_from(*i).ok(),
                    ScalarValue::UInt(u) => <$ty>::try_from(*u).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! unsigned_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$kind
            }

            fn to_value(&self) -> ScalarValue {
                ScalarValue::UInt(u64::from(*self))
            }

            fn from_value(value: &ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::UInt(u) => <$ty>::try_from(*u).ok(),
                    ScalarValue::Int(i) => <$ty>::try_from(*i).ok(),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! plain_scalar {
    ($($ty:ty => $kind:ident / $variant:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind() -> ScalarKind {
                ScalarKind::$kind
            }

            fn to_value(&self) -> ScalarValue {
                ScalarValue::$variant(self.clone())
            }

            fn from_value(value: &ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    )*};
}

signed_scalar!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);
unsigned_scalar!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64);
plain_scalar!(
    bool => Boolean / Bool,
    f64 => Float64 / Float,
    Decimal => Decimal / Decimal,
    char => Char / Char,
    String => Text / Text,
    NaiveDate => Date / Date,
    NaiveDateTime => DateTime / DateTime,
    DateTime<Utc> => Timestamp / Timestamp,
);

impl Scalar for f32 {
    fn kind() -> ScalarKind {
        ScalarKind::Float32
    }

    fn to_value(&self) -> ScalarValue {
        ScalarValue::Float(f64::from(*self))
    }

    fn from_value(value: &ScalarValue) -> Option<Self> {
        match value {
            // Coercion parses at native width, so the narrowing is exact
            ScalarValue::Float(x) => Some(*x as f32),
            _ => None,
        }
    }
}

/// Register a fieldless enum as an enumeration scalar.
///
/// Variants are listed in declaration order; that order is the ordinal used
/// for coercion by number. The enum must derive `Clone`, `PartialEq`,
/// `PartialOrd` and `Debug`.
///
/// ```
/// #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
/// enum Status {
///     Active,
///     Suspended,
///     Closed,
/// }
///
/// sift_types::scalar_enum!(Status { Active, Suspended, Closed });
///
/// use sift_types::Scalar;
/// assert_eq!(Status::kind().name(), "Status");
/// ```
#[macro_export]
macro_rules! scalar_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        const _: () = {
            static TYPE: $crate::EnumType = $crate::EnumType {
                name: stringify!($ty),
                variants: &[$(stringify!($variant)),+],
            };

            impl $crate::Scalar for $ty {
                fn kind() -> $crate::ScalarKind {
                    $crate::ScalarKind::Enumeration(&TYPE)
                }

                fn to_value(&self) -> $crate::ScalarValue {
                    let name = match self {
                        $($ty::$variant => stringify!($variant),)+
                    };
                    let ordinal = TYPE
                        .variants
                        .iter()
                        .position(|v| *v == name)
                        .unwrap_or_default();
                    $crate::ScalarValue::Enum {
                        type_name: TYPE.name,
                        name,
                        ordinal,
                    }
                }

                fn from_value(value: &$crate::ScalarValue) -> Option<Self> {
                    match value {
                        $crate::ScalarValue::Enum { type_name, name, .. }
                            if *type_name == TYPE.name =>
                        {
                            match *name {
                                $(stringify!($variant) => Some($ty::$variant),)+
                                _ => None,
                            }
                        }
                        _ => None,
                    }
                }
            }
        };
    };
}

/// A sequence-shaped property value
pub trait ElementSequence: Send + Sync + 'static {
    type Element: Scalar;

    const KIND: SequenceKind;

    fn elements(&self) -> impl Iterator<Item = &Self::Element>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Scalar> ElementSequence for Vec<T> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Collection;

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Scalar> ElementSequence for VecDeque<T> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Collection;

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: Scalar, const N: usize> ElementSequence for [T; N] {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Array;

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn len(&self) -> usize {
        N
    }
}

impl<T: Scalar> ElementSequence for Box<[T]> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Array;

    fn elements(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

/// A sequence-shaped property whose elements may be missing, such as
/// `Vec<Option<i32>>`
pub trait NullableElementSequence: Send + Sync + 'static {
    type Element: Scalar;

    const KIND: SequenceKind;

    fn elements(&self) -> impl Iterator<Item = Option<&Self::Element>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Scalar> NullableElementSequence for Vec<Option<T>> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Collection;

    fn elements(&self) -> impl Iterator<Item = Option<&T>> {
        self.iter().map(Option::as_ref)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Scalar> NullableElementSequence for VecDeque<Option<T>> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Collection;

    fn elements(&self) -> impl Iterator<Item = Option<&T>> {
        self.iter().map(Option::as_ref)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: Scalar, const N: usize> NullableElementSequence for [Option<T>; N] {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Array;

    fn elements(&self) -> impl Iterator<Item = Option<&T>> {
        self.iter().map(Option::as_ref)
    }

    fn len(&self) -> usize {
        N
    }
}

impl<T: Scalar> NullableElementSequence for Box<[Option<T>]> {
    type Element = T;
    const KIND: SequenceKind = SequenceKind::Array;

    fn elements(&self) -> impl Iterator<Item = Option<&T>> {
        self.iter().map(Option::as_ref)
    }

    fn len(&self) -> usize {
        <[Option<T>]>::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    enum Priority {
        Low,
        Medium,
        High,
    }

    scalar_enum!(Priority { Low, Medium, High });

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(i8::from_value(&ScalarValue::Int(-128)), Some(-128));
        assert_eq!(i8::from_value(&ScalarValue::Int(128)), None);
        assert_eq!(u16::from_value(&ScalarValue::Int(7)), Some(7));
        assert_eq!(u16::from_value(&ScalarValue::Int(-7)), None);
    }

    #[test]
    fn test_enum_roundtrip() {
        let value = Priority::High.to_value();
        assert_eq!(
            value,
            ScalarValue::Enum {
                type_name: "Priority",
                name: "High",
                ordinal: 2
            }
        );
        assert_eq!(Priority::from_value(&value), Some(Priority::High));
        assert_eq!(Priority::from_value(&ScalarValue::text("High")), None);
        match Priority::kind() {
            ScalarKind::Enumeration(ty) => assert_eq!(ty.variants, &["Low", "Medium", "High"]),
            other => panic!("Expected enumeration kind, got {:?}", other),
        }
    }

    #[test]
    fn test_sequence_kinds() {
        assert_eq!(<Vec<i32> as ElementSequence>::KIND, SequenceKind::Collection);
        assert_eq!(<[i32; 3] as ElementSequence>::KIND, SequenceKind::Array);
        let boxed: Box<[u8]> = vec![1, 2].into_boxed_slice();
        assert_eq!(ElementSequence::len(&boxed), 2);
    }

    #[test]
    fn test_nullable_element_sequences() {
        assert_eq!(
            <[Option<i32>; 2] as NullableElementSequence>::KIND,
            SequenceKind::Array
        );
        let values = vec![Some(1), None, Some(3)];
        assert_eq!(
            NullableElementSequence::elements(&values).collect::<Vec<_>>(),
            vec![Some(&1), None, Some(&3)]
        );
        assert_eq!(NullableElementSequence::len(&values), 3);
    }
}
