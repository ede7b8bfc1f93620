//! Property shapes

use crate::ScalarKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of sequence a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Fixed-size array or boxed slice
    Array,
    /// Growable collection such as `Vec`
    Collection,
}

/// How a property holds its element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar(ScalarKind),
    Nullable(ScalarKind),
    Array(ScalarKind),
    Collection(ScalarKind),
    /// Array whose elements may be null
    NullableArray(ScalarKind),
    /// Collection whose elements may be null
    NullableCollection(ScalarKind),
}

impl Shape {
    pub fn sequence(kind: SequenceKind, element: ScalarKind) -> Self {
        match kind {
            SequenceKind::Array => Self::Array(element),
            SequenceKind::Collection => Self::Collection(element),
        }
    }

    pub fn nullable_sequence(kind: SequenceKind, element: ScalarKind) -> Self {
        match kind {
            SequenceKind::Array => Self::NullableArray(element),
            SequenceKind::Collection => Self::NullableCollection(element),
        }
    }

    pub fn element(&self) -> ScalarKind {
        match *self {
            Self::Scalar(k)
            | Self::Nullable(k)
            | Self::Array(k)
            | Self::Collection(k)
            | Self::NullableArray(k)
            | Self::NullableCollection(k) => k,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            Self::Array(_) | Self::Collection(_) | Self::NullableArray(_) | Self::NullableCollection(_)
        )
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Whether null is a valid element value: nullable scalars and sequences
    /// of nullable elements
    pub fn admits_null(&self) -> bool {
        matches!(
            self,
            Self::Nullable(_) | Self::NullableArray(_) | Self::NullableCollection(_)
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(k) => write!(f, "{k}"),
            Self::Nullable(k) => write!(f, "{k}?"),
            Self::Array(k) => write!(f, "{k}[]"),
            Self::Collection(k) => write!(f, "Collection<{k}>"),
            Self::NullableArray(k) => write!(f, "{k}?[]"),
            Self::NullableCollection(k) => write!(f, "Collection<{k}?>"),
        }
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
