//! Value kinds.
//!
//! `ValueKind` is a lightweight classification of a [`Value`]. `ScalarKind`
//! names the element type of a uniform [`Array`](crate::Array) and `KeyKind`
//! the declared key type of a [`KeyedMap`](crate::KeyedMap).
//!
//! ```rust
//! use nebula_value::{KeyKind, ScalarKind, Value, ValueKind};
//!
//! assert_eq!(ValueKind::of(&Value::from("x")), ValueKind::Text);
//! assert_eq!(ScalarKind::I32.name(), "i32");
//! assert_eq!(KeyKind::Dynamic.name(), "any");
//! ```

use core::fmt::{Display, Formatter};

use crate::Value;

/// Represents the kind of a Value
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    Number,
    Text,
    Bytes,
    Map,
    Keyed,
    List,
    Array,
    Record,
}

impl ValueKind {
    /// Classify a value
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::I8(_)
            | Value::I16(_)
            | Value::I32(_)
            | Value::I64(_)
            | Value::U8(_)
            | Value::U16(_)
            | Value::U32(_)
            | Value::U64(_) => Self::Integer,
            Value::F32(_) | Value::F64(_) => Self::Float,
            Value::Number(_) => Self::Number,
            Value::Text(_) => Self::Text,
            Value::Bytes(_) => Self::Bytes,
            Value::Map(_) => Self::Map,
            Value::Keyed(_) => Self::Keyed,
            Value::List(_) => Self::List,
            Value::Array(_) => Self::Array,
            Value::Record(_) => Self::Record,
        }
    }

    /// Check if this kind is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Number)
    }

    /// Check if this kind is a keyed collection
    pub const fn is_keyed(&self) -> bool {
        matches!(self, Self::Map | Self::Keyed)
    }

    /// Check if this kind is an ordered collection
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::List | Self::Array)
    }

    /// Check if this kind is a collection
    pub const fn is_collection(&self) -> bool {
        self.is_keyed() || self.is_ordered()
    }

    /// Check if values of this kind may hold encoded structured text
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::Text | Self::Bytes)
    }

    /// Get the name of this kind
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Map => "map",
            Self::Keyed => "keyed",
            Self::List => "list",
            Self::Array => "array",
            Self::Record => "record",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ScalarKind
// ---------------------------------------------------------------------------

/// Element type of a uniform scalar array
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Text,
}

impl ScalarKind {
    /// The scalar kind of a value, if it is a fixed-type scalar
    pub const fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Bool(_) => Self::Bool,
            Value::I8(_) => Self::I8,
            Value::I16(_) => Self::I16,
            Value::I32(_) => Self::I32,
            Value::I64(_) => Self::I64,
            Value::U8(_) => Self::U8,
            Value::U16(_) => Self::U16,
            Value::U32(_) => Self::U32,
            Value::U64(_) => Self::U64,
            Value::F32(_) => Self::F32,
            Value::F64(_) => Self::F64,
            Value::Text(_) => Self::Text,
            _ => return None,
        })
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::U8 | Self::U16 | Self::U32 | Self::U64
        )
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Text => "string",
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// KeyKind
// ---------------------------------------------------------------------------

/// Declared key type of a typed-key map
///
/// Text-keyed maps are represented by [`Value::Map`] and have no `KeyKind`;
/// a [`KeyedMap`](crate::KeyedMap) with `Dynamic` keys admits text keys
/// alongside any other scalar key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeyKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Dynamic,
}

impl KeyKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Dynamic => "any",
        }
    }

    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

impl Display for KeyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
