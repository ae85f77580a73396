//! The Value enum.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::array::Array;
use crate::core::key::KeyedMap;
use crate::core::kind::{KeyKind, ScalarKind, ValueKind};
use crate::core::number::Number;
use crate::core::record::Record;

/// Keyed collection with text keys
pub type Map = IndexMap<String, Value>;

/// A loosely-typed value
///
/// Containers own their children; cloning a value deep-copies containers
/// while records are shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent or empty
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Numeric literal kept verbatim from decoding
    Number(Number),
    Text(String),
    Bytes(Vec<u8>),
    /// Keyed collection with text keys
    Map(Map),
    /// Keyed collection with a declared key kind
    Keyed(KeyedMap),
    /// Ordered collection with dynamic elements
    List(Vec<Value>),
    /// Ordered collection of uniform scalars
    Array(Array),
    Record(Arc<dyn Record>),
}

impl Value {
    /// Wrap a host record
    pub fn record(record: impl Record) -> Self {
        Self::Record(Arc::new(record))
    }

    pub const fn kind(&self) -> ValueKind {
        ValueKind::of(self)
    }

    /// Type name used in diagnostics and path traces
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::I8(_) => Cow::Borrowed("i8"),
            Self::I16(_) => Cow::Borrowed("i16"),
            Self::I32(_) => Cow::Borrowed("i32"),
            Self::I64(_) => Cow::Borrowed("i64"),
            Self::U8(_) => Cow::Borrowed("u8"),
            Self::U16(_) => Cow::Borrowed("u16"),
            Self::U32(_) => Cow::Borrowed("u32"),
            Self::U64(_) => Cow::Borrowed("u64"),
            Self::F32(_) => Cow::Borrowed("f32"),
            Self::F64(_) => Cow::Borrowed("f64"),
            Self::Number(_) => Cow::Borrowed("number"),
            Self::Text(_) => Cow::Borrowed("string"),
            Self::Bytes(_) => Cow::Borrowed("bytes"),
            Self::Map(_) => Cow::Borrowed("map<string, any>"),
            Self::Keyed(map) => Cow::Owned(format!("map<{}, any>", map.kind().name())),
            Self::List(_) => Cow::Borrowed("list<any>"),
            Self::Array(array) => Cow::Owned(format!("list<{}>", array.kind().name())),
            Self::Record(record) => Cow::Borrowed(record.type_name()),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Fixed-width or literal number
    pub const fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text content of a text or UTF-8 byte value
    pub fn as_text_like(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            Self::Array(array) => Some(array.items()),
            _ => None,
        }
    }

    /// Number of entries of a collection
    pub fn collection_len(&self) -> Option<usize> {
        match self {
            Self::Map(map) => Some(map.len()),
            Self::Keyed(map) => Some(map.len()),
            Self::List(items) => Some(items.len()),
            Self::Array(array) => Some(array.len()),
            _ => None,
        }
    }

    /// Declared key kind of a keyed collection, `None` for text keys
    pub fn key_kind(&self) -> Option<KeyKind> {
        match self {
            Self::Keyed(map) => Some(map.kind()),
            _ => None,
        }
    }

    /// Element kind of a uniform array
    pub fn element_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Array(array) => Some(array.kind()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Keyed(a), Self::Keyed(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyedMap, MapKey};
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::I64(1), "i64")]
    #[case(Value::from("x"), "string")]
    #[case(Value::Map(Map::new()), "map<string, any>")]
    #[case(Value::Keyed(KeyedMap::new(KeyKind::I32)), "map<i32, any>")]
    #[case(Value::Keyed(KeyedMap::new(KeyKind::Dynamic)), "map<any, any>")]
    #[case(Value::List(vec![]), "list<any>")]
    #[case(Value::from(vec![1_i32, 2]), "list<i32>")]
    #[case(Value::from(vec!["a", "b"]), "list<string>")]
    fn test_type_name(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.type_name(), expected);
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let mut a = Map::new();
        a.insert("x".into(), Value::I64(1));
        a.insert("y".into(), Value::I64(2));
        let mut b = Map::new();
        b.insert("y".into(), Value::I64(2));
        b.insert("x".into(), Value::I64(1));
        assert_eq!(Value::Map(a), Value::Map(b));
    }

    #[test]
    fn test_widths_are_distinct() {
        assert_ne!(Value::I32(1), Value::I64(1));
        assert_ne!(Value::from("1"), Value::I64(1));
        let keyed = KeyedMap::from_entries(KeyKind::I64, [(MapKey::I64(1), Value::Null)]).unwrap();
        assert_eq!(Value::Keyed(keyed.clone()).collection_len(), Some(1));
        assert_eq!(Value::Keyed(keyed).key_kind(), Some(KeyKind::I64));
    }
}
