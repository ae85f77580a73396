//! `From` conversions into [`Value`].

use crate::core::array::Array;
use crate::core::key::KeyedMap;
use crate::core::kind::ScalarKind;
use crate::core::number::Number;
use crate::core::value::{Map, Value};

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident / $kind:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<Vec<$ty>> for Value {
                fn from(items: Vec<$ty>) -> Self {
                    Self::Array(Array::from(items))
                }
            }

            impl From<Vec<$ty>> for Array {
                fn from(items: Vec<$ty>) -> Self {
                    Array::from_uniform(ScalarKind::$kind, items.into_iter().map(Value::$variant).collect())
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool / Bool,
    i8 => I8 / I8,
    i16 => I16 / I16,
    i32 => I32 / I32,
    i64 => I64 / I64,
    u16 => U16 / U16,
    u32 => U32 / U32,
    u64 => U64 / U64,
    f32 => F32 / F32,
    f64 => F64 / F64,
    String => Text / Text,
);

// `Vec<u8>` is a byte sequence, not an array of `u8`.
impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Self::from(items.into_iter().map(str::to_owned).collect::<Vec<_>>())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<KeyedMap> for Value {
    fn from(map: KeyedMap) -> Self {
        Self::Keyed(map)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
