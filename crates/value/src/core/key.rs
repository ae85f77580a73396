//! Map keys for typed-key collections.
//!
//! Floats cannot be hash keys directly because `NaN != NaN`. [`F32Key`] and
//! [`F64Key`] treat all NaN values as equal and normalise `-0.0` to `0.0`.

use core::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::core::kind::KeyKind;
use crate::error::{ValueError, ValueResult};
use crate::Value;

macro_rules! float_key {
    ($name:ident, $float:ty) => {
        #[doc = concat!("Hashable `", stringify!($float), "` map key")]
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub $float);

        impl $name {
            pub const fn get(self) -> $float {
                self.0
            }

            fn canonical_bits(self) -> u64 {
                let zero: $float = 0.0;
                if self.0.is_nan() {
                    u64::from(<$float>::NAN.to_bits())
                } else if self.0 == zero {
                    u64::from(zero.to_bits())
                } else {
                    u64::from(self.0.to_bits())
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.canonical_bits() == other.canonical_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.canonical_bits().hash(state);
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

float_key!(F32Key, f32);
float_key!(F64Key, f64);

/// Key of a [`KeyedMap`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(F32Key),
    F64(F64Key),
    Text(String),
}

impl MapKey {
    /// Build a key from a scalar value.
    ///
    /// Numeric literals become the narrowest of `i64`, `u64` or `f64` that
    /// holds them. Collections, records and null are rejected.
    pub fn from_value(value: &Value) -> ValueResult<Self> {
        Ok(match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I8(v) => Self::I8(*v),
            Value::I16(v) => Self::I16(*v),
            Value::I32(v) => Self::I32(*v),
            Value::I64(v) => Self::I64(*v),
            Value::U8(v) => Self::U8(*v),
            Value::U16(v) => Self::U16(*v),
            Value::U32(v) => Self::U32(*v),
            Value::U64(v) => Self::U64(*v),
            Value::F32(v) => Self::F32(F32Key(*v)),
            Value::F64(v) => Self::F64(F64Key(*v)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Self::U64(u)
                } else if let Some(f) = n.as_f64() {
                    Self::F64(F64Key(f))
                } else {
                    return Err(ValueError::invalid_number(n.as_str()));
                }
            }
            Value::Text(s) => Self::Text(s.clone()),
            other => return Err(ValueError::unhashable_key(other.type_name())),
        })
    }

    /// The key as a value
    pub fn to_value(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::I8(v) => Value::I8(*v),
            Self::I16(v) => Value::I16(*v),
            Self::I32(v) => Value::I32(*v),
            Self::I64(v) => Value::I64(*v),
            Self::U8(v) => Value::U8(*v),
            Self::U16(v) => Value::U16(*v),
            Self::U32(v) => Value::U32(*v),
            Self::U64(v) => Value::U64(*v),
            Self::F32(v) => Value::F32(v.0),
            Self::F64(v) => Value::F64(v.0),
            Self::Text(s) => Value::Text(s.clone()),
        }
    }

    /// The fixed key kind, `None` for text keys
    pub const fn key_kind(&self) -> Option<KeyKind> {
        Some(match self {
            Self::Bool(_) => KeyKind::Bool,
            Self::I8(_) => KeyKind::I8,
            Self::I16(_) => KeyKind::I16,
            Self::I32(_) => KeyKind::I32,
            Self::I64(_) => KeyKind::I64,
            Self::U8(_) => KeyKind::U8,
            Self::U16(_) => KeyKind::U16,
            Self::U32(_) => KeyKind::U32,
            Self::U64(_) => KeyKind::U64,
            Self::F32(_) => KeyKind::F32,
            Self::F64(_) => KeyKind::F64,
            Self::Text(_) => return None,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.key_kind().map_or("string", |kind| kind.name())
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

macro_rules! impl_map_key_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MapKey {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_map_key_from!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

// ============================================================================
// KeyedMap
// ============================================================================

/// Keyed collection with a declared key kind
///
/// Every key must match the declared kind; `KeyKind::Dynamic` admits any
/// scalar key including text. Iteration follows insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedMap {
    kind: KeyKind,
    entries: IndexMap<MapKey, Value>,
}

impl KeyedMap {
    pub fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Build a map from entries, rejecting keys of the wrong kind
    pub fn from_entries<K, I>(kind: KeyKind, entries: I) -> ValueResult<Self>
    where
        K: Into<MapKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = Self::new(kind);
        for (key, value) in entries {
            map.insert(key.into(), value)?;
        }
        Ok(map)
    }

    pub const fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Whether `key` may be stored in this map
    pub fn admits(&self, key: &MapKey) -> bool {
        self.kind.is_dynamic() || key.key_kind() == Some(self.kind)
    }

    /// Insert an entry, returning the previous value for the key
    pub fn insert(&mut self, key: MapKey, value: Value) -> ValueResult<Option<Value>> {
        if !self.admits(&key) {
            return Err(ValueError::key_kind_mismatch(self.kind.name(), key.type_name()));
        }
        Ok(self.entries.insert(key, value))
    }

    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &MapKey) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, MapKey, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, MapKey, Value> {
        self.entries.keys()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, MapKey, Value> {
        self.entries.values_mut()
    }

    pub fn into_entries(self) -> IndexMap<MapKey, Value> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a KeyedMap {
    type Item = (&'a MapKey, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, MapKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_keys_normalise_zero_and_nan() {
        assert_eq!(F64Key(0.0), F64Key(-0.0));
        assert_eq!(F64Key(f64::NAN), F64Key(f64::NAN));
        assert_ne!(F32Key(1.5), F32Key(2.5));
    }

    #[test]
    fn test_map_key_from_value() {
        assert_eq!(MapKey::from_value(&Value::I32(7)).unwrap(), MapKey::I32(7));
        assert_eq!(
            MapKey::from_value(&Value::from("k")).unwrap(),
            MapKey::Text("k".into())
        );
        let lit = Value::Number("12".parse().unwrap());
        assert_eq!(MapKey::from_value(&lit).unwrap(), MapKey::I64(12));
        assert!(MapKey::from_value(&Value::List(vec![])).is_err());
        assert!(MapKey::from_value(&Value::Null).is_err());
    }

    #[test]
    fn test_keyed_map_rejects_wrong_kind() {
        let mut map = KeyedMap::new(KeyKind::I64);
        assert!(map.insert(MapKey::I64(1), Value::from("a")).is_ok());
        let err = map.insert(MapKey::from("x"), Value::Null).unwrap_err();
        assert_eq!(err, ValueError::key_kind_mismatch("i64", "string"));

        let mut dynamic = KeyedMap::new(KeyKind::Dynamic);
        assert!(dynamic.insert(MapKey::from("x"), Value::Null).is_ok());
        assert!(dynamic.insert(MapKey::Bool(true), Value::Null).is_ok());
        assert_eq!(dynamic.len(), 2);
    }
}
