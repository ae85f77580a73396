//! Hash implementations for Value
//!
//! **Important**: Value cannot directly implement Hash because floats don't
//! implement Eq (NaN != NaN in IEEE 754). [`HashableValue`] treats all NaN
//! values as equal and `-0.0` as `0.0`, and agrees with `Value`'s equality
//! everywhere else: maps hash independently of insertion order and records
//! hash by identity.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::key::{F32Key, F64Key};
use crate::core::value::Value;

/// Wrapper for a borrowed Value that can be used as HashMap/HashSet key
///
/// ```
/// use std::collections::HashSet;
/// use nebula_value::{HashableValue, Value};
///
/// let a = Value::from("key");
/// let b = Value::from(42_i64);
/// let mut set = HashSet::new();
/// set.insert(HashableValue(&a));
/// set.insert(HashableValue(&b));
/// assert!(set.contains(&HashableValue(&Value::from("key"))));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HashableValue<'a>(pub &'a Value);

impl Hash for HashableValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self.0, state);
    }
}

impl PartialEq for HashableValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        same(self.0, other.0)
    }
}

impl Eq for HashableValue<'_> {}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    // Hash the type discriminant first
    std::mem::discriminant(value).hash(state);

    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::I8(v) => v.hash(state),
        Value::I16(v) => v.hash(state),
        Value::I32(v) => v.hash(state),
        Value::I64(v) => v.hash(state),
        Value::U8(v) => v.hash(state),
        Value::U16(v) => v.hash(state),
        Value::U32(v) => v.hash(state),
        Value::U64(v) => v.hash(state),
        Value::F32(f) => F32Key(*f).hash(state),
        Value::F64(f) => F64Key(*f).hash(state),
        Value::Number(n) => n.hash(state),
        Value::Text(t) => t.hash(state),
        Value::Bytes(b) => b.hash(state),
        Value::Map(map) => {
            map.len().hash(state);
            unordered(map.iter(), state);
        }
        Value::Keyed(map) => {
            map.kind().hash(state);
            map.len().hash(state);
            unordered(map.iter(), state);
        }
        Value::List(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Array(array) => {
            array.kind().hash(state);
            array.len().hash(state);
            for item in array {
                hash_value(item, state);
            }
        }
        Value::Record(record) => {
            (Arc::as_ptr(record).cast::<()>() as usize).hash(state);
        }
    }
}

/// Order-independent hash of map entries: each entry is hashed on its own
/// and the results are summed.
fn unordered<'a, K, H>(entries: impl Iterator<Item = (&'a K, &'a Value)>, state: &mut H)
where
    K: Hash + ?Sized + 'a,
    H: Hasher,
{
    let mut acc: u64 = 0;
    for (key, value) in entries {
        let mut entry = DefaultHasher::new();
        key.hash(&mut entry);
        hash_value(value, &mut entry);
        acc = acc.wrapping_add(entry.finish());
    }
    acc.hash(state);
}

/// Equality used for hashing: like `==` except NaN equals NaN and signed
/// zeroes are equal.
fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::F32(x), Value::F32(y)) => F32Key(*x) == F32Key(*y),
        (Value::F64(x), Value::F64(y)) => F64Key(*x) == F64Key(*y),
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| same(v, w)))
        }
        (Value::Keyed(x), Value::Keyed(y)) => {
            x.kind() == y.kind()
                && x.len() == y.len()
                && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| same(v, w)))
        }
        (Value::List(x), Value::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| same(v, w))
        }
        (Value::Array(x), Value::Array(y)) => {
            x.kind() == y.kind()
                && x.len() == y.len()
                && x.iter().zip(y).all(|(v, w)| same(v, w))
        }
        _ => a == b,
    }
}

/// Remove repeated values, keeping the first occurrence of each
pub fn dedup_values(items: &mut Vec<Value>) {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(items.len());
        items.iter().map(|item| seen.insert(HashableValue(item))).collect()
    };
    let mut keep = keep.into_iter();
    items.retain(|_| keep.next().unwrap_or(true));
}
