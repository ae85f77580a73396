//! Core building blocks of the value model.
//!
//! ## Core Components
//!
//! ### [`value`] - The Value enum
//!
//! The central [`Value`](value::Value) enum covers null, booleans, fixed-width
//! numbers, numeric literals, text, bytes, keyed and ordered collections and
//! opaque host records.
//!
//! ### [`kind`] - Type classification
//!
//! [`ValueKind`](kind::ValueKind), plus the element kind of uniform arrays and
//! the declared key kind of typed-key maps.
//!
//! ### [`key`] / [`array`] - Typed collections
//!
//! Typed-key maps with hashable float keys, and uniform scalar arrays.
//!
//! ### [`hash`] - Hashing
//!
//! A hash-key wrapper consistent with value equality, used for deduplication.
pub mod array;
pub mod convert;
pub mod display;
pub mod hash;
pub mod key;
pub mod kind;
pub mod number;
pub mod record;
pub mod serde;
pub mod value;

pub use array::Array;
pub use hash::{HashableValue, dedup_values};
pub use key::{F32Key, F64Key, KeyedMap, MapKey};
pub use kind::{KeyKind, ScalarKind, ValueKind};
pub use number::Number;
pub use record::Record;
pub use value::{Map, Value};
