//! # nebula-value
//!
//! Loosely-typed value model for Nebula's data navigator.
//!
//! A [`Value`] is whatever a caller happens to be holding mid-navigation: a
//! scalar, a numeric literal decoded from JSON, a keyed or ordered
//! collection, a host record, or text that may itself encode a structure.
//! The [`codec`] module is the bridge between text and structure.
//!
//! ```rust
//! use nebula_value::{codec, Value};
//!
//! let value = codec::decode(r#"{"users": [{"id": 1}, {"id": 2}]}"#).unwrap();
//! let users = &value.as_map().unwrap()["users"];
//! assert_eq!(users.type_name(), "list<any>");
//! assert_eq!(users.collection_len(), Some(2));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod core;
pub mod error;

pub use crate::core::{
    Array, F32Key, F64Key, HashableValue, KeyKind, KeyedMap, Map, MapKey, Number, Record,
    ScalarKind, Value, ValueKind, dedup_values,
};
pub use error::{ValueError, ValueResult};

/// Prelude for common imports
pub mod prelude {
    pub use crate::codec;
    pub use crate::{
        Array, KeyKind, KeyedMap, Map, MapKey, Number, Record, ScalarKind, Value, ValueError,
        ValueKind,
    };
}
