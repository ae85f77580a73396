//! # Nebula Navigator
//!
//! Chainable navigation and coercion over loosely-typed values.
//!
//! A [`Navigator`] walks an unknown-shape [`Value`] (a decoded API payload,
//! a map of mixed types, text that itself holds JSON) by key or index and
//! finally coerces what it reached into a concrete Rust type:
//!
//! ```rust
//! use nebula_navigator::{Navigator, keys};
//!
//! let nav = Navigator::new(r#"{"users": [{"id": "7", "tags": "[\"a\", \"b\"]"}]}"#);
//!
//! let user = nav.get("users").index(0);
//! assert_eq!(user.branch().get("id").to_u32().unwrap(), 7);
//! assert_eq!(user.get("tags").to_list_str().unwrap(), vec!["a", "b"]);
//!
//! // Keys of different types in one call; 404 matches the text key "404".
//! let codes = Navigator::new(r#"{"codes": {"404": {"name": "not found"}}}"#);
//! let name = codes.get_many(keys!["codes", 404, "name"]).to_str().unwrap();
//! assert_eq!(name, "not found");
//! ```
//!
//! ## Errors
//!
//! The first failing step attaches a [`NavError`] to the navigator; later
//! chain calls pass it through and terminal calls return it. Panics raised
//! by caller code (closures, record hooks) are caught and reported as
//! [`ErrorKind::UnrecoverablePanic`].
//!
//! ## Conversion policy
//!
//! Collection coercions are strict unless the [`ConversionPolicy`] says
//! otherwise. The policy comes from the navigator
//! ([`Navigator::with_policy`]) or from the process-wide instance
//! ([`ConversionPolicy::install`]).
//!
//! ## Concurrency
//!
//! Navigators are `Send + Sync` and share their [`Document`]. Individual
//! reads and writes are synchronised; sequences of calls are not, so callers
//! mutating one document from several threads must order their calls.

pub mod coerce;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
mod navigator;
pub mod trace;

pub use coerce::{Coerce, CoerceCx};
pub use config::{ConversionPolicy, PolicyError};
pub use dispatch::{Dispatch, EachShape, Variant, classify};
pub use document::Document;
pub use error::{ErrorKind, NavError, NavResult};
pub use nebula_value::Value;
pub use navigator::Navigator;
pub use trace::{PathStep, PathTrace, Segment};

/// Build a list of keys of mixed types for [`Navigator::get_many`]
///
/// ```rust
/// use nebula_navigator::{Value, keys};
///
/// let keys = keys!["a", 1_i64, true];
/// assert_eq!(keys[1], Value::I64(1));
/// ```
#[macro_export]
macro_rules! keys {
    ($($key:expr),* $(,)?) => {
        [$($crate::Value::from($key)),*]
    };
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Coerce, ConversionPolicy, Document, ErrorKind, NavError, NavResult, Navigator, Value, keys,
    };
}
