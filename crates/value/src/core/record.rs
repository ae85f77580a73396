//! Opaque host records.

use core::fmt;

use crate::Value;

/// A host object carried inside a [`Value`]
///
/// Records are opaque to navigation. They are rendered to text through
/// [`describe`](Record::describe) when the caller enables the custom
/// rendering hook, and encoded or converted through
/// [`to_value`](Record::to_value).
///
/// ```rust
/// use nebula_value::{Record, Value};
///
/// #[derive(Debug)]
/// struct Point(i64, i64);
///
/// impl Record for Point {
///     fn type_name(&self) -> &'static str {
///         "Point"
///     }
///
///     fn describe(&self) -> Option<String> {
///         Some(format!("({}, {})", self.0, self.1))
///     }
/// }
///
/// let value = Value::record(Point(1, 2));
/// assert_eq!(value.type_name(), "Point");
/// ```
pub trait Record: fmt::Debug + Send + Sync + 'static {
    /// Name shown in diagnostics and path traces
    fn type_name(&self) -> &'static str;

    /// Custom text rendering
    fn describe(&self) -> Option<String> {
        None
    }

    /// Structural form used for encoding and record conversion
    fn to_value(&self) -> Option<Value> {
        None
    }
}
