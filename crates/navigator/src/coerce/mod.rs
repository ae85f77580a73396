//! Coercion engine.
//!
//! Turns a loosely-typed [`Value`] into a concrete Rust type. Every target
//! implements [`Coerce`]; collection targets are generic over their element
//! targets, so `Vec<IndexMap<String, i64>>` works without a dedicated
//! conversion. Numeric targets go through one wide intermediate
//! (`i128` or `f64`) and are range-checked at the end.
//!
//! Collection conversions follow the active [`ConversionPolicy`]: strict by
//! default (the first bad entry fails the call), or lenient (bad entries are
//! dropped and a single `WARN` event reports how many).
//!
//! ```rust
//! use indexmap::IndexMap;
//! use nebula_navigator::{ConversionPolicy, coerce::coerce};
//! use nebula_value::codec;
//!
//! let value = codec::decode(r#"{"a": "1", "b": 2.9}"#).unwrap();
//! let map: IndexMap<String, i64> = coerce(&value, &ConversionPolicy::default()).unwrap();
//! assert_eq!(map["a"], 1);
//! assert_eq!(map["b"], 2);
//! ```

mod collection;
mod record;
mod scalar;

use std::borrow::{Borrow, Cow};

use nebula_value::codec::{self, CodecError, Structure};
use nebula_value::Value;
use tracing::{Span, warn};

use crate::config::ConversionPolicy;
use crate::error::{NavError, NavResult};

pub use record::to_record;
pub use scalar::{coerce_bytes, coerce_key};

/// A type a [`Value`] can be coerced into
pub trait Coerce: Sized {
    /// Keyed-collection target; reads the keyed half of a `for_each` result
    const KEYED: bool = false;

    /// Target name used in error messages and diagnostics
    fn target() -> Cow<'static, str>;

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self>;
}

/// Context threaded through one coercion call
#[derive(Debug, Clone, Copy)]
pub struct CoerceCx<'a> {
    policy: &'a ConversionPolicy,
    location: &'a str,
    span: Option<&'a Span>,
}

impl<'a> CoerceCx<'a> {
    pub fn new(policy: &'a ConversionPolicy, location: &'a str) -> Self {
        Self {
            policy,
            location,
            span: None,
        }
    }

    /// Emit diagnostics inside `span`
    pub fn in_span(mut self, span: &'a Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn policy(&self) -> &ConversionPolicy {
        self.policy
    }

    pub fn location(&self) -> &str {
        self.location
    }

    /// Report entries dropped by a lenient conversion
    pub fn report_dropped(&self, dropped: usize, target: &str, policy: &'static str) {
        let _entered = self.span.map(Span::enter);
        warn!(
            dropped,
            target,
            policy,
            location = self.location,
            "partial conversion dropped entries"
        );
    }

    pub(crate) fn convert_failed(&self, message: impl Into<Cow<'static, str>>) -> NavError {
        NavError::convert_failed(self.location.to_owned(), message)
    }

    pub(crate) fn base_failed(&self, value: &Value, target: &str) -> NavError {
        NavError::base_convert_failed(
            self.location.to_owned(),
            format!("cannot convert {} to {target}", describe(value)),
        )
    }
}

/// Coerce `value` into `T` under `policy`
pub fn coerce<T: Coerce>(value: &Value, policy: &ConversionPolicy) -> NavResult<T> {
    T::coerce(value, &CoerceCx::new(policy, "coerce"))
}

/// `type "rendering"` for scalars, the type name for everything else
pub(crate) fn describe(value: &Value) -> String {
    if value.kind().is_collection() || matches!(value, Value::Record(_) | Value::Null) {
        value.type_name().into_owned()
    } else {
        format!("{} {:?}", value.type_name(), codec::render_text(value, false))
    }
}

/// The keyed or ordered collection a value stands for.
///
/// Collections of the wanted shape are used as-is; text and bytes are
/// decoded; records contribute their structural form.
pub(crate) fn structured<'v>(
    value: &'v Value,
    shape: Structure,
    target: &str,
    cx: &CoerceCx<'_>,
) -> NavResult<Cow<'v, Value>> {
    let fits = |v: &Value| match shape {
        Structure::Map => matches!(v, Value::Map(_) | Value::Keyed(_)),
        Structure::List => matches!(v, Value::List(_) | Value::Array(_)),
    };
    if fits(value) {
        return Ok(Cow::Borrowed(value));
    }
    let unsupported = || cx.convert_failed(format!("cannot convert {} to {target}", value.type_name()));
    let converted = match value {
        Value::Text(_) | Value::Bytes(_) => {
            let Some(text) = value.as_text_like() else {
                return Err(unsupported());
            };
            let decoded: Result<Value, CodecError> = match shape {
                Structure::Map => codec::decode_map(text).map(Value::Map),
                Structure::List => codec::decode_list(text).map(Value::List),
            };
            decoded.map_err(|e| unsupported().with_source(e))?
        }
        Value::Record(record) => record.to_value().ok_or_else(unsupported)?,
        _ => return Err(unsupported()),
    };
    if fits(&converted) {
        Ok(Cow::Owned(converted))
    } else {
        Err(unsupported())
    }
}

/// Entries of a keyed collection with keys as values
pub(crate) fn keyed_entries(value: &Value) -> Vec<(Value, &Value)> {
    match value {
        Value::Map(map) => map.iter().map(|(k, v)| (Value::Text(k.clone()), v)).collect(),
        Value::Keyed(map) => map.iter().map(|(k, v)| (k.to_value(), v)).collect(),
        _ => Vec::new(),
    }
}

/// Coerce every element, honoring the partial-failure flag
pub(crate) fn coerce_elements<T, I>(
    items: I,
    skip: bool,
    target: &str,
    cx: &CoerceCx<'_>,
) -> NavResult<Vec<T>>
where
    T: Coerce,
    I: IntoIterator,
    I::Item: Borrow<Value>,
{
    let mut out = Vec::new();
    let mut dropped = 0;
    for (i, item) in items.into_iter().enumerate() {
        match T::coerce(item.borrow(), cx) {
            Ok(v) => out.push(v),
            Err(_) if skip => dropped += 1,
            Err(e) => {
                return Err(cx.convert_failed(format!("element {i} of {target}")).with_source(e));
            }
        }
    }
    if dropped > 0 {
        cx.report_dropped(dropped, target, "skip_partial_array_conversion_failures");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_value::Map;

    #[test]
    fn test_structured_decodes_text() {
        let policy = ConversionPolicy::default();
        let cx = CoerceCx::new(&policy, "test");
        let value = Value::from(r#"{"a": 1}"#);
        let map = structured(&value, Structure::Map, "map", &cx).unwrap();
        assert!(matches!(map, Cow::Owned(Value::Map(_))));

        let err = structured(&Value::from("[1]"), Structure::Map, "map", &cx).unwrap_err();
        assert!(err.is(crate::ErrorKind::ValueConvertFailed));
        assert!(std::error::Error::source(&err).is_some());

        let borrowed = Value::Map(Map::new());
        assert!(matches!(
            structured(&borrowed, Structure::Map, "map", &cx).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Value::from("x")), "string \"x\"");
        assert_eq!(describe(&Value::List(vec![])), "list<any>");
    }
}
