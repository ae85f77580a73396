//! Record targets.
//!
//! A reached value is mapped onto a caller-defined type through serde: the
//! value is encoded as a `serde_json::Value` and deserialized into `T`.
//! Field matching is exactly what `T`'s `Deserialize` impl accepts, so
//! `#[serde(rename)]`, `#[serde(default)]` and friends apply.

use std::borrow::Cow;

use nebula_value::{Value, codec};
use serde::de::DeserializeOwned;

use super::CoerceCx;
use crate::error::NavResult;

pub fn to_record<T: DeserializeOwned>(value: &Value, cx: &CoerceCx<'_>) -> NavResult<T> {
    let target = std::any::type_name::<T>();
    let source: Cow<'_, Value> = match value {
        Value::Text(_) | Value::Bytes(_) => {
            codec::decode_structure(value).map_or(Cow::Borrowed(value), Cow::Owned)
        }
        Value::Record(record) => Cow::Owned(record.to_value().ok_or_else(|| {
            cx.convert_failed(format!(
                "record {} has no structural form for {target}",
                record.type_name()
            ))
        })?),
        other => Cow::Borrowed(other),
    };
    let json = source.to_json().map_err(|e| {
        cx.convert_failed(format!("cannot encode {} for {target}", source.type_name()))
            .with_source(e)
    })?;
    serde_json::from_value(json).map_err(|e| {
        cx.convert_failed(format!("cannot map {} onto {target}", source.type_name()))
            .with_source(e)
    })
}
