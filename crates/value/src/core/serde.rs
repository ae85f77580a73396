//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! `serde_json` is built with `arbitrary_precision`, so JSON numbers carry
//! their literal text and map onto [`Value::Number`] without loss.

use std::str::FromStr;

use base64::Engine as _;
use serde_json::Value as JsonValue;

use crate::core::number::Number;
use crate::core::value::{Map, Value};
use crate::error::{ValueError, ValueResult};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(Number::from(n)),
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect::<Map>(),
            ),
        }
    }
}

fn float_to_json(literal: String, finite: bool) -> ValueResult<JsonValue> {
    if !finite {
        return Ok(JsonValue::Null);
    }
    serde_json::Number::from_str(&literal)
        .map(JsonValue::Number)
        .map_err(|_| ValueError::invalid_number(literal))
}

impl Value {
    /// Structural JSON form of this value.
    ///
    /// Bytes become base64 text, non-finite floats become `null`, typed map
    /// keys are rendered as text. Records need a structural form.
    pub fn to_json(&self) -> ValueResult<JsonValue> {
        Ok(match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::I8(v) => JsonValue::from(*v),
            Self::I16(v) => JsonValue::from(*v),
            Self::I32(v) => JsonValue::from(*v),
            Self::I64(v) => JsonValue::from(*v),
            Self::U8(v) => JsonValue::from(*v),
            Self::U16(v) => JsonValue::from(*v),
            Self::U32(v) => JsonValue::from(*v),
            Self::U64(v) => JsonValue::from(*v),
            Self::F32(v) => float_to_json(v.to_string(), v.is_finite())?,
            Self::F64(v) => float_to_json(v.to_string(), v.is_finite())?,
            Self::Number(n) => JsonValue::Number(serde_json::Number::try_from(n)?),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Bytes(b) => {
                JsonValue::String(base64::engine::general_purpose::STANDARD.encode(b))
            }
            Self::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<ValueResult<_>>()?,
            ),
            Self::Keyed(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.to_string(), v.to_json()?)))
                    .collect::<ValueResult<_>>()?,
            ),
            Self::List(items) => JsonValue::Array(
                items.iter().map(Self::to_json).collect::<ValueResult<_>>()?,
            ),
            Self::Array(array) => JsonValue::Array(
                array.iter().map(Self::to_json).collect::<ValueResult<_>>()?,
            ),
            Self::Record(record) => match record.to_value() {
                Some(value) => value.to_json()?,
                None => return Err(ValueError::not_encodable(record.type_name())),
            },
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::Serialize as _;

        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
