//! Text-structure bridge.
//!
//! Decides whether a text value is an encoded JSON object or array, decodes
//! it into a [`Value`] with numbers kept as literals, and encodes values back
//! to compact JSON text. [`render_text`] is the plain-text rendering used by
//! string coercions.
//!
//! ```rust
//! use nebula_value::codec::{self, Structure};
//!
//! assert_eq!(codec::structure_hint(" [1, 2] "), Some(Structure::List));
//! let map = codec::decode_map(r#"{"id": 7}"#).unwrap();
//! assert_eq!(codec::encode(&map["id"]).unwrap(), "7");
//! ```

use thiserror::Error;
use tracing::trace;

use crate::core::value::{Map, Value};
use crate::error::ValueError;

/// Errors from decoding or encoding structured text
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text is not valid JSON
    #[error("Invalid structured text: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Valid JSON of the wrong shape
    #[error("Expected {expected}, decoded {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: String,
    },

    /// A value with no structured-text form
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Shape suggested by the outer delimiters of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Map,
    List,
}

/// Cheap syntactic pre-check on the trimmed text's outer delimiters
pub fn structure_hint(text: &str) -> Option<Structure> {
    let trimmed = text.trim();
    if trimmed.len() < 2 {
        return None;
    }
    match (trimmed.as_bytes()[0], trimmed.as_bytes()[trimmed.len() - 1]) {
        (b'{', b'}') => Some(Structure::Map),
        (b'[', b']') => Some(Structure::List),
        _ => None,
    }
}

/// Decode any JSON document
pub fn decode(text: &str) -> Result<Value, CodecError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

/// Decode a JSON object
pub fn decode_map(text: &str) -> Result<Map, CodecError> {
    match decode(text)? {
        Value::Map(map) => Ok(map),
        other => Err(CodecError::UnexpectedShape {
            expected: "object",
            found: other.type_name().into_owned(),
        }),
    }
}

/// Decode a JSON array
pub fn decode_list(text: &str) -> Result<Vec<Value>, CodecError> {
    match decode(text)? {
        Value::List(items) => Ok(items),
        other => Err(CodecError::UnexpectedShape {
            expected: "array",
            found: other.type_name().into_owned(),
        }),
    }
}

/// Decode text or UTF-8 bytes holding an object or array.
///
/// Returns `None` for anything else, including text that looks structured
/// but fails to parse.
pub fn decode_structure(value: &Value) -> Option<Value> {
    let text = value.as_text_like()?;
    let decoded = match structure_hint(text)? {
        Structure::Map => decode_map(text).map(Value::Map),
        Structure::List => decode_list(text).map(Value::List),
    };
    match decoded {
        Ok(value) => Some(value),
        Err(error) => {
            trace!(%error, "text looks structured but does not decode");
            None
        }
    }
}

/// Encode a value as compact JSON text
pub fn encode(value: &Value) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&value.to_json()?)?)
}

/// Render a value as plain text.
///
/// Null is empty, scalars use their canonical decimal form, literals and
/// text are verbatim, bytes are lossy UTF-8. Records use their own
/// description when `use_hook` is set and they provide one; structures are
/// encoded, falling back to the type name when they cannot be.
pub fn render_text(value: &Value, use_hook: bool) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::I8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::Number(n) => n.as_str().to_owned(),
        Value::Text(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Record(record) => {
            if use_hook && let Some(text) = record.describe() {
                return text;
            }
            encode(value).unwrap_or_else(|_| record.type_name().to_owned())
        }
        Value::Map(_) | Value::Keyed(_) | Value::List(_) | Value::Array(_) => {
            encode(value).unwrap_or_else(|_| value.type_name().into_owned())
        }
    }
}
