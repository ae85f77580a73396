//! Scalar targets.

use std::borrow::Cow;

use nebula_value::{F32Key, F64Key, KeyKind, MapKey, Number, Value, codec};

use super::{Coerce, CoerceCx};
use crate::error::NavResult;

/// Wide intermediate for numeric targets
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Bool(b) => Self::Int(i128::from(*b)),
            Value::I8(v) => Self::Int((*v).into()),
            Value::I16(v) => Self::Int((*v).into()),
            Value::I32(v) => Self::Int((*v).into()),
            Value::I64(v) => Self::Int((*v).into()),
            Value::U8(v) => Self::Int((*v).into()),
            Value::U16(v) => Self::Int((*v).into()),
            Value::U32(v) => Self::Int((*v).into()),
            Value::U64(v) => Self::Int((*v).into()),
            Value::F32(v) => Self::Float((*v).into()),
            Value::F64(v) => Self::Float(*v),
            Value::Number(n) => return Self::parse(n.as_str()),
            Value::Text(_) | Value::Bytes(_) => return Self::parse(value.as_text_like()?),
            _ => return None,
        })
    }

    /// Text with a fraction or exponent is a float; no whitespace allowed
    fn parse(text: &str) -> Option<Self> {
        if text.contains(['.', 'e', 'E']) {
            return text.parse::<f64>().ok().filter(|f| f.is_finite()).map(Self::Float);
        }
        match text.parse::<i128>() {
            Ok(i) => Some(Self::Int(i)),
            Err(_) => text.parse::<f64>().ok().filter(|f| f.is_finite()).map(Self::Float),
        }
    }

    /// Truncated toward zero; `None` for non-finite floats
    fn to_i128(self) -> Option<i128> {
        match self {
            Self::Int(i) => Some(i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i128),
            Self::Float(_) => None,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

macro_rules! coerce_int {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Coerce for $ty {
                fn target() -> Cow<'static, str> {
                    Cow::Borrowed(stringify!($ty))
                }

                fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
                    if let Value::$variant(v) = value {
                        return Ok(*v);
                    }
                    Numeric::of(value)
                        .and_then(Numeric::to_i128)
                        .and_then(|wide| Self::try_from(wide).ok())
                        .ok_or_else(|| cx.base_failed(value, stringify!($ty)))
                }
            }
        )*
    };
}

coerce_int!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
);

impl Coerce for f64 {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        if let Value::F64(v) = value {
            return Ok(*v);
        }
        Numeric::of(value)
            .map(Numeric::to_f64)
            .ok_or_else(|| cx.base_failed(value, "f64"))
    }
}

impl Coerce for f32 {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        if let Value::F32(v) = value {
            return Ok(*v);
        }
        let wide = Numeric::of(value)
            .map(Numeric::to_f64)
            .ok_or_else(|| cx.base_failed(value, "f32"))?;
        let narrow = wide as Self;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(cx.base_failed(value, "f32"));
        }
        Ok(narrow)
    }
}

impl Coerce for bool {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("bool")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        match value {
            Value::Bool(b) => return Ok(*b),
            Value::Text(_) | Value::Bytes(_) => {
                return match value.as_text_like().map(str::trim) {
                    Some("true") => Ok(true),
                    Some("false") => Ok(false),
                    _ => Err(cx.base_failed(value, "bool")),
                };
            }
            _ => {}
        }
        match Numeric::of(value) {
            Some(Numeric::Int(1)) => Ok(true),
            Some(Numeric::Int(0)) => Ok(false),
            Some(Numeric::Float(f)) if f == 1.0 => Ok(true),
            Some(Numeric::Float(f)) if f == 0.0 => Ok(false),
            _ => Err(cx.base_failed(value, "bool")),
        }
    }
}

impl Coerce for String {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        Ok(match value {
            Value::Text(s) => s.clone(),
            other => codec::render_text(other, cx.policy().use_custom_text_rendering_hook),
        })
    }
}

impl Coerce for char {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("char")
    }

    /// A one-character text, or a number naming a code point
    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        if let Value::Text(s) = value {
            let mut chars = s.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(cx.base_failed(value, "char")),
            };
        }
        Numeric::of(value)
            .and_then(|n| match n {
                Numeric::Int(i) => u32::try_from(i).ok(),
                Numeric::Float(_) => None,
            })
            .and_then(Self::from_u32)
            .ok_or_else(|| cx.base_failed(value, "char"))
    }
}

impl Coerce for Value {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("any")
    }

    fn coerce(value: &Value, _cx: &CoerceCx<'_>) -> NavResult<Self> {
        Ok(value.clone())
    }
}

impl Coerce for Number {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("number")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        if let Value::Number(n) = value {
            return Ok(n.clone());
        }
        let literal = match Numeric::of(value) {
            Some(Numeric::Int(i)) => i.to_string(),
            Some(Numeric::Float(f)) => f.to_string(),
            None => return Err(cx.base_failed(value, "number")),
        };
        Self::from_literal(literal).map_err(|e| cx.base_failed(value, "number").with_source(e))
    }
}

impl Coerce for F32Key {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("f32")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        f32::coerce(value, cx).map(Self)
    }
}

impl Coerce for F64Key {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("f64")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        f64::coerce(value, cx).map(Self)
    }
}

impl Coerce for MapKey {
    fn target() -> Cow<'static, str> {
        Cow::Borrowed("key")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        Self::from_value(value).map_err(|e| cx.base_failed(value, "key").with_source(e))
    }
}

/// Byte content: bytes verbatim, anything else as its text rendering
pub fn coerce_bytes(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Vec<u8>> {
    Ok(match value {
        Value::Bytes(bytes) => bytes.clone(),
        other => String::coerce(other, cx)?.into_bytes(),
    })
}

/// Coerce a lookup key to the declared key kind of a typed map
pub fn coerce_key(value: &Value, kind: KeyKind, cx: &CoerceCx<'_>) -> NavResult<MapKey> {
    Ok(match kind {
        KeyKind::Dynamic => MapKey::coerce(value, cx)?,
        KeyKind::Bool => MapKey::Bool(bool::coerce(value, cx)?),
        KeyKind::I8 => MapKey::I8(i8::coerce(value, cx)?),
        KeyKind::I16 => MapKey::I16(i16::coerce(value, cx)?),
        KeyKind::I32 => MapKey::I32(i32::coerce(value, cx)?),
        KeyKind::I64 => MapKey::I64(i64::coerce(value, cx)?),
        KeyKind::U8 => MapKey::U8(u8::coerce(value, cx)?),
        KeyKind::U16 => MapKey::U16(u16::coerce(value, cx)?),
        KeyKind::U32 => MapKey::U32(u32::coerce(value, cx)?),
        KeyKind::U64 => MapKey::U64(u64::coerce(value, cx)?),
        KeyKind::F32 => MapKey::F32(F32Key::coerce(value, cx)?),
        KeyKind::F64 => MapKey::F64(F64Key::coerce(value, cx)?),
    })
}
