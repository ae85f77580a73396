//! Arbitrary-precision numeric literal.
//!
//! Numbers decoded from structured text keep their literal form so that
//! large integers and long decimals survive until a caller picks a width.

use core::fmt;
use core::str::FromStr;

use crate::error::{ValueError, ValueResult};

/// A numeric literal preserved verbatim from decoding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Create a number from a literal, validating it against the JSON number grammar
    pub fn from_literal(literal: impl Into<String>) -> ValueResult<Self> {
        let literal = literal.into();
        if is_number_literal(&literal) {
            Ok(Self(literal))
        } else {
            Err(ValueError::invalid_number(literal))
        }
    }

    /// The literal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the literal has no fraction or exponent
    pub fn is_integer(&self) -> bool {
        !self.0.contains(['.', 'e', 'E'])
    }

    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() { self.0.parse().ok() } else { None }
    }

    pub fn as_u64(&self) -> Option<u64> {
        if self.is_integer() { self.0.parse().ok() } else { None }
    }

    /// The literal as a finite `f64`
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Check `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_number_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

impl FromStr for Number {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_literal(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! impl_number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

impl_number_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<serde_json::Number> for Number {
    fn from(value: serde_json::Number) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<&Number> for serde_json::Number {
    type Error = ValueError;

    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        Self::from_str(&value.0).map_err(|_| ValueError::invalid_number(value.0.clone()))
    }
}
