//! Value classification.
//!
//! [`classify`] maps a value to the closed set of navigator variants. Each
//! navigation step re-classifies the value it reaches, so the operations
//! available at any point depend only on what was actually found there.

use std::fmt;

use nebula_value::{KeyKind, ScalarKind, Value, codec};

/// Primary output shape of a `for_each` result
///
/// The ordered output is primary when it has values; the keyed output
/// otherwise. `Empty` when the closure produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EachShape {
    Keyed,
    Ordered,
    Empty,
}

/// Navigator variant selected for a reached value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Keyed collection with text keys
    TextKeyed,
    /// Keyed collection with a declared key kind
    TypedKeyed(KeyKind),
    /// Ordered collection whose elements may be navigated further
    NavigableOrdered,
    /// Uniform array of non-text scalars
    BasicOrdered(ScalarKind),
    /// Anything that cannot be navigated into
    Scalar,
    /// Output of `for_each`
    EachResult(EachShape),
    /// Absent or unsupported value
    ErrorSentinel,
}

impl Variant {
    pub const fn is_keyed(self) -> bool {
        matches!(
            self,
            Self::TextKeyed | Self::TypedKeyed(_) | Self::EachResult(EachShape::Keyed)
        )
    }

    pub const fn is_ordered(self) -> bool {
        matches!(
            self,
            Self::NavigableOrdered | Self::BasicOrdered(_) | Self::EachResult(EachShape::Ordered)
        )
    }

    pub const fn is_each_result(self) -> bool {
        matches!(self, Self::EachResult(_))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::TextKeyed => "text-keyed map",
            Self::TypedKeyed(_) => "typed-keyed map",
            Self::NavigableOrdered => "navigable list",
            Self::BasicOrdered(_) => "basic list",
            Self::Scalar => "scalar",
            Self::EachResult(EachShape::Keyed) => "for_each map result",
            Self::EachResult(EachShape::Ordered) => "for_each list result",
            Self::EachResult(EachShape::Empty) => "empty for_each result",
            Self::ErrorSentinel => "unsupported object",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypedKeyed(kind) => write!(f, "{} ({})", self.name(), kind.name()),
            Self::BasicOrdered(kind) => write!(f, "{} ({})", self.name(), kind.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Result of classifying a value
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub variant: Variant,
    /// The structure decoded from a text or byte value, if any
    pub decoded: Option<Value>,
}

/// Pick the variant for `value`.
///
/// Text and UTF-8 bytes that encode an object or array are decoded and the
/// decoded structure is classified instead. Never fails; `Null` yields the
/// error sentinel. `EachResult` is never produced here.
pub fn classify(value: &Value) -> Dispatch {
    if let Some(decoded) = codec::decode_structure(value) {
        return Dispatch {
            variant: variant_of(&decoded),
            decoded: Some(decoded),
        };
    }
    Dispatch {
        variant: variant_of(value),
        decoded: None,
    }
}

fn variant_of(value: &Value) -> Variant {
    match value {
        Value::Null => Variant::ErrorSentinel,
        Value::Map(_) => Variant::TextKeyed,
        Value::Keyed(map) => Variant::TypedKeyed(map.kind()),
        Value::List(_) => Variant::NavigableOrdered,
        Value::Array(array) => match array.kind() {
            ScalarKind::Text => Variant::NavigableOrdered,
            kind => Variant::BasicOrdered(kind),
        },
        _ => Variant::Scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_value::{KeyedMap, Map};
    use rstest::rstest;

    #[rstest]
    #[case(Value::Map(Map::new()), Variant::TextKeyed)]
    #[case(Value::Keyed(KeyedMap::new(KeyKind::I32)), Variant::TypedKeyed(KeyKind::I32))]
    #[case(Value::Keyed(KeyedMap::new(KeyKind::Dynamic)), Variant::TypedKeyed(KeyKind::Dynamic))]
    #[case(Value::List(vec![]), Variant::NavigableOrdered)]
    #[case(Value::from(vec!["a"]), Variant::NavigableOrdered)]
    #[case(Value::from(vec![1_i64]), Variant::BasicOrdered(ScalarKind::I64))]
    #[case(Value::I64(1), Variant::Scalar)]
    #[case(Value::from("plain"), Variant::Scalar)]
    #[case(Value::from("{broken"), Variant::Scalar)]
    #[case(Value::Null, Variant::ErrorSentinel)]
    fn test_classify(#[case] value: Value, #[case] expected: Variant) {
        let dispatch = classify(&value);
        assert_eq!(dispatch.variant, expected);
        assert_eq!(dispatch.decoded, None);
    }

    #[rstest]
    #[case(r#"{"a": 1}"#, Variant::TextKeyed)]
    #[case("[1, 2]", Variant::NavigableOrdered)]
    fn test_classify_decodes_text(#[case] text: &str, #[case] expected: Variant) {
        let dispatch = classify(&Value::from(text));
        assert_eq!(dispatch.variant, expected);
        assert!(dispatch.decoded.is_some());

        let bytes = classify(&Value::Bytes(text.as_bytes().to_vec()));
        assert_eq!(bytes.variant, expected);
    }

    #[test]
    fn test_variant_shapes() {
        assert!(Variant::EachResult(EachShape::Keyed).is_keyed());
        assert!(Variant::BasicOrdered(ScalarKind::Bool).is_ordered());
        assert!(!Variant::EachResult(EachShape::Empty).is_ordered());
        assert!(!Variant::EachResult(EachShape::Empty).is_keyed());
        assert!(!Variant::Scalar.is_keyed());
        assert_eq!(
            Variant::TypedKeyed(KeyKind::U16).to_string(),
            "typed-keyed map (u16)"
        );
    }
}
