//! Property-based tests for the text-structure bridge.

use nebula_value::{HashableValue, Value, codec, dedup_values};
use proptest::prelude::*;

/// JSON documents without strings that themselves encode structures
fn json_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        (-1.0e6..1.0e6_f64).prop_map(serde_json::Value::from),
        "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    json_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

fn json_object() -> impl Strategy<Value = String> {
    prop::collection::btree_map("[a-z]{1,6}", json_value(), 0..6).prop_map(|m| {
        serde_json::to_string(&serde_json::Value::Object(m.into_iter().collect()))
            .expect("serializable")
    })
}

proptest! {
    #[test]
    fn decode_encode_round_trip(text in json_object()) {
        let decoded = codec::decode_map(&text).unwrap();
        let encoded = codec::encode(&Value::Map(decoded.clone())).unwrap();
        let again = codec::decode_map(&encoded).unwrap();
        prop_assert_eq!(Value::Map(again), Value::Map(decoded));
    }

    #[test]
    fn decoded_objects_are_hinted_as_maps(text in json_object()) {
        prop_assert_eq!(codec::structure_hint(&text), Some(codec::Structure::Map));
        prop_assert!(codec::decode_structure(&Value::Text(text)).is_some());
    }

    #[test]
    fn dedup_is_idempotent(items in prop::collection::vec(0..5_i64, 0..20)) {
        let mut once: Vec<Value> = items.into_iter().map(Value::I64).collect();
        dedup_values(&mut once);
        let mut twice = once.clone();
        dedup_values(&mut twice);
        prop_assert_eq!(&once, &twice);

        let unique: std::collections::HashSet<_> = once.iter().map(HashableValue).collect();
        prop_assert_eq!(unique.len(), once.len());
    }
}
