//! Property-based tests for navigation, for_each and mutation.

use std::collections::BTreeMap;

use nebula_navigator::{ErrorKind, Navigator};
use nebula_value::{Value, codec};
use proptest::prelude::*;

fn keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..6)
}

/// `{"k1": {"k2": ... {"kn": leaf}}}`
fn nest(path: &[String], leaf: serde_json::Value) -> serde_json::Value {
    path.iter().rev().fold(leaf, |inner, key| {
        let mut object = serde_json::Map::new();
        object.insert(key.clone(), inner);
        serde_json::Value::Object(object)
    })
}

fn decoded(json: &serde_json::Value) -> Value {
    codec::decode(&json.to_string()).unwrap()
}

proptest! {
    #[test]
    fn get_then_coerce_returns_the_stored_number(
        entries in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 1..8),
        as_text in any::<bool>(),
    ) {
        let object: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(k, v)| {
                let v = if as_text { serde_json::Value::from(v.to_string()) } else { serde_json::Value::from(*v) };
                (k.clone(), v)
            })
            .collect();
        let root = Navigator::new(decoded(&serde_json::Value::Object(object)));
        for (key, expected) in &entries {
            prop_assert_eq!(root.branch().get(key.as_str()).to_i64().unwrap(), *expected);
        }
    }

    #[test]
    fn get_many_equals_chained_gets(path in keys(), leaf in any::<i32>(), embed in any::<bool>()) {
        let mut doc = nest(&path, serde_json::Value::from(leaf));
        if embed {
            doc = serde_json::json!({ "wrapped": doc.to_string() });
        }
        let start = || {
            let nav = Navigator::new(decoded(&doc));
            if embed { nav.get("wrapped") } else { nav }
        };

        let many = start().get_many(path.iter().map(String::as_str));
        let chained = path.iter().fold(start(), |nav, key| nav.get(key.as_str()));
        prop_assert_eq!(many.val().unwrap(), chained.val().unwrap());
        prop_assert_eq!(many.print_path(), chained.print_path());
        prop_assert_eq!(many.to_i32().unwrap(), leaf);
    }

    #[test]
    fn index_is_valid_below_length(items in prop::collection::vec(any::<i64>(), 0..10), index in 0..20_usize) {
        let nav = Navigator::new(Value::List(items.iter().copied().map(Value::I64).collect())).index(index);
        if index < items.len() {
            prop_assert_eq!(nav.to_i64().unwrap(), items[index]);
        } else {
            prop_assert!(nav.error().unwrap().is(ErrorKind::ListIndexIllegal));
        }
    }

    #[test]
    fn uniq_is_idempotent(items in prop::collection::vec(0..6_i64, 0..24)) {
        let once = Navigator::new(Value::List(items.into_iter().map(Value::I64).collect())).uniq();
        let twice = once.branch().uniq();
        prop_assert_eq!(once.val().unwrap(), twice.val().unwrap());
    }

    #[test]
    fn for_each_keeps_the_entries_not_dropped(
        items in prop::collection::vec(any::<i64>(), 0..16),
        skip in prop::collection::vec(any::<bool>(), 16),
    ) {
        let kept = items.iter().zip(&skip).filter(|(_, d)| !**d).count();
        let out = Navigator::new(Value::List(items.into_iter().map(Value::I64).collect()))
            .for_each(|i, _, v| if skip[i] { (None, None) } else { (None, Some(v.clone())) });
        prop_assert_eq!(out.to_list().unwrap().len(), kept);
    }

    #[test]
    fn set_all_as_map_leaves_no_encoded_maps(
        entries in prop::collection::btree_map("[a-z]{1,6}", prop::collection::btree_map("[a-z]{1,6}", any::<u8>(), 0..4), 1..6),
    ) {
        let object: BTreeMap<&String, String> = entries
            .iter()
            .map(|(k, inner)| (k, serde_json::to_string(inner).unwrap()))
            .collect();
        let mut root = Navigator::new(codec::decode(&serde_json::to_string(&object).unwrap()).unwrap());
        let value = root.set_all_as_map().unwrap();
        let map = value.as_map().unwrap();
        prop_assert_eq!(map.len(), entries.len());
        prop_assert!(map.values().all(|v| matches!(v, Value::Map(_))));
    }
}
