//! Coercion tests
//!
//! Terminal conversions, the partial-failure policy and record mapping.

mod common;

use common::{nav, with_warnings};
use indexmap::IndexMap;
use nebula_navigator::{ConversionPolicy, ErrorKind, Navigator};
use nebula_value::{F64Key, MapKey, Value, codec};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;

fn lenient() -> ConversionPolicy {
    ConversionPolicy::lenient()
}

/// Test: lenient array policy drops bad elements and logs once
#[test]
fn test_lenient_list_drops_and_warns() {
    let (result, warnings) = with_warnings(|| {
        Navigator::new(vec!["1", "x", "3"])
            .with_policy(lenient())
            .to_list_i64()
    });
    assert_eq!(result.unwrap(), vec![1, 3]);
    assert_eq!(warnings.warnings(), 1);
    assert_eq!(warnings.dropped(), vec![1]);
}

/// Test: strict array policy fails the whole call
#[test]
fn test_strict_list_fails() {
    let (result, warnings) = with_warnings(|| {
        Navigator::new(vec!["1", "x", "3"])
            .with_policy(ConversionPolicy::default())
            .to_list_i64()
    });
    let err = result.unwrap_err();
    assert!(err.is(ErrorKind::ValueConvertFailed));
    assert_eq!(err.location(), "to_list_i64");
    assert_eq!(warnings.warnings(), 0);
}

/// Test: the two flags are independent
#[test]
fn test_collection_flag_does_not_cover_lists() {
    let only_maps = ConversionPolicy::default().with_skip_partial_collection_conversion_failures(true);
    let list = Navigator::new(vec!["1", "x"]).with_policy(only_maps.clone());
    assert!(list.to_list_i64().is_err());

    let map = nav(r#"{"a": "1", "b": "x"}"#).with_policy(only_maps);
    let (result, warnings) = with_warnings(|| map.to::<IndexMap<String, i64>>());
    assert_eq!(result.unwrap(), IndexMap::from([("a".to_owned(), 1)]));
    assert_eq!(warnings.dropped(), vec![1]);
}

/// Test: nested collections apply the policy at each level
#[test]
fn test_nested_lenient_conversion() {
    let doc = nav(r#"[{"a": "1", "b": "z"}, "not a map", {"c": 3}]"#).with_policy(lenient());
    let (result, warnings) = with_warnings(|| doc.to::<Vec<IndexMap<String, u8>>>());
    assert_eq!(
        result.unwrap(),
        vec![
            IndexMap::from([("a".to_owned(), 1)]),
            IndexMap::from([("c".to_owned(), 3)]),
        ]
    );
    assert_eq!(warnings.warnings(), 2);
}

#[rstest]
#[case("127", Some(127))]
#[case("128", None)]
#[case("-128", Some(-128))]
#[case("12.9", Some(12))]
#[case("", None)]
fn test_to_i8(#[case] text: &str, #[case] expected: Option<i8>) {
    let result = Navigator::new(Value::from(text)).to_i8();
    match expected {
        Some(v) => assert_eq!(result.unwrap(), v),
        None => assert!(result.unwrap_err().is(ErrorKind::BaseTypeConvertFailed)),
    }
}

/// Test: arbitrary-precision literals keep their digits until coerced
#[test]
fn test_big_literals() {
    let doc = nav(r#"{"big": 18446744073709551615, "bigger": 18446744073709551616}"#);
    assert_eq!(doc.branch().get("big").to_u64().unwrap(), u64::MAX);
    assert!(doc.branch().get("bigger").to_u64().is_err());
    assert_eq!(doc.branch().get("bigger").to_str().unwrap(), "18446744073709551616");
    assert_eq!(doc.get("bigger").to_f64().unwrap(), 18_446_744_073_709_551_616.0);
}

/// Test: keyed shortcuts convert keys and values
#[test]
fn test_map_shortcuts() {
    let doc = nav(r#"{"1": "10", "2.5": 20}"#);
    let floats = doc.to_map_f64_to_f64().unwrap();
    assert_eq!(floats[&F64Key(2.5)], 20.0);
    let truncated: Vec<i64> = doc.to_map_i64().unwrap().into_keys().collect();
    assert_eq!(truncated, vec![1, 2]);
    assert!(nav(r#"{"x": 1}"#).to_map_u64().is_err());

    let any = doc.to_map_any().unwrap();
    assert_eq!(any.get(&MapKey::from("1")), Some(&Value::from("10")));
    assert_eq!(doc.to_map().unwrap().len(), 2);

    let ints = nav(r#"{"7": "70"}"#).to_map_i64_to_i64().unwrap();
    assert_eq!(ints, IndexMap::from([(7, 70)]));
}

/// Test: text holding a list converts to list targets
#[test]
fn test_list_from_text_entry() {
    let doc = nav(r#"{"flags": "[true, false, 1]", "chars": ["a", 98]}"#);
    assert_eq!(doc.branch().get("flags").to_list_bool().unwrap(), vec![true, false, true]);
    assert_eq!(doc.branch().get("chars").to_list_char().unwrap(), vec!['a', 'b']);
    assert!(doc.get("chars").to_map().unwrap_err().is(ErrorKind::ValueConvertFailed));
}

/// Test: list of maps
#[test]
fn test_to_list_map() {
    let maps = nav(r#"[{"a": 1}, "{\"b\": 2}"]"#).to_list_map().unwrap();
    assert_eq!(maps.len(), 2);
    assert_eq!(maps[1]["b"], codec::decode("2").unwrap());
}

#[derive(Debug, PartialEq, Deserialize)]
struct Server {
    host: String,
    port: u16,
    #[serde(default)]
    tls: bool,
}

/// Test: records are mapped through serde
#[test]
fn test_to_record() {
    let doc = nav(r#"{"server": "{\"host\": \"db\", \"port\": 5432}"}"#);
    let server: Server = doc.branch().get("server").to_record().unwrap();
    assert_eq!(
        server,
        Server {
            host: "db".into(),
            port: 5432,
            tls: false
        }
    );

    let err = nav(r#"{"host": 1}"#).to_record::<Server>().unwrap_err();
    assert!(err.is(ErrorKind::ValueConvertFailed));
    assert!(err.to_string().contains("source:"));
}
