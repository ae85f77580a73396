//! Collection targets.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;
use nebula_value::codec::Structure;
use nebula_value::{KeyKind, KeyedMap, MapKey, Value};

use super::{Coerce, CoerceCx, coerce_elements, keyed_entries, structured};
use crate::error::NavResult;

/// Convert every entry of a keyed source, honoring the collection flag
fn coerce_entries<K, V>(value: &Value, target: &str, cx: &CoerceCx<'_>) -> NavResult<Vec<(K, V)>>
where
    K: Coerce,
    V: Coerce,
{
    let source = structured(value, Structure::Map, target, cx)?;
    let skip = cx.policy().skip_partial_collection_conversion_failures;
    let entries = keyed_entries(&source);
    let mut out = Vec::with_capacity(entries.len());
    let mut dropped = 0;
    for (key, val) in entries {
        let converted = K::coerce(&key, cx)
            .map_err(|e| (format!("key {key} of {target}"), e))
            .and_then(|k| {
                V::coerce(val, cx)
                    .map(|v| (k, v))
                    .map_err(|e| (format!("value at key {key} of {target}"), e))
            });
        match converted {
            Ok(entry) => out.push(entry),
            Err(_) if skip => dropped += 1,
            Err((message, e)) => return Err(cx.convert_failed(message).with_source(e)),
        }
    }
    if dropped > 0 {
        cx.report_dropped(dropped, target, "skip_partial_collection_conversion_failures");
    }
    Ok(out)
}

impl<K, V> Coerce for IndexMap<K, V>
where
    K: Coerce + Eq + Hash,
    V: Coerce,
{
    const KEYED: bool = true;

    fn target() -> Cow<'static, str> {
        Cow::Owned(format!("map<{}, {}>", K::target(), V::target()))
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        Ok(coerce_entries(value, &Self::target(), cx)?.into_iter().collect())
    }
}

impl<K, V> Coerce for HashMap<K, V>
where
    K: Coerce + Eq + Hash,
    V: Coerce,
{
    const KEYED: bool = true;

    fn target() -> Cow<'static, str> {
        IndexMap::<K, V>::target()
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        Ok(coerce_entries(value, &Self::target(), cx)?.into_iter().collect())
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    fn target() -> Cow<'static, str> {
        Cow::Owned(format!("list<{}>", T::target()))
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        let target = Self::target();
        let source = structured(value, Structure::List, &target, cx)?;
        let items = source.as_list().unwrap_or_default();
        coerce_elements(items, cx.policy().skip_partial_array_conversion_failures, &target, cx)
    }
}

/// Keys of any scalar kind, values as they are
impl Coerce for KeyedMap {
    const KEYED: bool = true;

    fn target() -> Cow<'static, str> {
        Cow::Borrowed("map<any, any>")
    }

    fn coerce(value: &Value, cx: &CoerceCx<'_>) -> NavResult<Self> {
        if let Value::Keyed(map) = value
            && map.kind().is_dynamic()
        {
            return Ok(map.clone());
        }
        let entries: Vec<(MapKey, Value)> = coerce_entries(value, &Self::target(), cx)?;
        Self::from_entries(KeyKind::Dynamic, entries)
            .map_err(|e| cx.convert_failed("map<any, any>").with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionPolicy;
    use crate::error::ErrorKind;
    use nebula_value::{F64Key, Map, codec};
    use pretty_assertions::assert_eq;

    fn strict() -> ConversionPolicy {
        ConversionPolicy::default()
    }

    #[test]
    fn test_list_from_text() {
        let policy = strict();
        let cx = CoerceCx::new(&policy, "test");
        let list = Vec::<i64>::coerce(&Value::from(r#"[1, "2", 3.5]"#), &cx).unwrap();
        assert_eq!(list, vec![1, 2, 3]);
    }

    #[test]
    fn test_strict_list_wraps_element_error() {
        let policy = strict();
        let cx = CoerceCx::new(&policy, "to_list_i64");
        let source = Value::from(vec!["1", "x", "3"]);
        let err = Vec::<i64>::coerce(&source, &cx).unwrap_err();
        assert!(err.is(ErrorKind::ValueConvertFailed));
        assert_eq!(err.message(), Some("element 1 of list<i64>"));
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("BaseTypeConvertFailed"), "{cause}");
    }

    #[test]
    fn test_lenient_list_drops() {
        let policy = strict().with_skip_partial_array_conversion_failures(true);
        let cx = CoerceCx::new(&policy, "test");
        let source = Value::from(vec!["1", "x", "3"]);
        assert_eq!(Vec::<i64>::coerce(&source, &cx).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_map_key_and_value_conversion() {
        let policy = strict();
        let cx = CoerceCx::new(&policy, "test");
        let source = codec::decode(r#"{"1": "1.5", "2": 2}"#).unwrap();
        let map = IndexMap::<i32, f64>::coerce(&source, &cx).unwrap();
        assert_eq!(map, IndexMap::from([(1, 1.5), (2, 2.0)]));

        let floats = HashMap::<F64Key, String>::coerce(&source, &cx).unwrap();
        assert_eq!(floats[&F64Key(2.0)], "2");

        let bad = codec::decode(r#"{"1": 1, "x": 2}"#).unwrap();
        let err = IndexMap::<i32, i64>::coerce(&bad, &cx).unwrap_err();
        assert_eq!(err.message(), Some("key x of map<i32, i64>"));

        let lenient = strict().with_skip_partial_collection_conversion_failures(true);
        let cx = CoerceCx::new(&lenient, "test");
        let map = IndexMap::<i32, i64>::coerce(&bad, &cx).unwrap();
        assert_eq!(map, IndexMap::from([(1, 1)]));
    }

    #[test]
    fn test_wrong_source_shape() {
        let policy = strict();
        let cx = CoerceCx::new(&policy, "test");
        let err = Vec::<i64>::coerce(&Value::I64(1), &cx).unwrap_err();
        assert!(err.is(ErrorKind::ValueConvertFailed));
        assert_eq!(err.message(), Some("cannot convert i64 to list<i64>"));
        assert!(IndexMap::<String, Value>::coerce(&Value::List(vec![]), &cx).is_err());
    }

    #[test]
    fn test_keyed_map_any() {
        let policy = strict();
        let cx = CoerceCx::new(&policy, "test");
        let mut map = Map::new();
        map.insert("a".into(), Value::I64(1));
        let keyed = KeyedMap::coerce(&Value::Map(map), &cx).unwrap();
        assert_eq!(keyed.kind(), KeyKind::Dynamic);
        assert_eq!(keyed.get(&MapKey::from("a")), Some(&Value::I64(1)));
    }
}
