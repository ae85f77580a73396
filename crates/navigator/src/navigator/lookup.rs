//! Key and index lookup.

use nebula_value::{KeyedMap, Map, MapKey, ScalarKind, Value, codec};

use crate::coerce::{CoerceCx, coerce_key, describe};
use crate::error::{ErrorKind, NavError, NavResult};
use crate::trace::Segment;

/// Resolve `key` in `container`, returning the matched key and its value
pub(super) fn lookup(
    container: &Value,
    key: &Value,
    location: &str,
    cx: &CoerceCx<'_>,
) -> NavResult<(Segment, Value)> {
    match container {
        Value::Map(map) => in_text_map(map, key, location),
        Value::Keyed(map) => in_keyed_map(map, key, location, cx),
        Value::List(_) => Err(NavError::unsupported(
            location.to_owned(),
            "get on a list, use index",
        )),
        Value::Array(array) if array.kind() == ScalarKind::Text => Err(NavError::unsupported(
            location.to_owned(),
            "get on a list, use index",
        )),
        other => Err(NavError::misuse(
            location.to_owned(),
            format!("get is not supported on {}", other.type_name()),
        )),
    }
}

/// Element `index` of an ordered collection
pub(super) fn element(container: &Value, index: usize, location: &str) -> NavResult<(Segment, Value)> {
    let items = match container {
        Value::List(items) => items.as_slice(),
        Value::Array(array) => array.items(),
        Value::Map(_) | Value::Keyed(_) => {
            return Err(NavError::new(ErrorKind::CannotIndex, location.to_owned())
                .with_message(format!("index on {}, use get", container.type_name())));
        }
        other => {
            return Err(NavError::misuse(
                location.to_owned(),
                format!("index is not supported on {}", other.type_name()),
            ));
        }
    };
    items
        .get(index)
        .map(|value| (Segment::Index(index), value.clone()))
        .ok_or_else(|| NavError::index_out_of_range(location.to_owned(), index, items.len()))
}

fn in_text_map(map: &Map, key: &Value, location: &str) -> NavResult<(Segment, Value)> {
    let hit = |k: &str| {
        map.get_key_value(k)
            .map(|(k, v)| (Segment::Key(MapKey::Text(k.clone())), v.clone()))
    };
    if let Value::Text(text) = key {
        return hit(text).ok_or_else(|| NavError::key_not_found(location.to_owned(), format!("{text:?}")));
    }
    if MapKey::from_value(key).is_err() {
        return Err(NavError::new(ErrorKind::KeyType, location.to_owned())
            .with_message(format!("{} cannot be a key", key.type_name())));
    }
    let rendered = codec::render_text(key, false);
    hit(&rendered).ok_or_else(|| {
        NavError::new(ErrorKind::TypeMismatch, location.to_owned()).with_message(format!(
            "no string key matches {}",
            describe(key)
        ))
    })
}

fn in_keyed_map(
    map: &KeyedMap,
    key: &Value,
    location: &str,
    cx: &CoerceCx<'_>,
) -> NavResult<(Segment, Value)> {
    if map.is_empty() {
        return Err(NavError::new(ErrorKind::EmptyMapObject, location.to_owned())
            .with_message(format!("get on an empty map<{}, any>", map.kind().name())));
    }
    let wanted = MapKey::from_value(key).map_err(|e| {
        NavError::new(ErrorKind::KeyType, location.to_owned())
            .with_message(format!("{} cannot be a key", key.type_name()))
            .with_source(e)
    })?;
    let kind = map.kind();

    if kind.is_dynamic() || wanted.key_kind() == Some(kind) {
        if let Some(found) = entry(map, &wanted) {
            return Ok(found);
        }
        if kind.is_dynamic()
            && let Some(found) = by_rendering(map, &wanted)
        {
            return Ok(found);
        }
        return Err(NavError::key_not_found(location.to_owned(), &wanted));
    }

    let coerced = coerce_key(key, kind, cx).map_err(|e| {
        NavError::new(ErrorKind::GetFuncTypeInconsistent, location.to_owned())
            .with_message(format!("{} is not a valid {} key", describe(key), kind.name()))
            .with_source(e)
    })?;
    entry(map, &coerced)
        .or_else(|| by_rendering(map, &wanted))
        .ok_or_else(|| {
            NavError::new(ErrorKind::TypeMismatch, location.to_owned()).with_message(format!(
                "no {} key matches {}",
                kind.name(),
                describe(key)
            ))
        })
}

fn entry(map: &KeyedMap, key: &MapKey) -> Option<(Segment, Value)> {
    map.get(key).map(|value| (Segment::Key(key.clone()), value.clone()))
}

/// First entry whose key renders like `wanted`
fn by_rendering(map: &KeyedMap, wanted: &MapKey) -> Option<(Segment, Value)> {
    let text = wanted.to_string();
    map.iter()
        .find(|(k, _)| k.to_string() == text)
        .map(|(k, v)| (Segment::Key(k.clone()), v.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionPolicy;
    use nebula_value::KeyKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn keyed(kind: KeyKind, entries: Vec<(MapKey, Value)>) -> Value {
        Value::Keyed(KeyedMap::from_entries(kind, entries).unwrap())
    }

    fn find(container: &Value, key: Value) -> NavResult<(Segment, Value)> {
        let policy = ConversionPolicy::default();
        let cx = CoerceCx::new(&policy, "get");
        lookup(container, &key, "get", &cx)
    }

    #[test]
    fn test_text_map() {
        let map = codec::decode(r#"{"a": 1, "7": "seven"}"#).unwrap();
        assert_eq!(find(&map, Value::from("a")).unwrap().0, Segment::Key(MapKey::from("a")));
        assert_eq!(find(&map, Value::I32(7)).unwrap().1, Value::from("seven"));
        assert!(find(&map, Value::from("b")).unwrap_err().is(ErrorKind::KeyNotFound));
        assert!(find(&map, Value::I32(8)).unwrap_err().is(ErrorKind::TypeMismatch));
        assert!(find(&map, Value::List(vec![])).unwrap_err().is(ErrorKind::KeyType));
    }

    #[rstest]
    #[case(Value::I64(2), Ok(Value::from("two")))]
    #[case(Value::from("2"), Ok(Value::from("two")))]
    #[case(Value::I32(2), Ok(Value::from("two")))]
    #[case(Value::I64(3), Err(ErrorKind::KeyNotFound))]
    #[case(Value::from("x"), Err(ErrorKind::GetFuncTypeInconsistent))]
    #[case(Value::from("3"), Err(ErrorKind::TypeMismatch))]
    #[case(Value::Null, Err(ErrorKind::KeyType))]
    fn test_typed_map(#[case] key: Value, #[case] expected: Result<Value, ErrorKind>) {
        let map = keyed(KeyKind::I64, vec![(MapKey::I64(2), Value::from("two"))]);
        let found = find(&map, key).map(|(_, v)| v).map_err(|e| e.kind());
        assert_eq!(found, expected);
    }

    #[test]
    fn test_dynamic_map_falls_back_to_rendering() {
        let map = keyed(
            KeyKind::Dynamic,
            vec![(MapKey::from("1"), Value::Bool(true)), (MapKey::Bool(false), Value::I64(0))],
        );
        let (segment, value) = find(&map, Value::I64(1)).unwrap();
        assert_eq!(segment, Segment::Key(MapKey::from("1")));
        assert_eq!(value, Value::Bool(true));
        assert_eq!(find(&map, Value::Bool(false)).unwrap().1, Value::I64(0));
    }

    #[test]
    fn test_empty_typed_map() {
        let map = keyed(KeyKind::U8, vec![]);
        assert!(find(&map, Value::U8(1)).unwrap_err().is(ErrorKind::EmptyMapObject));
    }

    #[test]
    fn test_wrong_container() {
        let err = find(&Value::List(vec![]), Value::from("a")).unwrap_err();
        assert!(err.is(ErrorKind::UnsupportedOperation));
        let err = find(&Value::from(vec![1_i64]), Value::from("a")).unwrap_err();
        assert!(err.is(ErrorKind::FunctionMisuse));
        let err = element(&Value::Map(Map::new()), 0, "index(0)").unwrap_err();
        assert!(err.is(ErrorKind::CannotIndex));
        let err = element(&Value::from(vec![1_i64]), 1, "index(1)").unwrap_err();
        assert!(err.is(ErrorKind::ListIndexIllegal));
        assert_eq!(err.message(), Some("index 1 out of range for length 1"));
    }
}
