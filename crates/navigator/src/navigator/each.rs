//! `for_each`: map a collection through a closure.

use std::sync::Arc;

use nebula_value::{KeyKind, KeyedMap, MapKey, Value};
use tracing::debug;

use super::{Navigator, guard};
use crate::dispatch::{EachShape, Variant};
use crate::error::{ErrorKind, NavError, NavResult};

impl Navigator {
    /// Map every entry of the reached collection through `f`.
    ///
    /// `f` receives the position, the entry key (`None` for lists) and the
    /// entry value, and returns an optional output key and value:
    ///
    /// - `(None, None)` drops the entry,
    /// - `(Some(key), value)` inserts into a keyed output, the last write
    ///   for a key winning and a missing value stored as null,
    /// - `(None, Some(value))` appends to an ordered output.
    ///
    /// Both outputs are kept. The ordered one is the primary shape when it
    /// has values: list targets and `index` read it, while keyed targets
    /// (`to_map*`, `to_record`) read the keyed one. When the ordered output
    /// is empty the keyed one is primary and `get` is allowed instead. An
    /// empty result is not [`valid`](Self::valid). It is not part of the
    /// document, so mutations and a second `for_each` are rejected.
    ///
    /// ```rust
    /// use nebula_navigator::Navigator;
    /// use nebula_value::codec;
    ///
    /// let doc = codec::decode(r#"{"users": [{"id": 1}, {"id": 2}]}"#).unwrap();
    /// let ids = Navigator::new(doc)
    ///     .get("users")
    ///     .for_each(|_, _, user| (None, user.as_map().and_then(|m| m.get("id")).cloned()))
    ///     .to_list_i64()
    ///     .unwrap();
    /// assert_eq!(ids, vec![1, 2]);
    /// ```
    pub fn for_each<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, Option<&Value>, &Value) -> (Option<Value>, Option<Value>),
    {
        if self.error.is_some() {
            return self;
        }
        match self.collect_each(f) {
            Ok((keyed, ordered)) => {
                let shape = match (keyed.is_empty(), ordered.is_empty()) {
                    (_, false) => EachShape::Ordered,
                    (false, true) => EachShape::Keyed,
                    (true, true) => EachShape::Empty,
                };
                debug!(
                    parent: &self.span,
                    keyed = keyed.len(),
                    ordered = ordered.len(),
                    ?shape,
                    "for_each collected"
                );
                self.trace.detach();
                if shape == EachShape::Keyed {
                    self.current = Arc::new(Value::Keyed(keyed));
                    self.each_keyed = None;
                } else {
                    self.current = Arc::new(Value::List(ordered));
                    self.each_keyed = Some(Arc::new(Value::Keyed(keyed)));
                }
                self.variant = Variant::EachResult(shape);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// The value keyed targets read: the keyed half of a `for_each` result,
    /// otherwise the reached value
    pub(super) fn keyed_source(&self) -> &Value {
        self.each_keyed.as_deref().unwrap_or(&*self.current)
    }

    /// Reject `get` or `index` on a `for_each` result of the other shape
    pub(super) fn require_each_shape(&self, wanted: EachShape, location: &str) -> NavResult<()> {
        match self.variant {
            Variant::EachResult(shape) if shape != wanted => Err(NavError::misuse(
                location.to_owned(),
                format!("unsupported on a {}", self.variant),
            )),
            _ => Ok(()),
        }
    }

    fn collect_each<F>(&self, mut f: F) -> NavResult<(KeyedMap, Vec<Value>)>
    where
        F: FnMut(usize, Option<&Value>, &Value) -> (Option<Value>, Option<Value>),
    {
        const LOCATION: &str = "for_each";
        if self.variant.is_each_result() {
            return Err(NavError::unsupported(
                LOCATION,
                "unsupported for_each on a for_each result",
            ));
        }
        let entries: Vec<(Option<Value>, &Value)> = match &*self.current {
            Value::Map(map) => map
                .iter()
                .map(|(k, v)| (Some(Value::Text(k.clone())), v))
                .collect(),
            Value::Keyed(map) => map.iter().map(|(k, v)| (Some(k.to_value()), v)).collect(),
            Value::List(items) => items.iter().map(|v| (None, v)).collect(),
            Value::Array(array) => array.iter().map(|v| (None, v)).collect(),
            other => {
                return Err(NavError::misuse(
                    LOCATION,
                    format!("for_each on {}", other.type_name()),
                ));
            }
        };

        let _entered = self.span.enter();
        let mut keyed = KeyedMap::new(KeyKind::Dynamic);
        let mut ordered = Vec::new();
        for (i, (key, value)) in entries.into_iter().enumerate() {
            match guard(LOCATION, || Ok(f(i, key.as_ref(), value)))? {
                (None, None) => {}
                (Some(out_key), out_value) => {
                    let out_key = MapKey::from_value(&out_key).map_err(|e| {
                        NavError::new(ErrorKind::KeyType, LOCATION)
                            .with_message(format!("entry {i} produced a {} key", out_key.type_name()))
                            .with_source(e)
                    })?;
                    keyed
                        .insert(out_key, out_value.unwrap_or_default())
                        .map_err(|e| NavError::new(ErrorKind::KeyType, LOCATION).with_source(e))?;
                }
                (None, Some(out_value)) => ordered.push(out_value),
            }
        }

        Ok((keyed, ordered))
    }
}
