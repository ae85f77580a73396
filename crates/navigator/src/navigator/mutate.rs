//! In-place mutation of the shared document.
//!
//! Mutations replay the recorded path from the document root and change the
//! slot it addresses. On success the navigator re-reads its position from
//! the document and the new root value is returned.

use nebula_value::{ScalarKind, Value, codec};
use tracing::debug;

use super::{Navigator, guard, tag};
use crate::coerce::{CoerceCx, coerce_key};
use crate::dispatch::Variant;
use crate::error::{ErrorKind, NavError, NavResult};
use crate::trace::Segment;

impl Navigator {
    /// Insert or replace `key` in the reached keyed collection.
    ///
    /// Text-keyed maps store the key's text rendering; typed maps coerce it
    /// to their declared key kind.
    ///
    /// ```rust
    /// use nebula_navigator::Navigator;
    /// use nebula_value::codec;
    ///
    /// let mut nav = Navigator::new(r#"{"info": "{\"id\": 1}"}"#).get("info");
    /// let root = nav.set_map("name", "x").unwrap();
    /// assert_eq!(codec::encode(&root).unwrap(), r#"{"info":{"id":1,"name":"x"}}"#);
    /// ```
    pub fn set_map(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> NavResult<Value> {
        let key = key.into();
        let value = value.into();
        let location = tag("set_map", &key);
        self.mutate(&location, require_keyed, |slot, cx| match slot {
            Value::Map(map) => {
                let text = codec::render_text(&key, cx.policy().use_custom_text_rendering_hook);
                map.insert(text, value);
                Ok(())
            }
            Value::Keyed(map) => {
                let typed = coerce_key(&key, map.kind(), cx).map_err(|e| {
                    NavError::new(ErrorKind::SetValue, cx.location().to_owned())
                        .with_message(format!("key does not fit map<{}, any>", map.kind().name()))
                        .with_source(e)
                })?;
                map.insert(typed, value).map_err(|e| {
                    NavError::new(ErrorKind::SetValue, cx.location().to_owned()).with_source(e)
                })?;
                Ok(())
            }
            other => Err(not_a_map(cx.location(), other)),
        })
    }

    /// Replace the text entry under `key` with the map it encodes
    pub fn set_as_map(&mut self, key: impl Into<Value>) -> NavResult<Value> {
        let key = key.into();
        let location = tag("set_as_map", &key);
        self.mutate(&location, require_keyed, |slot, cx| {
            let entry = match slot {
                Value::Map(map) => map.get_mut(&codec::render_text(&key, false)),
                Value::Keyed(map) => {
                    let typed = coerce_key(&key, map.kind(), cx).map_err(|e| {
                        NavError::key_not_found(cx.location().to_owned(), &key).with_source(e)
                    })?;
                    map.get_mut(&typed)
                }
                other => return Err(not_a_map(cx.location(), other)),
            };
            let Some(entry) = entry else {
                return Err(NavError::key_not_found(cx.location().to_owned(), &key));
            };
            let decoded = match entry.as_text_like() {
                Some(text) => codec::decode_map(text).map_err(|e| {
                    NavError::new(ErrorKind::UnsupportedSetValueType, cx.location().to_owned())
                        .with_message("entry text does not encode a map")
                        .with_source(e)
                })?,
                None => {
                    return Err(NavError::new(
                        ErrorKind::UnsupportedSetValueType,
                        cx.location().to_owned(),
                    )
                    .with_message(format!("entry is {}, not text", entry.type_name())));
                }
            };
            *entry = Value::Map(decoded);
            Ok(())
        })
    }

    /// Decode, at any depth, every text entry that encodes a map or list
    pub fn set_all_as_map(&mut self) -> NavResult<Value> {
        let check = |variant: Variant, location: &str| match variant {
            Variant::NavigableOrdered => Ok(()),
            other => require_keyed(other, location),
        };
        self.mutate("set_all_as_map", check, |slot, _| {
            decode_nested(slot);
            Ok(())
        })
    }

    fn mutate(
        &mut self,
        location: &str,
        check: impl FnOnce(Variant, &str) -> NavResult<()>,
        write: impl FnOnce(&mut Value, &CoerceCx<'_>) -> NavResult<()>,
    ) -> NavResult<Value> {
        self.check()?;
        let policy = self.policy();
        let written = guard(location, || {
            check(self.variant, location)?;
            if self.trace.is_detached() {
                return Err(NavError::new(ErrorKind::SetValue, location.to_owned())
                    .with_message("the reached value is not part of the document"));
            }
            let path: Vec<Segment> = self.trace.segments().cloned().collect();
            let cx = CoerceCx::new(&policy, location).in_span(&self.span);
            self.doc.write_at(&path, |slot| write(slot, &cx))
        });
        match written {
            Ok(()) => {
                debug!(parent: &self.span, location, path = %self.trace.render(), "document mutated");
                self.refresh();
                Ok(self.doc.snapshot())
            }
            Err(err) => {
                self.fail(err.clone());
                Err(err)
            }
        }
    }
}

fn require_keyed(variant: Variant, location: &str) -> NavResult<()> {
    match variant {
        Variant::TextKeyed | Variant::TypedKeyed(_) => Ok(()),
        Variant::EachResult(_) => Err(NavError::unsupported(
            location.to_owned(),
            "cannot mutate a for_each result",
        )),
        other => Err(NavError::new(ErrorKind::UnsupportedSetValueType, location.to_owned())
            .with_message(format!("cannot mutate a {other}"))),
    }
}

fn not_a_map(location: &str, found: &Value) -> NavError {
    NavError::new(ErrorKind::UnsupportedSetValueType, location.to_owned())
        .with_message(format!("{} is not a map", found.type_name()))
}

fn decode_nested(value: &mut Value) {
    match value {
        Value::Map(map) => {
            for slot in map.values_mut() {
                decode_slot(slot);
            }
        }
        Value::Keyed(map) => {
            for slot in map.values_mut() {
                decode_slot(slot);
            }
        }
        Value::List(items) => {
            for slot in items {
                decode_slot(slot);
            }
        }
        Value::Array(array) if array.kind() == ScalarKind::Text => {
            let mut items = array.items().to_vec();
            let mut changed = false;
            for slot in &mut items {
                changed |= decode_slot(slot);
            }
            if changed {
                *value = Value::List(items);
            }
        }
        _ => {}
    }
}

/// Decode `slot` if it is structured text, then descend; true if decoded
fn decode_slot(slot: &mut Value) -> bool {
    let decoded = match codec::decode_structure(slot) {
        Some(structure) => {
            *slot = structure;
            true
        }
        None => false,
    };
    decode_nested(slot);
    decoded
}
