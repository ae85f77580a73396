//! The chainable navigator.
//!
//! A [`Navigator`] sits on one reached value inside a [`Document`]. Chain
//! operations (`get`, `index`, `for_each`, ...) consume the navigator and
//! return the next one; once an operation fails the error sticks and every
//! later chain call passes it through untouched. Terminal coercions
//! (`to_i64`, `to_list_str`, ...) and mutations (`set_map`, ...) return a
//! `Result`.
//!
//! ```rust
//! use nebula_navigator::Navigator;
//! use nebula_value::codec;
//!
//! let doc = codec::decode(r#"{"user": {"age": "47"}}"#).unwrap();
//! let age = Navigator::new(doc).get("user").get("age").to_i64().unwrap();
//! assert_eq!(age, 47);
//! ```

mod each;
mod lookup;
mod mutate;
mod terminal;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use nebula_value::{ScalarKind, Value, codec};
use tracing::{Span, debug, error, trace};

use crate::coerce::CoerceCx;
use crate::config::ConversionPolicy;
use crate::dispatch::{Dispatch, EachShape, Variant, classify};
use crate::document::Document;
use crate::error::{ErrorKind, NavError, NavResult};
use crate::trace::{PathTrace, Segment};

/// Chainable cursor over a document
///
/// Cloning (or [`branch`](Self::branch)) copies the position and the path
/// trace; the document is shared, so mutations made through one branch are
/// visible to every other.
#[derive(Debug, Clone)]
pub struct Navigator {
    doc: Document,
    trace: PathTrace,
    current: Arc<Value>,
    /// Keyed half of a `for_each` result whose primary shape is not keyed
    each_keyed: Option<Arc<Value>>,
    variant: Variant,
    error: Option<NavError>,
    policy: Option<Arc<ConversionPolicy>>,
    span: Span,
}

impl Navigator {
    /// Navigate a new document holding `value`
    pub fn new(value: impl Into<Value>) -> Self {
        Self::from_document(Document::new(value))
    }

    /// Navigate a document shared with other holders
    pub fn from_document(doc: Document) -> Self {
        let entry = Arc::new(doc.snapshot());
        let mut nav = Self {
            doc,
            trace: PathTrace::new(Arc::clone(&entry)),
            current: entry,
            each_keyed: None,
            variant: Variant::Scalar,
            error: None,
            policy: None,
            span: Span::none(),
        };
        nav.settle("new");
        nav
    }

    /// Emit diagnostics of this navigator inside `span`
    pub fn in_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Use `policy` instead of the process-wide one
    pub fn with_policy(mut self, policy: ConversionPolicy) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    /// Policy used by coercions of this navigator
    pub fn policy(&self) -> Arc<ConversionPolicy> {
        self.policy.clone().unwrap_or_else(ConversionPolicy::current)
    }

    /// A sibling cursor at the same position
    pub fn branch(&self) -> Self {
        self.clone()
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// No error so far and the reached value is neither null nor an empty
    /// `for_each` result
    pub fn valid(&self) -> bool {
        self.error.is_none()
            && !self.current.is_null()
            && self.variant != Variant::EachResult(EachShape::Empty)
    }

    pub fn error(&self) -> Option<&NavError> {
        self.error.as_ref()
    }

    pub fn into_result(self) -> NavResult<Self> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn trace(&self) -> &PathTrace {
        &self.trace
    }

    /// The reached value
    pub fn val(&self) -> NavResult<Value> {
        self.check()?;
        Ok((*self.current).clone())
    }

    /// The current root value of the document
    pub fn entry_value(&self) -> NavResult<Value> {
        self.check()?;
        Ok(self.doc.snapshot())
    }

    /// `EntryType => key:Type => index:Type`
    pub fn print_path(&self) -> String {
        self.trace.render()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Step into the entry under `key`.
    ///
    /// Text-keyed maps look text keys up directly and fall back to the text
    /// rendering of other scalar keys. Typed maps coerce the key to their
    /// declared key kind first.
    pub fn get(self, key: impl Into<Value>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let key = key.into();
        let location = tag("get", &key);
        self.advance(&location, |nav, cx| {
            nav.require_each_shape(EachShape::Keyed, &location)?;
            lookup::lookup(&nav.current, &key, &location, cx)
        })
    }

    /// Apply [`get`](Self::get) for each key in turn.
    ///
    /// Keys may be of different types; use [`keys!`](crate::keys) to build a
    /// mixed list. A list as the first key is rejected.
    pub fn get_many<I>(self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        if self.error.is_some() {
            return self;
        }
        let keys: Vec<Value> = keys.into_iter().map(Into::into).collect();
        if let [Value::List(_) | Value::Array(_), ..] = keys.as_slice() {
            let mut nav = self;
            nav.fail(NavError::misuse("get_many", "param used err maybe get_many(keys)"));
            return nav;
        }
        keys.into_iter().fold(self, |nav, key| nav.get(key))
    }

    /// Step into element `index` of an ordered collection
    pub fn index(self, index: usize) -> Self {
        if self.error.is_some() {
            return self;
        }
        let location = format!("index({index})");
        self.advance(&location, |nav, _| {
            nav.require_each_shape(EachShape::Ordered, &location)?;
            lookup::element(&nav.current, index, &location)
        })
    }

    /// The value `get(key)` would reach, without moving or failing.
    ///
    /// `None` whenever `get(key)` would fail, including a present null.
    pub fn exist(&self, key: impl Into<Value>) -> Option<Value> {
        if self.error.is_some() {
            return None;
        }
        let key = key.into();
        let location = tag("exist", &key);
        let policy = self.policy();
        let cx = CoerceCx::new(&policy, &location).in_span(&self.span);
        guard(&location, || {
            self.require_each_shape(EachShape::Keyed, &location)?;
            lookup::lookup(&self.current, &key, &location, &cx)
        })
        .ok()
        .map(|(_, value)| value)
        .filter(|value| !value.is_null())
    }

    /// Remove duplicate elements of the reached list, keeping first occurrences.
    ///
    /// Only the navigator's view changes; the document keeps the duplicates,
    /// so the trace stops addressing it and later writes are rejected.
    pub fn uniq(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }
        let deduped = match &*self.current {
            Value::List(items) => {
                let mut items = items.clone();
                nebula_value::dedup_values(&mut items);
                Value::List(items)
            }
            Value::Array(array) => {
                let mut array = array.clone();
                array.dedup();
                Value::Array(array)
            }
            other => {
                let message = format!("uniq on {}", other.type_name());
                self.fail(NavError::misuse("uniq", message));
                return self;
            }
        };
        let deduped = Arc::new(deduped);
        if !self.trace.is_detached() {
            self.trace.replace_last(Arc::clone(&deduped));
            self.trace.detach();
        }
        self.current = deduped;
        self
    }

    // ------------------------------------------------------------------------
    // Type checks
    // ------------------------------------------------------------------------

    pub fn is_str(&self) -> NavResult<bool> {
        self.check()?;
        Ok(matches!(&*self.current, Value::Text(_)))
    }

    /// Any number, including literals kept from decoding
    pub fn is_digit(&self) -> NavResult<bool> {
        self.check()?;
        Ok(self.current.is_numeric())
    }

    pub fn is_list(&self) -> NavResult<bool> {
        self.check()?;
        Ok(matches!(&*self.current, Value::List(_) | Value::Array(_)))
    }

    pub fn is_str_list(&self) -> NavResult<bool> {
        self.check()?;
        Ok(match &*self.current {
            Value::Array(array) => array.kind() == ScalarKind::Text,
            Value::List(items) => items.iter().all(|v| matches!(v, Value::Text(_))),
            _ => false,
        })
    }

    pub fn is_digit_list(&self) -> NavResult<bool> {
        self.check()?;
        Ok(match &*self.current {
            Value::Array(array) => array.kind().is_numeric(),
            Value::List(items) => items.iter().all(Value::is_numeric),
            _ => false,
        })
    }

    pub fn is_map(&self) -> NavResult<bool> {
        self.check()?;
        Ok(matches!(&*self.current, Value::Map(_) | Value::Keyed(_)))
    }

    /// Keyed collection with text keys
    pub fn is_map_str(&self) -> NavResult<bool> {
        self.check()?;
        Ok(matches!(&*self.current, Value::Map(_)))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn check(&self) -> NavResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Record the first error; later ones are dropped
    fn fail(&mut self, err: NavError) {
        if self.error.is_none() {
            debug!(parent: &self.span, error = %err, "navigation failed");
            self.error = Some(err);
        }
    }

    /// Run a step computation and move onto its result
    fn advance(
        mut self,
        location: &str,
        f: impl FnOnce(&Self, &CoerceCx<'_>) -> NavResult<(Segment, Value)>,
    ) -> Self {
        let policy = self.policy();
        let stepped = {
            let cx = CoerceCx::new(&policy, location).in_span(&self.span);
            guard(location, || f(&self, &cx))
        };
        match stepped {
            Ok((segment, child)) => self.step(segment, child, location),
            Err(err) => self.fail(err),
        }
        self
    }

    fn step(&mut self, segment: Segment, child: Value, location: &str) {
        trace!(parent: &self.span, %segment, child = %child.type_name(), "step");
        let child = Arc::new(child);
        self.trace.push(segment, Arc::clone(&child));
        self.current = child;
        self.each_keyed = None;
        self.settle(location);
    }

    /// Classify the reached value, swapping in decoded text
    fn settle(&mut self, location: &str) {
        let Dispatch { variant, decoded } = classify(&self.current);
        if let Some(decoded) = decoded {
            let decoded = Arc::new(decoded);
            self.trace.replace_last(Arc::clone(&decoded));
            self.current = decoded;
        }
        self.variant = variant;
        if variant == Variant::ErrorSentinel {
            self.fail(
                NavError::new(ErrorKind::UnsupportedObject, location.to_owned())
                    .with_message("unsupported object"),
            );
        }
    }

    /// Re-read the reached value and the trace from the document
    fn refresh(&mut self) {
        let root = self.doc.snapshot();
        self.trace.refresh(&root);
        if let Some(last) = self.trace.last() {
            self.current = last.shared_value();
        }
        self.variant = classify(&self.current).variant;
    }
}

impl From<Value> for Navigator {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<Document> for Navigator {
    fn from(doc: Document) -> Self {
        Self::from_document(doc)
    }
}

/// `op("text")` for text keys, `op(rendering)` otherwise
fn tag(op: &str, key: &Value) -> String {
    match key {
        Value::Text(text) => format!("{op}({text:?})"),
        other => format!("{op}({})", codec::render_text(other, false)),
    }
}

/// Run `f`, turning a panic into an `UnrecoverablePanic` error
fn guard<R>(location: &str, f: impl FnOnce() -> NavResult<R>) -> NavResult<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic with a non-text payload".to_owned());
            error!(location, %message, "caught panic");
            Err(NavError::new(ErrorKind::UnrecoverablePanic, location.to_owned()).with_message(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nav(text: &str) -> Navigator {
        Navigator::new(codec::decode(text).unwrap())
    }

    #[test]
    fn test_entry_text_is_decoded() {
        let nav = Navigator::new(r#"{"a": [1, 2]}"#);
        assert_eq!(nav.variant(), Variant::TextKeyed);
        assert_eq!(nav.print_path(), "map<string, any>");
        assert_eq!(nav.entry_value().unwrap(), Value::from(r#"{"a": [1, 2]}"#));
    }

    #[test]
    fn test_null_entry_is_sentinel() {
        let nav = Navigator::new(Value::Null);
        assert_eq!(nav.variant(), Variant::ErrorSentinel);
        assert!(nav.error().unwrap().is(ErrorKind::UnsupportedObject));
        assert!(!nav.valid());
    }

    #[test]
    fn test_sticky_error_keeps_first() {
        let nav = nav(r#"{"a": 1}"#).get("missing").index(3).get("a");
        let err = nav.error().unwrap();
        assert!(err.is(ErrorKind::KeyNotFound));
        assert_eq!(err.location(), "get(\"missing\")");
        assert_eq!(nav.print_path(), "map<string, any>");
    }

    #[test]
    fn test_get_many_rejects_single_list() {
        let nav = nav(r#"{"a": 1}"#).get_many([Value::List(vec![Value::from("a")])]);
        let err = nav.error().unwrap();
        assert!(err.is(ErrorKind::FunctionMisuse));
        assert_eq!(err.message(), Some("param used err maybe get_many(keys)"));
    }

    #[test]
    fn test_uniq_detaches() {
        let mut nav = nav(r#"{"l": [1, 1, 2]}"#).get("l").uniq();
        assert_eq!(nav.val().unwrap(), codec::decode("[1, 2]").unwrap());
        assert!(nav.trace().is_detached());
        assert!(nav.set_all_as_map().unwrap_err().is(ErrorKind::SetValue));
    }

    #[test]
    fn test_guard_catches_panics() {
        let err = guard::<()>("closure", || panic!("boom")).unwrap_err();
        assert!(err.is(ErrorKind::UnrecoverablePanic));
        assert_eq!(err.message(), Some("boom"));

        let err = guard::<()>("closure", || panic!("{}", String::from("formatted"))).unwrap_err();
        assert_eq!(err.message(), Some("formatted"));
    }

    #[test]
    fn test_type_checks() {
        let nav = nav(r#"{"s": "x", "n": 1.5, "l": ["a"], "m": {}}"#);
        assert!(nav.branch().get("s").is_str().unwrap());
        assert!(nav.branch().get("n").is_digit().unwrap());
        assert!(nav.branch().get("l").is_str_list().unwrap());
        assert!(!nav.branch().get("l").is_digit_list().unwrap());
        assert!(nav.branch().get("m").is_map_str().unwrap());
        assert!(nav.branch().get("nope").is_map().is_err());
    }
}
