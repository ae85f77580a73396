//! Path trace.
//!
//! An append-only record of how a navigator reached its current value: the
//! entry value, then one step per `get`/`index` holding the key or index
//! used and the value obtained. The recorded segments double as the write
//! path for in-place mutation, which is replayed from the document root.

use std::fmt;
use std::sync::Arc;

use nebula_value::{MapKey, Value, codec};
use smallvec::SmallVec;

/// Key or index of one navigation step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(MapKey),
    Index(usize),
}

impl Segment {
    /// The child of `container` addressed by this segment
    pub fn resolve<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        match (container, self) {
            (Value::Map(map), Self::Key(MapKey::Text(key))) => map.get(key),
            (Value::Keyed(map), Self::Key(key)) => map.get(key),
            (Value::List(items), Self::Index(i)) => items.get(*i),
            (Value::Array(array), Self::Index(i)) => array.get(*i),
            _ => None,
        }
    }

    /// Mutable counterpart of [`resolve`](Self::resolve).
    ///
    /// A uniform array on the way is turned into a dynamic list first so the
    /// slot can receive a value of another kind.
    pub fn resolve_mut<'a>(&self, container: &'a mut Value) -> Option<&'a mut Value> {
        let promote = matches!(
            (&*container, self),
            (Value::Array(array), Self::Index(i)) if *i < array.len()
        );
        if promote && let Value::Array(array) = std::mem::take(container) {
            *container = Value::List(array.into_items());
        }
        match (container, self) {
            (Value::Map(map), Self::Key(MapKey::Text(key))) => map.get_mut(key),
            (Value::Keyed(map), Self::Key(key)) => map.get_mut(key),
            (Value::List(items), Self::Index(i)) => items.get_mut(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// One step of the trace; the entry step has no segment
#[derive(Debug, Clone)]
pub struct PathStep {
    segment: Option<Segment>,
    value: Arc<Value>,
}

impl PathStep {
    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn shared_value(&self) -> Arc<Value> {
        Arc::clone(&self.value)
    }
}

/// Ordered record of navigation steps
///
/// Cloning copies the steps; the step values themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct PathTrace {
    steps: SmallVec<[PathStep; 8]>,
    detached: bool,
}

impl PathTrace {
    /// A trace holding only the entry value
    pub fn new(entry: Arc<Value>) -> Self {
        let mut steps = SmallVec::new();
        steps.push(PathStep {
            segment: None,
            value: entry,
        });
        Self {
            steps,
            detached: false,
        }
    }

    pub fn push(&mut self, segment: Segment, value: Arc<Value>) {
        self.steps.push(PathStep {
            segment: Some(segment),
            value,
        });
    }

    /// Replace the value of the last step, returning false on an empty trace
    pub fn replace_last(&mut self, value: Arc<Value>) -> bool {
        match self.steps.last_mut() {
            Some(step) => {
                step.value = value;
                true
            }
            None => false,
        }
    }

    pub fn entry(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Segments from the entry to the last step
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.steps.iter().filter_map(PathStep::segment)
    }

    /// Mark the trace as no longer addressing the document.
    ///
    /// Values produced by `for_each` are not part of the document, so
    /// nothing after that point can be written back.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub const fn is_detached(&self) -> bool {
        self.detached
    }

    /// Recompute step values from `root` by replaying the segments.
    ///
    /// Text that encodes a structure is decoded the way navigation decodes
    /// it. Stops at the first segment that no longer resolves.
    pub fn refresh(&mut self, root: &Value) {
        let mut current = resolved(root.clone());
        for (i, step) in self.steps.iter_mut().enumerate() {
            if i > 0 {
                let next = match step.segment.as_ref().and_then(|s| s.resolve(&current)) {
                    Some(child) => resolved(child.clone()),
                    None => return,
                };
                current = next;
            }
            step.value = Arc::new(current.clone());
        }
    }

    /// `EntryType => key:Type => index:Type`
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|step| match &step.segment {
                None => step.value.type_name().into_owned(),
                Some(segment) => format!("{segment}:{}", step.value.type_name()),
            })
            .collect::<Vec<_>>()
            .join(" => ")
    }
}

fn resolved(value: Value) -> Value {
    codec::decode_structure(&value).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_value::Map;

    fn text_map(entries: &[(&str, Value)]) -> Value {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect::<Map>()
            .into()
    }

    #[test]
    fn test_render() {
        let root = text_map(&[("users", Value::List(vec![Value::I64(1)]))]);
        let mut trace = PathTrace::new(Arc::new(root));
        trace.push(
            Segment::Key(MapKey::from("users")),
            Arc::new(Value::List(vec![Value::I64(1)])),
        );
        trace.push(Segment::Index(0), Arc::new(Value::I64(1)));
        assert_eq!(
            trace.render(),
            "map<string, any> => users:list<any> => 0:i64"
        );
        assert_eq!(trace.segments().count(), 2);
    }

    #[test]
    fn test_replace_last() {
        let mut trace = PathTrace::new(Arc::new(Value::from(r#"{"a":1}"#)));
        assert!(trace.replace_last(Arc::new(text_map(&[("a", Value::I64(1))]))));
        assert_eq!(trace.render(), "map<string, any>");
        assert!(!PathTrace::default().replace_last(Arc::new(Value::Null)));
    }

    #[test]
    fn test_refresh_decodes_embedded_text() {
        let root = text_map(&[("info", Value::from(r#"{"id": 3}"#))]);
        let mut trace = PathTrace::new(Arc::new(Value::Null));
        trace.push(Segment::Key(MapKey::from("info")), Arc::new(Value::Null));
        trace.refresh(&root);
        assert_eq!(trace.render(), "map<string, any> => info:map<string, any>");
    }

    #[test]
    fn test_resolve_mut_promotes_arrays() {
        let mut array = Value::from(vec!["a", "b"]);
        let slot = Segment::Index(1).resolve_mut(&mut array).unwrap();
        *slot = Value::I64(2);
        assert_eq!(array, Value::List(vec![Value::from("a"), Value::I64(2)]));
        assert!(Segment::Index(5).resolve_mut(&mut array).is_none());
    }
}
