//! Uniform scalar arrays.

use crate::core::kind::ScalarKind;
use crate::error::{ValueError, ValueResult};
use crate::Value;

/// Ordered collection whose elements all share one [`ScalarKind`]
///
/// Text arrays are navigable (their elements may hold encoded structures);
/// arrays of other scalar kinds only support indexing and coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    kind: ScalarKind,
    items: Vec<Value>,
}

impl Array {
    /// Build an array, checking that every item has the declared kind
    pub fn new(kind: ScalarKind, items: Vec<Value>) -> ValueResult<Self> {
        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| ScalarKind::of(item) != Some(kind))
        {
            return Err(ValueError::non_uniform_array(kind.name(), index, item.type_name()));
        }
        Ok(Self { kind, items })
    }

    /// Items already known to share `kind`
    pub(crate) fn from_uniform(kind: ScalarKind, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|item| ScalarKind::of(item) == Some(kind)));
        Self { kind, items }
    }

    /// An empty array of the given kind
    pub const fn empty(kind: ScalarKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Replace the item at `index`, keeping the array uniform
    pub fn set(&mut self, index: usize, value: Value) -> ValueResult<Value> {
        if ScalarKind::of(&value) != Some(self.kind) {
            return Err(ValueError::non_uniform_array(self.kind.name(), index, value.type_name()));
        }
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(ValueError::type_mismatch(
                format!("index < {}", self.items.len()),
                index.to_string(),
            )),
        }
    }

    /// Keep the first occurrence of each item
    pub fn dedup(&mut self) {
        crate::core::hash::dedup_values(&mut self.items);
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
