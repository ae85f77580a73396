//! Shared document.
//!
//! The entry value of a navigation lives in a [`Document`]. Navigators read
//! snapshots out of it and write mutations back into it by replaying their
//! recorded path from the root, so every holder of the document (and every
//! branch of a navigator) observes the change.
//!
//! The lock only keeps individual reads and writes memory-safe. A sequence
//! of calls is not atomic; callers that mutate one document from several
//! threads must order those calls themselves.

use std::sync::Arc;

use nebula_value::{Value, codec};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{ErrorKind, NavError, NavResult};
use crate::trace::Segment;

/// Entry value shared between navigators
#[derive(Debug, Clone, Default)]
pub struct Document {
    root: Arc<RwLock<Value>>,
}

impl Document {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            root: Arc::new(RwLock::new(value.into())),
        }
    }

    /// A copy of the current root value
    pub fn snapshot(&self) -> Value {
        self.root.read().clone()
    }

    /// Run `f` against the root value under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.root.read())
    }

    /// Whether both handles share one root
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Replace the whole root value
    pub fn replace(&self, value: Value) -> Value {
        std::mem::replace(&mut *self.root.write(), value)
    }

    /// Apply `f` to the slot addressed by `path`.
    ///
    /// Every slot on the way, including the target, that holds text encoding
    /// a structure is first replaced by the decoded structure, so the write
    /// lands in a real container attached to its parent.
    pub(crate) fn write_at<R>(
        &self,
        path: &[Segment],
        f: impl FnOnce(&mut Value) -> NavResult<R>,
    ) -> NavResult<R> {
        let mut guard = self.root.write();
        let mut slot: &mut Value = &mut guard;
        for (depth, segment) in path.iter().enumerate() {
            materialize(slot);
            slot = segment.resolve_mut(slot).ok_or_else(|| {
                NavError::new(ErrorKind::TraceParentMissing, "write_at").with_message(format!(
                    "segment {segment} at depth {depth} no longer resolves"
                ))
            })?;
        }
        materialize(slot);
        f(slot)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

fn materialize(slot: &mut Value) {
    if let Some(decoded) = codec::decode_structure(slot) {
        debug!(decoded = %decoded.type_name(), "attaching decoded text to its parent");
        *slot = decoded;
    }
}
