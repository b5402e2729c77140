//! Node cursor over one guid of one store.

use std::fmt;

use crate::model::{Guid, Value};

use super::GraphStore;

/// A `(store, guid)` pair with typed label accessors.
///
/// Handles are cheap to clone and carry no type claim of their own; the
/// wrappers in [`crate::sprite`] are recasts of this, so the same guid can
/// be viewed as any domain kind without copying anything.
#[derive(Clone)]
pub struct NodeHandle {
    store: GraphStore,
    guid: Guid,
}

impl NodeHandle {
    pub(crate) fn new(store: GraphStore, guid: Guid) -> Self {
        Self { store, guid }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn get(&self, label: Guid) -> Option<Value> {
        self.store.get_value(self.guid, label)
    }

    pub fn set(&self, label: Guid, value: impl Into<Value>) {
        self.store.set_value(self.guid, label, value);
    }

    pub fn unset(&self, label: Guid) {
        self.store.unset_value(self.guid, label);
    }

    pub fn labels(&self) -> Vec<Guid> {
        self.store.get_labels(self.guid)
    }

    // Typed reads. A value of the wrong kind reads as absent, the same as
    // a missing label; writes are always welcome through `set`.

    pub fn text(&self, label: Guid) -> Option<String> {
        match self.get(label) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int64(&self, label: Guid) -> Option<i64> {
        self.get(label).and_then(|v| v.as_int64())
    }

    pub fn guid_ref(&self, label: Guid) -> Option<Guid> {
        self.get(label).and_then(|v| v.as_guid())
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({})", self.guid)
    }
}
