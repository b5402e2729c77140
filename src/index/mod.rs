//! Name resolution index.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{Guid, Value};
use crate::storage::GraphStore;
use crate::{Error, Result};

/// Exact-match name → guid lookup, built by one full scan.
///
/// The graph itself never promises unique names; this index is the layer
/// that insists. Building fails with [`Error::DuplicateName`] when two
/// distinct guids assert the same text under the name label. The index is
/// a snapshot: nodes named after the build are not visible through it.
#[derive(Debug, Clone)]
pub struct NameIndex {
    names: BTreeMap<String, Guid>,
}

impl NameIndex {
    /// Scans `store` in ascending guid order and registers every `Text`
    /// value under `name_label`. Values of any other kind under the label
    /// are not names and are skipped. The scan order makes collision
    /// reporting deterministic: `first` is always the smaller guid.
    pub fn build(store: &GraphStore, name_label: Guid) -> Result<NameIndex> {
        let mut names = BTreeMap::new();
        for node in store.all_nodes() {
            let Some(Value::Text(name)) = store.get_value(node, name_label) else {
                continue;
            };
            match names.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
                Entry::Occupied(slot) => {
                    return Err(Error::DuplicateName {
                        name: slot.key().clone(),
                        first: *slot.get(),
                        second: node,
                    });
                }
            }
        }
        debug!(entries = names.len(), "name index built");
        Ok(NameIndex { names })
    }

    /// The guid asserting `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<Guid> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every `(name, guid)` pair, ascending by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Guid)> {
        self.names.iter().map(|(name, guid)| (name.as_str(), *guid))
    }
}
