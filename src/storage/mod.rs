//! Guid-addressed graph storage.
//!
//! One `GraphStore` holds one document's worth of nodes: a map from node
//! guid to that node's label map, plus the optional root guid. Maps are
//! protected by `RwLock` so views can mutate through `&self`; the store
//! promises nothing about concurrent writers (callers serialize access).
//!
//! ## Shape
//!
//! - **No schema**: a node is whatever labels are set under its guid.
//!   Labels are themselves guids; "being a label" is a role, not a type.
//! - **No deletion of nodes**: labels can be unset, node entries stay.
//! - **Dangling references are legal**: a `Value::Ref` to an absent guid
//!   simply reads as absent wherever it is followed.
//! - **Sorted maps**: enumeration order, duplicate detection and the saved
//!   document are all deterministic because the maps are `BTreeMap`s.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::model::{Guid, Value};
use crate::vocab;
use crate::Result;

pub mod document;
pub mod handle;

pub use document::Document;
pub use handle::NodeHandle;

// ============================================================================
// GraphStore
// ============================================================================

/// Guid-addressed labeled graph. Cloning the handle shares the store.
#[derive(Clone)]
pub struct GraphStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// node guid → label guid → value
    nodes: RwLock<BTreeMap<Guid, BTreeMap<Guid, Value>>>,
    /// entry-point node, if the document names one
    root: RwLock<Option<Guid>>,
    /// kind guid → nodes stamped with it under the `ctor` label
    kinds: RwLock<BTreeMap<Guid, BTreeSet<Guid>>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                nodes: RwLock::new(BTreeMap::new()),
                root: RwLock::new(None),
                kinds: RwLock::new(BTreeMap::new()),
            }),
        }
    }

    // ========================================================================
    // Label reads
    // ========================================================================

    /// The value under `label` on `node`. Absent node or label is `None`.
    pub fn get_value(&self, node: Guid, label: Guid) -> Option<Value> {
        self.inner
            .nodes
            .read()
            .get(&node)
            .and_then(|labels| labels.get(&label))
            .cloned()
    }

    /// Every label set on `node`, ascending. Empty for an unknown node.
    pub fn get_labels(&self, node: Guid) -> Vec<Guid> {
        self.inner
            .nodes
            .read()
            .get(&node)
            .map(|labels| labels.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, node: Guid) -> bool {
        self.inner.nodes.read().contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes.read().len()
    }

    /// Fresh sorted snapshot of every node guid. The snapshot does not see
    /// writes made after it was taken.
    pub fn all_nodes(&self) -> Vec<Guid> {
        self.inner.nodes.read().keys().copied().collect()
    }

    // ========================================================================
    // Label writes
    // ========================================================================

    /// Upserts `value` under `label` on `node`, creating the node entry if
    /// it does not exist yet. Idempotent for equal values.
    pub fn set_value(&self, node: Guid, label: Guid, value: impl Into<Value>) {
        let value = value.into();
        let new_kind = value.as_guid();
        let previous = self
            .inner
            .nodes
            .write()
            .entry(node)
            .or_default()
            .insert(label, value);
        if label == vocab::CTOR {
            self.update_kind(node, previous.as_ref().and_then(|v| v.as_guid()), new_kind);
        }
    }

    /// Removes `label` from `node`. No-op when the label is absent.
    pub fn unset_value(&self, node: Guid, label: Guid) {
        let previous = match self.inner.nodes.write().get_mut(&node) {
            Some(labels) => labels.remove(&label),
            None => None,
        };
        if label == vocab::CTOR {
            self.update_kind(node, previous.as_ref().and_then(|v| v.as_guid()), None);
        }
    }

    // ========================================================================
    // Root
    // ========================================================================

    pub fn root(&self) -> Option<Guid> {
        *self.inner.root.read()
    }

    pub fn set_root(&self, root: Option<Guid>) {
        *self.inner.root.write() = root;
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// Imports every node entry of `fragment`. On guid collision the
    /// fragment's whole entry replaces this store's (last writer wins at
    /// node granularity). This store's root is untouched.
    pub fn merge(&self, fragment: &GraphStore) {
        let imported: Vec<(Guid, BTreeMap<Guid, Value>)> = fragment
            .inner
            .nodes
            .read()
            .iter()
            .map(|(node, labels)| (*node, labels.clone()))
            .collect();
        debug!(nodes = imported.len(), "merging fragment");
        for (node, labels) in imported {
            let new_kind = labels.get(&vocab::CTOR).and_then(|v| v.as_guid());
            let previous = self.inner.nodes.write().insert(node, labels);
            let old_kind = previous
                .as_ref()
                .and_then(|labels| labels.get(&vocab::CTOR))
                .and_then(|v| v.as_guid());
            self.update_kind(node, old_kind, new_kind);
        }
    }

    // ========================================================================
    // Kind index
    // ========================================================================

    /// Every node whose `ctor` label references `kind`, ascending.
    ///
    /// Answered from the maintained kind index, not a scan. Only `Ref`
    /// values under `ctor` are indexed; the tag is advisory and nothing
    /// stops a node from carrying none, or a non-reference.
    pub fn nodes_by_kind(&self, kind: Guid) -> Vec<Guid> {
        self.inner
            .kinds
            .read()
            .get(&kind)
            .map(|nodes| nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    fn update_kind(&self, node: Guid, old: Option<Guid>, new: Option<Guid>) {
        if old == new {
            return;
        }
        let mut kinds = self.inner.kinds.write();
        if let Some(old) = old {
            if let Some(nodes) = kinds.get_mut(&old) {
                nodes.remove(&node);
                if nodes.is_empty() {
                    kinds.remove(&old);
                }
            }
        }
        if let Some(new) = new {
            kinds.entry(new).or_default().insert(node);
        }
    }

    // ========================================================================
    // Document conversion
    // ========================================================================

    /// Builds a store from a decoded document, indexing kinds in the same
    /// pass. Envelope validation already happened in the codec.
    pub fn load(document: Document) -> GraphStore {
        let store = GraphStore::new();
        {
            let mut kinds = store.inner.kinds.write();
            for (node, labels) in &document.guid_map {
                if let Some(kind) = labels.get(&vocab::CTOR).and_then(|v| v.as_guid()) {
                    kinds.entry(kind).or_default().insert(*node);
                }
            }
        }
        *store.inner.root.write() = document.root;
        info!(nodes = document.guid_map.len(), "loaded document");
        *store.inner.nodes.write() = document.guid_map;
        store
    }

    /// Snapshots the store as a document. Faithful inverse of [`load`]:
    /// for a well-formed document `d`, `save(load(d)) == d`.
    ///
    /// [`load`]: GraphStore::load
    pub fn save(&self) -> Document {
        let document = Document {
            root: *self.inner.root.read(),
            guid_map: self.inner.nodes.read().clone(),
        };
        debug!(nodes = document.guid_map.len(), "encoded document");
        document
    }

    /// Decodes a JSON document string into a store.
    pub fn from_json(json: &str) -> Result<GraphStore> {
        Ok(GraphStore::load(Document::from_json(json)?))
    }

    /// Encodes the store as the canonical pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        self.save().to_json()
    }

    // ========================================================================
    // Handles
    // ========================================================================

    /// A cheap cursor over one guid of this store.
    pub fn handle(&self, guid: Guid) -> NodeHandle {
        NodeHandle::new(self.clone(), guid)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.node_count())
            .field("root", &self.root())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guid(n: u8) -> Guid {
        Guid([n; 16])
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = GraphStore::new();
        assert_eq!(store.get_value(guid(1), guid(2)), None);

        store.set_value(guid(1), guid(2), "x");
        assert_eq!(store.get_value(guid(1), guid(3)), None);
        assert_eq!(store.get_value(guid(9), guid(2)), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = GraphStore::new();
        store.set_value(guid(1), guid(2), "idle");
        store.set_value(guid(1), guid(3), 83_333i64);
        store.set_value(guid(1), guid(4), guid(5));

        assert_eq!(store.get_value(guid(1), guid(2)), Some(Value::Text("idle".into())));
        assert_eq!(store.get_value(guid(1), guid(3)), Some(Value::Int64(83_333)));
        assert_eq!(store.get_value(guid(1), guid(4)), Some(Value::Ref(guid(5))));
    }

    #[test]
    fn test_set_overwrites() {
        let store = GraphStore::new();
        store.set_value(guid(1), guid(2), "a");
        store.set_value(guid(1), guid(2), "b");
        assert_eq!(store.get_value(guid(1), guid(2)), Some(Value::Text("b".into())));
    }

    #[test]
    fn test_unset_removes_label_keeps_node() {
        let store = GraphStore::new();
        store.set_value(guid(1), guid(2), "a");
        store.unset_value(guid(1), guid(2));
        assert_eq!(store.get_value(guid(1), guid(2)), None);
        assert!(store.contains(guid(1)));

        // absent label and absent node are both no-ops
        store.unset_value(guid(1), guid(7));
        store.unset_value(guid(9), guid(7));
    }

    #[test]
    fn test_labels_sorted() {
        let store = GraphStore::new();
        store.set_value(guid(1), guid(9), 1i64);
        store.set_value(guid(1), guid(3), 2i64);
        store.set_value(guid(1), guid(6), 3i64);
        assert_eq!(store.get_labels(guid(1)), vec![guid(3), guid(6), guid(9)]);
        assert!(store.get_labels(guid(8)).is_empty());
    }

    #[test]
    fn test_all_nodes_is_sorted_snapshot() {
        let store = GraphStore::new();
        store.set_value(guid(5), guid(1), 1i64);
        store.set_value(guid(2), guid(1), 1i64);
        let snapshot = store.all_nodes();
        assert_eq!(snapshot, vec![guid(2), guid(5)]);

        store.set_value(guid(3), guid(1), 1i64);
        assert_eq!(snapshot, vec![guid(2), guid(5)]);
        assert_eq!(store.all_nodes(), vec![guid(2), guid(3), guid(5)]);
    }

    #[test]
    fn test_root() {
        let store = GraphStore::new();
        assert_eq!(store.root(), None);
        store.set_root(Some(guid(4)));
        assert_eq!(store.root(), Some(guid(4)));
        store.set_root(None);
        assert_eq!(store.root(), None);
    }

    #[test]
    fn test_merge_replaces_whole_node_entry() {
        let store = GraphStore::new();
        store.set_value(guid(1), guid(2), "keep?");
        store.set_value(guid(1), guid(3), 7i64);
        store.set_root(Some(guid(1)));

        let fragment = GraphStore::new();
        fragment.set_value(guid(1), guid(4), "only");
        fragment.set_value(guid(8), guid(2), "new");
        fragment.set_root(Some(guid(8)));

        store.merge(&fragment);

        // collision: fragment's entry wins wholesale
        assert_eq!(store.get_value(guid(1), guid(2)), None);
        assert_eq!(store.get_value(guid(1), guid(3)), None);
        assert_eq!(store.get_value(guid(1), guid(4)), Some(Value::Text("only".into())));
        // non-colliding entry imported
        assert_eq!(store.get_value(guid(8), guid(2)), Some(Value::Text("new".into())));
        // receiver's root untouched
        assert_eq!(store.root(), Some(guid(1)));
    }

    #[test]
    fn test_kind_index_tracks_ctor_writes() {
        let store = GraphStore::new();
        let frame_kind = guid(10);
        let clip_kind = guid(11);

        store.set_value(guid(1), vocab::CTOR, frame_kind);
        store.set_value(guid(2), vocab::CTOR, frame_kind);
        assert_eq!(store.nodes_by_kind(frame_kind), vec![guid(1), guid(2)]);

        // restamping moves the node between kinds
        store.set_value(guid(2), vocab::CTOR, clip_kind);
        assert_eq!(store.nodes_by_kind(frame_kind), vec![guid(1)]);
        assert_eq!(store.nodes_by_kind(clip_kind), vec![guid(2)]);

        // a non-reference ctor is stored but not indexed
        store.set_value(guid(1), vocab::CTOR, "frame");
        assert!(store.nodes_by_kind(frame_kind).is_empty());
        assert_eq!(store.get_value(guid(1), vocab::CTOR), Some(Value::Text("frame".into())));

        store.unset_value(guid(2), vocab::CTOR);
        assert!(store.nodes_by_kind(clip_kind).is_empty());
    }

    #[test]
    fn test_kind_index_survives_merge() {
        let store = GraphStore::new();
        store.set_value(guid(1), vocab::CTOR, guid(10));

        let fragment = GraphStore::new();
        // same node restamped to a different kind in the fragment
        fragment.set_value(guid(1), vocab::CTOR, guid(11));
        fragment.set_value(guid(2), vocab::CTOR, guid(10));
        store.merge(&fragment);

        assert_eq!(store.nodes_by_kind(guid(10)), vec![guid(2)]);
        assert_eq!(store.nodes_by_kind(guid(11)), vec![guid(1)]);
    }

    #[test]
    fn test_load_indexes_kinds() {
        let store = GraphStore::new();
        store.set_value(guid(1), vocab::CTOR, guid(10));
        store.set_value(guid(1), guid(3), "a");

        let reloaded = GraphStore::load(store.save());
        assert_eq!(reloaded.nodes_by_kind(guid(10)), vec![guid(1)]);
        assert_eq!(reloaded.get_value(guid(1), guid(3)), Some(Value::Text("a".into())));
    }
}
