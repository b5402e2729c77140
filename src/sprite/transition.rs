//! Directed edges between frames.

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;

use super::{Frame, Named, NodeView};

/// A directed source-to-target edge between two frames.
///
/// Transitions are plain nodes, so a frame's fan-out is discovered by
/// filtering the transition kind rather than by following pointers from
/// the frame itself. Self-loops (source == target) are legal.
#[derive(Debug, Clone)]
pub struct Transition {
    node: NodeHandle,
}

impl Transition {
    pub fn new(store: &GraphStore) -> Transition {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::TRANSITION);
        Transition { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Transition {
        Transition { node: store.handle(guid) }
    }

    pub fn source(&self) -> Option<Frame> {
        self.node
            .guid_ref(vocab::TRANSITION_SOURCE)
            .map(|guid| Frame::attach(self.node.store(), guid))
    }

    pub fn set_source(&self, frame: &Frame) {
        self.node.set(vocab::TRANSITION_SOURCE, frame.guid());
    }

    pub fn target(&self) -> Option<Frame> {
        self.node
            .guid_ref(vocab::TRANSITION_TARGET)
            .map(|guid| Frame::attach(self.node.store(), guid))
    }

    pub fn set_target(&self, frame: &Frame) {
        self.node.set(vocab::TRANSITION_TARGET, frame.guid());
    }
}

impl NodeView for Transition {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Transition {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let store = GraphStore::new();
        let a = Frame::new(&store);
        let b = Frame::new(&store);

        let hop = Transition::new(&store);
        assert!(hop.source().is_none());
        assert!(hop.target().is_none());

        hop.set_source(&a);
        hop.set_target(&b);
        assert_eq!(hop.source().unwrap().guid(), a.guid());
        assert_eq!(hop.target().unwrap().guid(), b.guid());
    }

    #[test]
    fn test_self_loop() {
        let store = GraphStore::new();
        let a = Frame::new(&store);

        let hop = Transition::new(&store);
        hop.set_source(&a);
        hop.set_target(&a);
        assert_eq!(hop.source().unwrap().guid(), hop.target().unwrap().guid());
    }
}
