//! Named animation sequences.

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;

use super::{FrameList, Named, NodeView};

/// A named animation: a reference to the head segment of a frame chain.
///
/// The clip points at the chain's first real segment, not at a trailing
/// sentinel, so the first frame resolves without a walk. [`assemble_clip`]
/// keeps this true by binding the field before the chain grows, letting
/// the first append convert the bound segment in place.
///
/// [`assemble_clip`]: crate::anim::assemble_clip
#[derive(Debug, Clone)]
pub struct Clip {
    node: NodeHandle,
}

impl Clip {
    pub fn new(store: &GraphStore) -> Clip {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::CLIP);
        Clip { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Clip {
        Clip { node: store.handle(guid) }
    }

    pub fn frames(&self) -> Option<FrameList> {
        self.node
            .guid_ref(vocab::CLIP_FRAMES)
            .map(|guid| FrameList::attach(self.node.store(), guid))
    }

    pub fn set_frames(&self, frames: &FrameList) {
        self.node.set(vocab::CLIP_FRAMES, frames.guid());
    }
}

impl NodeView for Clip {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Clip {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::Frame;

    #[test]
    fn test_frames_field() {
        let store = GraphStore::new();
        let clip = Clip::new(&store);
        assert!(clip.frames().is_none());

        let list = FrameList::new(&store);
        clip.set_frames(&list);
        assert_eq!(clip.frames().unwrap().guid(), list.guid());
    }

    #[test]
    fn test_bound_sentinel_becomes_the_head_segment() {
        let store = GraphStore::new();
        let clip = Clip::new(&store);
        let list = FrameList::new(&store);
        clip.set_frames(&list);

        let x = Frame::new(&store);
        let y = Frame::new(&store);
        list.append(&x, None).append(&y, None);

        // the clip still points at the first segment, now holding x
        let bound = clip.frames().unwrap();
        assert_eq!(bound.guid(), list.guid());
        assert_eq!(bound.current().unwrap().guid(), x.guid());
        assert_eq!(bound.len(), 2);
    }
}
