//! Persistent frame sequence as a linked chain of segment nodes.

use std::collections::BTreeSet;

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;
use crate::{Error, Result};

use super::{Frame, NodeView};

/// A handle to one segment of a persistent frame chain.
///
/// The chain is ordinary graph data. Every non-terminal segment carries
/// its frame and a next-segment reference; the final segment is a bare
/// sentinel carrying neither. Appending converts the sentinel in place
/// into the new last segment and links a fresh sentinel behind it, so the
/// chain only grows at the end and handles held elsewhere keep meaning.
///
/// List operations treat the held segment as the start of the chain.
/// `head` is the exception: every segment written by this crate caches a
/// reference to the whole chain's first frame, so `head` answers in O(1)
/// from any segment, the trailing sentinel included.
///
/// Traversal materializes the chain into an indexable array once per
/// operation instead of chasing guids per position, and tolerates a
/// corrupt cyclic chain by stopping at the first revisited segment.
#[derive(Debug, Clone)]
pub struct FrameList {
    node: NodeHandle,
}

struct SegmentRec {
    guid: Guid,
    frame: Option<Guid>,
    terminal: bool,
}

impl FrameList {
    /// A fresh empty chain: a lone terminal sentinel.
    pub fn new(store: &GraphStore) -> FrameList {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::EMPTY_LIST);
        FrameList { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> FrameList {
        FrameList { node: store.handle(guid) }
    }

    /// This segment's own frame; `None` on a sentinel.
    pub fn current(&self) -> Option<Frame> {
        self.node
            .guid_ref(vocab::LIST_HEAD)
            .map(|guid| Frame::attach(self.node.store(), guid))
    }

    /// The next segment; `None` on a sentinel.
    pub fn tail(&self) -> Option<FrameList> {
        self.node
            .guid_ref(vocab::LIST_TAIL)
            .map(|guid| FrameList::attach(self.node.store(), guid))
    }

    pub fn is_terminal(&self) -> bool {
        self.node.guid_ref(vocab::LIST_TAIL).is_none()
    }

    /// First frame of the chain. `None` only for an empty chain.
    ///
    /// Answered from the cached first-frame reference when present;
    /// chains written before the cache existed are walked instead.
    pub fn head(&self) -> Option<Frame> {
        if let Some(first) = self.node.guid_ref(vocab::LIST_FIRST) {
            return Some(Frame::attach(self.node.store(), first));
        }
        self.frames().into_iter().next()
    }

    /// The frames from this segment to the end of the chain, in order.
    /// Segments missing their frame reference contribute nothing.
    pub fn frames(&self) -> Vec<Frame> {
        let store = self.node.store();
        self.segments()
            .into_iter()
            .filter_map(|segment| segment.frame)
            .map(|guid| Frame::attach(store, guid))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.segments()
            .iter()
            .filter(|segment| segment.frame.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The frame at `index`, counting from this segment. Negative indices
    /// count back from the end; anything outside `[-len, len - 1]` fails
    /// with [`Error::IndexOutOfRange`].
    pub fn get(&self, index: i64) -> Result<Frame> {
        let frames = self.frames();
        let len = frames.len();
        let resolved = if index < 0 { index + len as i64 } else { index };
        if resolved < 0 || resolved >= len as i64 {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(frames[resolved as usize].clone())
    }

    /// Appends `frame` at the end of the chain: the sentinel is converted
    /// in place into the new last segment and a fresh sentinel (minted, or
    /// `guid` if supplied) is linked behind it. Returns the new sentinel,
    /// which callers chaining appends rebind as their tail.
    pub fn append(&self, frame: &Frame, guid: Option<Guid>) -> FrameList {
        let store = self.node.store();

        // settle the chain's first frame before anything mutates
        let first = self
            .head()
            .map(|head| head.guid())
            .unwrap_or_else(|| frame.guid());

        // a cyclic chain has no sentinel to convert; re-point the edge
        // that closed the cycle at a fresh one, restoring a proper chain
        let segments = self.segments();
        let (last_guid, last_terminal) = segments
            .last()
            .map(|segment| (segment.guid, segment.terminal))
            .unwrap_or((self.node.guid(), true));
        let end_guid = if last_terminal {
            last_guid
        } else {
            let patched = store.handle(Guid::random());
            patched.set(vocab::CTOR, vocab::EMPTY_LIST);
            store.handle(last_guid).set(vocab::LIST_TAIL, patched.guid());
            patched.guid()
        };

        let end = store.handle(end_guid);
        end.set(vocab::CTOR, vocab::NONEMPTY_LIST);
        end.set(vocab::LIST_HEAD, frame.guid());
        end.set(vocab::LIST_FIRST, first);

        let sentinel = store.handle(guid.unwrap_or_else(Guid::random));
        sentinel.set(vocab::CTOR, vocab::EMPTY_LIST);
        sentinel.set(vocab::LIST_FIRST, first);
        end.set(vocab::LIST_TAIL, sentinel.guid());

        FrameList { node: sentinel }
    }

    /// One record per segment from this one on, cycle-guarded.
    fn segments(&self) -> Vec<SegmentRec> {
        let store = self.node.store();
        let mut seen = BTreeSet::new();
        let mut chain = Vec::new();
        let mut current = self.node.guid();
        loop {
            if !seen.insert(current) {
                break;
            }
            let node = store.handle(current);
            let tail = node.guid_ref(vocab::LIST_TAIL);
            chain.push(SegmentRec {
                guid: current,
                frame: node.guid_ref(vocab::LIST_HEAD),
                terminal: tail.is_none(),
            });
            match tail {
                Some(next) => current = next,
                None => break,
            }
        }
        chain
    }
}

impl NodeView for FrameList {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}
