//! Frame view: one displayed image with a duration.

use std::time::Duration;

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;

use super::{Bitmap, Named, NodeView, Transition};

/// One animation frame: a bitmap shown for a duration.
///
/// Frames are the vertices of the transition graph; [`outgoing`] answers
/// which frames playback may move to next.
///
/// [`outgoing`]: Frame::outgoing
#[derive(Debug, Clone)]
pub struct Frame {
    node: NodeHandle,
}

impl Frame {
    pub fn new(store: &GraphStore) -> Frame {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::FRAME);
        Frame { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Frame {
        Frame { node: store.handle(guid) }
    }

    pub fn bitmap(&self) -> Option<Bitmap> {
        self.node
            .guid_ref(vocab::FRAME_BITMAP)
            .map(|guid| Bitmap::attach(self.node.store(), guid))
    }

    pub fn set_bitmap(&self, bitmap: &Bitmap) {
        self.node.set(vocab::FRAME_BITMAP, bitmap.guid());
    }

    /// Display time in microseconds, as stored.
    pub fn duration_micros(&self) -> Option<i64> {
        self.node.int64(vocab::FRAME_DURATION)
    }

    pub fn set_duration_micros(&self, micros: i64) {
        self.node.set(vocab::FRAME_DURATION, micros);
    }

    /// Display time as a `Duration`. A negative stored count reads as
    /// absent, the same as a missing label.
    pub fn duration(&self) -> Option<Duration> {
        self.duration_micros()
            .and_then(|micros| u64::try_from(micros).ok())
            .map(Duration::from_micros)
    }

    /// Every transition whose source is this frame, ascending by guid.
    ///
    /// This is the branching view of playback: zero results means the
    /// frame is a dead end, one means linear motion, more means a choice.
    pub fn outgoing(&self) -> Vec<Transition> {
        let store = self.node.store();
        store
            .nodes_by_kind(vocab::TRANSITION)
            .into_iter()
            .map(|guid| Transition::attach(store, guid))
            .filter(|transition| {
                transition.source().map(|source| source.guid()) == Some(self.guid())
            })
            .collect()
    }
}

impl NodeView for Frame {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Frame {}
