//! Clip assembly and transition-graph queries.
//!
//! Everything here is plain graph surgery over a [`GraphStore`]: the
//! builders mint nodes through the typed views in [`crate::sprite`] and
//! the queries fold over one kind bucket. Nothing holds state between
//! calls.

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::Guid;
use crate::sprite::{Bitmap, Clip, Frame, FrameList, Named, NodeView, Transition};
use crate::storage::GraphStore;
use crate::vocab;

// ============================================================================
// Frame timing
// ============================================================================

/// Frame duration for 12 frames per second, in microseconds.
pub const MICROS_12_FPS: i64 = 1_000_000 / 12;

/// Frame duration for 24 frames per second, in microseconds.
pub const MICROS_24_FPS: i64 = 1_000_000 / 24;

// ============================================================================
// Clip assembly
// ============================================================================

/// Everything needed to author one frame of a clip.
#[derive(Debug, Clone)]
pub struct FrameSpec {
    pub name: String,
    pub bitmap: Guid,
    pub duration_micros: i64,
}

impl FrameSpec {
    pub fn new(name: impl Into<String>, bitmap: Guid, duration_micros: i64) -> FrameSpec {
        FrameSpec { name: name.into(), bitmap, duration_micros }
    }
}

/// Builds a named clip from frame specs in one pass: mints the frames,
/// chains them, and wires playback-order transitions between consecutive
/// frames. With `looped`, a final transition closes the last frame back
/// to the first; a single-frame looped clip gets a self-loop.
///
/// The clip's frames field is bound to the chain's sentinel before the
/// first append, so the append converts that very segment in place and
/// the field ends up naming the head segment. An empty `frames` slice
/// leaves the bound sentinel unconverted: a valid empty clip.
pub fn assemble_clip(
    store: &GraphStore,
    name: &str,
    frames: &[FrameSpec],
    looped: bool,
) -> Clip {
    let clip = Clip::new(store);
    clip.set_name(name);

    let chain = FrameList::new(store);
    clip.set_frames(&chain);

    let mut built = Vec::with_capacity(frames.len());
    let mut cursor = chain;
    for spec in frames {
        let frame = Frame::new(store);
        frame.set_name(&spec.name);
        frame.set_bitmap(&Bitmap::attach(store, spec.bitmap));
        frame.set_duration_micros(spec.duration_micros);
        cursor = cursor.append(&frame, None);
        built.push(frame);
    }

    for i in 1..built.len() {
        let label = format!("{}->{}", frames[i - 1].name, frames[i].name);
        connect_frames(store, &label, &built[i - 1], &built[i]);
    }
    if looped {
        if let (Some(last), Some(first)) = (built.last(), built.first()) {
            let label = format!(
                "{}->{}",
                frames[frames.len() - 1].name,
                frames[0].name
            );
            connect_frames(store, &label, last, first);
        }
    }

    debug!(
        clip = %clip.guid(),
        frames = built.len(),
        looped,
        "assembled clip"
    );
    clip
}

/// Wires a named transition from `source` to `target`.
///
/// The transition's guid derives from its name, so calling this again
/// with the same arguments rewrites the same node instead of minting a
/// duplicate edge.
pub fn connect_frames(
    store: &GraphStore,
    name: &str,
    source: &Frame,
    target: &Frame,
) -> Transition {
    let hop = Transition::attach(store, Guid::derive(name));
    hop.node().set(vocab::CTOR, vocab::TRANSITION);
    hop.set_name(name);
    hop.set_source(source);
    hop.set_target(target);
    hop
}

// ============================================================================
// Transition-graph queries
// ============================================================================

/// Every frame in the store, in guid order.
pub fn all_frames(store: &GraphStore) -> Vec<Frame> {
    store
        .nodes_by_kind(vocab::FRAME)
        .into_iter()
        .map(|guid| Frame::attach(store, guid))
        .collect()
}

/// Every transition in the store, in guid order.
pub fn all_transitions(store: &GraphStore) -> Vec<Transition> {
    store
        .nodes_by_kind(vocab::TRANSITION)
        .into_iter()
        .map(|guid| Transition::attach(store, guid))
        .collect()
}

/// Frames that playback can reach but never leave: every transition
/// target that is no transition's source. A self-loop counts as a way
/// out, so a frame looping to itself is not absorbing. Transitions
/// missing an endpoint contribute only the endpoint they have.
pub fn find_absorbing_frames(store: &GraphStore) -> BTreeSet<Guid> {
    let mut sources = BTreeSet::new();
    let mut targets = BTreeSet::new();
    for hop in all_transitions(store) {
        if let Some(frame) = hop.source() {
            sources.insert(frame.guid());
        }
        if let Some(frame) = hop.target() {
            targets.insert(frame.guid());
        }
    }
    targets.retain(|guid| !sources.contains(guid));
    targets
}
