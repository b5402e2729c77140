//! # Typed Views
//!
//! The store knows nothing but guids, labels, and values. This module
//! layers the animation domain on top: each type here is a thin wrapper
//! over one [`NodeHandle`], translating typed accessors into label reads
//! and writes against the well-known guids in [`crate::vocab`].
//!
//! | view | kind guid | fields |
//! |------|-----------|--------|
//! | [`Resource`] | `vocab::RESOURCE` | relative_path |
//! | [`Point`] | `vocab::POINT` | x, y |
//! | [`Rectangle`] | `vocab::RECTANGLE` | anchor, width, height |
//! | [`Bitmap`] | `vocab::BITMAP` | resource, crop |
//! | [`Frame`] | `vocab::FRAME` | name, bitmap, duration |
//! | [`FrameList`] | `vocab::EMPTY_LIST` / `vocab::NONEMPTY_LIST` | chain |
//! | [`Transition`] | `vocab::TRANSITION` | name, source, target |
//! | [`Clip`] | `vocab::CLIP` | name, frames |
//! | [`Sprite`] | `vocab::SPRITE` | name, position, frame |
//!
//! Every view follows the same contract: `new` mints a fresh guid and
//! stamps the advisory `ctor` kind; `attach` views an existing guid and
//! writes nothing. Nothing checks that an attached guid "really is" the
//! viewed kind: the same guid may be viewed as several kinds, and a
//! reference to a node the store has never seen simply reads as absent.

use crate::model::Guid;
use crate::storage::NodeHandle;
use crate::vocab;

mod bitmap;
mod clip;
mod frame;
mod framelist;
#[allow(clippy::module_inception)]
mod sprite;
mod transition;

pub use bitmap::{Bitmap, Point, Rectangle, Resource};
pub use clip::Clip;
pub use frame::Frame;
pub use framelist::FrameList;
pub use sprite::Sprite;
pub use transition::Transition;

/// A typed view is a recast of one node handle.
pub trait NodeView {
    fn node(&self) -> &NodeHandle;

    fn guid(&self) -> Guid {
        self.node().guid()
    }
}

/// Views whose nodes customarily carry a human-readable name.
///
/// List segments are the one unnamed kind; everything else implements this.
pub trait Named: NodeView {
    fn name(&self) -> Option<String> {
        self.node().text(vocab::NAME)
    }

    fn set_name(&self, name: &str) {
        self.node().set(vocab::NAME, name);
    }
}
