//! Well-known label and kind guids.
//!
//! The graph's vocabulary is itself stored in the graph: every label and
//! every kind is a node, named under [`NAME`]. This module pins the
//! canonical guids so that documents written by any tooling generation
//! resolve identically, and builds the mergeable [`fragment`] a session
//! folds into its working store before resolving anything by name.
//!
//! All guids except [`LIST_FIRST`] predate this crate and must never
//! change. `LIST_FIRST` is this crate's one addition (the cached
//! first-frame label on list segments); it is derived from its own name so
//! independent builds agree on it.

use crate::model::Guid;
use crate::storage::GraphStore;

/// Advisory kind tag: which vocabulary node "constructed" this node.
pub const CTOR: Guid = Guid::from_static("aba6ac79fd3d409da860a77c90942852");
/// Human-readable name of a node.
pub const NAME: Guid = Guid::from_static("169a81aefca74e92b45e3fa03c7021df");

/// Clip kind.
pub const CLIP: Guid = Guid::from_static("e8cec171b1f5462297f2e81ab606b687");
/// Clip → head segment of its frame sequence.
pub const CLIP_FRAMES: Guid = Guid::from_static("7c03dc958d8642b4be3417e69e36695c");

/// Kind of the terminal list sentinel.
pub const EMPTY_LIST: Guid = Guid::from_static("51fb7a7a95d4486bb197509fd53dec2d");
/// Kind of a non-terminal list segment.
pub const NONEMPTY_LIST: Guid = Guid::from_static("f0408beb29c74dc7bc20dc461104e949");
/// Segment → its frame.
pub const LIST_HEAD: Guid = Guid::from_static("a74851b7a58f4e52b72ee719b258a7b1");
/// Segment → next segment.
pub const LIST_TAIL: Guid = Guid::from_static("e53f14ab72eb40f590e5ae53fb53e988");
/// Segment → first frame of the whole chain (cached on every segment).
/// Equals `Guid::derive("NonemptyList.first")`.
pub const LIST_FIRST: Guid = Guid::from_static("d1ae2335004085739d169bf0907259df");

/// Frame kind.
pub const FRAME: Guid = Guid::from_static("8b057dd7a9c84b7180cb2d8d6015b833");
/// Frame → its bitmap.
pub const FRAME_BITMAP: Guid = Guid::from_static("c6b725e0c8bb419ca9408eec5febbde8");
/// Frame → display duration in microseconds.
pub const FRAME_DURATION: Guid = Guid::from_static("a2be632d888143e89ddfd4b1b8c8492d");

/// Bitmap kind.
pub const BITMAP: Guid = Guid::from_static("bc7e9e34c3464292ba39c2b1b9dc8902");
/// Bitmap → crop rectangle within the resource.
pub const BITMAP_CROP: Guid = Guid::from_static("995607dcd31e477994333565511c1de2");
/// Bitmap → backing raster resource.
pub const BITMAP_RESOURCE: Guid = Guid::from_static("0de9d2d0679945ca9e6957f049cc982c");

/// Resource kind.
pub const RESOURCE: Guid = Guid::from_static("6ecf1345ea0b4865b92569971b100b09");
/// Resource → path relative to the document.
pub const RESOURCE_PATH: Guid = Guid::from_static("4e09f9df1fdf4eb4964ff9ed1b375dbb");

/// Point kind.
pub const POINT: Guid = Guid::from_static("bfa8113cb5e5436ebd76ab5418b7efd1");
pub const POINT_X: Guid = Guid::from_static("825142afc2934fbcb5126e149ac5ba31");
pub const POINT_Y: Guid = Guid::from_static("66b25e276cfb4d83a7032baaa4369b6f");

/// Rectangle kind.
pub const RECTANGLE: Guid = Guid::from_static("c5f33d38b1104896ba54d09dba3d0acf");
/// Rectangle → upper-left corner point.
pub const RECTANGLE_ANCHOR: Guid = Guid::from_static("667901a1e1c54035b7e586a05fffed2e");
pub const RECTANGLE_WIDTH: Guid = Guid::from_static("1f22dbb5504344fb93f57f0f0eb0ba6f");
pub const RECTANGLE_HEIGHT: Guid = Guid::from_static("68b5d34bb7954ad6850cd55cbae05ccf");

/// Sprite kind.
pub const SPRITE: Guid = Guid::from_static("158aafa594b44474a7da66a8cfa419f0");
/// Sprite → currently displayed frame.
pub const SPRITE_FRAME: Guid = Guid::from_static("4b079607f347492c8250059b5c0b2ef6");
/// Sprite → screen position point.
pub const SPRITE_POSITION: Guid = Guid::from_static("2175a23088d347cb9256b7f6c6eae310");

/// Transition kind.
pub const TRANSITION: Guid = Guid::from_static("8fe06c0750344322bd773f56bdd73b0a");
/// Transition → source frame.
pub const TRANSITION_SOURCE: Guid = Guid::from_static("8ea9b7bc02e748ae9dc2e169590e71e3");
/// Transition → target frame.
pub const TRANSITION_TARGET: Guid = Guid::from_static("ff7abe687a764f9d80d67a70424c329a");

/// Every vocabulary guid with its canonical name, ascending by name.
pub const ENTRIES: &[(Guid, &str)] = &[
    (CLIP, "Clip"),
    (CLIP_FRAMES, "Clip.frames"),
    (EMPTY_LIST, "EmptyList"),
    (NONEMPTY_LIST, "NonemptyList"),
    (LIST_FIRST, "NonemptyList.first"),
    (LIST_HEAD, "NonemptyList.head"),
    (LIST_TAIL, "NonemptyList.tail"),
    (BITMAP, "bitmap"),
    (BITMAP_CROP, "bitmap.crop"),
    (BITMAP_RESOURCE, "bitmap.resource"),
    (CTOR, "ctor"),
    (FRAME, "frame"),
    (FRAME_BITMAP, "frame.bitmap"),
    (FRAME_DURATION, "frame.duration_microseconds"),
    (NAME, "name"),
    (POINT, "point"),
    (POINT_X, "point.x"),
    (POINT_Y, "point.y"),
    (RECTANGLE, "rectangle"),
    (RECTANGLE_ANCHOR, "rectangle.anchor"),
    (RECTANGLE_HEIGHT, "rectangle.height"),
    (RECTANGLE_WIDTH, "rectangle.width"),
    (RESOURCE, "resource"),
    (RESOURCE_PATH, "resource.relative_path"),
    (SPRITE, "sprite"),
    (SPRITE_FRAME, "sprite.frame"),
    (SPRITE_POSITION, "sprite.position"),
    (TRANSITION, "transition"),
    (TRANSITION_SOURCE, "transition.source"),
    (TRANSITION_TARGET, "transition.target"),
];

/// The canonical name of a vocabulary guid, if it is one.
pub fn name_of(guid: Guid) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(entry, _)| *entry == guid)
        .map(|(_, name)| *name)
}

/// A store containing every vocabulary node, named. Merging this fragment
/// into a working store is idempotent and makes name resolution of the
/// vocabulary total.
pub fn fragment() -> GraphStore {
    let store = GraphStore::new();
    for (guid, name) in ENTRIES {
        store.set_value(*guid, NAME, *name);
    }
    store
}
