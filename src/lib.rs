//! # spritegraph — Guid-Addressed Sprite Animation Graph
//!
//! A sprite animation store where every fact is graph data: nodes are
//! 128-bit guids, each node is a map from label guid to value, and the
//! whole graph round-trips through one JSON document.
//!
//! ## Design Principles
//!
//! 1. **One storage shape**: a node is a label-guid to value map; typed views add meaning, never storage
//! 2. **Views over handles**: `Frame`, `Clip`, `Sprite` wrap a live [`NodeHandle`], not a copy of its data
//! 3. **Names are data**: a human name is an ordinary label value; the index over names is derived, never stored
//! 4. **Labels are guids too**: the vocabulary nodes naming them ship with the crate and merge into every session
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spritegraph::{NodeView, SpriteGraph};
//! use spritegraph::anim::{self, FrameSpec, MICROS_12_FPS};
//! use spritegraph::sprite::Bitmap;
//!
//! # fn example() -> spritegraph::Result<()> {
//! let graph = SpriteGraph::new();
//!
//! let art = Bitmap::new(graph.store());
//! let clip = anim::assemble_clip(
//!     graph.store(),
//!     "walk",
//!     &[
//!         FrameSpec::new("walk.0", art.guid(), MICROS_12_FPS),
//!         FrameSpec::new("walk.1", art.guid(), MICROS_12_FPS),
//!     ],
//!     true,
//! );
//! println!("assembled clip {}", clip.guid());
//!
//! graph.save_to("walk.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Value Encodings
//!
//! | Variant | JSON | Meaning |
//! |---------|------|---------|
//! | `Ref` | `{"guid": "<32 hex>"}` | Reference to another node |
//! | `Text` | `{"string": "..."}` | UTF-8 text |
//! | `Int64` | `{"int64": 83333}` | Signed 64-bit integer |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod index;
pub mod vocab;
pub mod sprite;
pub mod anim;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Guid, Value};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{Document, GraphStore, NodeHandle};

// ============================================================================
// Re-exports: Index
// ============================================================================

pub use index::NameIndex;

// ============================================================================
// Re-exports: View traits
// ============================================================================

pub use sprite::{Named, NodeView};

// ============================================================================
// Top-level SpriteGraph session
// ============================================================================

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::OnceLock;

use sprite::{Clip, Sprite};

/// The primary entry point. A `SpriteGraph` owns a store seeded with the
/// canonical vocabulary and memoizes the name index built over it.
///
/// The index is built on first use and kept for the life of the session:
/// names written afterwards resolve only through a fresh session (or a
/// direct [`NameIndex::build`]). A failed build is not memoized, so
/// repairing a duplicate name and asking again succeeds.
pub struct SpriteGraph {
    store: GraphStore,
    names: OnceLock<NameIndex>,
}

impl SpriteGraph {
    /// A fresh session over an empty graph plus the canonical vocabulary.
    pub fn new() -> SpriteGraph {
        SpriteGraph::from_document(Document::default())
    }

    /// Opens a document file. See [`from_document`].
    ///
    /// [`from_document`]: SpriteGraph::from_document
    pub fn open(path: impl AsRef<Path>) -> Result<SpriteGraph> {
        let file = File::open(path)?;
        let document = Document::from_reader(BufReader::new(file))?;
        Ok(SpriteGraph::from_document(document))
    }

    /// Builds a session from a decoded document. The canonical vocabulary
    /// is merged over the document's entries, so its thirty label nodes
    /// always carry their canonical names, whatever the document said.
    pub fn from_document(document: Document) -> SpriteGraph {
        let store = GraphStore::load(document);
        store.merge(&vocab::fragment());
        SpriteGraph { store, names: OnceLock::new() }
    }

    /// Writes the whole graph to `path` as the canonical JSON document.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.store.save().to_writer(BufWriter::new(file))
    }

    pub fn to_document(&self) -> Document {
        self.store.save()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// The session's name index, built on first call.
    pub fn names(&self) -> Result<&NameIndex> {
        if let Some(index) = self.names.get() {
            return Ok(index);
        }
        let index = NameIndex::build(&self.store, vocab::NAME)?;
        Ok(self.names.get_or_init(|| index))
    }

    /// The guid asserting `name`, if the index knows one.
    pub fn resolve(&self, name: &str) -> Result<Option<Guid>> {
        Ok(self.names()?.resolve(name))
    }

    pub fn clip(&self, name: &str) -> Result<Clip> {
        match self.resolve(name)? {
            Some(guid) => Ok(Clip::attach(&self.store, guid)),
            None => Err(Error::NotFound(format!("clip {name:?}"))),
        }
    }

    pub fn sprite(&self, name: &str) -> Result<Sprite> {
        match self.resolve(name)? {
            Some(guid) => Ok(Sprite::attach(&self.store, guid)),
            None => Err(Error::NotFound(format!("sprite {name:?}"))),
        }
    }

    /// The document's entry-point sprite, if one is recorded.
    pub fn root_sprite(&self) -> Option<Sprite> {
        self.store.root().map(|guid| Sprite::attach(&self.store, guid))
    }

    pub fn set_root_sprite(&self, sprite: &Sprite) {
        self.store.set_root(Some(sprite.guid()));
    }
}

impl Default for SpriteGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpriteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteGraph")
            .field("store", &self.store)
            .field("names", &self.names.get().map(NameIndex::len))
            .finish()
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    #[error("Duplicate name {name:?}: first {first}, second {second}")]
    DuplicateName { name: String, first: Guid, second: Guid },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid guid: {0}")]
    InvalidGuid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_carries_the_vocabulary() {
        let graph = SpriteGraph::new();
        assert_eq!(graph.resolve("frame").unwrap(), Some(vocab::FRAME));
        assert_eq!(graph.resolve("Clip.frames").unwrap(), Some(vocab::CLIP_FRAMES));
        assert_eq!(graph.names().unwrap().len(), vocab::ENTRIES.len());
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let graph = SpriteGraph::new();
        assert!(matches!(graph.clip("nope"), Err(Error::NotFound(_))));
        assert!(matches!(graph.sprite("nope"), Err(Error::NotFound(_))));
        assert_eq!(graph.resolve("nope").unwrap(), None);
    }

    #[test]
    fn test_names_are_memoized_per_session() {
        let graph = SpriteGraph::new();
        let clip = anim::assemble_clip(graph.store(), "walk", &[], false);
        assert_eq!(graph.resolve("walk").unwrap(), Some(clip.guid()));

        // written after the first resolve: invisible to this session
        anim::assemble_clip(graph.store(), "run", &[], false);
        assert_eq!(graph.resolve("run").unwrap(), None);

        let reopened = SpriteGraph::from_document(graph.to_document());
        assert!(reopened.resolve("run").unwrap().is_some());
    }

    #[test]
    fn test_duplicate_name_fails_the_index() {
        let graph = SpriteGraph::new();
        let a = Guid([0x0A; 16]);
        let b = Guid([0x0B; 16]);
        graph.store().set_value(a, vocab::NAME, "twin");
        graph.store().set_value(b, vocab::NAME, "twin");

        match graph.names() {
            Err(Error::DuplicateName { name, first, second }) => {
                assert_eq!(name, "twin");
                assert_eq!(first, a);
                assert_eq!(second, b);
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn test_vocabulary_outranks_document_renames() {
        let graph = SpriteGraph::new();
        // a document that renamed a canonical label node
        let mut document = graph.to_document();
        document
            .guid_map
            .get_mut(&vocab::FRAME)
            .unwrap()
            .insert(vocab::NAME, Value::Text("NotAFrame".into()));

        let reopened = SpriteGraph::from_document(document);
        assert_eq!(reopened.resolve("frame").unwrap(), Some(vocab::FRAME));
        assert_eq!(reopened.resolve("NotAFrame").unwrap(), None);
    }

    #[test]
    fn test_root_sprite_round_trips() {
        let graph = SpriteGraph::new();
        assert!(graph.root_sprite().is_none());

        let hero = Sprite::new(graph.store());
        graph.set_root_sprite(&hero);
        assert_eq!(graph.root_sprite().unwrap().guid(), hero.guid());

        let reopened = SpriteGraph::from_document(graph.to_document());
        assert_eq!(reopened.root_sprite().unwrap().guid(), hero.guid());
    }
}
