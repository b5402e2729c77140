//! The drawable: a sprite showing one frame at a position.

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;

use super::{Frame, Named, NodeView, Point};

/// A drawable element: the frame currently shown and where to draw it.
///
/// Rebinding the frame is a single field write; the rest of the graph,
/// frame chains included, is untouched.
#[derive(Debug, Clone)]
pub struct Sprite {
    node: NodeHandle,
}

impl Sprite {
    pub fn new(store: &GraphStore) -> Sprite {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::SPRITE);
        Sprite { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Sprite {
        Sprite { node: store.handle(guid) }
    }

    pub fn frame(&self) -> Option<Frame> {
        self.node
            .guid_ref(vocab::SPRITE_FRAME)
            .map(|guid| Frame::attach(self.node.store(), guid))
    }

    pub fn set_frame(&self, frame: &Frame) {
        self.node.set(vocab::SPRITE_FRAME, frame.guid());
    }

    pub fn position(&self) -> Option<Point> {
        self.node
            .guid_ref(vocab::SPRITE_POSITION)
            .map(|guid| Point::attach(self.node.store(), guid))
    }

    pub fn set_position(&self, position: &Point) {
        self.node.set(vocab::SPRITE_POSITION, position.guid());
    }
}

impl NodeView for Sprite {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Sprite {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rebind_is_one_write() {
        let store = GraphStore::new();
        let sprite = Sprite::new(&store);
        let a = Frame::new(&store);
        let b = Frame::new(&store);

        sprite.set_frame(&a);
        let before = store.node_count();

        sprite.set_frame(&b);
        assert_eq!(sprite.frame().unwrap().guid(), b.guid());
        assert_eq!(store.node_count(), before);
    }

    #[test]
    fn test_position() {
        let store = GraphStore::new();
        let sprite = Sprite::new(&store);
        assert!(sprite.position().is_none());

        let origin = Point::new(&store);
        origin.set_x(4);
        origin.set_y(-2);
        sprite.set_position(&origin);

        let read = sprite.position().unwrap();
        assert_eq!(read.x(), Some(4));
        assert_eq!(read.y(), Some(-2));
    }
}
