//! Raster views: a bitmap is a cropped region of an on-disk resource.
//!
//! The pixels themselves never enter the graph. A [`Resource`] names an
//! image file relative to the document; a [`Bitmap`] picks a [`Rectangle`]
//! out of it. Decoding and slicing rasters belongs to the extraction
//! tooling, not this crate.

use crate::model::Guid;
use crate::storage::{GraphStore, NodeHandle};
use crate::vocab;

use super::{Named, NodeView};

// ============================================================================
// Resource
// ============================================================================

/// An external raster file, referenced by path relative to the document.
#[derive(Debug, Clone)]
pub struct Resource {
    node: NodeHandle,
}

impl Resource {
    pub fn new(store: &GraphStore) -> Resource {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::RESOURCE);
        Resource { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Resource {
        Resource { node: store.handle(guid) }
    }

    pub fn relative_path(&self) -> Option<String> {
        self.node.text(vocab::RESOURCE_PATH)
    }

    pub fn set_relative_path(&self, path: &str) {
        self.node.set(vocab::RESOURCE_PATH, path);
    }
}

impl NodeView for Resource {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Resource {}

// ============================================================================
// Point
// ============================================================================

/// An integer 2D coordinate.
#[derive(Debug, Clone)]
pub struct Point {
    node: NodeHandle,
}

impl Point {
    pub fn new(store: &GraphStore) -> Point {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::POINT);
        Point { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Point {
        Point { node: store.handle(guid) }
    }

    pub fn x(&self) -> Option<i64> {
        self.node.int64(vocab::POINT_X)
    }

    pub fn y(&self) -> Option<i64> {
        self.node.int64(vocab::POINT_Y)
    }

    pub fn set_x(&self, x: i64) {
        self.node.set(vocab::POINT_X, x);
    }

    pub fn set_y(&self, y: i64) {
        self.node.set(vocab::POINT_Y, y);
    }
}

impl NodeView for Point {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Point {}

// ============================================================================
// Rectangle
// ============================================================================

/// An axis-aligned region: upper-left anchor point plus width and height.
#[derive(Debug, Clone)]
pub struct Rectangle {
    node: NodeHandle,
}

impl Rectangle {
    pub fn new(store: &GraphStore) -> Rectangle {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::RECTANGLE);
        Rectangle { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Rectangle {
        Rectangle { node: store.handle(guid) }
    }

    pub fn anchor(&self) -> Option<Point> {
        self.node
            .guid_ref(vocab::RECTANGLE_ANCHOR)
            .map(|guid| Point::attach(self.node.store(), guid))
    }

    pub fn set_anchor(&self, anchor: &Point) {
        self.node.set(vocab::RECTANGLE_ANCHOR, anchor.guid());
    }

    pub fn width(&self) -> Option<i64> {
        self.node.int64(vocab::RECTANGLE_WIDTH)
    }

    pub fn height(&self) -> Option<i64> {
        self.node.int64(vocab::RECTANGLE_HEIGHT)
    }

    pub fn set_width(&self, width: i64) {
        self.node.set(vocab::RECTANGLE_WIDTH, width);
    }

    pub fn set_height(&self, height: i64) {
        self.node.set(vocab::RECTANGLE_HEIGHT, height);
    }
}

impl NodeView for Rectangle {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Rectangle {}

// ============================================================================
// Bitmap
// ============================================================================

/// One drawable image: a crop rectangle within a resource.
#[derive(Debug, Clone)]
pub struct Bitmap {
    node: NodeHandle,
}

impl Bitmap {
    pub fn new(store: &GraphStore) -> Bitmap {
        let node = store.handle(Guid::random());
        node.set(vocab::CTOR, vocab::BITMAP);
        Bitmap { node }
    }

    pub fn attach(store: &GraphStore, guid: Guid) -> Bitmap {
        Bitmap { node: store.handle(guid) }
    }

    pub fn resource(&self) -> Option<Resource> {
        self.node
            .guid_ref(vocab::BITMAP_RESOURCE)
            .map(|guid| Resource::attach(self.node.store(), guid))
    }

    pub fn set_resource(&self, resource: &Resource) {
        self.node.set(vocab::BITMAP_RESOURCE, resource.guid());
    }

    pub fn crop(&self) -> Option<Rectangle> {
        self.node
            .guid_ref(vocab::BITMAP_CROP)
            .map(|guid| Rectangle::attach(self.node.store(), guid))
    }

    pub fn set_crop(&self, crop: &Rectangle) {
        self.node.set(vocab::BITMAP_CROP, crop.guid());
    }
}

impl NodeView for Bitmap {
    fn node(&self) -> &NodeHandle {
        &self.node
    }
}

impl Named for Bitmap {}
