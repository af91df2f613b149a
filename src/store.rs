//! Ordered collection of the objects placed on one canvas.
//!
//! Order is z-order: the last object is drawn on top and wins hit-tests.

use tracing::debug;

use crate::model::{ObjectId, PlacedObject, PlacementRecord, Point};
use crate::surface::VectorSurface;

pub struct PlacementStore {
    objects: Vec<PlacedObject>,
    next_id: ObjectId,
}

impl Default for PlacementStore {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `object` on top of the stack and returns its freshly assigned id.
    ///
    /// Any id already carried by `object` is overwritten.
    pub fn add(&mut self, mut object: PlacedObject) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        object.id = id;
        debug!(id, path = %object.source_path.display(), "placed object");
        self.objects.push(object);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut PlacedObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedObject> {
        self.objects.iter_mut()
    }

    /// Moves the object to the end of the draw order. Returns false if the
    /// id is unknown.
    pub fn raise_to_top(&mut self, id: ObjectId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let object = self.objects.remove(index);
        self.objects.push(object);
        true
    }

    pub fn topmost_at(&self, pos: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.display_rect.contains(pos))
            .map(|o| o.id)
    }

    /// Geometry snapshot in draw order.
    pub fn serialize(&self) -> Vec<PlacementRecord> {
        self.objects.iter().map(PlacedObject::record).collect()
    }

    /// Replaces the contents with `records`, keeping each record's rectangle
    /// exactly as stored rather than re-centring.
    ///
    /// Documents are reloaded through `surface` so native sizes are fresh;
    /// a document that no longer loads comes back as a placeholder at its
    /// stored geometry.
    pub fn restore(&mut self, records: &[PlacementRecord], surface: &mut dyn VectorSurface) {
        self.clear();
        for record in records {
            let mut object = PlacedObject::from_document(record.path.clone(), surface);
            object.display_rect = record.rect;
            self.add(object);
        }
    }
}
