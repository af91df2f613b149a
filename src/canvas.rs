//! One slide's worth of placed objects plus the controller that routes
//! pointer events to them.
//!
//! The canvas owns the objects through its [`PlacementStore`] and the
//! active reference through its [`SelectionCoordinator`]. Pointer input
//! always goes through selection first; only the active object ever sees
//! gesture events.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::cropper;
use crate::error::CropError;
use crate::geometry::{scale_factor, to_document_space};
use crate::gesture::GestureEnd;
use crate::model::{ObjectId, PlacedObject, PlacementRecord, Point, Rect, Size};
use crate::selection::SelectionCoordinator;
use crate::store::PlacementStore;
use crate::surface::VectorSurface;

/// A crop that made it all the way to the object.
#[derive(Clone, Debug, PartialEq)]
pub struct CropApplied {
    pub id: ObjectId,
    pub path: PathBuf,
    pub native_size: Size,
}

pub struct Canvas {
    size: Size,
    store: PlacementStore,
    selection: SelectionCoordinator,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            store: PlacementStore::new(),
            selection: SelectionCoordinator::default(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bottom-to-top draw order.
    pub fn objects(&self) -> impl Iterator<Item = &PlacedObject> {
        self.store.iter()
    }

    pub fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.selection.active()
    }

    pub fn crop_mode(&self) -> bool {
        self.selection.crop_mode()
    }

    /// Places a document centred on the canvas at its intrinsic size.
    pub fn insert(&mut self, surface: &mut dyn VectorSurface, path: impl Into<PathBuf>) -> ObjectId {
        let mut object = PlacedObject::from_document(path, surface);
        let size = object.display_rect.size();
        let origin = Point::new(
            (self.size.width - size.width) * 0.5,
            (self.size.height - size.height) * 0.5,
        );
        object.display_rect = object.display_rect.moved_to(origin);
        self.add(object)
    }

    /// Places a document with explicit geometry.
    pub fn insert_at(
        &mut self,
        surface: &mut dyn VectorSurface,
        path: impl Into<PathBuf>,
        rect: Rect,
    ) -> ObjectId {
        let mut object = PlacedObject::from_document(path, surface);
        object.display_rect = rect;
        self.add(object)
    }

    fn add(&mut self, mut object: PlacedObject) -> ObjectId {
        object.crop_mode_enabled = self.selection.crop_mode();
        let path = object.source_path.clone();
        let id = self.store.add(object);
        info!(id, path = %path.display(), "inserted object");
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<PlacedObject> {
        self.selection.forget(id);
        self.store.remove(id)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.store.clear();
    }

    pub fn serialize(&self) -> Vec<PlacementRecord> {
        self.store.serialize()
    }

    /// Replaces every object with `records`, at their stored geometry.
    pub fn restore(&mut self, records: &[PlacementRecord], surface: &mut dyn VectorSurface) {
        self.selection.clear();
        self.store.restore(records, surface);
        let crop_mode = self.selection.crop_mode();
        self.selection.set_crop_mode_for_all(&mut self.store, crop_mode);
    }

    pub fn set_active(&mut self, target: Option<ObjectId>) -> bool {
        self.selection.set_active(&mut self.store, target)
    }

    pub fn set_crop_mode(&mut self, enabled: bool) {
        self.selection.set_crop_mode_for_all(&mut self.store, enabled);
    }

    /// Selects whatever lies under `pos` and starts a gesture on it; a
    /// press on empty canvas clears the selection.
    pub fn pointer_down(&mut self, pos: Point) {
        let hit = self.store.topmost_at(pos);
        self.set_active(hit);
        if let Some(obj) = hit.and_then(|id| self.store.get_mut(id)) {
            obj.pointer_down(pos);
        }
    }

    /// Returns true when something needs a redraw.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        self.active_object_mut()
            .is_some_and(|obj| obj.pointer_move(pos))
    }

    pub fn pointer_up(
        &mut self,
        surface: &mut dyn VectorSurface,
        pos: Point,
    ) -> Result<Option<CropApplied>, CropError> {
        let Some(obj) = self.active_object_mut() else {
            return Ok(None);
        };
        let id = obj.id;
        match obj.pointer_up(pos) {
            GestureEnd::CropRequested(region) => self.commit_crop(id, region, surface),
            GestureEnd::CropDiscarded => {
                debug!(id, "discarded zero-area crop region");
                Ok(None)
            }
            GestureEnd::Ignored | GestureEnd::Moved | GestureEnd::Resized => Ok(None),
        }
    }

    /// Drops any in-flight gesture without committing it.
    pub fn cancel_gesture(&mut self) {
        if let Some(obj) = self.active_object_mut() {
            obj.cancel_gesture();
        }
    }

    fn active_object_mut(&mut self) -> Option<&mut PlacedObject> {
        let id = self.selection.active()?;
        self.store.get_mut(id)
    }

    /// Converts a display-space crop region on object `id` into document
    /// space, writes the cropped document and points the object at it.
    fn commit_crop(
        &mut self,
        id: ObjectId,
        region: Rect,
        surface: &mut dyn VectorSurface,
    ) -> Result<Option<CropApplied>, CropError> {
        let Some(obj) = self.store.get(id) else {
            return Ok(None);
        };
        if !obj.loaded {
            debug!(id, "skipping crop of an object whose document never loaded");
            return Ok(None);
        }
        let Some((sx, sy)) = scale_factor(obj.native_size, obj.display_rect.size()) else {
            debug!(id, "skipping crop, display size has a zero dimension");
            return Ok(None);
        };
        let document_rect = to_document_space(region, sx, sy);
        if document_rect.is_degenerate() {
            debug!(id, "crop region vanished after conversion to document space");
            return Ok(None);
        }

        // The staged file is deleted on drop, so a failed reload leaves any
        // earlier output (possibly another object's document) as it was.
        let staged = cropper::crop(obj.path(), document_rect)?;
        debug!(id, target = %staged.target().display(), "reloading staged crop");
        surface.load(staged.path())?;
        let output = staged.commit()?;
        let native_size = surface.load(&output.path)?;

        let Some(obj) = self.store.get_mut(id) else {
            return Ok(None);
        };
        obj.apply_crop(output.path.clone(), native_size);
        info!(
            id,
            path = %output.path.display(),
            view_box = %output.view_box,
            "applied crop"
        );
        Ok(Some(CropApplied {
            id,
            path: output.path,
            native_size,
        }))
    }
}
