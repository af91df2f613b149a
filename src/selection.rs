use tracing::debug;

use crate::model::ObjectId;
use crate::store::PlacementStore;

/// Tracks the single active object of a canvas and the canvas-wide crop flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionCoordinator {
    active: Option<ObjectId>,
    crop_mode: bool,
}

impl SelectionCoordinator {
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn crop_mode(&self) -> bool {
        self.crop_mode
    }

    /// Makes `target` the only selected object, or clears the selection.
    ///
    /// Returns false when nothing changed, including when `target` is
    /// already active or names an object that is not in `store`. The
    /// previous object loses any in-flight gesture; the new one is raised
    /// to the top of the draw order.
    pub fn set_active(&mut self, store: &mut PlacementStore, target: Option<ObjectId>) -> bool {
        if target == self.active {
            return false;
        }
        if target.is_some_and(|id| store.get(id).is_none()) {
            return false;
        }
        if let Some(obj) = self.active.take().and_then(|id| store.get_mut(id)) {
            obj.deactivate();
        }
        if let Some(id) = target {
            if let Some(obj) = store.get_mut(id) {
                obj.selected = true;
            }
            store.raise_to_top(id);
            self.active = Some(id);
        }
        debug!(active = ?self.active, "selection changed");
        true
    }

    pub fn set_crop_mode_for_all(&mut self, store: &mut PlacementStore, enabled: bool) {
        self.crop_mode = enabled;
        for obj in store.iter_mut() {
            obj.crop_mode_enabled = enabled;
        }
    }

    /// Drops the active reference without touching any object.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Called when `id` leaves the store.
    pub fn forget(&mut self, id: ObjectId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }
}
