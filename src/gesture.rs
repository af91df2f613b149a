//! Per-object pointer gestures: move, eight-handle resize, and crop-region
//! drawing.
//!
//! A gesture lives between pointer-down and pointer-up on a selected
//! object. Pointer positions are canvas coordinates; the crop region is
//! kept relative to the object's top-left corner so it can be scaled
//! straight into document space.

use crate::geometry::{ResizeHandle, handle_at, meets_min_size, normalize, resize_rect};
use crate::model::{PlacedObject, Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    MovingObject {
        grab_offset: Vec2,
    },
    ResizingObject {
        handle: ResizeHandle,
        anchor_rect: Rect,
        pointer_anchor: Point,
    },
    DrawingCropRegion {
        origin: Point,
        current: Point,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    /// The live crop rectangle in object-local coordinates, if one is being drawn.
    pub fn crop_preview(&self) -> Option<Rect> {
        match self {
            GestureState::DrawingCropRegion { origin, current } => {
                Some(normalize(Rect::from_two_points(*origin, *current)))
            }
            _ => None,
        }
    }
}

/// How a gesture ended on pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEnd {
    Ignored,
    Moved,
    Resized,
    CropDiscarded,
    /// A non-degenerate crop region in object-local display pixels.
    CropRequested(Rect),
}

impl PlacedObject {
    fn local(&self, pos: Point) -> Point {
        let offset = pos - self.display_rect.origin();
        Point::new(offset.x, offset.y)
    }

    pub fn pointer_down(&mut self, pos: Point) {
        if !self.selected {
            return;
        }
        self.gesture = if self.crop_mode_enabled {
            let local = self.local(pos);
            GestureState::DrawingCropRegion {
                origin: local,
                current: local,
            }
        } else if let Some(handle) = handle_at(self.display_rect, pos) {
            GestureState::ResizingObject {
                handle,
                anchor_rect: self.display_rect,
                pointer_anchor: pos,
            }
        } else {
            GestureState::MovingObject {
                grab_offset: pos - self.display_rect.origin(),
            }
        };
    }

    /// Returns true when the object needs a redraw.
    pub fn pointer_move(&mut self, pos: Point) -> bool {
        if !self.selected {
            return false;
        }
        let local = self.local(pos);
        match &mut self.gesture {
            GestureState::Idle => false,
            GestureState::DrawingCropRegion { current, .. } => {
                *current = local;
                true
            }
            GestureState::ResizingObject {
                handle,
                anchor_rect,
                pointer_anchor,
            } => {
                let resized = resize_rect(*anchor_rect, *handle, pos - *pointer_anchor);
                if !meets_min_size(resized) {
                    return false;
                }
                self.display_rect = resized;
                true
            }
            GestureState::MovingObject { grab_offset } => {
                self.display_rect = self.display_rect.moved_to(pos - *grab_offset);
                true
            }
        }
    }

    /// Ends the gesture; the object is always back to `Idle` afterwards.
    pub fn pointer_up(&mut self, pos: Point) -> GestureEnd {
        let gesture = std::mem::take(&mut self.gesture);
        if !self.selected {
            return GestureEnd::Ignored;
        }
        match gesture {
            GestureState::Idle => GestureEnd::Ignored,
            GestureState::MovingObject { .. } => GestureEnd::Moved,
            GestureState::ResizingObject { .. } => GestureEnd::Resized,
            GestureState::DrawingCropRegion { origin, .. } => {
                let region = normalize(Rect::from_two_points(origin, self.local(pos)));
                if region.is_degenerate() {
                    GestureEnd::CropDiscarded
                } else {
                    GestureEnd::CropRequested(region)
                }
            }
        }
    }

    pub fn cancel_gesture(&mut self) {
        self.gesture = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MIN_OBJECT_SIZE;
    use crate::model::Size;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn object(rect: Rect) -> PlacedObject {
        PlacedObject {
            id: 1,
            source_path: PathBuf::from("a.svg"),
            display_rect: rect,
            native_size: rect.size(),
            loaded: true,
            selected: true,
            crop_mode_enabled: false,
            gesture: GestureState::Idle,
        }
    }

    #[test]
    fn unselected_object_ignores_everything() {
        let mut obj = object(Rect::new(0.0, 0.0, 100.0, 100.0));
        obj.selected = false;
        obj.pointer_down(Point::new(50.0, 50.0));
        assert!(obj.gesture.is_idle());
        assert!(!obj.pointer_move(Point::new(80.0, 80.0)));
        assert_eq!(obj.display_rect, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(obj.pointer_up(Point::new(80.0, 80.0)), GestureEnd::Ignored);
    }

    #[test]
    fn interior_press_moves_by_grab_offset() {
        let mut obj = object(Rect::new(100.0, 100.0, 50.0, 50.0));
        obj.pointer_down(Point::new(120.0, 130.0));
        assert!(matches!(obj.gesture, GestureState::MovingObject { .. }));
        assert!(obj.pointer_move(Point::new(220.0, 140.0)));
        assert_eq!(obj.display_rect, Rect::new(200.0, 110.0, 50.0, 50.0));
        assert_eq!(obj.pointer_up(Point::new(220.0, 140.0)), GestureEnd::Moved);
        assert!(obj.gesture.is_idle());
    }

    #[test]
    fn handle_press_resizes_from_anchor() {
        let mut obj = object(Rect::new(100.0, 100.0, 100.0, 100.0));
        obj.pointer_down(Point::new(195.0, 195.0));
        assert!(matches!(
            obj.gesture,
            GestureState::ResizingObject {
                handle: ResizeHandle::SE,
                ..
            }
        ));
        obj.pointer_move(Point::new(215.0, 225.0));
        assert_eq!(obj.display_rect, Rect::new(100.0, 100.0, 120.0, 130.0));
        // deltas are always measured from the press, not the previous tick
        obj.pointer_move(Point::new(205.0, 195.0));
        assert_eq!(obj.display_rect, Rect::new(100.0, 100.0, 110.0, 100.0));
        assert_eq!(obj.pointer_up(Point::new(205.0, 195.0)), GestureEnd::Resized);
    }

    #[test]
    fn left_handle_keeps_right_edge() {
        let mut obj = object(Rect::new(100.0, 100.0, 100.0, 100.0));
        obj.pointer_down(Point::new(102.0, 150.0));
        obj.pointer_move(Point::new(132.0, 170.0));
        assert_eq!(obj.display_rect, Rect::new(130.0, 100.0, 70.0, 100.0));
    }

    #[test]
    fn collapsing_resize_is_a_no_op() {
        let mut obj = object(Rect::new(0.0, 0.0, 100.0, 100.0));
        obj.pointer_down(Point::new(95.0, 95.0));
        obj.pointer_move(Point::new(60.0, 60.0));
        assert_eq!(obj.display_rect, Rect::new(0.0, 0.0, 65.0, 65.0));
        assert!(!obj.pointer_move(Point::new(15.0, 60.0)));
        assert_eq!(obj.display_rect, Rect::new(0.0, 0.0, 65.0, 65.0));
        assert!(matches!(obj.gesture, GestureState::ResizingObject { .. }));
    }

    #[test]
    fn crop_mode_press_draws_local_region() {
        let mut obj = object(Rect::new(100.0, 100.0, 200.0, 200.0));
        obj.crop_mode_enabled = true;
        // even a press on a handle starts a crop region in crop mode
        obj.pointer_down(Point::new(102.0, 102.0));
        assert!(matches!(obj.gesture, GestureState::DrawingCropRegion { .. }));
        obj.pointer_move(Point::new(150.0, 170.0));
        assert_eq!(
            obj.gesture.crop_preview(),
            Some(Rect::new(2.0, 2.0, 48.0, 68.0))
        );
        assert_eq!(obj.display_rect, Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(
            obj.pointer_up(Point::new(150.0, 170.0)),
            GestureEnd::CropRequested(Rect::new(2.0, 2.0, 48.0, 68.0))
        );
        assert!(obj.gesture.is_idle());
    }

    #[test]
    fn crop_region_dragged_up_left_is_normalized() {
        let mut obj = object(Rect::new(0.0, 0.0, 200.0, 200.0));
        obj.crop_mode_enabled = true;
        obj.pointer_down(Point::new(150.0, 120.0));
        assert_eq!(
            obj.pointer_up(Point::new(50.0, 20.0)),
            GestureEnd::CropRequested(Rect::new(50.0, 20.0, 100.0, 100.0))
        );
    }

    #[test]
    fn zero_area_crop_is_discarded() {
        let mut obj = object(Rect::new(0.0, 0.0, 200.0, 200.0));
        obj.crop_mode_enabled = true;
        obj.pointer_down(Point::new(50.0, 50.0));
        assert_eq!(obj.pointer_up(Point::new(50.0, 90.0)), GestureEnd::CropDiscarded);
        assert!(obj.gesture.is_idle());
    }

    #[test]
    fn deselect_mid_drag_cancels() {
        let mut obj = object(Rect::new(0.0, 0.0, 100.0, 100.0));
        obj.pointer_down(Point::new(50.0, 50.0));
        obj.deactivate();
        assert!(obj.gesture.is_idle());
        assert_eq!(obj.pointer_up(Point::new(70.0, 70.0)), GestureEnd::Ignored);
        assert_eq!(obj.display_rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    fn any_handle() -> impl Strategy<Value = ResizeHandle> {
        prop::sample::select(ResizeHandle::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn resize_never_breaks_min_size(
            w in 21.0f32..400.0,
            h in 21.0f32..400.0,
            handle in any_handle(),
            moves in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 1..20),
        ) {
            let rect = Rect::from_origin_size(Point::new(300.0, 300.0), Size::new(w, h));
            let mut obj = object(rect);
            let press = handle.hit_region(rect).center();
            obj.gesture = GestureState::ResizingObject {
                handle,
                anchor_rect: rect,
                pointer_anchor: press,
            };
            for (dx, dy) in moves {
                obj.pointer_move(press + Vec2::new(dx, dy));
                prop_assert!(obj.display_rect.width >= MIN_OBJECT_SIZE);
                prop_assert!(obj.display_rect.height >= MIN_OBJECT_SIZE);
            }
        }
    }
}
