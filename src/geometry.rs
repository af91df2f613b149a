use crate::model::{Point, Rect, Size, Vec2};

/// Side length of a resize handle's square hit-region, in canvas pixels.
pub const HANDLE_SIZE: f32 = 10.0;

/// A resize only applies when both resulting dimensions exceed this.
pub const MIN_OBJECT_SIZE: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NW,
    N,
    NE,
    W,
    E,
    SW,
    S,
    SE,
}

impl ResizeHandle {
    /// Hit-test order; the first match wins when regions overlap.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::W,
        ResizeHandle::E,
        ResizeHandle::SW,
        ResizeHandle::S,
        ResizeHandle::SE,
    ];

    fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::NW | ResizeHandle::W | ResizeHandle::SW)
    }

    fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::NW | ResizeHandle::N | ResizeHandle::NE)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::NE | ResizeHandle::E | ResizeHandle::SE)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::SW | ResizeHandle::S | ResizeHandle::SE)
    }

    /// The handle's square hit-region, inside `rect` against its edge or corner.
    pub fn hit_region(self, rect: Rect) -> Rect {
        let half = HANDLE_SIZE * 0.5;
        let left = rect.left();
        let center_x = rect.left() + rect.width * 0.5 - half;
        let right = rect.right() - HANDLE_SIZE;
        let top = rect.top();
        let center_y = rect.top() + rect.height * 0.5 - half;
        let bottom = rect.bottom() - HANDLE_SIZE;
        let (x, y) = match self {
            ResizeHandle::NW => (left, top),
            ResizeHandle::N => (center_x, top),
            ResizeHandle::NE => (right, top),
            ResizeHandle::W => (left, center_y),
            ResizeHandle::E => (right, center_y),
            ResizeHandle::SW => (left, bottom),
            ResizeHandle::S => (center_x, bottom),
            ResizeHandle::SE => (right, bottom),
        };
        Rect::new(x, y, HANDLE_SIZE, HANDLE_SIZE)
    }
}

pub fn handle_at(rect: Rect, pos: Point) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|handle| handle.hit_region(rect).contains(pos))
}

/// Moves only the edges owned by `handle` by `delta`, relative to `anchor`.
pub fn resize_rect(anchor: Rect, handle: ResizeHandle, delta: Vec2) -> Rect {
    let mut left = anchor.left();
    let mut top = anchor.top();
    let mut right = anchor.right();
    let mut bottom = anchor.bottom();
    if handle.moves_left() {
        left += delta.x;
    }
    if handle.moves_top() {
        top += delta.y;
    }
    if handle.moves_right() {
        right += delta.x;
    }
    if handle.moves_bottom() {
        bottom += delta.y;
    }
    Rect::from_edges(left, top, right, bottom)
}

pub fn meets_min_size(rect: Rect) -> bool {
    rect.width > MIN_OBJECT_SIZE && rect.height > MIN_OBJECT_SIZE
}

/// Document units per display pixel on each axis.
///
/// Returns `None` when the display size has a zero (or non-finite) dimension,
/// in which case the conversion is undefined.
pub fn scale_factor(native: Size, display: Size) -> Option<(f32, f32)> {
    if display.width == 0.0 || display.height == 0.0 {
        return None;
    }
    let sx = native.width / display.width;
    let sy = native.height / display.height;
    (sx.is_finite() && sy.is_finite()).then_some((sx, sy))
}

pub fn to_document_space(rect: Rect, sx: f32, sy: f32) -> Rect {
    Rect::new(
        (rect.x * sx).trunc(),
        (rect.y * sy).trunc(),
        (rect.width * sx).trunc(),
        (rect.height * sy).trunc(),
    )
}

/// Same area with the origin moved to the minimum corner.
pub fn normalize(rect: Rect) -> Rect {
    let left = rect.left().min(rect.right());
    let top = rect.top().min(rect.bottom());
    Rect::new(left, top, rect.width.abs(), rect.height.abs())
}
