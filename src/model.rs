use eframe::egui;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::gesture::GestureState;
use crate::surface::VectorSurface;

pub type ObjectId = u64;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Inverse of [`Point::to_screen`].
    pub fn from_screen(p: egui::Pos2, origin: egui::Pos2, scale: f32) -> Self {
        let v = (p - origin) / scale;
        Self { x: v.x, y: v.y }
    }

    pub fn to_screen(self, origin: egui::Pos2, scale: f32) -> egui::Pos2 {
        origin + egui::vec2(self.x, self.y) * scale
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle stored as origin plus extent.
///
/// Width and height may be negative while a drag is in flight; use
/// [`crate::geometry::normalize`] before treating it as an area.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "w")]
    pub width: f32,
    #[serde(rename = "h")]
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn from_two_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn left(self) -> f32 {
        self.x
    }

    pub fn top(self) -> f32 {
        self.y
    }

    pub fn right(self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    pub fn is_degenerate(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn moved_to(self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    pub fn with_size(self, size: Size) -> Self {
        Self::new(self.x, self.y, size.width, size.height)
    }

    /// Canvas rectangle drawn at `scale` with the canvas origin at `origin`.
    pub fn to_screen(self, origin: egui::Pos2, scale: f32) -> egui::Rect {
        egui::Rect::from_min_size(
            origin + egui::vec2(self.x, self.y) * scale,
            egui::vec2(self.width, self.height) * scale,
        )
    }
}

/// Geometry snapshot of one placed object, as persisted between slide switches.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlacementRecord {
    pub path: PathBuf,
    pub rect: Rect,
}

/// One vector graphic instance on a slide canvas.
#[derive(Clone, Debug)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub source_path: PathBuf,
    pub display_rect: Rect,
    pub native_size: Size,
    /// False when the document could not be read; the object is then a
    /// default-sized placeholder.
    pub loaded: bool,
    pub selected: bool,
    pub crop_mode_enabled: bool,
    pub gesture: GestureState,
}

impl PlacedObject {
    pub const DEFAULT_SIZE: Size = Size::new(200.0, 150.0);

    pub fn from_document(path: impl Into<PathBuf>, surface: &mut dyn VectorSurface) -> Self {
        let source_path = path.into();
        let (native_size, loaded) = match surface.load(&source_path) {
            Ok(size) if !size.is_empty() => (size, true),
            Ok(_) => (Self::DEFAULT_SIZE, true),
            Err(e) => {
                warn!("{e}");
                (Self::DEFAULT_SIZE, false)
            }
        };
        Self {
            id: 0,
            source_path,
            display_rect: Rect::from_origin_size(Point::default(), native_size),
            native_size,
            loaded,
            selected: false,
            crop_mode_enabled: false,
            gesture: GestureState::Idle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }

    pub fn record(&self) -> PlacementRecord {
        PlacementRecord {
            path: self.source_path.clone(),
            rect: self.display_rect,
        }
    }

    pub fn deactivate(&mut self) {
        self.selected = false;
        self.gesture = GestureState::Idle;
    }

    /// Points the object at a freshly cropped document; position stays fixed.
    pub fn apply_crop(&mut self, path: PathBuf, native_size: Size) {
        self.source_path = path;
        self.native_size = native_size;
        if !native_size.is_empty() {
            self.display_rect = self.display_rect.with_size(native_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 29.9)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn screen_mapping_honours_scale() {
        let origin = egui::pos2(100.0, 50.0);
        let p = Point::new(40.0, 20.0);
        assert_eq!(p.to_screen(origin, 0.5), egui::pos2(120.0, 60.0));
        assert_eq!(Point::from_screen(egui::pos2(120.0, 60.0), origin, 0.5), p);
        let r = Rect::new(10.0, 10.0, 40.0, 20.0).to_screen(origin, 2.0);
        assert_eq!(r.min, egui::pos2(120.0, 70.0));
        assert_eq!(r.size(), egui::vec2(80.0, 40.0));
    }

    #[test]
    fn rect_serializes_with_short_keys() {
        let record = PlacementRecord {
            path: PathBuf::from("a.svg"),
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["rect"]["x"], 1.0);
        assert_eq!(json["rect"]["w"], 3.0);
        assert_eq!(json["rect"]["h"], 4.0);
    }

    #[test]
    fn apply_crop_keeps_position() {
        let mut obj = PlacedObject {
            id: 1,
            source_path: PathBuf::from("a.svg"),
            display_rect: Rect::new(40.0, 50.0, 100.0, 80.0),
            native_size: Size::new(100.0, 80.0),
            loaded: true,
            selected: true,
            crop_mode_enabled: true,
            gesture: GestureState::Idle,
        };
        obj.apply_crop(PathBuf::from("a_cropped.svg"), Size::new(30.0, 40.0));
        assert_eq!(obj.display_rect, Rect::new(40.0, 50.0, 30.0, 40.0));
        assert_eq!(obj.native_size, Size::new(30.0, 40.0));
        assert_eq!(obj.path(), Path::new("a_cropped.svg"));
    }
}
