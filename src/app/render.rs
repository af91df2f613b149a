use eframe::egui;

use crate::canvas::Canvas;
use crate::geometry::ResizeHandle;
use crate::model::{PlacedObject, Rect};

use super::textures::SvgTextures;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const CROP_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 40, 40);
const CROP_DASH: f32 = 6.0;
const CROP_GAP: f32 = 4.0;

pub(super) fn draw_background(painter: &egui::Painter, area: egui::Rect, slide: egui::Rect) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(area, 0.0, bg);
    painter.rect_filled(slide, 0.0, egui::Color32::WHITE);
    painter.rect_stroke(
        slide,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
        egui::StrokeKind::Outside,
    );
}

pub(super) fn draw_objects(
    painter: &egui::Painter,
    origin: egui::Pos2,
    scale: f32,
    canvas: &Canvas,
    textures: &SvgTextures,
) {
    for obj in canvas.objects() {
        draw_object(painter, origin, scale, obj, textures);
    }
}

fn draw_object(
    painter: &egui::Painter,
    origin: egui::Pos2,
    scale: f32,
    obj: &PlacedObject,
    textures: &SvgTextures,
) {
    let rect = obj.display_rect.to_screen(origin, scale);
    match textures.get(obj.path()) {
        Some(texture) => {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
        }
        None => draw_placeholder(painter, rect, obj.loaded),
    }

    if !obj.selected {
        return;
    }
    draw_selection_bounds(painter, rect);
    if obj.crop_mode_enabled {
        if let Some(local) = obj.gesture.crop_preview() {
            let region = Rect::new(
                obj.display_rect.x + local.x,
                obj.display_rect.y + local.y,
                local.width,
                local.height,
            );
            draw_crop_marquee(painter, region.to_screen(origin, scale));
        }
    } else {
        draw_handles(painter, origin, scale, obj.display_rect);
    }
}

fn draw_placeholder(painter: &egui::Painter, rect: egui::Rect, loaded: bool) {
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(230));
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(160));
    painter.line_segment([rect.left_top(), rect.right_bottom()], stroke);
    painter.line_segment([rect.right_top(), rect.left_bottom()], stroke);
    if !loaded {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "missing",
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(110),
        );
    }
}

fn draw_selection_bounds(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, SELECTION_COLOR);
    painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
}

fn draw_handles(painter: &egui::Painter, origin: egui::Pos2, scale: f32, rect: Rect) {
    let handle_fill = egui::Color32::from_rgb(240, 248, 255);
    let handle_stroke = egui::Stroke::new(1.0, SELECTION_COLOR);
    for handle in ResizeHandle::ALL {
        let r = handle.hit_region(rect).to_screen(origin, scale);
        painter.rect_filled(r, 1.0, handle_fill);
        painter.rect_stroke(r, 1.0, handle_stroke, egui::StrokeKind::Inside);
    }
}

/// Marquee around the region being cropped. The path is closed so the dash
/// pattern runs on across the corners.
fn draw_crop_marquee(painter: &egui::Painter, region: egui::Rect) {
    let outline = [
        region.left_top(),
        region.right_top(),
        region.right_bottom(),
        region.left_bottom(),
        region.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &outline,
        egui::Stroke::new(1.5, CROP_COLOR),
        CROP_DASH,
        CROP_GAP,
    ));
}
