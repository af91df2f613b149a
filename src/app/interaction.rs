use eframe::egui;
use tracing::warn;

use crate::geometry::{ResizeHandle, handle_at};
use crate::model::Point;

use super::SlideApp;

impl SlideApp {
    /// Feeds this frame's primary-button activity to the canvas.
    ///
    /// Only a press over the canvas panel captures the pointer; moves and
    /// the release go to the canvas while captured, even outside the slide.
    pub(super) fn route_pointer(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        origin: egui::Pos2,
        scale: f32,
    ) {
        let (pressed, released, pos, focused) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.focused,
            )
        });

        if self.pointer_captured && !focused {
            self.canvas.cancel_gesture();
            self.pointer_captured = false;
            return;
        }
        let Some(screen) = pos else {
            return;
        };
        let p = Point::from_screen(screen, origin, scale);

        if pressed && response.hovered() {
            self.canvas.pointer_down(p);
            self.pointer_captured = true;
        } else if self.pointer_captured
            && self.last_pointer != Some(p)
            && self.canvas.pointer_move(p)
        {
            ctx.request_repaint();
        }

        if released && self.pointer_captured {
            self.pointer_captured = false;
            match self.canvas.pointer_up(&mut self.textures, p) {
                Ok(Some(applied)) => {
                    self.status = Some(format!("Cropped into {}", applied.path.display()));
                    self.prune_textures();
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("crop failed: {e}");
                    self.status = Some(format!("Crop failed: {e}"));
                    // drops the texture of a staged document that never got published
                    self.prune_textures();
                }
            }
        }
        self.last_pointer = Some(p);
    }

    pub(super) fn update_cursor(&self, ctx: &egui::Context, origin: egui::Pos2, scale: f32) {
        let Some(screen) = ctx.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        let p = Point::from_screen(screen, origin, scale);
        let Some(obj) = self.canvas.active().and_then(|id| self.canvas.object(id)) else {
            return;
        };
        if obj.crop_mode_enabled {
            if obj.display_rect.contains(p) || !obj.gesture.is_idle() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
            return;
        }
        let icon = match handle_at(obj.display_rect, p) {
            Some(ResizeHandle::N | ResizeHandle::S) => egui::CursorIcon::ResizeVertical,
            Some(ResizeHandle::E | ResizeHandle::W) => egui::CursorIcon::ResizeHorizontal,
            Some(ResizeHandle::NE | ResizeHandle::SW) => egui::CursorIcon::ResizeNeSw,
            Some(ResizeHandle::NW | ResizeHandle::SE) => egui::CursorIcon::ResizeNwSe,
            None if obj.display_rect.contains(p) => egui::CursorIcon::Move,
            None => return,
        };
        ctx.set_cursor_icon(icon);
    }
}
