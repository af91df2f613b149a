use eframe::egui;
use std::path::PathBuf;

use crate::canvas::Canvas;
use crate::model::{Point, Size};
use crate::project::Project;

mod actions;
mod interaction;
mod render;
mod settings;
mod textures;
mod update;

pub struct SlideApp {
    canvas: Canvas,
    project: Project,
    textures: textures::SvgTextures,
    project_path: String,
    svg_directory: Option<String>,
    settings_path: String,
    status: Option<String>,
    /// A press that started on the slide; moves and releases are routed to
    /// the canvas only while this is set.
    pointer_captured: bool,
    last_pointer: Option<Point>,
}

impl SlideApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = PathBuf::from(home).join(".config").join("slidecrop.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        Self {
            canvas: Canvas::new(Size::new(settings.slide_width, settings.slide_height)),
            project: Project::default(),
            textures: textures::SvgTextures::new(cc.egui_ctx.clone()),
            project_path: settings.project_path,
            svg_directory: settings.svg_directory,
            settings_path,
            status: None,
            pointer_captured: false,
            last_pointer: None,
        }
    }

    fn settings_snapshot(&self) -> settings::AppSettings {
        let size = self.canvas.size();
        settings::AppSettings {
            project_path: self.project_path.clone(),
            svg_directory: self.svg_directory.clone(),
            slide_width: size.width,
            slide_height: size.height,
        }
    }

    /// Screen-space rectangle of the slide inside the available area,
    /// centred and scaled down to fit when the window is small.
    fn slide_screen_rect(&self, available: egui::Rect) -> (egui::Rect, f32) {
        let size = self.canvas.size();
        let scale = (available.width() / size.width)
            .min(available.height() / size.height)
            .clamp(0.1, 1.0);
        let rect = egui::Rect::from_center_size(
            available.center(),
            egui::vec2(size.width * scale, size.height * scale),
        );
        (rect, scale)
    }
}
