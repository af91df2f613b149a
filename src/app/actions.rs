use std::path::{Path, PathBuf};
use tracing::warn;

use crate::project::Project;

use super::{SlideApp, settings};

impl SlideApp {
    pub(super) fn add_svg_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("SVG", &["svg"]);
        if let Some(dir) = &self.svg_directory {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.insert_svg(path);
        }
    }

    pub(super) fn insert_svg(&mut self, path: PathBuf) {
        let id = self.canvas.insert(&mut self.textures, path.clone());
        let loaded = self.canvas.object(id).is_some_and(|o| o.loaded);
        self.status = Some(if loaded {
            format!("Inserted {}", path.display())
        } else {
            format!("Could not load {}, placed a placeholder", path.display())
        });
        if let Some(dir) = path.parent() {
            let dir = dir.display().to_string();
            if self.svg_directory.as_deref() != Some(dir.as_str()) {
                self.svg_directory = Some(dir);
                self.persist_settings();
            }
        }
    }

    pub(super) fn remove_active(&mut self) {
        let Some(id) = self.canvas.active() else {
            self.status = Some("Nothing selected to remove".to_string());
            return;
        };
        if let Some(obj) = self.canvas.remove(id) {
            self.status = Some(format!("Removed {}", obj.path().display()));
        }
        self.prune_textures();
    }

    pub(super) fn prune_textures(&mut self) {
        let live: Vec<&Path> = self.canvas.objects().map(|o| o.path()).collect();
        self.textures.retain(&live);
    }

    pub(super) fn add_slide(&mut self) {
        let index = self.project.add_slide();
        self.switch_slide(index);
    }

    pub(super) fn switch_slide(&mut self, index: usize) {
        if index == self.project.current_index() {
            return;
        }
        self.pointer_captured = false;
        if self
            .project
            .switch_to(index, &mut self.canvas, &mut self.textures)
        {
            self.prune_textures();
            self.status = None;
        }
    }

    pub(super) fn remove_current_slide(&mut self) {
        let current = self.project.current_index();
        self.project.store_canvas(&self.canvas);
        if !self.project.remove_slide(current) {
            self.status = Some("A project needs at least one slide".to_string());
            return;
        }
        self.canvas.cancel_gesture();
        self.project.load_into(&mut self.canvas, &mut self.textures);
        self.prune_textures();
    }

    fn save_project(&mut self, path: &Path) -> bool {
        self.project.store_canvas(&self.canvas);
        match self.project.save(path) {
            Ok(()) => {
                self.status = Some(format!("Saved {}", path.display()));
                true
            }
            Err(e) => {
                warn!("{e}");
                self.status = Some(format!("Save failed: {e}"));
                false
            }
        }
    }

    pub(super) fn save_to_path(&mut self) {
        let path = PathBuf::from(&self.project_path);
        self.save_project(&path);
    }

    pub(super) fn save_project_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&self.project_path)
            .add_filter("JSON", &["json"])
            .save_file()
        {
            if self.save_project(&path) {
                self.project_path = path.display().to_string();
                self.persist_settings();
            }
        }
    }

    pub(super) fn open_project_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            self.open_project(&path);
        }
    }

    fn open_project(&mut self, path: &Path) {
        match Project::load(path) {
            Ok(project) => {
                self.pointer_captured = false;
                self.project = project;
                self.project.load_into(&mut self.canvas, &mut self.textures);
                self.prune_textures();
                self.project_path = path.display().to_string();
                self.persist_settings();
                self.status = Some(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                warn!("{e}");
                self.status = Some(format!("Open failed: {e}"));
            }
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
