use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::canvas::Canvas;
use crate::error::PersistError;
use crate::model::PlacementRecord;
use crate::surface::VectorSurface;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub objects: Vec<PlacementRecord>,
}

impl Slide {
    fn numbered(n: usize) -> Self {
        Self {
            title: format!("Slide {n}"),
            objects: Vec::new(),
        }
    }
}

/// Ordered slides plus which one is on the canvas.
///
/// Only the current slide is live; the others are geometry snapshots that
/// get swapped in and out of the canvas on [`Project::switch_to`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    slides: Vec<Slide>,
    #[serde(default)]
    current: usize,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            slides: vec![Slide::numbered(1)],
            current: 0,
        }
    }
}

impl Project {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn add_slide(&mut self) -> usize {
        self.slides.push(Slide::numbered(self.slides.len() + 1));
        self.slides.len() - 1
    }

    /// Removes the slide at `index` unless it is the only one left.
    ///
    /// Returns true if something was removed. The caller reloads the canvas
    /// when the current slide is affected.
    pub fn remove_slide(&mut self, index: usize) -> bool {
        if self.slides.len() <= 1 || index >= self.slides.len() {
            return false;
        }
        self.slides.remove(index);
        if self.current > index || self.current >= self.slides.len() {
            self.current = self.current.saturating_sub(1);
        }
        true
    }

    /// Snapshots the live canvas into the current slide.
    pub fn store_canvas(&mut self, canvas: &Canvas) {
        self.slides[self.current].objects = canvas.serialize();
    }

    /// Restores the current slide into `canvas`, dropping whatever it held.
    pub fn load_into(&self, canvas: &mut Canvas, surface: &mut dyn VectorSurface) {
        canvas.restore(&self.current_slide().objects, surface);
    }

    /// Saves the live canvas into the current slide and shows slide `index`.
    ///
    /// Returns false for an out-of-range index, in which case nothing
    /// changes.
    pub fn switch_to(
        &mut self,
        index: usize,
        canvas: &mut Canvas,
        surface: &mut dyn VectorSurface,
    ) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        canvas.cancel_gesture();
        self.store_canvas(canvas);
        self.current = index;
        self.load_into(canvas, surface);
        info!(index, title = %self.slides[index].title, "switched slide");
        true
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved project to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let json = fs::read_to_string(path).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut project: Project = serde_json::from_str(&json)?;
        if project.slides.is_empty() {
            project.slides.push(Slide::numbered(1));
        }
        project.current = project.current.min(project.slides.len() - 1);
        info!(
            slides = project.slides.len(),
            "loaded project from {}",
            path.display()
        );
        Ok(project)
    }
}
