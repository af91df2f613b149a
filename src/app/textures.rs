use eframe::egui;
use resvg::{tiny_skia, usvg};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::model::Size;
use crate::surface::{VectorSurface, intrinsic_size, parse_document};

const OVERSAMPLE: f32 = 2.0;
const MAX_TEXTURE_SIDE: f32 = 4096.0;

/// Rasterized documents keyed by path, rebuilt whenever a path is loaded.
pub(super) struct SvgTextures {
    ctx: egui::Context,
    textures: HashMap<PathBuf, egui::TextureHandle>,
}

impl SvgTextures {
    pub(super) fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            textures: HashMap::new(),
        }
    }

    pub(super) fn get(&self, path: &Path) -> Option<&egui::TextureHandle> {
        self.textures.get(path)
    }

    /// Drops textures for paths no longer on the canvas.
    pub(super) fn retain(&mut self, live: &[&Path]) {
        self.textures.retain(|path, _| live.contains(&path.as_path()));
    }

    fn rasterize(&self, path: &Path, tree: &usvg::Tree) -> Option<egui::TextureHandle> {
        let size = tree.size();
        let longest = size.width().max(size.height());
        let scale = OVERSAMPLE.min(MAX_TEXTURE_SIDE / longest);
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)?;
        resvg::render(
            tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        let image = egui::ColorImage::from_rgba_premultiplied(
            [width as usize, height as usize],
            pixmap.data(),
        );
        Some(self.ctx.load_texture(
            path.display().to_string(),
            image,
            egui::TextureOptions::LINEAR,
        ))
    }
}

impl VectorSurface for SvgTextures {
    fn load(&mut self, path: &Path) -> Result<Size, LoadError> {
        let tree = match parse_document(path) {
            Ok(tree) => tree,
            Err(e) => {
                self.textures.remove(path);
                return Err(e);
            }
        };
        match self.rasterize(path, &tree) {
            Some(texture) => {
                debug!("rasterized {}", path.display());
                self.textures.insert(path.to_path_buf(), texture);
            }
            None => {
                warn!("{} has no drawable area", path.display());
                self.textures.remove(path);
            }
        }
        Ok(intrinsic_size(&tree))
    }
}
