//! The boundary between the canvas and whatever renders vector documents.

use resvg::usvg;
use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::model::Size;

/// Loads vector documents and reports their intrinsic size.
///
/// The canvas only needs the size; implementations that also draw keep
/// whatever they need for rendering keyed by path.
pub trait VectorSurface {
    fn load(&mut self, path: &Path) -> Result<Size, LoadError>;
}

pub fn parse_document(path: &Path) -> Result<usvg::Tree, LoadError> {
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut options = usvg::Options::default();
    options.resources_dir = path.parent().map(Path::to_path_buf);
    usvg::Tree::from_data(&data, &options).map_err(|e| LoadError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn intrinsic_size(tree: &usvg::Tree) -> Size {
    let size = tree.size();
    Size::new(size.width(), size.height())
}

/// Parses documents with usvg and keeps nothing but the answer.
#[derive(Default)]
pub struct UsvgSurface;

impl VectorSurface for UsvgSurface {
    fn load(&mut self, path: &Path) -> Result<Size, LoadError> {
        parse_document(path).map(|tree| intrinsic_size(&tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsic_size_comes_from_width_and_height() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="80" viewBox="0 0 10 10"><rect width="5" height="5"/></svg>"#,
        )
        .unwrap();
        let tree = parse_document(&path).unwrap();
        assert_eq!(intrinsic_size(&tree), Size::new(120.0, 80.0));
    }

    #[test]
    fn intrinsic_size_falls_back_to_view_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="10 10 30 40"><rect width="5" height="5"/></svg>"#,
        )
        .unwrap();
        let tree = parse_document(&path).unwrap();
        assert_eq!(intrinsic_size(&tree), Size::new(30.0, 40.0));
    }

    #[test]
    fn usvg_surface_reports_intrinsic_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32"><rect width="8" height="8"/></svg>"#,
        )
        .unwrap();
        let mut surface = UsvgSurface;
        assert_eq!(surface.load(&path).unwrap(), Size::new(64.0, 32.0));
    }

    #[test]
    fn missing_and_corrupt_documents_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            parse_document(&dir.path().join("missing.svg")),
            Err(LoadError::Io { .. })
        ));
        let path = dir.path().join("corrupt.svg");
        fs::write(&path, "not svg at all").unwrap();
        assert!(matches!(
            parse_document(&path),
            Err(LoadError::Invalid { .. })
        ));
    }
}
