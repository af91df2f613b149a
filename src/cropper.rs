//! Non-destructive SVG cropping.
//!
//! A crop narrows the root element's `viewBox` to a sub-rectangle of the
//! document's user space. The `width`/`height` attributes are left alone, so
//! the document keeps its rendered footprint and only what is visible
//! changes. The result is staged in a temporary sibling and only takes the
//! name `<stem>_cropped<ext>` once the caller commits it.

use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};
use std::fmt;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::CropError;
use crate::model::Rect;

/// The four-number coordinate frame of a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// Used when a document declares no frame, or one whose numbers do not parse.
    pub const DEFAULT: ViewBox = ViewBox {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    /// Parses a `viewBox` attribute value.
    ///
    /// Components may be separated by whitespace and/or commas. Only a
    /// component count other than four is an error.
    pub fn parse(declaration: Option<&str>) -> Result<ViewBox, CropError> {
        let Some(declaration) = declaration.filter(|d| !d.trim().is_empty()) else {
            return Ok(Self::DEFAULT);
        };
        let parts: Vec<&str> = declaration
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();
        if parts.len() != 4 {
            return Err(CropError::MalformedFrame(declaration.to_string()));
        }
        let numbers: Option<Vec<f32>> = parts
            .iter()
            .map(|p| p.parse::<f32>().ok().filter(|v| v.is_finite()))
            .collect();
        match numbers.as_deref() {
            Some(&[x, y, width, height]) => Ok(ViewBox {
                x,
                y,
                width,
                height,
            }),
            _ => {
                warn!("unparsable viewBox '{declaration}', using default frame");
                Ok(Self::DEFAULT)
            }
        }
    }

    /// The sub-frame selected by `rect`, given in this frame's user units
    /// relative to its origin.
    pub fn cropped(self, rect: Rect) -> ViewBox {
        ViewBox {
            x: self.x + rect.x,
            y: self.y + rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CropOutput {
    pub path: PathBuf,
    pub view_box: ViewBox,
}

pub fn cropped_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_cropped{ext}"))
}

/// A cropped document sitting in a private sibling file, not yet visible
/// under its final name.
///
/// Dropping it deletes the staged file and leaves the target alone, so an
/// existing `<stem>_cropped<ext>` keeps its contents until [`commit`] runs.
///
/// [`commit`]: StagedCrop::commit
#[derive(Debug)]
pub struct StagedCrop {
    file: NamedTempFile,
    target: PathBuf,
    view_box: ViewBox,
}

impl StagedCrop {
    /// Where the staged document can be read before it is committed.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Moves the staged document over [`cropped_path`] of the source.
    pub fn commit(self) -> Result<CropOutput, CropError> {
        let StagedCrop {
            file,
            target,
            view_box,
        } = self;
        if let Err(e) = file.persist(&target) {
            return Err(CropError::Io {
                path: target,
                source: e.error,
            });
        }
        info!("published viewBox \"{view_box}\" -> {}", target.display());
        Ok(CropOutput {
            path: target,
            view_box,
        })
    }
}

/// Crops the document at `path` to `rect` (document user space) and stages
/// the result next to [`cropped_path`].
///
/// Nothing under a visible name is created or replaced here; see
/// [`StagedCrop::commit`].
pub fn crop(path: &Path, rect: Rect) -> Result<StagedCrop, CropError> {
    let data = fs::read(path).map_err(|source| CropError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (document, view_box) = rewrite_view_box(&data, rect)?;

    let target = cropped_path(path);
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|source| CropError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    file.write_all(&document)
        .and_then(|()| file.flush())
        .map_err(|source| CropError::Io {
            path: file.path().to_path_buf(),
            source,
        })?;
    debug!(
        "staged crop of {} to viewBox \"{view_box}\" in {}",
        path.display(),
        file.path().display()
    );
    Ok(StagedCrop {
        file,
        target,
        view_box,
    })
}

/// Streams `data` through unchanged except for the root `<svg>` element's
/// `viewBox`, which is replaced in place (or appended if absent).
pub fn rewrite_view_box(data: &[u8], rect: Rect) -> Result<(Vec<u8>, ViewBox), CropError> {
    let mut reader = Reader::from_reader(data);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(data.len() + 32)));
    let mut frame = None;
    let mut seen_root = false;

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(elem)) if !seen_root => {
                seen_root = true;
                let (elem, view_box) = with_cropped_view_box(&elem, rect)?;
                frame = Some(view_box);
                Event::Start(elem)
            }
            Ok(Event::Empty(elem)) if !seen_root => {
                seen_root = true;
                let (elem, view_box) = with_cropped_view_box(&elem, rect)?;
                frame = Some(view_box);
                Event::Empty(elem)
            }
            Ok(event) => event,
            Err(e) => {
                return Err(CropError::MalformedDocument(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
        };
        writer
            .write_event(event)
            .map_err(|e| CropError::MalformedDocument(e.to_string()))?;
    }

    let Some(view_box) = frame else {
        return Err(CropError::MalformedDocument(
            "no root element".to_string(),
        ));
    };
    Ok((writer.into_inner().into_inner(), view_box))
}

fn with_cropped_view_box(
    elem: &BytesStart<'_>,
    rect: Rect,
) -> Result<(BytesStart<'static>, ViewBox), CropError> {
    if elem.local_name().as_ref() != b"svg" {
        return Err(CropError::MalformedDocument(format!(
            "root element is <{}>, expected <svg>",
            String::from_utf8_lossy(elem.name().as_ref())
        )));
    }

    let mut attrs = Vec::new();
    let mut declared = None;
    for attr in elem.attributes() {
        let attr = attr.map_err(|e| CropError::MalformedDocument(e.to_string()))?;
        let key = attr.key.as_ref().to_vec();
        let value = attr.value.into_owned();
        if key == b"viewBox" {
            declared = Some(String::from_utf8_lossy(&value).into_owned());
        }
        attrs.push((key, value));
    }

    let view_box = ViewBox::parse(declared.as_deref())?.cropped(rect);
    let new_value = view_box.to_string();

    let mut out = elem.to_owned();
    out.clear_attributes();
    let mut replaced = false;
    for (key, value) in &attrs {
        if key == b"viewBox" {
            out.push_attribute((key.as_slice(), new_value.as_bytes()));
            replaced = true;
        } else {
            out.push_attribute((key.as_slice(), value.as_slice()));
        }
    }
    if !replaced {
        out.push_attribute((b"viewBox".as_slice(), new_value.as_bytes()));
    }
    Ok((out, view_box))
}
