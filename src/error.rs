//! Error types for document loading, cropping and persistence.
//!
//! Every failure here is recoverable: the affected object keeps its
//! last-known-good source path and geometry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A vector document could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a usable vector document.
    #[error("invalid vector document {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// A crop could not be committed.
#[derive(Error, Debug)]
pub enum CropError {
    /// The `viewBox` declaration does not have exactly four components.
    #[error("unsupported viewBox declaration '{0}'")]
    MalformedFrame(String),

    /// The document is not well-formed XML or has no `<svg>` root.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Reading the source or writing the cropped document failed.
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cropped document was written but could not be loaded back.
    #[error("cropped document could not be loaded: {0}")]
    Reload(#[from] LoadError),
}

/// Saving or loading a project or settings file failed.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
