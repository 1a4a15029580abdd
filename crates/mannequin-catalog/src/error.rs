//! Error types for catalog construction and the summary cache.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, caching, or loading the catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scan root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A geometry asset carries a part tag outside the known vocabulary.
    #[error("unknown part tag {tag:?} in {file_name}")]
    UnknownPartTag { file_name: String, tag: String },

    /// A geometry asset name encodes no recognizable gender.
    #[error("cannot infer gender from asset name {0:?}")]
    UngenderedName(String),

    /// An animation-set file name does not match the expected shape.
    #[error("malformed animation-set file name {0:?}")]
    BadAnimationFileName(String),

    /// The export manifest has no entry for a classified file.
    #[error("no metadata for {0:?} in the export manifest")]
    MissingMetadata(String),

    /// Export manifest could not be parsed.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// The summary file is structurally invalid.
    #[error("corrupt summary file: {0}")]
    Corrupt(&'static str),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
