//! The asset-loading collaborator.
//!
//! The catalog never decodes the binary asset format itself. It only needs
//! two pieces of derived metadata per classified file: the embedded part tag
//! of a geometry asset, and the animation-clip names contained in an
//! animation set. [`AssetStore`] is that seam; [`ManifestStore`] is the
//! shipped implementation, backed by the `manifest.json` the converter
//! writes next to its exports.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Provider of per-asset metadata for classification.
pub trait AssetStore {
    /// The embedded part tag of a geometry asset.
    fn part_tag(&self, file_name: &str) -> Result<String>;

    /// The animation-clip names contained in an animation-set asset.
    fn animation_names(&self, file_name: &str) -> Result<Vec<String>>;
}

/// Metadata store backed by the converter's export manifest.
///
/// # Manifest format
///
/// ```json
/// {
///   "parts": { "fy_hom_visage.j3o": "FACE" },
///   "animations": { "animations_ca_hom.j3o": ["ca_hom_co_course"] }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestStore {
    /// Part tag per geometry file.
    #[serde(default)]
    parts: BTreeMap<String, String>,
    /// Contained clip names per animation-set file.
    #[serde(default)]
    animations: BTreeMap<String, Vec<String>>,
}

impl ManifestStore {
    /// Conventional manifest file name inside an export directory.
    pub const FILE_NAME: &'static str = "manifest.json";

    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a manifest from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let store = serde_json::from_reader(BufReader::new(file))?;
        Ok(store)
    }

    /// Read the manifest of an export directory.
    pub fn for_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::from_file(dir.as_ref().join(Self::FILE_NAME))
    }

    /// Record the part tag of a geometry file.
    pub fn insert_part(&mut self, file_name: impl Into<String>, tag: impl Into<String>) {
        self.parts.insert(file_name.into(), tag.into());
    }

    /// Record the clip names of an animation-set file.
    pub fn insert_animations(&mut self, file_name: impl Into<String>, names: Vec<String>) {
        self.animations.insert(file_name.into(), names);
    }
}

impl AssetStore for ManifestStore {
    fn part_tag(&self, file_name: &str) -> Result<String> {
        self.parts
            .get(file_name)
            .cloned()
            .ok_or_else(|| Error::MissingMetadata(file_name.to_string()))
    }

    fn animation_names(&self, file_name: &str) -> Result<Vec<String>> {
        self.animations
            .get(file_name)
            .cloned()
            .ok_or_else(|| Error::MissingMetadata(file_name.to_string()))
    }
}
