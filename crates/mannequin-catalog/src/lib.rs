//! Asset catalog for converted character exports.
//!
//! A converter dumps humanoid body-part geometry and animation-set assets
//! into a flat export directory. This crate scans that directory once,
//! classifies every file by body part, gender, and skeletal group, and
//! exposes the result as a read-only, sorted index. The index can be
//! persisted to a binary summary file so later runs skip the scan.
//!
//! # Example
//!
//! ```no_run
//! use mannequin_catalog::{cache, scan_directory, BodyPart, Gender, ManifestStore};
//!
//! let dir = std::path::Path::new("assets/export");
//! let store = ManifestStore::for_directory(dir)?;
//! let catalog = scan_directory(dir, &store, |done, total| {
//!     println!("{done} of {total} files analyzed");
//! })?;
//!
//! for name in catalog.geometries(Gender::Male, BodyPart::Head) {
//!     println!("{name}");
//! }
//!
//! cache::save(&catalog, &dir.join(cache::SUMMARY_FILE_NAME))?;
//! # Ok::<(), mannequin_catalog::Error>(())
//! ```

pub mod cache;
mod catalog;
mod error;
mod scan;
mod store;
mod types;

pub use catalog::{sorted_position, AssetCatalog};
pub use error::{Error, Result};
pub use scan::{scan_directory, Scanner};
pub use store::{AssetStore, ManifestStore};
pub use types::{
    animation_set_file_name, asset_file_name, parse_animation_set_file_name, AssetName, BodyPart,
    Gender, SkeletalGroup, ANIMATION_SET_PREFIX, ASSET_EXTENSION, GEOMETRY_PREFIXES,
};
