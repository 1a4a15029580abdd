//! Mannequin - humanoid character assembly from converted game assets.
//!
//! This crate provides a unified interface to the Mannequin library
//! ecosystem for indexing exported character assets and assembling
//! characters from them.
//!
//! # Crates
//!
//! - [`mannequin_catalog`] - Export directory scanning, asset
//!   classification, and the binary summary cache
//! - [`mannequin_character`] - Character state, gender adjustment, and
//!   field-based interactive selection
//!
//! # Example
//!
//! ```no_run
//! use mannequin::prelude::*;
//!
//! // Index an export directory, reusing the summary file when present.
//! let dir = std::path::Path::new("assets/export");
//! let store = ManifestStore::for_directory(dir)?;
//! let summary = dir.join(cache::SUMMARY_FILE_NAME);
//! let catalog = cache::load_or_scan(dir, &summary, &store, |_, _| {})?;
//!
//! // Assemble a character and cycle its head geometry.
//! let mut controller = SelectionController::new(&catalog);
//! controller.select_field(Field::Part(BodyPart::Head));
//! controller.advance_value(&catalog, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use mannequin_catalog as catalog;
pub use mannequin_character as character;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mannequin_catalog::{
        cache, scan_directory, sorted_position, AssetCatalog, AssetStore, BodyPart, Gender,
        ManifestStore, Scanner, SkeletalGroup,
    };
    pub use mannequin_character::{
        CharacterModel, Feature, Field, SelectionController, FIELD_COUNT,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
