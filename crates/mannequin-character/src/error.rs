//! Error types for character mutation.

use mannequin_catalog::{BodyPart, Gender};
use thiserror::Error;

/// Errors that can occur when mutating a character.
#[derive(Debug, Error)]
pub enum Error {
    /// An asset name was assigned that the catalog does not know for the
    /// character's current gender and the given body part.
    ///
    /// Callers are expected to pass only names obtained from catalog
    /// queries; the model is left untouched when this is returned.
    #[error("asset {name:?} is not in the catalog for {gender} {part}")]
    AssetNotKnown {
        name: String,
        gender: Gender,
        part: BodyPart,
    },
}

/// Result type for character operations.
pub type Result<T> = std::result::Result<T, Error>;
