//! Character assembly and interactive selection.
//!
//! Builds on [`mannequin_catalog`]: a [`CharacterModel`] holds one validated
//! geometry choice per body part plus a gender and skeletal group, and a
//! [`SelectionController`] layers field-based navigation, keyword-filtered
//! animation choice, and feature visibility on top of it.
//!
//! # Example
//!
//! ```
//! use mannequin_catalog::AssetCatalog;
//! use mannequin_character::{Field, SelectionController};
//!
//! let catalog = AssetCatalog::default();
//! let mut controller = SelectionController::new(&catalog);
//! controller.select_field(Field::Gender);
//! controller.advance_value(&catalog, 1);
//! assert_eq!(controller.character().gender().to_string(), "female");
//! ```

mod error;
mod model;
mod selection;

pub use error::{Error, Result};
pub use model::CharacterModel;
pub use selection::{Feature, Field, SelectionController, FIELD_COUNT};
