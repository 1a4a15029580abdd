//! Field-based navigation over a character and its animation choice.
//!
//! The interactive loop presents one editable field at a time (skeletal
//! group, animation keyword, animation, gender, then one field per body
//! part) and advances or randomizes the value of the selected field. The
//! controller owns the character plus the animation state and keeps them
//! mutually consistent after every edit.

use std::fmt;

use mannequin_catalog::{sorted_position, AssetCatalog, BodyPart};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::CharacterModel;

/// Optional render features that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Coordinate axes at the model root.
    Axes,
    /// The help overlay.
    Help,
    /// The geometry meshes themselves.
    Meshes,
    /// The skeleton wireframe.
    Skeleton,
}

impl Feature {
    /// Number of features.
    pub const COUNT: usize = 4;

    /// Every feature, in ordinal order.
    pub const ALL: [Feature; Feature::COUNT] =
        [Feature::Axes, Feature::Help, Feature::Meshes, Feature::Skeleton];

    /// Ordinal used to index visibility tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the feature starts out visible.
    pub fn default_visibility(self) -> bool {
        matches!(self, Feature::Help | Feature::Meshes)
    }
}

/// Number of editable fields: 4 scalar fields plus one per body part.
pub const FIELD_COUNT: usize = 4 + BodyPart::COUNT;

/// One editable field of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The character's skeletal group.
    Group,
    /// The keyword used to filter animation candidates.
    Keyword,
    /// The chosen animation name.
    Animation,
    /// The character's gender.
    Gender,
    /// The geometry choice for one body part.
    Part(BodyPart),
}

impl Field {
    /// Every field, in selection order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Group,
        Field::Keyword,
        Field::Animation,
        Field::Gender,
        Field::Part(BodyPart::Arms),
        Field::Part(BodyPart::Torso),
        Field::Part(BodyPart::Face),
        Field::Part(BodyPart::Feet),
        Field::Part(BodyPart::Head),
        Field::Part(BodyPart::Hands),
        Field::Part(BodyPart::Legs),
    ];

    /// Position of this field in the selection order.
    pub fn index(self) -> usize {
        match self {
            Field::Group => 0,
            Field::Keyword => 1,
            Field::Animation => 2,
            Field::Gender => 3,
            Field::Part(part) => 4 + part.index(),
        }
    }

    /// The field at a given position in the selection order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= FIELD_COUNT`.
    pub fn from_index(index: usize) -> Field {
        Field::ALL[index]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Group => write!(f, "skeletal group"),
            Field::Keyword => write!(f, "animation keyword"),
            Field::Animation => write!(f, "animation"),
            Field::Gender => write!(f, "gender"),
            Field::Part(part) => write!(f, "{part}"),
        }
    }
}

/// The complete interactive selection state.
///
/// Owns a [`CharacterModel`] plus the animation keyword, the chosen
/// animation, the selected field, and the feature visibility flags. All
/// mutation goes through the catalog-aware methods, which re-derive the
/// keyword and animation whenever an edit invalidates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    character: CharacterModel,
    selected: Field,
    /// Current keyword; empty when the catalog has none for this group and
    /// gender, in which case no animation filtering happens.
    keyword: String,
    /// Current animation name; empty when no candidate exists.
    animation: String,
    visibility: [bool; Feature::COUNT],
}

impl SelectionController {
    /// Create a controller for a default character, seeding the keyword and
    /// animation from the catalog's tables for that character.
    pub fn new(catalog: &AssetCatalog) -> Self {
        let mut visibility = [false; Feature::COUNT];
        for feature in Feature::ALL {
            visibility[feature.index()] = feature.default_visibility();
        }
        let mut controller = Self {
            character: CharacterModel::new(),
            selected: Field::Group,
            keyword: String::new(),
            animation: String::new(),
            visibility,
        };
        controller.resynchronize(catalog);
        controller
    }

    /// The character being assembled.
    pub fn character(&self) -> &CharacterModel {
        &self.character
    }

    /// The current animation keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The current animation name.
    pub fn animation(&self) -> &str {
        &self.animation
    }

    /// The currently selected field.
    pub fn selected_field(&self) -> Field {
        self.selected
    }

    /// Select a field directly.
    pub fn select_field(&mut self, field: Field) {
        self.selected = field;
    }

    /// Move the field selection by `amount` steps, wrapping around.
    pub fn advance_selected_field(&mut self, amount: i32) {
        let index = (self.selected.index() as i64 + i64::from(amount))
            .rem_euclid(FIELD_COUNT as i64);
        self.selected = Field::from_index(index as usize);
    }

    /// The animation candidates for the character's group and gender,
    /// narrowed to names containing the current keyword.
    pub fn known_animations(&self, catalog: &AssetCatalog) -> Vec<String> {
        let all = catalog.animations(self.character.group(), self.character.gender());
        if self.keyword.is_empty() {
            return all.to_vec();
        }
        let infix = format!("_{}", self.keyword);
        all.iter()
            .filter(|name| name.contains(&infix))
            .cloned()
            .collect()
    }

    /// The keyword candidates for the character's group and gender.
    pub fn known_keywords<'a>(&self, catalog: &'a AssetCatalog) -> &'a [String] {
        catalog.keywords(self.character.group(), self.character.gender())
    }

    /// Advance the value of the selected field by `amount` steps.
    ///
    /// Scalar fields cycle through their candidate lists; the two-valued
    /// gender and group fields flip on any nonzero amount, whatever its
    /// sign or magnitude. Edits to the group or gender re-derive the
    /// keyword and animation, and an edit to the keyword re-derives the
    /// animation.
    pub fn advance_value(&mut self, catalog: &AssetCatalog, amount: i32) {
        match self.selected {
            Field::Group => {
                if amount != 0 {
                    self.character.toggle_group();
                    self.resynchronize(catalog);
                }
            }
            Field::Gender => {
                if amount != 0 {
                    self.character.toggle_gender();
                    self.character.adjust_assets_for_gender(catalog);
                    self.resynchronize(catalog);
                }
            }
            Field::Keyword => {
                let known = self.known_keywords(catalog);
                if let Some(next) = advance_in(known, &self.keyword, amount) {
                    self.keyword = next;
                    self.update_animation(catalog);
                }
            }
            Field::Animation => {
                let known = self.known_animations(catalog);
                if let Some(next) = advance_in(&known, &self.animation, amount) {
                    self.animation = next;
                }
            }
            Field::Part(part) => {
                self.character.advance_asset_for(catalog, part, amount);
            }
        }
    }

    /// Pick a uniformly random value for the selected field.
    ///
    /// The same consistency rules apply as for
    /// [`advance_value`](Self::advance_value). Fields with no candidates
    /// are left alone, except body parts, which keep the "always concrete"
    /// behavior of [`CharacterModel::randomize`].
    pub fn randomize_value<R: Rng + ?Sized>(&mut self, catalog: &AssetCatalog, rng: &mut R) {
        match self.selected {
            Field::Group => {
                self.character.randomize_group(rng);
                self.resynchronize(catalog);
            }
            Field::Gender => {
                self.character.randomize_gender(rng);
                self.character.adjust_assets_for_gender(catalog);
                self.resynchronize(catalog);
            }
            Field::Keyword => {
                if let Some(keyword) = self.known_keywords(catalog).choose(rng) {
                    self.keyword = keyword.clone();
                    self.update_animation(catalog);
                }
            }
            Field::Animation => {
                if let Some(animation) = self.known_animations(catalog).choose(rng) {
                    self.animation = animation.clone();
                }
            }
            Field::Part(part) => {
                self.character.randomize(catalog, part, rng);
            }
        }
    }

    /// Pick a random geometry asset for every body part.
    pub fn randomize_all_parts<R: Rng + ?Sized>(&mut self, catalog: &AssetCatalog, rng: &mut R) {
        for part in BodyPart::ALL {
            self.character.randomize(catalog, part, rng);
        }
    }

    /// Whether a render feature is visible.
    pub fn is_visible(&self, feature: Feature) -> bool {
        self.visibility[feature.index()]
    }

    /// Flip the visibility of a render feature.
    pub fn toggle_visibility(&mut self, feature: Feature) {
        self.visibility[feature.index()] = !self.visibility[feature.index()];
    }

    /// Re-derive the keyword, then the animation, for the character's
    /// current group and gender. The keyword comes first: it defines the
    /// candidate list the animation is chosen from.
    fn resynchronize(&mut self, catalog: &AssetCatalog) {
        self.update_keyword(catalog);
        self.update_animation(catalog);
    }

    /// Keep the current keyword if the catalog still lists it, otherwise
    /// fall back to the first known keyword (or empty when none exist).
    fn update_keyword(&mut self, catalog: &AssetCatalog) {
        let known = self.known_keywords(catalog);
        if sorted_position(known, &self.keyword).is_none() {
            self.keyword = known.first().cloned().unwrap_or_default();
        }
    }

    /// Re-derive the animation from the current candidate list, preferring
    /// the gender-adjusted form of the previous animation.
    fn update_animation(&mut self, catalog: &AssetCatalog) {
        let known = self.known_animations(catalog);
        let adjusted = self.character.adjust_for_gender(&self.animation);
        self.animation = if known.contains(&adjusted) {
            adjusted
        } else {
            known.first().cloned().unwrap_or_default()
        };
    }
}

/// Step circularly through a sorted candidate list.
///
/// A current value not in the list lands on the first candidate regardless
/// of `amount`. Returns `None` when the list is empty.
fn advance_in(candidates: &[String], current: &str, amount: i32) -> Option<String> {
    if candidates.is_empty() {
        return None;
    }
    let index = match sorted_position(candidates, current) {
        Some(position) => {
            (position as i64 + i64::from(amount)).rem_euclid(candidates.len() as i64) as usize
        }
        None => 0,
    };
    Some(candidates[index].clone())
}
