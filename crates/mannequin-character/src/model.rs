//! The mutable per-character selection state.

use mannequin_catalog::{
    animation_set_file_name, asset_file_name, AssetCatalog, AssetName, BodyPart, Gender,
    SkeletalGroup,
};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Result};

/// A character body assembled from catalog assets.
///
/// Holds the gender, the skeletal group, and at most one geometry choice per
/// body part; an unset part is a valid, renderable state. Every non-empty
/// choice is validated against the catalog at write time, so a model never
/// references an asset the catalog does not know for its current gender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterModel {
    gender: Gender,
    group: SkeletalGroup,
    /// Chosen geometry asset per body part, indexed by part ordinal.
    choices: [Option<AssetName>; BodyPart::COUNT],
}

impl Default for CharacterModel {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            group: SkeletalGroup::Ca,
            choices: Default::default(),
        }
    }
}

impl CharacterModel {
    /// Create a character with the default gender and group and no geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The character's gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// The character's skeletal group.
    pub fn group(&self) -> SkeletalGroup {
        self.group
    }

    /// The chosen geometry asset for a body part, if any.
    pub fn geometry(&self, part: BodyPart) -> Option<&str> {
        self.choices[part.index()].as_deref()
    }

    /// Test whether the character includes the given body part.
    pub fn includes(&self, part: BodyPart) -> bool {
        self.choices[part.index()].is_some()
    }

    /// Alter the character's gender.
    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    /// Alter the character's skeletal group.
    pub fn set_group(&mut self, group: SkeletalGroup) {
        self.group = group;
    }

    /// Flip the character's gender.
    ///
    /// Call [`adjust_assets_for_gender`](Self::adjust_assets_for_gender)
    /// afterwards to keep the geometry choices consistent.
    pub fn toggle_gender(&mut self) {
        self.gender = self.gender.opposite();
    }

    /// Flip the character's skeletal group.
    pub fn toggle_group(&mut self) {
        self.group = self.group.opposite();
    }

    /// Alter the geometry choice for a body part.
    ///
    /// A non-empty name must exist in the catalog for the character's
    /// current gender and the given part; otherwise the model is left
    /// unchanged and an error is returned. `None` clears the part.
    pub fn set_geometry(
        &mut self,
        catalog: &AssetCatalog,
        part: BodyPart,
        asset_name: Option<AssetName>,
    ) -> Result<()> {
        if let Some(name) = &asset_name {
            if !catalog.contains_geometry(self.gender, part, name) {
                return Err(Error::AssetNotKnown {
                    name: name.clone(),
                    gender: self.gender,
                    part,
                });
            }
        }
        self.choices[part.index()] = asset_name;
        Ok(())
    }

    /// Rewrite every geometry choice to match the character's gender.
    ///
    /// Parts whose rewritten asset does not exist for the new gender are
    /// silently cleared: some geometry has no equivalent for the opposite
    /// gender.
    pub fn adjust_assets_for_gender(&mut self, catalog: &AssetCatalog) {
        for part in BodyPart::ALL {
            if let Some(name) = &self.choices[part.index()] {
                let adjusted = self.adjust_for_gender(name);
                self.choices[part.index()] =
                    if catalog.contains_geometry(self.gender, part, &adjusted) {
                        Some(adjusted)
                    } else {
                        None
                    };
            }
        }
    }

    /// Adjust an asset or animation name to match the character's gender.
    ///
    /// Makes at most one substitution (`_hom_`/`_hof_` preferred, then
    /// `_h_`/`_f_`); returns the name unchanged if neither pattern matches.
    pub fn adjust_for_gender(&self, name: &str) -> String {
        match self.gender {
            Gender::Female if name.contains("_hom_") => name.replace("_hom_", "_hof_"),
            Gender::Male if name.contains("_hof_") => name.replace("_hof_", "_hom_"),
            Gender::Female if name.contains("_h_") => name.replace("_h_", "_f_"),
            Gender::Male if name.contains("_f_") => name.replace("_f_", "_h_"),
            _ => name.to_string(),
        }
    }

    /// Advance the geometry choice for a body part by `amount` steps.
    ///
    /// The selection domain is circular: every known asset for the current
    /// gender plus one "none" slot at the end. Negative amounts step
    /// backward and any magnitude wraps around.
    pub fn advance_asset_for(&mut self, catalog: &AssetCatalog, part: BodyPart, amount: i32) {
        let known = catalog.geometries(self.gender, part);
        let index = match self.geometry(part) {
            Some(name) => known
                .binary_search_by(|probe| probe.as_str().cmp(name))
                .map(|i| i as i64)
                .unwrap_or(-1),
            None => -1,
        };

        // The "none" slot sits at position len(), one past the last asset;
        // an absent or stale selection counts as -1, which is the same slot
        // modulo len() + 1.
        let slots = known.len() as i64 + 1;
        let index = (index + i64::from(amount)).rem_euclid(slots);
        self.choices[part.index()] = if index == known.len() as i64 {
            None
        } else {
            Some(known[index as usize].clone())
        };
    }

    /// Pick a uniformly random geometry asset for a body part.
    ///
    /// Unlike [`advance_asset_for`](Self::advance_asset_for), the selection
    /// domain excludes "none": a part with any known assets always ends up
    /// with a concrete choice. A part with no known assets is left alone.
    pub fn randomize<R: Rng + ?Sized>(&mut self, catalog: &AssetCatalog, part: BodyPart, rng: &mut R) {
        let known = catalog.geometries(self.gender, part);
        if let Some(name) = known.choose(rng) {
            self.choices[part.index()] = Some(name.clone());
        }
    }

    /// Pick a uniformly random gender.
    pub fn randomize_gender<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.gender = if rng.gen() { Gender::Female } else { Gender::Male };
    }

    /// Pick a uniformly random skeletal group.
    pub fn randomize_group<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.group = if rng.gen() {
            SkeletalGroup::Ca
        } else {
            SkeletalGroup::Ge
        };
    }

    /// File name of the character's animation-set asset.
    pub fn animation_asset_file(&self) -> String {
        animation_set_file_name(self.group, self.gender)
    }

    /// File name of the geometry asset chosen for a body part, if any.
    pub fn geometry_asset_file(&self, part: BodyPart) -> Option<String> {
        self.geometry(part).map(asset_file_name)
    }
}
