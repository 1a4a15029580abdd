//! The read-only asset catalog.
//!
//! Built once (by a directory scan or a summary-file load) and queried many
//! times. Every list is sorted lexicographically and duplicate-free, and
//! every (gender, part) and (group, gender) key exists by construction, so
//! queries are total; an empty list means no assets exist for that
//! combination.

use std::collections::BTreeSet;

use crate::types::{AssetName, BodyPart, Gender, SkeletalGroup};

/// Words excluded from the keyword index: too generic to filter on.
const NOISE_WORDS: [&str; 3] = ["end", "hof", "hom"];

/// In-memory index of every known geometry and animation asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    /// Geometry asset names, keyed by gender then body part.
    pub(crate) geometries: [[Vec<AssetName>; BodyPart::COUNT]; Gender::COUNT],
    /// Animation names, keyed by skeletal group then gender.
    pub(crate) animations: [[Vec<String>; Gender::COUNT]; SkeletalGroup::COUNT],
    /// Animation keywords, keyed by skeletal group then gender.
    pub(crate) keywords: [[Vec<String>; Gender::COUNT]; SkeletalGroup::COUNT],
}

impl AssetCatalog {
    /// The sorted geometry asset names for a gender and body part.
    pub fn geometries(&self, gender: Gender, part: BodyPart) -> &[AssetName] {
        &self.geometries[gender.index()][part.index()]
    }

    /// The sorted animation names for a skeletal group and gender.
    pub fn animations(&self, group: SkeletalGroup, gender: Gender) -> &[String] {
        &self.animations[group.index()][gender.index()]
    }

    /// The sorted animation keywords for a skeletal group and gender.
    pub fn keywords(&self, group: SkeletalGroup, gender: Gender) -> &[String] {
        &self.keywords[group.index()][gender.index()]
    }

    /// Test whether a geometry asset exists for a gender and body part.
    pub fn contains_geometry(&self, gender: Gender, part: BodyPart, asset_name: &str) -> bool {
        sorted_position(self.geometries(gender, part), asset_name).is_some()
    }

    /// Total number of indexed geometry assets.
    pub fn geometry_count(&self) -> usize {
        self.geometries
            .iter()
            .flat_map(|per_part| per_part.iter())
            .map(Vec::len)
            .sum()
    }

    /// Total number of indexed animation names.
    pub fn animation_count(&self) -> usize {
        self.animations
            .iter()
            .flat_map(|per_gender| per_gender.iter())
            .map(Vec::len)
            .sum()
    }

    /// Rebuild the keyword tables from the (final, sorted) animation tables.
    pub(crate) fn derive_keywords(&mut self) {
        for group in SkeletalGroup::ALL {
            for gender in Gender::ALL {
                self.keywords[group.index()][gender.index()] =
                    keywords_from(self.animations(group, gender));
            }
        }
    }
}

/// Position of a value within a sorted list, or `None` if absent.
pub fn sorted_position(list: &[String], value: &str) -> Option<usize> {
    list.binary_search_by(|probe| probe.as_str().cmp(value)).ok()
}

/// Derive the keyword set for one animation list.
///
/// Keywords are underscore-separated words with trailing digits stripped;
/// words shorter than 3 bytes and noise words are discarded.
fn keywords_from(animation_names: &[String]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for name in animation_names {
        for word in name.split('_') {
            let word = word.trim_end_matches(|c: char| c.is_ascii_digit());
            if word.len() >= 3 && !NOISE_WORDS.contains(&word) {
                set.insert(word.to_string());
            }
        }
    }
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keywords_from_animation_names() {
        let animations = names(&[
            "ca_hom_co_course",
            "ca_hom_co_marche2",
            "ca_hom_idle_end",
            "ca_hom_a_fx",
        ]);
        let keywords = keywords_from(&animations);
        // "hom" and "end" are noise, "a" and "fx" are too short, trailing
        // digits are stripped from "marche2".
        assert_eq!(keywords, names(&["course", "idle", "marche"]));
    }

    #[test]
    fn test_keywords_are_sorted_and_unique() {
        let animations = names(&["ge_hof_marche", "ge_hof_marche01", "ge_hof_course"]);
        let keywords = keywords_from(&animations);
        assert_eq!(keywords, names(&["course", "marche"]));
    }

    #[test]
    fn test_empty_catalog_queries_are_total() {
        let catalog = AssetCatalog::default();
        for gender in Gender::ALL {
            for part in BodyPart::ALL {
                assert!(catalog.geometries(gender, part).is_empty());
            }
        }
        for group in SkeletalGroup::ALL {
            for gender in Gender::ALL {
                assert!(catalog.animations(group, gender).is_empty());
                assert!(catalog.keywords(group, gender).is_empty());
            }
        }
        assert_eq!(catalog.geometry_count(), 0);
        assert_eq!(catalog.animation_count(), 0);
    }

    #[test]
    fn test_sorted_position() {
        let list = names(&["alpha", "beta", "gamma"]);
        assert_eq!(sorted_position(&list, "alpha"), Some(0));
        assert_eq!(sorted_position(&list, "gamma"), Some(2));
        assert_eq!(sorted_position(&list, "delta"), None);
    }
}
