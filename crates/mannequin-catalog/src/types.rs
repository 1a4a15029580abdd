//! Domain types and filename classification rules.
//!
//! Converted assets encode everything the catalog needs in their file names:
//! geometry assets start with a two-letter continent prefix and carry their
//! gender as an infix, animation sets follow the fixed
//! `animations_{group}_ho{gender}` shape. The enums here give those ad hoc
//! string codes a closed, ordered representation; the short codes only appear
//! at the filename and summary-file boundaries.

use std::fmt;

use crate::{Error, Result};

/// File extension of converted assets (without the dot).
pub const ASSET_EXTENSION: &str = "j3o";

/// Filename prefixes that identify geometry assets.
pub const GEOMETRY_PREFIXES: [&str; 6] = ["ca", "fy", "ge", "ma", "tr", "zo"];

/// Filename prefix that identifies animation-set assets.
pub const ANIMATION_SET_PREFIX: &str = "animations_";

/// Opaque identifier for a converted asset file, minus its extension.
pub type AssetName = String;

/// Strip the converted-asset extension, or return `None` for foreign files.
pub(crate) fn strip_asset_extension(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(ASSET_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
}

/// Build the file name for an asset name.
pub fn asset_file_name(asset_name: &str) -> String {
    format!("{asset_name}.{ASSET_EXTENSION}")
}

/// Build the file name of the animation-set asset for a group and gender.
pub fn animation_set_file_name(group: SkeletalGroup, gender: Gender) -> String {
    format!(
        "{ANIMATION_SET_PREFIX}{}_ho{}.{ASSET_EXTENSION}",
        group.code(),
        gender.code()
    )
}

/// Parse and validate an animation-set file name.
///
/// The name must reconstruct exactly as `animations_{group}_ho{gender}.j3o`.
pub fn parse_animation_set_file_name(file_name: &str) -> Result<(SkeletalGroup, Gender)> {
    let parsed = strip_asset_extension(file_name)
        .and_then(|stem| stem.strip_prefix(ANIMATION_SET_PREFIX))
        .and_then(|rest| {
            let group = SkeletalGroup::from_code(rest.get(0..2)?)?;
            if rest.get(2..5) != Some("_ho") {
                return None;
            }
            let gender = Gender::from_code(rest.get(5..6)?)?;
            Some((group, gender))
        });

    match parsed {
        Some((group, gender)) if animation_set_file_name(group, gender) == file_name => {
            Ok((group, gender))
        }
        _ => Err(Error::BadAnimationFileName(file_name.to_string())),
    }
}

/// Humanoid region covered by a geometry asset.
///
/// The declaration order is significant: it defines the UI field ordering and
/// the record order of the summary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyPart {
    Arms,
    Torso,
    Face,
    Feet,
    Head,
    Hands,
    Legs,
}

impl BodyPart {
    /// Number of body parts.
    pub const COUNT: usize = 7;

    /// All body parts, in enum order.
    pub const ALL: [BodyPart; Self::COUNT] = [
        BodyPart::Arms,
        BodyPart::Torso,
        BodyPart::Face,
        BodyPart::Feet,
        BodyPart::Head,
        BodyPart::Hands,
        BodyPart::Legs,
    ];

    /// Ordinal of this part.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Map an embedded part tag to a body part.
    ///
    /// Returns `None` for tags outside the fixed vocabulary; the scanner
    /// turns that into a fatal classification error.
    pub fn from_part_tag(tag: &str) -> Option<Self> {
        let part = match tag {
            "ARMOR_ARMPADS" => BodyPart::Arms,
            "ARMOR_BOOTS" => BodyPart::Feet,
            "ARMOR_CHEST" => BodyPart::Torso,
            "ARMOR_HANDS" | "GAUNTLET" => BodyPart::Hands,
            "ARMOR_PANTS" => BodyPart::Legs,
            "FACE" => BodyPart::Face,
            "ARMOR_HELMET" | "HAIR" => BodyPart::Head,
            _ => return None,
        };
        Some(part)
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyPart::Arms => "Arms",
            BodyPart::Torso => "Torso",
            BodyPart::Face => "Face",
            BodyPart::Feet => "Feet",
            BodyPart::Head => "Head",
            BodyPart::Hands => "Hands",
            BodyPart::Legs => "Legs",
        };
        f.write_str(name)
    }
}

/// Character gender, serialized as the 1-letter codes `f`/`m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Number of genders.
    pub const COUNT: usize = 2;

    /// Both genders, in the fixed serialization order (female first).
    pub const ALL: [Gender; Self::COUNT] = [Gender::Female, Gender::Male];

    /// Ordinal of this gender.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The 1-letter code.
    pub const fn code(self) -> &'static str {
        match self {
            Gender::Female => "f",
            Gender::Male => "m",
        }
    }

    /// Parse a 1-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "f" => Some(Gender::Female),
            "m" => Some(Gender::Male),
            _ => None,
        }
    }

    /// The other gender.
    pub const fn opposite(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }

    /// Infer the gender of a geometry asset from its name.
    ///
    /// Asset names carry either a `hof`/`hom` infix at byte offset 3 or a
    /// `_f_`/`_h_` substring; a name with neither is a malformed export.
    pub fn infer_from_asset_name(asset_name: &str) -> Result<Self> {
        match asset_name.get(3..6) {
            Some("hof") => Ok(Gender::Female),
            Some("hom") => Ok(Gender::Male),
            _ if asset_name.contains("_f_") => Ok(Gender::Female),
            _ if asset_name.contains("_h_") => Ok(Gender::Male),
            _ => Err(Error::UngenderedName(asset_name.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

/// Rig/animation family of an animation set, serialized as `ca`/`ge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkeletalGroup {
    Ca,
    Ge,
}

impl SkeletalGroup {
    /// Number of skeletal groups.
    pub const COUNT: usize = 2;

    /// Both groups, in the fixed serialization order.
    pub const ALL: [SkeletalGroup; Self::COUNT] = [SkeletalGroup::Ca, SkeletalGroup::Ge];

    /// Ordinal of this group.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The 2-letter code.
    pub const fn code(self) -> &'static str {
        match self {
            SkeletalGroup::Ca => "ca",
            SkeletalGroup::Ge => "ge",
        }
    }

    /// Parse a 2-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ca" => Some(SkeletalGroup::Ca),
            "ge" => Some(SkeletalGroup::Ge),
            _ => None,
        }
    }

    /// The other group.
    pub const fn opposite(self) -> Self {
        match self {
            SkeletalGroup::Ca => SkeletalGroup::Ge,
            SkeletalGroup::Ge => SkeletalGroup::Ca,
        }
    }
}

impl fmt::Display for SkeletalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_inference() {
        assert_eq!(
            Gender::infer_from_asset_name("fy_hof_visage").unwrap(),
            Gender::Female
        );
        assert_eq!(
            Gender::infer_from_asset_name("fy_hom_armor01_armpad").unwrap(),
            Gender::Male
        );
        // Offset rule applies before the substring rule.
        assert_eq!(
            Gender::infer_from_asset_name("xx_hof_y_1").unwrap(),
            Gender::Female
        );
        // Substring fallback for names without the infix at offset 3.
        assert_eq!(
            Gender::infer_from_asset_name("zo_armor_f_chest").unwrap(),
            Gender::Female
        );
        assert_eq!(
            Gender::infer_from_asset_name("zo_armor_h_chest").unwrap(),
            Gender::Male
        );
        assert!(Gender::infer_from_asset_name("tr_neutral").is_err());
        assert!(Gender::infer_from_asset_name("xy").is_err());
    }

    #[test]
    fn test_part_tag_vocabulary() {
        assert_eq!(BodyPart::from_part_tag("ARMOR_ARMPADS"), Some(BodyPart::Arms));
        assert_eq!(BodyPart::from_part_tag("ARMOR_BOOTS"), Some(BodyPart::Feet));
        assert_eq!(BodyPart::from_part_tag("ARMOR_CHEST"), Some(BodyPart::Torso));
        assert_eq!(BodyPart::from_part_tag("ARMOR_HANDS"), Some(BodyPart::Hands));
        assert_eq!(BodyPart::from_part_tag("GAUNTLET"), Some(BodyPart::Hands));
        assert_eq!(BodyPart::from_part_tag("ARMOR_PANTS"), Some(BodyPart::Legs));
        assert_eq!(BodyPart::from_part_tag("FACE"), Some(BodyPart::Face));
        assert_eq!(BodyPart::from_part_tag("ARMOR_HELMET"), Some(BodyPart::Head));
        assert_eq!(BodyPart::from_part_tag("HAIR"), Some(BodyPart::Head));
        assert_eq!(BodyPart::from_part_tag("ARMOR_WINGS"), None);
    }

    #[test]
    fn test_animation_set_file_name_round_trip() {
        for group in SkeletalGroup::ALL {
            for gender in Gender::ALL {
                let file_name = animation_set_file_name(group, gender);
                assert_eq!(
                    parse_animation_set_file_name(&file_name).unwrap(),
                    (group, gender)
                );
            }
        }
    }

    #[test]
    fn test_animation_set_file_name_rejects_malformed() {
        assert!(parse_animation_set_file_name("animations_ca_hom").is_err());
        assert!(parse_animation_set_file_name("animations_xx_hom.j3o").is_err());
        assert!(parse_animation_set_file_name("animations_ca_hox.j3o").is_err());
        assert!(parse_animation_set_file_name("animations_ca_hom_extra.j3o").is_err());
        assert!(parse_animation_set_file_name("animation_ca_hom.j3o").is_err());
    }

    #[test]
    fn test_code_round_trip() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_code(gender.code()), Some(gender));
        }
        for group in SkeletalGroup::ALL {
            assert_eq!(SkeletalGroup::from_code(group.code()), Some(group));
        }
        assert_eq!(Gender::from_code("x"), None);
        assert_eq!(SkeletalGroup::from_code("zz"), None);
    }

    #[test]
    fn test_part_order_is_stable() {
        for (ordinal, part) in BodyPart::ALL.iter().enumerate() {
            assert_eq!(part.index(), ordinal);
        }
    }
}
