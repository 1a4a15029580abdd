//! Directory scanning and file classification.
//!
//! A scan enumerates one level of an export directory, classifies each file
//! by its name, pulls the required metadata from the [`AssetStore`], and
//! produces a finished [`AssetCatalog`]. Classification failures are fatal:
//! they indicate a corrupt or incompatible export, not a runtime condition.

use std::path::Path;
use std::time::{Duration, Instant};

use walkdir::WalkDir;

use crate::catalog::AssetCatalog;
use crate::store::AssetStore;
use crate::types::{
    parse_animation_set_file_name, strip_asset_extension, BodyPart, Gender, ANIMATION_SET_PREFIX,
    GEOMETRY_PREFIXES,
};
use crate::{Error, Result};

/// Minimum interval between progress reports.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Incremental catalog builder.
///
/// Feed it classified files with [`add_file`](Scanner::add_file), then call
/// [`finish`](Scanner::finish) to obtain the sorted, de-duplicated catalog.
#[derive(Debug, Default)]
pub struct Scanner {
    catalog: AssetCatalog,
}

impl Scanner {
    /// Create an empty scanner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one exported file and record it.
    ///
    /// Files without the converted-asset extension or a known prefix are
    /// ignored. An animation set replaces any prior entry for its
    /// (group, gender) key.
    pub fn add_file(&mut self, file_name: &str, store: &dyn AssetStore) -> Result<()> {
        let Some(asset_name) = strip_asset_extension(file_name) else {
            return Ok(());
        };

        if file_name.starts_with(ANIMATION_SET_PREFIX) {
            let (group, gender) = parse_animation_set_file_name(file_name)?;
            let mut names = store.animation_names(file_name)?;
            names.sort_unstable();
            names.dedup();
            self.catalog.animations[group.index()][gender.index()] = names;
        } else if GEOMETRY_PREFIXES.iter().any(|p| asset_name.starts_with(p)) {
            let tag = store.part_tag(file_name)?;
            let part = BodyPart::from_part_tag(&tag).ok_or_else(|| Error::UnknownPartTag {
                file_name: file_name.to_string(),
                tag,
            })?;
            let gender = Gender::infer_from_asset_name(asset_name)?;
            self.catalog.geometries[gender.index()][part.index()].push(asset_name.to_string());
        }

        Ok(())
    }

    /// Sort and de-duplicate every table, derive keywords, and return the
    /// finished catalog.
    pub fn finish(mut self) -> AssetCatalog {
        for per_part in &mut self.catalog.geometries {
            for list in per_part {
                list.sort_unstable();
                list.dedup();
            }
        }
        self.catalog.derive_keywords();
        self.catalog
    }
}

/// Scan one level of an export directory into a catalog.
///
/// Entries are sorted by file name before classification, so the resulting
/// catalog does not depend on readdir order. `progress` is called with
/// (analyzed, total) at most every [`PROGRESS_INTERVAL`] plus once at the
/// end; it is purely observational.
pub fn scan_directory(
    dir: &Path,
    store: &dyn AssetStore,
    mut progress: impl FnMut(usize, usize),
) -> Result<AssetCatalog> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut file_names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        // Asset file names are always ASCII; skip anything unrepresentable.
        if let Some(name) = entry.file_name().to_str() {
            file_names.push(name.to_string());
        }
    }

    let total = file_names.len();
    let mut scanner = Scanner::new();
    let mut next_report = Instant::now();
    for (analyzed, file_name) in file_names.iter().enumerate() {
        scanner.add_file(file_name, store)?;
        if Instant::now() >= next_report {
            progress(analyzed + 1, total);
            next_report = Instant::now() + PROGRESS_INTERVAL;
        }
    }
    progress(total, total);

    Ok(scanner.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ManifestStore;
    use crate::types::SkeletalGroup;

    fn test_store() -> ManifestStore {
        let mut store = ManifestStore::new();
        store.insert_part("fy_hom_visage.j3o", "FACE");
        store.insert_part("fy_hof_visage.j3o", "FACE");
        store.insert_part("fy_hom_armor01_armpad.j3o", "ARMOR_ARMPADS");
        store.insert_part("fy_hom_cheveux_basic01.j3o", "HAIR");
        store.insert_part("zo_hof_armor01_bottes.j3o", "ARMOR_BOOTS");
        store.insert_animations(
            "animations_ca_hom.j3o",
            vec![
                "ca_hom_co_marche".to_string(),
                "ca_hom_co_course".to_string(),
                "ca_hom_co_course".to_string(),
            ],
        );
        store
    }

    #[test]
    fn test_scan_classifies_geometry_and_animations() {
        let store = test_store();
        let mut scanner = Scanner::new();
        for file_name in [
            "fy_hom_visage.j3o",
            "fy_hof_visage.j3o",
            "fy_hom_armor01_armpad.j3o",
            "fy_hom_cheveux_basic01.j3o",
            "zo_hof_armor01_bottes.j3o",
            "animations_ca_hom.j3o",
            "readme.txt",
            "notes.j3o.bak",
        ] {
            scanner.add_file(file_name, &store).unwrap();
        }
        let catalog = scanner.finish();

        assert_eq!(
            catalog.geometries(Gender::Male, BodyPart::Face),
            ["fy_hom_visage"]
        );
        assert_eq!(
            catalog.geometries(Gender::Female, BodyPart::Face),
            ["fy_hof_visage"]
        );
        assert_eq!(
            catalog.geometries(Gender::Male, BodyPart::Head),
            ["fy_hom_cheveux_basic01"]
        );
        assert_eq!(
            catalog.geometries(Gender::Female, BodyPart::Feet),
            ["zo_hof_armor01_bottes"]
        );
        // Animations were sorted and de-duplicated on the way in.
        assert_eq!(
            catalog.animations(SkeletalGroup::Ca, Gender::Male),
            ["ca_hom_co_course", "ca_hom_co_marche"]
        );
        assert_eq!(
            catalog.keywords(SkeletalGroup::Ca, Gender::Male),
            ["course", "marche"]
        );
        assert_eq!(catalog.geometry_count(), 5);
    }

    #[test]
    fn test_scan_order_does_not_matter() {
        let store = test_store();
        let files = [
            "fy_hom_visage.j3o",
            "fy_hof_visage.j3o",
            "fy_hom_armor01_armpad.j3o",
            "animations_ca_hom.j3o",
        ];

        let mut forward = Scanner::new();
        for f in files {
            forward.add_file(f, &store).unwrap();
        }
        let mut backward = Scanner::new();
        for f in files.iter().rev() {
            backward.add_file(f, &store).unwrap();
        }

        assert_eq!(forward.finish(), backward.finish());
    }

    #[test]
    fn test_geometry_lists_are_sorted_and_unique() {
        let store = test_store();
        let mut scanner = Scanner::new();
        // The same file recorded twice must not produce a duplicate.
        scanner.add_file("fy_hom_visage.j3o", &store).unwrap();
        scanner.add_file("fy_hom_visage.j3o", &store).unwrap();
        let catalog = scanner.finish();

        for gender in Gender::ALL {
            for part in BodyPart::ALL {
                let list = catalog.geometries(gender, part);
                assert!(list.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_unknown_part_tag_is_fatal() {
        let mut store = ManifestStore::new();
        store.insert_part("fy_hom_wings.j3o", "ARMOR_WINGS");
        let mut scanner = Scanner::new();
        assert!(matches!(
            scanner.add_file("fy_hom_wings.j3o", &store),
            Err(Error::UnknownPartTag { .. })
        ));
    }

    #[test]
    fn test_missing_metadata_is_fatal() {
        let store = ManifestStore::new();
        let mut scanner = Scanner::new();
        assert!(matches!(
            scanner.add_file("fy_hom_visage.j3o", &store),
            Err(Error::MissingMetadata(_))
        ));
    }

    #[test]
    fn test_ungendered_geometry_is_fatal() {
        let mut store = ManifestStore::new();
        store.insert_part("tr_neutral.j3o", "FACE");
        let mut scanner = Scanner::new();
        assert!(matches!(
            scanner.add_file("tr_neutral.j3o", &store),
            Err(Error::UngenderedName(_))
        ));
    }
}
