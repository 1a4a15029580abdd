//! Binary summary file for fast startup.
//!
//! Scanning and loading hundreds of exported assets dominates startup cost,
//! so the finished catalog tables are persisted to a small binary file and
//! read back on subsequent runs.
//!
//! # File format
//!
//! Little-endian throughout, no header. Record order:
//!
//! - for each [`BodyPart`] in enum order: female geometry list, male
//!   geometry list
//! - for each [`SkeletalGroup`] in enum order, for each [`Gender`] in enum
//!   order: animation list, keyword list
//!
//! A list is an `i32` count followed by that many entries; an entry is an
//! `i32` byte length followed by UTF-8 bytes. Length -1 is reserved for an
//! absent entry (no bytes follow), distinct from an empty string.
//!
//! A load that fails at any point is a total failure: no catalog value is
//! produced and the caller falls back to a full scan. A failed save deletes
//! the partially written file and is likewise non-fatal to startup.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::catalog::AssetCatalog;
use crate::scan::scan_directory;
use crate::store::AssetStore;
use crate::types::{BodyPart, Gender, SkeletalGroup};
use crate::{Error, Result};

/// Conventional summary file name.
pub const SUMMARY_FILE_NAME: &str = "summary.bin";

/// Write the catalog's tables to a summary file.
///
/// On failure the partially written file is removed.
pub fn save(catalog: &AssetCatalog, path: &Path) -> Result<()> {
    let result = try_save(catalog, path);
    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

fn try_save(catalog: &AssetCatalog, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(catalog, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a catalog back from a summary file.
pub fn load(path: &Path) -> Result<AssetCatalog> {
    let mut reader = BufReader::new(File::open(path)?);
    read_from(&mut reader)
}

/// Load the summary file if possible, otherwise scan the export directory
/// and attempt to write a fresh summary.
///
/// Cache failures in either direction are non-fatal: a bad summary triggers
/// a rescan, and a failed save leaves the application running uncached.
pub fn load_or_scan(
    dir: &Path,
    summary_path: &Path,
    store: &dyn AssetStore,
    progress: impl FnMut(usize, usize),
) -> Result<AssetCatalog> {
    if let Ok(catalog) = load(summary_path) {
        return Ok(catalog);
    }
    let catalog = scan_directory(dir, store, progress)?;
    let _ = save(&catalog, summary_path);
    Ok(catalog)
}

/// Serialize the catalog tables in the fixed record order.
pub fn write_to<W: Write>(catalog: &AssetCatalog, writer: &mut W) -> Result<()> {
    for part in BodyPart::ALL {
        for gender in Gender::ALL {
            write_list(writer, catalog.geometries(gender, part))?;
        }
    }
    for group in SkeletalGroup::ALL {
        for gender in Gender::ALL {
            write_list(writer, catalog.animations(group, gender))?;
            write_list(writer, catalog.keywords(group, gender))?;
        }
    }
    Ok(())
}

/// Deserialize a catalog from the fixed record order.
pub fn read_from<R: Read>(reader: &mut R) -> Result<AssetCatalog> {
    let mut catalog = AssetCatalog::default();
    for part in BodyPart::ALL {
        for gender in Gender::ALL {
            catalog.geometries[gender.index()][part.index()] = read_list(reader)?;
        }
    }
    for group in SkeletalGroup::ALL {
        for gender in Gender::ALL {
            catalog.animations[group.index()][gender.index()] = read_list(reader)?;
            catalog.keywords[group.index()][gender.index()] = read_list(reader)?;
        }
    }
    Ok(catalog)
}

fn write_list<W: Write>(writer: &mut W, items: &[String]) -> Result<()> {
    writer.write_i32::<LittleEndian>(items.len() as i32)?;
    for item in items {
        write_entry(writer, Some(item))?;
    }
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, item: Option<&str>) -> Result<()> {
    match item {
        Some(s) => {
            writer.write_i32::<LittleEndian>(s.len() as i32)?;
            writer.write_all(s.as_bytes())?;
        }
        None => writer.write_i32::<LittleEndian>(-1)?,
    }
    Ok(())
}

fn read_list<R: Read>(reader: &mut R) -> Result<Vec<String>> {
    let count = reader.read_i32::<LittleEndian>()?;
    if count < 0 {
        return Err(Error::Corrupt("negative list count"));
    }
    let mut items = Vec::with_capacity((count as usize).min(4096));
    for _ in 0..count {
        match read_entry(reader)? {
            Some(item) => items.push(item),
            // The tables never contain absent entries, so one here means
            // the file was not written by this codec.
            None => return Err(Error::Corrupt("absent entry in list")),
        }
    }
    Ok(items)
}

fn read_entry<R: Read>(reader: &mut R) -> Result<Option<String>> {
    let length = reader.read_i32::<LittleEndian>()?;
    if length == -1 {
        return Ok(None);
    }
    if length < 0 {
        return Err(Error::Corrupt("negative string length"));
    }
    let mut bytes = vec![0u8; length as usize];
    reader.read_exact(&mut bytes)?;
    let item = String::from_utf8(bytes).map_err(|_| Error::Corrupt("invalid UTF-8 string"))?;
    Ok(Some(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Scanner;
    use crate::store::ManifestStore;

    fn sample_catalog() -> AssetCatalog {
        let mut store = ManifestStore::new();
        store.insert_part("fy_hom_visage.j3o", "FACE");
        store.insert_part("fy_hof_visage.j3o", "FACE");
        store.insert_part("fy_hom_armor01_gilet.j3o", "ARMOR_CHEST");
        store.insert_animations(
            "animations_ca_hom.j3o",
            vec!["ca_hom_co_course".to_string(), "ca_hom_co_marche".to_string()],
        );
        store.insert_animations(
            "animations_ge_hof.j3o",
            vec!["ge_hof_idle".to_string(), "ge_hof_marché".to_string()],
        );

        let mut scanner = Scanner::new();
        for file_name in [
            "fy_hom_visage.j3o",
            "fy_hof_visage.j3o",
            "fy_hom_armor01_gilet.j3o",
            "animations_ca_hom.j3o",
            "animations_ge_hof.j3o",
        ] {
            scanner.add_file(file_name, &store).unwrap();
        }
        scanner.finish()
    }

    #[test]
    fn test_round_trip() {
        let catalog = sample_catalog();
        let mut buffer = Vec::new();
        write_to(&catalog, &mut buffer).unwrap();

        let restored = read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_round_trip_preserves_non_ascii() {
        let catalog = sample_catalog();
        let mut buffer = Vec::new();
        write_to(&catalog, &mut buffer).unwrap();
        let restored = read_from(&mut buffer.as_slice()).unwrap();
        assert!(restored
            .animations(SkeletalGroup::Ge, Gender::Female)
            .contains(&"ge_hof_marché".to_string()));
    }

    #[test]
    fn test_truncated_file_is_total_failure() {
        let catalog = sample_catalog();
        let mut buffer = Vec::new();
        write_to(&catalog, &mut buffer).unwrap();

        for cut in [0, 1, 3, buffer.len() / 2, buffer.len() - 1] {
            let mut truncated = &buffer[..cut];
            assert!(read_from(&mut truncated).is_err(), "cut at {cut}");
        }
    }

    #[test]
    fn test_negative_count_is_corrupt() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&(-2i32).to_le_bytes());
        assert!(matches!(
            read_from(&mut buffer.as_slice()),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_absent_entry_is_corrupt() {
        // One list with a single absent (-1) entry.
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&1i32.to_le_bytes());
        buffer.extend_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(
            read_from(&mut buffer.as_slice()),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&1i32.to_le_bytes());
        buffer.extend_from_slice(&2i32.to_le_bytes());
        buffer.extend_from_slice(&[0xFF, 0xFE]);
        assert!(matches!(
            read_from(&mut buffer.as_slice()),
            Err(Error::Corrupt(_))
        ));
    }

    #[test]
    fn test_entry_encoding() {
        let mut buffer = Vec::new();
        write_entry(&mut buffer, Some("ab")).unwrap();
        write_entry(&mut buffer, None).unwrap();
        write_entry(&mut buffer, Some("")).unwrap();

        let mut reader = buffer.as_slice();
        assert_eq!(read_entry(&mut reader).unwrap(), Some("ab".to_string()));
        assert_eq!(read_entry(&mut reader).unwrap(), None);
        // An empty string is distinct from an absent entry.
        assert_eq!(read_entry(&mut reader).unwrap(), Some(String::new()));
        assert!(reader.is_empty());
    }
}
