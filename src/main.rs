//! Mannequin CLI - Command-line tool for browsing converted character assets.
//!
//! This is the main entry point for the Mannequin command-line application.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mannequin::prelude::*;

/// Mannequin - character assembly from converted game assets
#[derive(Parser)]
#[command(name = "mannequin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an export directory and write a fresh summary file
    Scan {
        /// Path to the export directory
        #[arg(short, long, env = "ASSET_ROOT")]
        assets: PathBuf,

        /// Output summary file (defaults to summary.bin in the directory)
        #[arg(short, long)]
        summary: Option<PathBuf>,
    },

    /// List one catalog table
    List {
        /// Path to the export directory
        #[arg(short, long, env = "ASSET_ROOT")]
        assets: PathBuf,

        /// Which table to list
        #[arg(short, long, value_enum, default_value_t = Table::Geometries)]
        table: Table,

        /// Restrict the listing to one gender
        #[arg(short, long, value_enum)]
        gender: Option<GenderArg>,

        /// Restrict the listing to one skeletal group
        #[arg(long, value_enum)]
        group: Option<GroupArg>,
    },

    /// Show the status of a freshly created selection
    Status {
        /// Path to the export directory
        #[arg(short, long, env = "ASSET_ROOT")]
        assets: PathBuf,
    },

    /// Assemble a random character and print its asset keys
    Random {
        /// Path to the export directory
        #[arg(short, long, env = "ASSET_ROOT")]
        assets: PathBuf,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Table {
    Geometries,
    Animations,
    Keywords,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Geometries => "geometries",
            Table::Animations => "animations",
            Table::Keywords => "keywords",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Female,
    Male,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Gender {
        match arg {
            GenderArg::Female => Gender::Female,
            GenderArg::Male => Gender::Male,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    Ca,
    Ge,
}

impl From<GroupArg> for SkeletalGroup {
    fn from(arg: GroupArg) -> SkeletalGroup {
        match arg {
            GroupArg::Ca => SkeletalGroup::Ca,
            GroupArg::Ge => SkeletalGroup::Ge,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { assets, summary } => {
            cmd_scan(&assets, summary)?;
        }
        Commands::List { assets, table, gender, group } => {
            cmd_list(&assets, table, gender, group)?;
        }
        Commands::Status { assets } => {
            cmd_status(&assets)?;
        }
        Commands::Random { assets, seed } => {
            cmd_random(&assets, seed)?;
        }
    }

    Ok(())
}

fn cmd_scan(assets: &Path, summary: Option<PathBuf>) -> Result<()> {
    println!("Scanning export directory: {}", assets.display());

    let store = ManifestStore::for_directory(assets)
        .context("Failed to read the asset manifest")?;

    let pb = scan_progress_bar()?;
    let start = Instant::now();
    let catalog = scan_directory(assets, &store, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })
    .context("Failed to scan the export directory")?;
    pb.finish_with_message("Done");

    println!(
        "Indexed {} geometry assets and {} animations in {:?}",
        catalog.geometry_count(),
        catalog.animation_count(),
        start.elapsed()
    );

    let summary_path = summary.unwrap_or_else(|| assets.join(cache::SUMMARY_FILE_NAME));
    cache::save(&catalog, &summary_path).context("Failed to write the summary file")?;
    println!("Summary written to {}", summary_path.display());

    Ok(())
}

fn cmd_list(
    assets: &Path,
    table: Table,
    gender: Option<GenderArg>,
    group: Option<GroupArg>,
) -> Result<()> {
    let catalog = load_catalog(assets)?;

    let genders: Vec<Gender> = match gender {
        Some(arg) => vec![arg.into()],
        None => Gender::ALL.to_vec(),
    };
    let groups: Vec<SkeletalGroup> = match group {
        Some(arg) => vec![arg.into()],
        None => SkeletalGroup::ALL.to_vec(),
    };

    let mut count = 0;
    if table == Table::Geometries {
        for gender in &genders {
            for part in BodyPart::ALL {
                let names = catalog.geometries(*gender, part);
                if names.is_empty() {
                    continue;
                }
                println!("{gender} {part}:");
                for name in names {
                    println!("  {name}");
                    count += 1;
                }
            }
        }
    } else {
        for group in &groups {
            for gender in &genders {
                let names = match table {
                    Table::Animations => catalog.animations(*group, *gender),
                    _ => catalog.keywords(*group, *gender),
                };
                if names.is_empty() {
                    continue;
                }
                println!("{group} {gender}:");
                for name in names {
                    println!("  {name}");
                    count += 1;
                }
            }
        }
    }

    println!("\nTotal: {} entries", count);

    Ok(())
}

fn cmd_status(assets: &Path) -> Result<()> {
    let catalog = load_catalog(assets)?;
    let controller = SelectionController::new(&catalog);
    print_status(&controller, &catalog);
    Ok(())
}

fn cmd_random(assets: &Path, seed: Option<u64>) -> Result<()> {
    let catalog = load_catalog(assets)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut controller = SelectionController::new(&catalog);
    for field in [Field::Gender, Field::Group, Field::Keyword, Field::Animation] {
        controller.select_field(field);
        controller.randomize_value(&catalog, &mut rng);
    }
    controller.randomize_all_parts(&catalog, &mut rng);
    controller.select_field(Field::Group);

    print_status(&controller, &catalog);

    let character = controller.character();
    println!();
    println!("Animation asset: {}", character.animation_asset_file());
    for part in BodyPart::ALL {
        if let Some(file) = character.geometry_asset_file(part) {
            println!("{part} asset: {file}");
        }
    }

    Ok(())
}

/// Index the export directory, reusing its summary file when present.
fn load_catalog(assets: &Path) -> Result<AssetCatalog> {
    let store = ManifestStore::for_directory(assets)
        .context("Failed to read the asset manifest")?;
    let summary = assets.join(cache::SUMMARY_FILE_NAME);

    let pb = scan_progress_bar()?;
    let catalog = cache::load_or_scan(assets, &summary, &store, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })
    .context("Failed to index the export directory")?;
    pb.finish_and_clear();

    Ok(catalog)
}

fn scan_progress_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Print one line per editable field, marking the selected one.
fn print_status(controller: &SelectionController, catalog: &AssetCatalog) {
    for field in Field::ALL {
        let marker = if field == controller.selected_field() { "->" } else { "  " };
        println!("{} {}", marker, status_line(field, controller, catalog));
    }
}

fn status_line(field: Field, controller: &SelectionController, catalog: &AssetCatalog) -> String {
    let character = controller.character();
    match field {
        Field::Group => {
            let index = character.group().index();
            format!(
                "Skeletal group #{} of {}: {}",
                index + 1,
                SkeletalGroup::COUNT,
                character.group()
            )
        }
        Field::Gender => {
            let index = character.gender().index();
            format!("Gender #{} of {}: {}", index + 1, Gender::COUNT, character.gender())
        }
        Field::Keyword => {
            let known = controller.known_keywords(catalog);
            match sorted_position(known, controller.keyword()) {
                Some(index) => format!(
                    "Animation keyword #{} of {}: {}",
                    index + 1,
                    known.len(),
                    controller.keyword()
                ),
                None => "Animation keyword: <none>".to_string(),
            }
        }
        Field::Animation => {
            let known = controller.known_animations(catalog);
            match sorted_position(&known, controller.animation()) {
                Some(index) => format!(
                    "Animation #{} of {}: {}",
                    index + 1,
                    known.len(),
                    controller.animation()
                ),
                None => "Animation: <none>".to_string(),
            }
        }
        Field::Part(part) => {
            let known = catalog.geometries(character.gender(), part);
            match character.geometry(part) {
                Some(name) => match sorted_position(known, name) {
                    Some(index) => {
                        format!("{} #{} of {}: {}", part, index + 1, known.len(), name)
                    }
                    None => format!("{part}: {name}"),
                },
                None => format!("{part}: <none>"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn face_catalog() -> AssetCatalog {
        let mut store = ManifestStore::new();
        store.insert_part("fy_hom_visage.j3o", "FACE");
        let mut scanner = Scanner::new();
        scanner.add_file("fy_hom_visage.j3o", &store).unwrap();
        scanner.finish()
    }

    #[test]
    fn test_status_line_for_set_and_unset_parts() {
        let catalog = face_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let mut controller = SelectionController::new(&catalog);
        controller.randomize_all_parts(&catalog, &mut rng);

        assert_eq!(
            status_line(Field::Part(BodyPart::Face), &controller, &catalog),
            "Face #1 of 1: fy_hom_visage"
        );
        assert_eq!(
            status_line(Field::Part(BodyPart::Head), &controller, &catalog),
            "Head: <none>"
        );
    }

    #[test]
    fn test_status_line_renders_unlisted_geometry_without_position() {
        let catalog = face_catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let mut controller = SelectionController::new(&catalog);
        controller.randomize_all_parts(&catalog, &mut rng);

        // Rendering against a different catalog must not invent an ordinal.
        let empty = AssetCatalog::default();
        assert_eq!(
            status_line(Field::Part(BodyPart::Face), &controller, &empty),
            "Face: fy_hom_visage"
        );
    }
}
