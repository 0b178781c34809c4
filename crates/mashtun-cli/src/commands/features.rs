//! Features command - compute per-recipe brewing features.

use std::path::PathBuf;

use colored::Colorize;
use mashtun::{compute_features, RecipeData, RecipeFeatures};

pub fn run(
    data_dir: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = RecipeData::load(&data_dir)?;
    let features = compute_features(&data)?;

    let with_gravity = features.iter().filter(|f| f.og.is_some()).count();
    println!(
        "Computed features for {} recipe(s); {} with a gravity estimate.",
        features.len(),
        with_gravity
    );
    if verbose {
        for f in features.iter().take(5) {
            println!(
                "  id {}: og {:?} ibu {:?} srm {:?}",
                f.id, f.og, f.ibu, f.srm
            );
        }
    }

    let output = output.unwrap_or_else(|| data_dir.join("features.csv"));
    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record(RecipeFeatures::csv_header())?;
    for f in &features {
        writer.write_record(f.csv_row())?;
    }
    writer.flush()?;

    println!(
        "{} {}",
        "Wrote".cyan().bold(),
        output.display().to_string().white()
    );
    Ok(())
}
