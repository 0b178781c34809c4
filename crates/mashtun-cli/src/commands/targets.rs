//! Targets command - export a map's unique canonical names.

use std::path::PathBuf;

use colored::Colorize;
use mashtun::{Category, MapStore};

pub fn run(
    category: Category,
    map_dir: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = MapStore::new(&map_dir);
    let map = store.load(category)?;

    if map.is_empty() {
        println!("No {} map found in {}.", category, map_dir.display());
        return Ok(());
    }

    let targets = map.targets();
    if verbose {
        for target in &targets {
            println!("{target}");
        }
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{category}_targets.csv")));
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(&output)?;
    for target in &targets {
        writer.write_record([*target])?;
    }
    writer.flush()?;

    println!(
        "{} {} unique {} name(s) to {}",
        "Wrote".cyan().bold(),
        targets.len(),
        category,
        output.display()
    );
    Ok(())
}
