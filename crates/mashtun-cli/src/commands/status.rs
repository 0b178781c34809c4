//! Status command - map sizes and dataset coverage.

use std::collections::HashMap;
use std::path::PathBuf;

use colored::Colorize;
use mashtun::{coverage, Category, IngredientMap, MapStore, RecipeData};

pub fn run(
    data_dir: PathBuf,
    map_dir: Option<PathBuf>,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = RecipeData::load(&data_dir)?;
    let store = MapStore::new(map_dir.unwrap_or_else(|| data_dir.clone()));

    let mut maps: HashMap<Category, IngredientMap> = HashMap::new();
    for category in Category::ALL {
        maps.insert(category, store.load(category)?);
    }

    let report = coverage::report(&data, &maps)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Coverage for".cyan().bold(),
        data_dir.display().to_string().white()
    );
    println!();

    for category in &report.categories {
        let fraction = report.fraction(category.category);
        let bar_width = 30;
        let filled = (fraction * bar_width as f64).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        println!(
            "  {:>5}: {} {}/{} recipes ({:.0}%), {} mapped names",
            category.category.to_string().white().bold(),
            bar.cyan(),
            category.covered_recipes,
            report.total_recipes,
            fraction * 100.0,
            category.map_keys
        );
    }

    println!();
    println!(
        "Fully covered: {} of {} recipes.",
        report.fully_covered.to_string().green().bold(),
        report.total_recipes
    );

    if report.fully_covered < report.total_recipes {
        println!(
            "Run {} to keep mapping.",
            format!("mashtun clean {}", data_dir.display()).cyan()
        );
    }

    Ok(())
}
