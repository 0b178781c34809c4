//! Apply command - export cleaned ingredient names.

use std::collections::HashMap;
use std::path::PathBuf;

use colored::Colorize;
use mashtun::{apply_maps, Category, DataTable, IngredientMap, MapStore, RecipeData};

pub fn run(
    data_dir: PathBuf,
    map_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    drop_unmapped: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = RecipeData::load(&data_dir)?;
    let store = MapStore::new(map_dir.unwrap_or_else(|| data_dir.clone()));

    let mut maps: HashMap<Category, IngredientMap> = HashMap::new();
    for category in Category::ALL {
        let map = store.load(category)?;
        if map.is_empty() {
            if verbose {
                println!("No {} map; column left uncleaned.", category);
            }
            continue;
        }
        maps.insert(category, map);
    }

    if maps.is_empty() {
        return Err("no maps found; run 'mashtun clean' first".into());
    }

    let mut ingredients = data.ingredients.clone();
    let outcome = apply_maps(&mut ingredients, &maps, drop_unmapped);

    for category in Category::ALL {
        if let Some(counts) = outcome.counts.get(&category) {
            println!(
                "  {:>5}: {} mapped, {} unmapped",
                category.to_string().white().bold(),
                counts.mapped.to_string().green(),
                counts.unmapped.to_string().yellow()
            );
        }
    }
    if drop_unmapped {
        println!("Dropped {} row(s) with unmapped names.", outcome.dropped_rows);
    }

    let output = output.unwrap_or_else(|| data_dir.join("ingredients_clean.csv"));
    write_table(&ingredients, &output)?;
    println!(
        "{} {}",
        "Wrote".cyan().bold(),
        output.display().to_string().white()
    );

    Ok(())
}

/// Write a table as CSV.
fn write_table(table: &DataTable, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_apply_writes_clean_column() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("core.csv"), "id,batch_size\n0,19\n").unwrap();
        fs::write(
            dir.path().join("ingredients.csv"),
            "id,hop_name\n0,cascade\n0,casscade\n",
        )
        .unwrap();

        let store = MapStore::new(dir.path());
        let mut map = IngredientMap::new();
        map.insert("cascade", "cascade");
        map.insert("casscade", "cascade");
        store.save(Category::Hop, &map).unwrap();

        run(dir.path().to_path_buf(), None, None, false, false).unwrap();

        let written = fs::read_to_string(dir.path().join("ingredients_clean.csv")).unwrap();
        assert!(written.contains("hop_name_clean"));
        assert!(written.lines().nth(2).unwrap().contains("cascade"));
    }
}
