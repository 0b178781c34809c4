//! Clean command - run the interactive reconciliation shell.

use std::path::PathBuf;

use colored::Colorize;
use mashtun::dataset::ParserConfig;
use mashtun::{Category, MapStore, RecipeData};

use crate::shell::Shell;

pub fn run(
    data_dir: PathBuf,
    category: Option<Category>,
    map_dir: Option<PathBuf>,
    playback: Option<PathBuf>,
    limit: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // An unreadable dataset is the one fatal startup error
    let config = ParserConfig {
        max_rows: limit,
        ..ParserConfig::default()
    };
    let data = RecipeData::load_with(&data_dir, config)?;
    if verbose {
        println!(
            "Loaded {} recipes, {} ingredient rows.",
            data.core.row_count(),
            data.ingredients.row_count()
        );
    }

    let map_dir = map_dir.unwrap_or_else(|| data_dir.clone());
    let store = MapStore::new(&map_dir);

    let mut shell = Shell::new(data, store);

    if let Some(category) = category {
        shell.set_category(category)?;
    }

    if let Some(playback) = playback {
        shell.queue_playback(&playback).map_err(|e| {
            format!("could not read transcript '{}': {}", playback.display(), e)
        })?;
        println!(
            "{} playing back {}",
            "Note:".yellow(),
            playback.display()
        );
    }

    shell.run()
}
