//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mashtun::Category;

/// Mashtun: ingredient reconciliation for recipe datasets
#[derive(Parser)]
#[command(name = "mashtun")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively reconcile ingredient names against a dataset
    Clean {
        /// Directory containing core.csv and ingredients.csv
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Category to start mapping immediately
        #[arg(short, long)]
        category: Option<Category>,

        /// Directory holding the persisted maps (default: DATA_DIR)
        #[arg(short, long)]
        map_dir: Option<PathBuf>,

        /// Play back a recorded command transcript before reading input
        #[arg(long)]
        playback: Option<PathBuf>,

        /// Only read the first N rows of each table
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show map sizes and dataset coverage
    Status {
        /// Directory containing core.csv and ingredients.csv
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Directory holding the persisted maps (default: DATA_DIR)
        #[arg(short, long)]
        map_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the maps and export cleaned ingredient names
    Apply {
        /// Directory containing core.csv and ingredients.csv
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Directory holding the persisted maps (default: DATA_DIR)
        #[arg(short, long)]
        map_dir: Option<PathBuf>,

        /// Output path for the cleaned ingredients table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop rows that still carry unmapped names
        #[arg(long)]
        drop_unmapped: bool,
    },

    /// Compute per-recipe brewing features (og, fg, abv, ibu, srm)
    Features {
        /// Directory containing core.csv and ingredients.csv
        #[arg(value_name = "DATA_DIR")]
        data_dir: PathBuf,

        /// Output path for the features table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the unique canonical names of a category's map
    Targets {
        /// Ingredient category (ferm, hop, yeast, misc)
        #[arg(value_name = "CATEGORY")]
        category: Category,

        /// Directory holding the persisted maps
        #[arg(short, long, default_value = ".")]
        map_dir: PathBuf,

        /// Output path (default: <category>_targets.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
