//! Recipe dataset access.
//!
//! The reconciliation loop and the feature calculators both read from a
//! tabular recipe store: a `core` table (one row per recipe) and an
//! `ingredients` table (one row per ingredient addition, keyed by recipe id).
//! Both are delimited text files; the delimiter is auto-detected.

mod parser;
mod recipes;
mod table;

pub use parser::{Parser, ParserConfig};
pub use recipes::{NameCounts, RecipeData, CORE_FILE, INGREDIENTS_FILE};
pub use table::{DataTable, SourceMetadata};
