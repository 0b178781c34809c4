//! Apply ingredient maps to a dataset table.
//!
//! Reconciliation produces maps; this is where they pay off. Each category
//! with a loaded map contributes a `<category>_name_clean` column holding the
//! canonical name for every mapped row. The original columns are never
//! modified.

use std::collections::HashMap;

use serde::Serialize;

use crate::category::Category;
use crate::dataset::DataTable;
use crate::normalize::normalize_raw_name;
use crate::store::IngredientMap;

/// Per-category counts from an apply pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyCounts {
    /// Rows whose raw name was found in the map.
    pub mapped: usize,
    /// Rows with a non-null raw name missing from the map.
    pub unmapped: usize,
}

/// Outcome of applying maps to an ingredients table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyOutcome {
    pub counts: HashMap<Category, ApplyCounts>,
    /// Rows removed because an unmapped name remained (only with
    /// `drop_unmapped`).
    pub dropped_rows: usize,
}

/// Add `<category>_name_clean` columns for every category present in `maps`.
///
/// With `drop_unmapped`, rows that still carry a non-null unmapped name in
/// any mapped category are removed afterwards.
pub fn apply_maps(
    ingredients: &mut DataTable,
    maps: &HashMap<Category, IngredientMap>,
    drop_unmapped: bool,
) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();
    let mut keep = vec![true; ingredients.row_count()];

    for category in Category::ALL {
        let Some(map) = maps.get(&category) else {
            continue;
        };
        let Some(col) = ingredients.column_index(&category.column_name()) else {
            continue;
        };

        let mut counts = ApplyCounts::default();
        let mut clean_cells = Vec::with_capacity(ingredients.row_count());
        for (r, row) in ingredients.rows.iter().enumerate() {
            let raw = row.get(col).map(|s| s.as_str()).unwrap_or("");
            if DataTable::is_null_value(raw) {
                clean_cells.push(String::new());
                continue;
            }
            let normalized = normalize_raw_name(category, raw);
            match map.apply(&normalized) {
                Some(canonical) => {
                    counts.mapped += 1;
                    clean_cells.push(canonical.to_string());
                }
                None => {
                    counts.unmapped += 1;
                    keep[r] = false;
                    clean_cells.push(String::new());
                }
            }
        }

        ingredients.headers.push(format!("{}_clean", category.column_name()));
        for (row, cell) in ingredients.rows.iter_mut().zip(clean_cells) {
            row.push(cell);
        }
        outcome.counts.insert(category, counts);
    }

    if drop_unmapped {
        let mut kept_rows = Vec::with_capacity(ingredients.row_count());
        for (row, keep) in ingredients.rows.drain(..).zip(&keep) {
            if *keep {
                kept_rows.push(row);
            } else {
                outcome.dropped_rows += 1;
            }
        }
        ingredients.rows = kept_rows;
    }

    outcome
}
