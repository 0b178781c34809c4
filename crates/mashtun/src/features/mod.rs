//! Derived brewing features for downstream modeling.
//!
//! Stateless arithmetic over the recipe tables: scaled ingredient
//! quantities, gravities, bitterness, color, and alcohol content. Missing
//! inputs and zero divisors produce missing values, never errors.

mod formulas;
mod scale;

pub use formulas::{
    abv, color_units, final_gravity, morey_srm, original_gravity, tinseth_ibu, GrainColor,
    HopAddition,
};
pub use scale::{scale_ferm, scale_hop, scale_hop_boil, scale_hop_dry, scale_misc};

use serde::Serialize;

use crate::dataset::{DataTable, RecipeData};
use crate::error::{MashtunError, Result};

/// Derived quantities for one recipe.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeFeatures {
    pub id: String,
    pub og: Option<f64>,
    pub fg: Option<f64>,
    pub abv: Option<f64>,
    pub ibu: Option<f64>,
    pub srm: Option<f64>,
}

impl RecipeFeatures {
    /// CSV header matching [`RecipeFeatures::csv_row`].
    pub fn csv_header() -> &'static [&'static str] {
        &["id", "og", "fg", "abv", "ibu", "srm"]
    }

    /// Values as CSV fields; missing values become empty cells.
    pub fn csv_row(&self) -> Vec<String> {
        fn cell(v: Option<f64>) -> String {
            v.map(|x| format!("{x:.4}")).unwrap_or_default()
        }
        vec![
            self.id.clone(),
            cell(self.og),
            cell(self.fg),
            cell(self.abv),
            cell(self.ibu),
            cell(self.srm),
        ]
    }
}

/// Compute features for every recipe in the dataset.
pub fn compute_features(data: &RecipeData) -> Result<Vec<RecipeFeatures>> {
    let core = &data.core;
    let ids = core
        .string_column("id")
        .ok_or_else(|| MashtunError::Dataset("core table has no 'id' column".to_string()))?;

    let batch_size = float_col(core, "batch_size");
    let boil_size = float_col(core, "boil_size");
    let efficiency = float_col(core, "efficiency");

    let ing = &data.ingredients;
    let ferm_amount = float_col(ing, "ferm_amount");
    let ferm_yield = float_col(ing, "ferm_yield");
    let ferm_color = float_col(ing, "ferm_color");
    let hop_amount = float_col(ing, "hop_amount");
    let hop_alpha = float_col(ing, "hop_alpha");
    let hop_time = float_col(ing, "hop_time");
    let yeast_attenuation = float_col(ing, "yeast_attenuation");
    let hop_form = ing.string_column("hop_form");

    let groups = data.ingredient_rows_by_id();

    let mut features = Vec::with_capacity(core.row_count());
    for (i, id) in ids.iter().enumerate() {
        let Some(id) = id else { continue };
        let rows: &[usize] = groups.get(*id).map(|v| v.as_slice()).unwrap_or(&[]);

        let eff = efficiency[i];
        let boil = boil_size[i];
        let batch = batch_size[i];

        // Total extract; a fermentable row with missing data poisons the sum
        let ferm_rows: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| ferm_amount[r].is_some())
            .collect();
        let extract = if ferm_rows.is_empty() {
            None
        } else {
            sum_options(
                ferm_rows
                    .iter()
                    .map(|&r| scale_ferm(ferm_amount[r], ferm_yield[r], eff, boil)),
            )
        };
        let og = extract.map(original_gravity);

        let attenuation = rows
            .iter()
            .find_map(|&r| yeast_attenuation[r])
            .map(as_fraction);
        let fg = match (og, attenuation) {
            (Some(og), Some(att)) => Some(final_gravity(og, att)),
            _ => None,
        };
        let alcohol = match (og, fg) {
            (Some(og), Some(fg)) => Some(abv(og, fg)),
            _ => None,
        };

        let ibu = og.and_then(|og| {
            let additions: Option<Vec<HopAddition>> = rows
                .iter()
                .filter(|&&r| hop_amount[r].is_some() && hop_time[r].unwrap_or(0.0) > 0.0)
                .map(|&r| {
                    let scaled = scale_hop_boil(
                        hop_amount[r],
                        hop_alpha[r].map(as_fraction),
                        hop_form.as_ref().and_then(|col| col[r]),
                        boil,
                    )?;
                    Some(HopAddition {
                        scaled_alpha: scaled,
                        time_min: hop_time[r].unwrap_or(0.0),
                    })
                })
                .collect();
            additions.map(|adds| tinseth_ibu(&adds, og))
        });

        let srm = {
            let grains: Option<Vec<GrainColor>> = ferm_rows
                .iter()
                .map(|&r| {
                    let batch = batch?;
                    if batch == 0.0 {
                        return None;
                    }
                    Some(GrainColor {
                        amount_per_l: ferm_amount[r]? / batch,
                        color: ferm_color[r]?,
                    })
                })
                .collect();
            match grains {
                Some(grains) if !grains.is_empty() => Some(morey_srm(color_units(&grains))),
                _ => None,
            }
        };

        features.push(RecipeFeatures {
            id: id.to_string(),
            og,
            fg,
            abv: alcohol,
            ibu,
            srm,
        });
    }

    Ok(features)
}

/// Float column, or all-missing if the column is absent.
fn float_col(table: &DataTable, name: &str) -> Vec<Option<f64>> {
    table
        .float_column(name)
        .unwrap_or_else(|| vec![None; table.row_count()])
}

/// Values stored as percentages (alpha acids, attenuation, efficiency) are
/// folded to fractions.
fn as_fraction(value: f64) -> f64 {
    if value > 1.5 {
        value / 100.0
    } else {
        value
    }
}

/// Sum that propagates missing values; empty input sums to zero.
fn sum_options(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.fold(Some(0.0), |acc, v| Some(acc? + v?))
}
