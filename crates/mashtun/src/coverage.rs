//! Map coverage over a recipe dataset.
//!
//! A recipe is covered by a category's map when every non-null raw name in
//! that category is a map key; a recipe covered by all four maps is fully
//! cleaned and usable downstream.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::category::Category;
use crate::dataset::RecipeData;
use crate::error::Result;
use crate::store::IngredientMap;

/// Coverage of one category's map.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCoverage {
    pub category: Category,
    /// Raw names in the persisted map.
    pub map_keys: usize,
    /// Recipes whose every non-null name in this category is mapped.
    pub covered_recipes: usize,
}

/// Coverage of a dataset by a set of category maps.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total_recipes: usize,
    pub categories: Vec<CategoryCoverage>,
    /// Recipes covered by every category map at once.
    pub fully_covered: usize,
}

/// Compute coverage of `data` by the given per-category maps.
///
/// Categories without a loaded map are treated as empty maps. A recipe with
/// no entries at all in some category is covered by that category.
pub fn report(
    data: &RecipeData,
    maps: &HashMap<Category, IngredientMap>,
) -> Result<CoverageReport> {
    let empty = IngredientMap::new();
    let groups = data.ingredient_rows_by_id();
    let total_recipes = groups.len();

    let mut categories = Vec::with_capacity(Category::ALL.len());
    let mut fully: Option<HashSet<&str>> = None;

    for category in Category::ALL {
        let map = maps.get(&category).unwrap_or(&empty);
        let names = data.ingredient_names(category)?;

        let mut covered: HashSet<&str> = HashSet::new();
        for (id, rows) in &groups {
            let all_mapped = rows
                .iter()
                .filter_map(|&r| names[r].as_deref())
                .all(|name| map.contains(name));
            if all_mapped {
                covered.insert(id.as_str());
            }
        }

        categories.push(CategoryCoverage {
            category,
            map_keys: map.len(),
            covered_recipes: covered.len(),
        });

        fully = Some(match fully {
            None => covered,
            Some(acc) => acc.intersection(&covered).copied().collect(),
        });
    }

    Ok(CoverageReport {
        total_recipes,
        categories,
        fully_covered: fully.map(|s| s.len()).unwrap_or(0),
    })
}

impl CoverageReport {
    /// Covered fraction for one category, 0.0 when the dataset is empty.
    pub fn fraction(&self, category: Category) -> f64 {
        if self.total_recipes == 0 {
            return 0.0;
        }
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.covered_recipes as f64 / self.total_recipes as f64)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CORE_FILE, INGREDIENTS_FILE};
    use std::fs;
    use tempfile::TempDir;

    fn dataset() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CORE_FILE), "id,batch_size\n0,19\n1,19\n").unwrap();
        fs::write(
            dir.path().join(INGREDIENTS_FILE),
            "id,ferm_name,hop_name,yeast_name,misc_name\n\
             0,pale malt,cascade,us-05,\n\
             0,crystal 60,citra,,\n\
             1,pale malt,cascade,us-05,irish moss\n",
        )
        .unwrap();
        dir
    }

    fn map_of(entries: &[(&str, &str)]) -> IngredientMap {
        let mut map = IngredientMap::new();
        for (raw, canonical) in entries {
            map.insert(*raw, *canonical);
        }
        map
    }

    #[test]
    fn test_partial_hop_coverage() {
        let dir = dataset();
        let data = RecipeData::load(dir.path()).unwrap();

        let mut maps = HashMap::new();
        maps.insert(Category::Hop, map_of(&[("cascade", "cascade")]));

        let report = report(&data, &maps).unwrap();
        assert_eq!(report.total_recipes, 2);

        // Recipe 0 uses citra (unmapped); recipe 1 only cascade
        let hop = report
            .categories
            .iter()
            .find(|c| c.category == Category::Hop)
            .unwrap();
        assert_eq!(hop.covered_recipes, 1);
        assert_eq!(report.fraction(Category::Hop), 0.5);
    }

    #[test]
    fn test_fully_covered_needs_every_category() {
        let dir = dataset();
        let data = RecipeData::load(dir.path()).unwrap();

        let mut maps = HashMap::new();
        maps.insert(
            Category::Fermentable,
            map_of(&[("pale malt", "pale malt"), ("crystal 60", "crystal 60")]),
        );
        maps.insert(
            Category::Hop,
            map_of(&[("cascade", "cascade"), ("citra", "citra")]),
        );
        maps.insert(Category::Yeast, map_of(&[("us-05", "us-05")]));
        // No misc map: recipe 1 has "irish moss", recipe 0 has no misc rows

        let report = report(&data, &maps).unwrap();
        assert_eq!(report.fully_covered, 1);
    }
}
