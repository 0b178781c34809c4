//! Recipe dataset: core and ingredients tables.

use std::path::Path;

use indexmap::IndexMap;

use super::parser::{Parser, ParserConfig};
use super::table::{DataTable, SourceMetadata};
use crate::category::Category;
use crate::error::{MashtunError, Result};
use crate::normalize::normalize_raw_name;
use crate::store::IngredientMap;

/// File name of the per-recipe table inside a dataset directory.
pub const CORE_FILE: &str = "core.csv";
/// File name of the per-addition table inside a dataset directory.
pub const INGREDIENTS_FILE: &str = "ingredients.csv";

/// Unmapped raw names with occurrence counts, most frequent first.
///
/// Ties keep the first-appearance order of the source column; the exact
/// tie-break is not a contract.
#[derive(Debug, Clone, Default)]
pub struct NameCounts {
    counts: Vec<(String, usize)>,
}

impl NameCounts {
    /// Tally names not yet present as keys in `map`, most frequent first.
    pub fn tally<'a>(names: impl IntoIterator<Item = &'a str>, map: &IngredientMap) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for name in names {
            if map.contains(name) {
                continue;
            }
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }

        // Stable sort keeps first-appearance order for equal counts
        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self { counts }
    }

    /// The most frequent remaining name, if any.
    pub fn most_common(&self) -> Option<&str> {
        self.counts.first().map(|(name, _)| name.as_str())
    }

    /// Unique names in descending-frequency order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A loaded recipe dataset: one row per recipe in `core`, one row per
/// ingredient addition in `ingredients`, joined on the `id` column.
#[derive(Debug, Clone)]
pub struct RecipeData {
    pub core: DataTable,
    pub ingredients: DataTable,
    pub core_source: SourceMetadata,
    pub ingredients_source: SourceMetadata,
}

impl RecipeData {
    /// Load `core.csv` and `ingredients.csv` from a dataset directory.
    ///
    /// An unreadable dataset is an error; the caller treats this as fatal at
    /// startup.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(dir, ParserConfig::default())
    }

    /// Load with parser overrides, e.g. a row limit for working on a subset.
    pub fn load_with(dir: impl AsRef<Path>, config: ParserConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let parser = Parser::with_config(config);

        let (core, core_source) = parser.parse_file(dir.join(CORE_FILE))?;
        let (ingredients, ingredients_source) = parser.parse_file(dir.join(INGREDIENTS_FILE))?;

        if ingredients.column_index("id").is_none() {
            return Err(MashtunError::Dataset(
                "ingredients table has no 'id' column".to_string(),
            ));
        }

        Ok(Self {
            core,
            ingredients,
            core_source,
            ingredients_source,
        })
    }

    /// Normalized raw names for a category, one entry per ingredient row.
    ///
    /// Null cells come back as `None`; everything else is normalized the way
    /// the reconciliation loop expects to see it.
    pub fn ingredient_names(&self, category: Category) -> Result<Vec<Option<String>>> {
        let column = category.column_name();
        let values = self.ingredients.string_column(&column).ok_or_else(|| {
            MashtunError::Dataset(format!("ingredients table has no '{column}' column"))
        })?;

        Ok(values
            .into_iter()
            .map(|v| v.map(|raw| normalize_raw_name(category, raw)))
            .collect())
    }

    /// Occurrence counts of raw names not yet present as keys in `map`,
    /// most frequent first.
    pub fn unmapped_counts(&self, category: Category, map: &IngredientMap) -> Result<NameCounts> {
        let names = self.ingredient_names(category)?;
        Ok(NameCounts::tally(
            names.iter().flatten().map(|s| s.as_str()),
            map,
        ))
    }

    /// Ingredient row indices grouped by recipe id, in first-appearance
    /// order.
    pub fn ingredient_rows_by_id(&self) -> IndexMap<String, Vec<usize>> {
        let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
        if let Some(idx) = self.ingredients.column_index("id") {
            for (row, values) in self.ingredients.rows.iter().enumerate() {
                if let Some(id) = values.get(idx) {
                    groups.entry(id.clone()).or_default().push(row);
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(core: &str, ingredients: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CORE_FILE), core).unwrap();
        fs::write(dir.path().join(INGREDIENTS_FILE), ingredients).unwrap();
        dir
    }

    fn hop_dataset() -> TempDir {
        write_dataset(
            "id,batch_size,boil_size,efficiency,boil_time\n\
             0,19,23,0.7,60\n\
             1,19,23,0.7,60\n",
            "id,hop_name,hop_amount\n\
             0,Cascade (US),0.02\n\
             0,casscade,0.01\n\
             1,cascade,0.02\n\
             1,NA,\n",
        )
    }

    #[test]
    fn test_load_missing_dir_is_error() {
        assert!(RecipeData::load("/definitely/not/here").is_err());
    }

    #[test]
    fn test_ingredient_names_normalized() {
        let dir = hop_dataset();
        let data = RecipeData::load(dir.path()).unwrap();
        let names = data.ingredient_names(Category::Hop).unwrap();

        assert_eq!(
            names,
            vec![
                Some("cascade".to_string()),
                Some("casscade".to_string()),
                Some("cascade".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_unmapped_counts_order() {
        let dir = hop_dataset();
        let data = RecipeData::load(dir.path()).unwrap();
        let counts = data
            .unmapped_counts(Category::Hop, &IngredientMap::new())
            .unwrap();

        assert_eq!(counts.most_common(), Some("cascade"));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_unmapped_counts_excludes_mapped() {
        let dir = hop_dataset();
        let data = RecipeData::load(dir.path()).unwrap();

        let mut map = IngredientMap::new();
        map.insert("cascade", "cascade");
        let counts = data.unmapped_counts(Category::Hop, &map).unwrap();

        assert_eq!(counts.most_common(), Some("casscade"));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_ingredient_rows_by_id() {
        let dir = hop_dataset();
        let data = RecipeData::load(dir.path()).unwrap();
        let groups = data.ingredient_rows_by_id();

        assert_eq!(groups.get("0"), Some(&vec![0, 1]));
        assert_eq!(groups.get("1"), Some(&vec![2, 3]));
    }
}
