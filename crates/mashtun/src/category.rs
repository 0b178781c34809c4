//! Ingredient categories and their dataset/storage naming conventions.

use serde::{Deserialize, Serialize};

use crate::error::MashtunError;

/// An ingredient category in a recipe dataset.
///
/// Each category has its own raw-name column in the ingredients table and its
/// own persisted reconciliation map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Fermentables: malts, sugars, adjuncts.
    #[serde(rename = "ferm")]
    Fermentable,
    /// Hops.
    Hop,
    /// Yeast strains.
    Yeast,
    /// Miscellaneous additions: spices, finings, water agents.
    Misc,
}

impl Category {
    /// All categories, in dataset column order.
    pub const ALL: [Category; 4] = [
        Category::Fermentable,
        Category::Hop,
        Category::Yeast,
        Category::Misc,
    ];

    /// Short name used in filenames and on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Category::Fermentable => "ferm",
            Category::Hop => "hop",
            Category::Yeast => "yeast",
            Category::Misc => "misc",
        }
    }

    /// Name of the raw-name column in the ingredients table.
    pub fn column_name(&self) -> String {
        format!("{}_name", self.short_name())
    }

    /// Filename of the persisted ingredient map for this category.
    pub fn map_file_name(&self) -> String {
        format!("{}map.json", self.short_name())
    }
}

impl std::str::FromStr for Category {
    type Err = MashtunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ferm" | "fermentable" => Ok(Category::Fermentable),
            "hop" | "hops" => Ok(Category::Hop),
            "yeast" => Ok(Category::Yeast),
            "misc" => Ok(Category::Misc),
            _ => Err(MashtunError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Fermentable.column_name(), "ferm_name");
        assert_eq!(Category::Hop.map_file_name(), "hopmap.json");
        assert_eq!(Category::Yeast.to_string(), "yeast");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("hop".parse::<Category>().unwrap(), Category::Hop);
        assert_eq!("FERM".parse::<Category>().unwrap(), Category::Fermentable);
        assert!("grain".parse::<Category>().is_err());
    }
}
