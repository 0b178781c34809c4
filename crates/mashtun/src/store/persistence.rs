//! Save/load ingredient maps as JSON with rotating backups.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::map::IngredientMap;
use crate::category::Category;
use crate::error::{MashtunError, Result};

/// Current version of the persisted map format.
pub const MAP_FORMAT_VERSION: &str = "1.0.0";

/// How many numbered backups to keep by default.
pub const DEFAULT_RETENTION: usize = 3;

/// The on-disk document wrapping a map.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDocument {
    version: String,
    category: Category,
    updated_at: DateTime<Utc>,
    entries: IngredientMap,
}

/// Loads and saves per-category ingredient maps in a directory.
///
/// Each save rotates the previous file to a numbered backup
/// (`hopmap.json.1`, `hopmap.json.2`, ...) and drops backups beyond the
/// retention count, oldest first.
#[derive(Debug, Clone)]
pub struct MapStore {
    dir: PathBuf,
    retention: usize,
}

impl MapStore {
    /// Create a store rooted at `dir` with the default retention count.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            retention: DEFAULT_RETENTION,
        }
    }

    /// Override how many numbered backups are kept.
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    /// Path of the current map file for a category.
    pub fn map_path(&self, category: Category) -> PathBuf {
        self.dir.join(category.map_file_name())
    }

    /// Path of the nth backup (1 = most recent).
    fn backup_path(&self, category: Category, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", category.map_file_name(), n))
    }

    /// Load the persisted map for a category.
    ///
    /// A missing file is a normal first run and yields an empty map.
    pub fn load(&self, category: Category) -> Result<IngredientMap> {
        let path = self.map_path(category);

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IngredientMap::new());
            }
            Err(e) => {
                return Err(MashtunError::Persistence(format!(
                    "Failed to open '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let reader = BufReader::new(file);
        let document: MapDocument = serde_json::from_reader(reader).map_err(|e| {
            MashtunError::Persistence(format!("Failed to parse '{}': {}", path.display(), e))
        })?;

        Ok(document.entries)
    }

    /// Persist the map for a category, rotating any previous version to a
    /// numbered backup first.
    ///
    /// Write failures are surfaced; losing accumulated mapping decisions is
    /// the main risk this store exists to avoid.
    pub fn save(&self, category: Category, map: &IngredientMap) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                MashtunError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }

        let path = self.map_path(category);
        if path.exists() {
            self.rotate_backups(category)?;
        }

        let document = MapDocument {
            version: MAP_FORMAT_VERSION.to_string(),
            category,
            updated_at: Utc::now(),
            entries: map.clone(),
        };

        let file = File::create(&path).map_err(|e| {
            MashtunError::Persistence(format!("Failed to create '{}': {}", path.display(), e))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &document).map_err(|e| {
            MashtunError::Persistence(format!("Failed to write '{}': {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Shift existing backups up by one and move the current file to `.1`.
    /// The backup beyond the retention count is dropped.
    fn rotate_backups(&self, category: Category) -> Result<()> {
        if self.retention == 0 {
            return Ok(());
        }

        let oldest = self.backup_path(category, self.retention);
        if oldest.exists() {
            fs::remove_file(&oldest).map_err(|e| rotate_error(&oldest, e))?;
        }

        for n in (1..self.retention).rev() {
            let from = self.backup_path(category, n);
            if from.exists() {
                let to = self.backup_path(category, n + 1);
                fs::rename(&from, &to).map_err(|e| rotate_error(&from, e))?;
            }
        }

        let current = self.map_path(category);
        let first = self.backup_path(category, 1);
        fs::rename(&current, &first).map_err(|e| rotate_error(&current, e))?;

        Ok(())
    }

    /// Paths of the existing numbered backups, most recent first.
    pub fn backups(&self, category: Category) -> Vec<PathBuf> {
        (1..=self.retention)
            .map(|n| self.backup_path(category, n))
            .filter(|p| p.exists())
            .collect()
    }
}

fn rotate_error(path: &Path, e: std::io::Error) -> MashtunError {
    MashtunError::Persistence(format!("Failed to rotate '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn one_entry_map(raw: &str) -> IngredientMap {
        let mut map = IngredientMap::new();
        map.insert(raw, "cascade");
        map
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = MapStore::new(dir.path());
        let map = store.load(Category::Hop).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = MapStore::new(dir.path());

        let map = one_entry_map("casscade");
        store.save(Category::Hop, &map).unwrap();

        let loaded = store.load(Category::Hop).unwrap();
        assert_eq!(loaded, map);
    }

    #[test]
    fn test_backup_rotation_respects_retention() {
        let dir = TempDir::new().unwrap();
        let store = MapStore::new(dir.path()).with_retention(3);

        // Save 5 times; each save past the first rotates a backup
        for i in 0..5 {
            store
                .save(Category::Hop, &one_entry_map(&format!("raw{i}")))
                .unwrap();
        }

        let backups = store.backups(Category::Hop);
        assert_eq!(backups.len(), 3);
        assert!(store.map_path(Category::Hop).exists());
        assert!(!dir.path().join("hopmap.json.4").exists());
    }

    #[test]
    fn test_most_recent_backup_is_previous_save() {
        let dir = TempDir::new().unwrap();
        let store = MapStore::new(dir.path());

        store.save(Category::Hop, &one_entry_map("first")).unwrap();
        store.save(Category::Hop, &one_entry_map("second")).unwrap();

        let backup = fs::read_to_string(dir.path().join("hopmap.json.1")).unwrap();
        assert!(backup.contains("first"));

        let current = store.load(Category::Hop).unwrap();
        assert!(current.contains("second"));
    }

    #[test]
    fn test_categories_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let store = MapStore::new(dir.path());

        store.save(Category::Hop, &one_entry_map("cascade")).unwrap();
        let yeast = store.load(Category::Yeast).unwrap();
        assert!(yeast.is_empty());
    }
}
