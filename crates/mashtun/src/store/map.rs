//! The raw-name → canonical-name map for one ingredient category.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Raw → canonical name mapping, insertion-ordered.
///
/// Every key has been explicitly reviewed at some point, except the trivial
/// self-mapping inserted when a target is first selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientMap {
    entries: IndexMap<String, String>,
}

impl IngredientMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains_key(raw)
    }

    /// Map a raw name to a canonical name. Returns the previous canonical
    /// name if the key was already present.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Option<String> {
        self.entries.insert(raw.into(), canonical.into())
    }

    /// Remove a raw name from the map, preserving the order of the rest.
    pub fn remove(&mut self, raw: &str) -> Option<String> {
        self.entries.shift_remove(raw)
    }

    /// Look up the canonical name for a raw name. Absence means "not yet
    /// reconciled", not an error.
    pub fn apply(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(|s| s.as_str())
    }

    /// Follow the mapping until it reaches a fixed point.
    ///
    /// A well-formed map converges in one step (canonical names map to
    /// themselves or are absent); `resolve` also terminates on maps that
    /// contain chains or cycles, returning the last name reached before
    /// revisiting one.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        let mut seen: Vec<&str> = Vec::new();
        let mut current = raw;
        while let Some(next) = self.apply(current) {
            if next == current || seen.contains(&next) {
                return next;
            }
            seen.push(current);
            current = next;
        }
        current
    }

    /// Re-point every entry whose canonical name is `old` to `new`.
    /// Returns how many entries changed.
    pub fn rename(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for value in self.entries.values_mut() {
            if value == old {
                *value = new.to_string();
                changed += 1;
            }
        }
        changed
    }

    /// Re-point a single raw name to a new canonical name. Returns the old
    /// canonical name, or `None` if the raw name is not in the map.
    pub fn remap(&mut self, raw: &str, canonical: &str) -> Option<String> {
        let old = self.entries.get(raw).cloned()?;
        self.entries.insert(raw.to_string(), canonical.to_string());
        Some(old)
    }

    /// Sorted unique canonical names.
    pub fn targets(&self) -> BTreeSet<&str> {
        self.entries.values().map(|s| s.as_str()).collect()
    }

    /// Raw names mapped to a given canonical name, in insertion order.
    pub fn keys_for(&self, canonical: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.as_str() == canonical)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Iterate over (raw, canonical) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
