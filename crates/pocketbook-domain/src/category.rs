//! Domain types representing the static category catalog.

use std::{collections::HashSet, fmt};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Key a form holds before the user picks a category. Never valid on a stored record.
pub const UNSET_CATEGORY_KEY: &str = "category";

static STANDARD_CATALOG: Lazy<CategoryCatalog> = Lazy::new(|| CategoryCatalog {
    entries: vec![
        CategoryCatalogEntry::new("purchases", "Purchases", "#5636D3"),
        CategoryCatalogEntry::new("food", "Food", "#FF872C"),
        CategoryCatalogEntry::new("transport", "Transport", "#E83F5B"),
        CategoryCatalogEntry::new("salary", "Salary", "#12A454"),
        CategoryCatalogEntry::new("car", "Car", "#4D8AF0"),
        CategoryCatalogEntry::new("leisure", "Leisure", "#26195C"),
        CategoryCatalogEntry::new("studies", "Studies", "#9C001A"),
    ],
});

/// Display metadata for one category key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalogEntry {
    pub key: String,
    pub name: String,
    pub color: String,
}

impl CategoryCatalogEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Parses a `#RRGGBB` color token into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl Displayable for CategoryCatalogEntry {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.key)
    }
}

impl fmt::Display for CategoryCatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How aggregation treats an in-scope record whose category is missing from the catalog.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Fail the aggregation with an unknown-category error.
    #[default]
    Strict,
    /// Drop the record from every total.
    Skip,
}

impl fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnknownCategoryPolicy::Strict => "strict",
            UnknownCategoryPolicy::Skip => "skip",
        };
        f.write_str(label)
    }
}

/// Ordered, read-only lookup of category display metadata.
///
/// Iteration order is the order summaries are emitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<CategoryCatalogEntry>,
}

impl CategoryCatalog {
    /// Builds a catalog, rejecting empty, duplicated, or reserved keys.
    /// Keys are stored trimmed, matching how drafts are trimmed before lookup.
    pub fn new(mut entries: Vec<CategoryCatalogEntry>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for entry in &mut entries {
            let key = entry.key.trim().to_string();
            if key.is_empty() {
                return Err(ValidationError::EmptyCategoryKey);
            }
            if key == UNSET_CATEGORY_KEY {
                return Err(ValidationError::ReservedCategoryKey(key));
            }
            if !seen.insert(key.clone()) {
                return Err(ValidationError::DuplicateCategoryKey(key));
            }
            entry.key = key;
        }
        Ok(Self { entries })
    }

    /// The built-in catalog shipped with the application.
    pub fn standard() -> &'static CategoryCatalog {
        &STANDARD_CATALOG
    }

    pub fn get(&self, key: &str) -> Option<&CategoryCatalogEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryCatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl<'a> IntoIterator for &'a CategoryCatalog {
    type Item = &'a CategoryCatalogEntry;
    type IntoIter = std::slice::Iter<'a, CategoryCatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
