//! Catalog data types shared by the static table and discovery.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Provenance grouping for a plugin.
///
/// Ordering follows the order categories are reported and fetched in, so a
/// `BTreeMap<Category, _>` iterates official, unofficial, private.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Official,
    Unofficial,
    Private,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Official, Category::Unofficial, Category::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Official => "official",
            Category::Unofficial => "unofficial",
            Category::Private => "private",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable plugin file.
///
/// `sources` is the ordered list of URLs to try; official and table entries
/// carry exactly one, discovered community plugins carry one per mirror.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub category: Category,
    pub sources: Vec<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: Category, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            sources: vec![url.into()],
        }
    }

    pub fn with_sources(name: impl Into<String>, category: Category, sources: Vec<String>) -> Self {
        Self {
            name: name.into(),
            category,
            sources,
        }
    }

    /// Primary source URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }
}

/// Resolved set of entries for one run, grouped by category.
///
/// Categories that were selected but resolved to nothing are still present
/// with an empty list so list mode can print an explicit "none" marker.
/// `notices` carries human-readable discovery messages (counts, fallbacks)
/// for the reporter.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<Category, Vec<CatalogEntry>>,
    pub notices: Vec<String>,
}

impl Catalog {
    /// Register a category even if nothing lands in it.
    pub fn touch(&mut self, category: Category) {
        self.entries.entry(category).or_default();
    }

    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.entry(entry.category).or_default().push(entry);
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Plugin names of one category, sorted.
    pub fn names(&self, category: Category) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries(category)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// All entries in category order, preserving insertion order within a
    /// category.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
