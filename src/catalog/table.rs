//! Hand-maintained plugin table.
//!
//! The table maps category to plugin name to URL. It is loaded from JSON
//! (either the bundled `catalogs/plugins.json` or a caller-supplied file) and
//! validated up front so a typo in the table fails the run before any
//! download starts instead of surfacing as a confusing per-item failure.

use crate::catalog::{Catalog, CatalogEntry, CatalogSource, Category, PLUGIN_EXTENSION};
use crate::selector::Selection;
use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

const BUNDLED_TABLE: &str = include_str!("../../catalogs/plugins.json");

#[derive(Debug, Clone)]
pub struct StaticTable {
    by_category: BTreeMap<Category, BTreeMap<String, String>>,
}

impl StaticTable {
    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TABLE).context("parsing bundled plugin table")
    }

    /// Load and validate a table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: BTreeMap<Category, BTreeMap<String, String>> = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening plugin table {}", path.display()))?,
        )
        .with_context(|| format!("parsing plugin table {}", path.display()))?;
        Self::validated(raw).with_context(|| format!("validating {}", path.display()))
    }

    pub fn from_json(input: &str) -> Result<Self> {
        let raw: BTreeMap<Category, BTreeMap<String, String>> = serde_json::from_str(input)?;
        Self::validated(raw)
    }

    fn validated(by_category: BTreeMap<Category, BTreeMap<String, String>>) -> Result<Self> {
        for (category, plugins) in &by_category {
            for (name, url) in plugins {
                validate_name(*category, name)?;
                validate_url(*category, name, url)?;
            }
        }
        Ok(Self { by_category })
    }

    /// URL registered for a plugin name within a category.
    pub fn url(&self, category: Category, name: &str) -> Option<&str> {
        self.by_category
            .get(&category)
            .and_then(|plugins| plugins.get(name))
            .map(String::as_str)
    }

    pub fn names(&self, category: Category) -> impl Iterator<Item = &str> {
        self.by_category
            .get(&category)
            .into_iter()
            .flat_map(|plugins| plugins.keys().map(String::as_str))
    }
}

impl CatalogSource for StaticTable {
    fn resolve(&self, selection: &Selection) -> Catalog {
        let mut catalog = Catalog::default();
        for category in selection.iter() {
            catalog.touch(category);
            if let Some(plugins) = self.by_category.get(&category) {
                for (name, url) in plugins {
                    catalog.push(CatalogEntry::new(name.clone(), category, url.clone()));
                }
            }
        }
        catalog
    }
}

fn validate_name(category: Category, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("{category} table contains an empty plugin name");
    }
    if name.contains('/') || name.contains('\\') || name.starts_with('.') {
        bail!("{category} plugin name '{name}' must be a bare file name");
    }
    if !name.ends_with(PLUGIN_EXTENSION) {
        bail!("{category} plugin name '{name}' must end with {PLUGIN_EXTENSION}");
    }
    Ok(())
}

fn validate_url(category: Category, name: &str, url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .with_context(|| format!("{category} plugin '{name}' has an invalid url '{url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "{category} plugin '{name}' url must use http or https, got {}",
            parsed.scheme()
        );
    }
    Ok(())
}
