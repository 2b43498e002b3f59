//! Populate a qBittorrent `nova3/engines` directory with search plugins.
//!
//! The crate resolves a catalog of plugins (from a static table or by live
//! discovery), then either lists it or downloads each plugin in turn,
//! tolerating per-item failures. See [`install::run`] for the full pass.

pub mod catalog;
pub mod config;
pub mod fetch;
pub mod install;
pub mod report;
pub mod selector;

pub use catalog::{
    Catalog, CatalogEntry, CatalogSource, Category, Discovery, StaticTable, WikiPlugins,
    parse_listing, scrape_wiki,
};
pub use config::{DEFAULT_PLUGINS_DIR, DEFAULT_TIMEOUT, Endpoints};
pub use fetch::{FetchError, HttpClient};
pub use install::{CatalogSourceKind, InstallOptions, download_catalog, run};
pub use report::{FetchOutcome, Reporter, RunSummary};
pub use selector::{CategoryFlags, Selection};

/// Split a comma- or whitespace-separated list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
