//! Plugin catalog wiring.
//!
//! A catalog is the set of (name, URL, category) entries a run acts on. It is
//! built either from the hand-maintained [`StaticTable`] or by [`Discovery`],
//! which queries the official repository listing and scrapes the community
//! wiki. Exactly one source is active per run; both implement
//! [`CatalogSource`].

pub mod discovery;
pub mod listing;
pub mod model;
pub mod table;
pub mod wiki;

pub use discovery::Discovery;
pub use listing::parse_listing;
pub use model::{Catalog, CatalogEntry, Category};
pub use table::StaticTable;
pub use wiki::{WikiPlugins, scrape_wiki};

use crate::selector::Selection;

/// File extension every plugin carries.
pub const PLUGIN_EXTENSION: &str = ".py";

/// Helper modules that live next to the plugins but are not plugins.
pub const SKIP_FILES: &[&str] = &["__init__.py", "example.py"];

/// Official plugins assumed present when the listing API is unusable.
pub const OFFICIAL_FALLBACK: &[&str] = &[
    "eztv.py",
    "jackett.py",
    "limetorrents.py",
    "piratebay.py",
    "solidtorrents.py",
    "torlock.py",
    "torrentproject.py",
    "torrentscsv.py",
];

/// Community plugins assumed present when the wiki yields nothing.
pub const UNOFFICIAL_FALLBACK: &[&str] =
    &["torrentgalaxy.py", "btdig.py", "magnetdl.py", "bitsearch.py"];

/// Resolves the entries for the selected categories.
///
/// Implementations absorb their own acquisition failures (falling back where
/// they can) and report them through [`Catalog::notices`]; resolving never
/// aborts a run.
pub trait CatalogSource {
    fn resolve(&self, selection: &Selection) -> Catalog;
}

/// True for names that carry the plugin extension and are not helper files.
pub fn is_plugin_file(name: &str) -> bool {
    name.ends_with(PLUGIN_EXTENSION) && !SKIP_FILES.contains(&name)
}

/// Join a base URL and a plugin file name.
pub fn join_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
