//! Catalog discovery from the live repository and wiki.
//!
//! Official plugins come from the repository contents API; community plugins
//! come from scraping the wiki. Either path falls back to a small hardcoded
//! list when its remote is unreachable or unparseable, so resolving always
//! yields a catalog. The failure is reported as a notice, never as an error.

use crate::catalog::{
    Catalog, CatalogEntry, CatalogSource, Category, OFFICIAL_FALLBACK, UNOFFICIAL_FALLBACK,
    WikiPlugins, join_url, parse_listing, scrape_wiki,
};
use crate::config::Endpoints;
use crate::fetch::HttpClient;
use crate::selector::Selection;
use anyhow::{Result, bail};
use tracing::info;

const FALLBACK_NOTICE: &str = "Falling back to minimal list...";

pub struct Discovery<'a> {
    client: &'a HttpClient,
    endpoints: &'a Endpoints,
}

impl<'a> Discovery<'a> {
    pub fn new(client: &'a HttpClient, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Official plugin names from the listing API.
    pub fn official_names(&self) -> Result<Vec<String>> {
        let body = self.client.get_text(&self.endpoints.listing_url)?;
        parse_listing(&body)
    }

    /// Community plugin names from the wiki. Finding none is an error.
    pub fn wiki_plugins(&self) -> Result<WikiPlugins> {
        let html = self.client.get_text(&self.endpoints.wiki_url)?;
        let found = scrape_wiki(&html)?;
        if found.is_empty() {
            bail!("no plugins found in wiki");
        }
        Ok(found)
    }

    fn discover_official(&self, catalog: &mut Catalog) {
        let names = match self.official_names() {
            Ok(names) => {
                info!(count = names.len(), "official listing resolved");
                catalog.notice(format!("Found {} official plugins", names.len()));
                names
            }
            Err(err) => {
                let reason = format!("{err:#}");
                info!(error = %reason, "official listing unavailable");
                catalog.notice(format!("Error fetching official plugins: {reason}"));
                catalog.notice(FALLBACK_NOTICE);
                OFFICIAL_FALLBACK.iter().map(|name| name.to_string()).collect()
            }
        };
        for name in names {
            let url = join_url(&self.endpoints.raw_base, &name);
            catalog.push(CatalogEntry::new(name, Category::Official, url));
        }
    }

    fn discover_unofficial(&self, catalog: &mut Catalog, include_private: bool) {
        let found = match self.wiki_plugins() {
            Ok(found) => found,
            Err(err) => {
                let reason = format!("{err:#}");
                info!(error = %reason, "wiki scrape unavailable");
                catalog.notice(format!("Error fetching unofficial plugins: {reason}"));
                catalog.notice(FALLBACK_NOTICE);
                for name in UNOFFICIAL_FALLBACK {
                    let url = join_url(&self.endpoints.raw_base, name);
                    catalog.push(CatalogEntry::new(*name, Category::Unofficial, url));
                }
                return;
            }
        };

        info!(
            public = found.public.len(),
            private = found.private.len(),
            "wiki scrape resolved"
        );
        if include_private {
            catalog.notice(format!(
                "Found {} public + {} private plugins",
                found.public.len(),
                found.private.len()
            ));
        } else {
            catalog.notice(format!(
                "Found {} public plugins (use --private to include private trackers)",
                found.public.len()
            ));
        }

        for name in found.public {
            catalog.push(self.mirrored(name, Category::Unofficial));
        }
        if include_private {
            for name in found.private {
                catalog.push(self.mirrored(name, Category::Private));
            }
        }
    }

    /// Entry whose sources are every mirror in order.
    fn mirrored(&self, name: String, category: Category) -> CatalogEntry {
        let sources = self
            .endpoints
            .mirrors
            .iter()
            .map(|base| join_url(base, &name))
            .collect();
        CatalogEntry::with_sources(name, category, sources)
    }
}

impl CatalogSource for Discovery<'_> {
    fn resolve(&self, selection: &Selection) -> Catalog {
        let mut catalog = Catalog::default();
        for category in selection.iter() {
            catalog.touch(category);
        }
        if selection.contains(Category::Official) {
            self.discover_official(&mut catalog);
        }
        if selection.contains(Category::Unofficial) {
            self.discover_unofficial(&mut catalog, selection.contains(Category::Private));
        }
        catalog
    }
}
