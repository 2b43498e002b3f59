//! Community plugin wiki scraper.
//!
//! The wiki has no structured index, so plugins are categorized by where
//! their links sit: a heading mentioning "public" and "site" opens the public
//! section, one mentioning "private" and "site" opens the private section,
//! and every plugin link inside a table row belongs to whichever section is
//! open. Headings matching neither leave the section unchanged. Rows seen
//! before any section heading are ignored.

use crate::catalog::{PLUGIN_EXTENSION, is_plugin_file};
use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;

const SCAN_SELECTOR: &str = "h1, h2, h3, tr";
const LINK_SELECTOR: &str = "a[href]";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    None,
    Public,
    Private,
}

impl Section {
    fn after_heading(self, heading: &str) -> Self {
        let text = heading.trim().to_lowercase();
        if !text.contains("site") {
            return self;
        }
        if text.contains("public") {
            Section::Public
        } else if text.contains("private") {
            Section::Private
        } else {
            self
        }
    }
}

/// Plugin file names found on the wiki, deduplicated and sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WikiPlugins {
    pub public: Vec<String>,
    pub private: Vec<String>,
}

impl WikiPlugins {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.private.is_empty()
    }
}

/// Walk headings and table rows in document order collecting plugin links.
pub fn scrape_wiki(html: &str) -> Result<WikiPlugins> {
    let scan = selector(SCAN_SELECTOR)?;
    let links = selector(LINK_SELECTOR)?;
    let document = Html::parse_document(html);

    let mut public = BTreeSet::new();
    let mut private = BTreeSet::new();
    let mut section = Section::None;

    for element in document.select(&scan) {
        if element.value().name() != "tr" {
            section = section.after_heading(&text_of(element));
            continue;
        }
        let bucket = match section {
            Section::None => continue,
            Section::Public => &mut public,
            Section::Private => &mut private,
        };
        for link in element.select(&links) {
            if let Some(name) = link.value().attr("href").and_then(plugin_file_name) {
                bucket.insert(name.to_string());
            }
        }
    }

    Ok(WikiPlugins {
        public: public.into_iter().collect(),
        private: private.into_iter().collect(),
    })
}

/// Final path segment of a plugin link, if it names a plugin file.
fn plugin_file_name(href: &str) -> Option<&str> {
    if !href.ends_with(PLUGIN_EXTENSION) {
        return None;
    }
    let name = href.rsplit('/').next()?;
    is_plugin_file(name).then_some(name)
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector '{css}': {err:?}"))
}
