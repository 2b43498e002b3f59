//! One linear pass: select, resolve, then list or download.

use crate::catalog::{Catalog, CatalogSource, Discovery, StaticTable};
use crate::config::Endpoints;
use crate::fetch::HttpClient;
use crate::report::{FetchOutcome, Reporter, RunSummary};
use crate::selector::Selection;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Where the catalog comes from for this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSourceKind {
    /// Query the listing API and scrape the wiki.
    Discover,
    /// Use a static table; `None` means the bundled one.
    Static(Option<PathBuf>),
}

#[derive(Clone, Debug)]
pub struct InstallOptions {
    pub selection: Selection,
    pub list_only: bool,
    pub dest_dir: PathBuf,
    pub source: CatalogSourceKind,
    pub endpoints: Endpoints,
    pub timeout: Duration,
}

/// Run the installer, writing the transcript to `out`.
///
/// Per-item fetch failures are tallied in the returned summary. Errors are
/// returned only when nothing sensible can continue: an unreadable static
/// table, an uncreatable destination directory, or a failed file write.
pub fn run<W: Write>(options: &InstallOptions, out: W) -> Result<RunSummary> {
    let mut reporter = Reporter::new(out);
    reporter.banner(&options.dest_dir)?;

    if options.selection.is_empty() {
        reporter.nothing_selected()?;
        return Ok(RunSummary::default());
    }

    let client = HttpClient::new(options.timeout)?;
    let catalog = resolve_catalog(options, &client)?;
    reporter.notices(&catalog)?;

    if options.list_only {
        reporter.listing(&catalog)?;
        return Ok(RunSummary::default());
    }

    fs::create_dir_all(&options.dest_dir).with_context(|| {
        format!(
            "creating plugin directory {}",
            options.dest_dir.display()
        )
    })?;

    let summary = download_catalog(&client, &catalog, &options.dest_dir, &mut reporter)?;
    reporter.summary(&options.selection, &summary)?;
    Ok(summary)
}

fn resolve_catalog(options: &InstallOptions, client: &HttpClient) -> Result<Catalog> {
    let catalog = match &options.source {
        CatalogSourceKind::Discover => {
            Discovery::new(client, &options.endpoints).resolve(&options.selection)
        }
        CatalogSourceKind::Static(None) => StaticTable::bundled()?.resolve(&options.selection),
        CatalogSourceKind::Static(Some(path)) => {
            StaticTable::load(path)?.resolve(&options.selection)
        }
    };
    Ok(catalog)
}

/// Fetch every entry in catalog order into `dest_dir`.
///
/// Entries sharing a name overwrite each other, so the one processed last
/// wins.
pub fn download_catalog<W: Write>(
    client: &HttpClient,
    catalog: &Catalog,
    dest_dir: &Path,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for category in catalog.categories() {
        reporter.downloading(category)?;
        for entry in catalog.entries(category) {
            let dest = dest_dir.join(&entry.name);
            let outcome = match client.fetch_first(&entry.sources, &dest) {
                Ok(url) => {
                    debug!(name = entry.name.as_str(), url = url.as_str(), "fetched");
                    FetchOutcome::succeeded(entry.clone())
                }
                Err(err) if err.is_fatal() => {
                    return Err(err).with_context(|| format!("installing {}", entry.name));
                }
                Err(err) => {
                    info!(name = entry.name.as_str(), error = %err, "fetch failed");
                    FetchOutcome::failed(entry.clone(), err.to_string())
                }
            };
            reporter.outcome(&outcome)?;
            summary.record(&outcome);
        }
    }
    Ok(summary)
}
