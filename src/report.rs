//! Human-readable progress, listings, and run tallies.
//!
//! Everything here goes to the writer handed to [`Reporter::new`] (stdout in
//! the binary). Diagnostics that are not part of the user-facing transcript
//! go through `tracing` instead.

use crate::catalog::{Catalog, CatalogEntry, Category};
use crate::selector::Selection;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 60;
const TITLE: &str = "qBittorrent Search Plugin Installer";
const RESTART_HINT: &str = "Next step: restart qBittorrent to load the new plugins.";

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub entry: CatalogEntry,
    pub success: bool,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn succeeded(entry: CatalogEntry) -> Self {
        Self {
            entry,
            success: true,
            error: None,
        }
    }

    pub fn failed(entry: CatalogEntry, error: impl Into<String>) -> Self {
        Self {
            entry,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Per-category success counts plus the total number of failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    succeeded: BTreeMap<Category, usize>,
    failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        if outcome.success {
            *self.succeeded.entry(outcome.entry.category).or_default() += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn succeeded(&self, category: Category) -> usize {
        self.succeeded.get(&category).copied().unwrap_or(0)
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Process exit status: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }
}

pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, dir: &Path) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "{TITLE}")?;
        self.rule()?;
        writeln!(self.out, "Target directory: {}", dir.display())
    }

    pub fn nothing_selected(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "\nNo categories selected: --private only applies together with --unofficial or --all."
        )
    }

    /// Discovery messages collected while resolving the catalog.
    pub fn notices(&mut self, catalog: &Catalog) -> io::Result<()> {
        if catalog.notices.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        for notice in &catalog.notices {
            writeln!(self.out, "{notice}")?;
        }
        Ok(())
    }

    /// List mode: one header per selected category, names sorted.
    pub fn listing(&mut self, catalog: &Catalog) -> io::Result<()> {
        for category in catalog.categories() {
            writeln!(self.out, "\n{}", list_header(category))?;
            let names = catalog.names(category);
            if names.is_empty() {
                writeln!(self.out, "  (none)")?;
            }
            for name in names {
                writeln!(self.out, "  - {name}")?;
            }
        }
        self.out.flush()
    }

    pub fn downloading(&mut self, category: Category) -> io::Result<()> {
        writeln!(self.out, "\nDownloading {category} plugins...")
    }

    /// Per-item status line, flushed so progress shows as it happens.
    pub fn outcome(&mut self, outcome: &FetchOutcome) -> io::Result<()> {
        match &outcome.error {
            // `FetchOutcome::failed` always records the error.
            Some(error) => writeln!(self.out, "  ✗ {} ({error})", outcome.entry.name)?,
            None => writeln!(self.out, "  ✓ {}", outcome.entry.name)?,
        }
        self.out.flush()
    }

    pub fn summary(&mut self, selection: &Selection, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        self.rule()?;
        writeln!(self.out, "Summary:")?;
        for category in selection.iter() {
            writeln!(
                self.out,
                "  ✓ {}: {}",
                summary_label(category),
                summary.succeeded(category)
            )?;
        }
        if summary.has_failures() {
            writeln!(self.out, "  ✗ Failed: {}", summary.failed())?;
        }
        self.rule()?;
        writeln!(self.out, "\n{RESTART_HINT}")?;
        self.out.flush()
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }
}

fn list_header(category: Category) -> &'static str {
    match category {
        Category::Official => "Official plugins:",
        Category::Unofficial => "Unofficial PUBLIC plugins:",
        Category::Private => "Unofficial PRIVATE plugins (require login):",
    }
}

fn summary_label(category: Category) -> &'static str {
    match category {
        Category::Official => "Official plugins",
        Category::Unofficial => "Unofficial plugins",
        Category::Private => "Private plugins",
    }
}
