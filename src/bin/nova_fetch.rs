//! Download qBittorrent search plugins from official and community sources.
//!
//! Usage:
//!   nova-fetch                          # official + unofficial public plugins
//!   nova-fetch --unofficial --private   # community plugins incl. private trackers
//!   nova-fetch --list --all             # print the catalog, download nothing
//!   nova-fetch --source static          # use the bundled table instead of discovery
//!
//! Exit status is 0 when every download succeeded and 1 otherwise.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use nova_fetch::{
    CatalogSourceKind, CategoryFlags, DEFAULT_PLUGINS_DIR, DEFAULT_TIMEOUT, Endpoints,
    InstallOptions, Selection,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOVA_FETCH_LOG";

#[derive(Parser, Debug)]
#[command(name = "nova-fetch", version)]
#[command(about = "Download qBittorrent search plugins")]
struct Cli {
    /// Act on official plugins.
    #[arg(long)]
    official: bool,
    /// Act on unofficial (community) plugins.
    #[arg(long)]
    unofficial: bool,
    /// Include private trackers (require login); needs --unofficial or --all.
    #[arg(long)]
    private: bool,
    /// Act on official and unofficial plugins.
    #[arg(long)]
    all: bool,
    /// List available plugins without downloading.
    #[arg(long)]
    list: bool,
    /// Plugin directory to write into.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PLUGINS_DIR)]
    dir: PathBuf,
    /// Where the plugin catalog comes from.
    #[arg(long, value_enum, default_value_t = SourceArg::Discover)]
    source: SourceArg,
    /// Static plugin table (JSON); implies --source static.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Discover,
    Static,
}

impl Cli {
    fn into_options(self) -> InstallOptions {
        let source = match (self.catalog, self.source) {
            (Some(path), _) => CatalogSourceKind::Static(Some(path)),
            (None, SourceArg::Static) => CatalogSourceKind::Static(None),
            (None, SourceArg::Discover) => CatalogSourceKind::Discover,
        };
        InstallOptions {
            selection: Selection::from_flags(CategoryFlags {
                official: self.official,
                unofficial: self.unofficial,
                private: self.private,
                all: self.all,
            }),
            list_only: self.list,
            dest_dir: self.dir,
            source,
            endpoints: Endpoints::from_env(),
            timeout: Duration::from_secs(self.timeout.max(1)),
        }
    }
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let options = Cli::parse().into_options();
    let summary = nova_fetch::run(&options, io::stdout().lock())?;
    Ok(summary.exit_code())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
