//! Remote endpoints and run defaults.
//!
//! Every URL the tool talks to has a compiled-in default pointing at the
//! qBittorrent search-plugins repository. Each can be overridden through the
//! environment so mirrors (or test fixtures) can stand in for GitHub.

use crate::split_list;
use std::env;
use std::time::Duration;

pub const DEFAULT_PLUGINS_DIR: &str = "./config/qbittorrent/qBittorrent/nova3/engines";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const OFFICIAL_LISTING_URL: &str =
    "https://api.github.com/repos/qbittorrent/search-plugins/contents/nova3/engines";
pub const OFFICIAL_RAW_BASE: &str =
    "https://raw.githubusercontent.com/qbittorrent/search-plugins/master/nova3/engines";
pub const UNOFFICIAL_WIKI_URL: &str =
    "https://github.com/qbittorrent/search-plugins/wiki/Unofficial-search-plugins";
pub const COMMUNITY_MIRROR: &str =
    "https://raw.githubusercontent.com/MadeOfMagicAndWires/qBit-plugins/master";

const ENV_LISTING_URL: &str = "NOVA_FETCH_LISTING_URL";
const ENV_RAW_BASE: &str = "NOVA_FETCH_RAW_BASE";
const ENV_WIKI_URL: &str = "NOVA_FETCH_WIKI_URL";
const ENV_MIRRORS: &str = "NOVA_FETCH_MIRRORS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Repository contents API returning a JSON array of `{name}` objects.
    pub listing_url: String,
    /// Base URL official plugin files are served under.
    pub raw_base: String,
    /// Rendered HTML wiki page listing community plugins.
    pub wiki_url: String,
    /// Base URLs tried in order for community plugins.
    pub mirrors: Vec<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            listing_url: OFFICIAL_LISTING_URL.to_string(),
            raw_base: OFFICIAL_RAW_BASE.to_string(),
            wiki_url: UNOFFICIAL_WIKI_URL.to_string(),
            mirrors: vec![OFFICIAL_RAW_BASE.to_string(), COMMUNITY_MIRROR.to_string()],
        }
    }
}

impl Endpoints {
    /// Defaults with any `NOVA_FETCH_*` overrides applied.
    ///
    /// When only the raw base is overridden the mirror list follows it, so a
    /// single variable is enough to redirect every download.
    pub fn from_env() -> Self {
        let mut endpoints = Self::default();
        if let Some(url) = env_non_empty(ENV_LISTING_URL) {
            endpoints.listing_url = url;
        }
        if let Some(url) = env_non_empty(ENV_RAW_BASE) {
            endpoints.mirrors[0] = url.clone();
            endpoints.raw_base = url;
        }
        if let Some(url) = env_non_empty(ENV_WIKI_URL) {
            endpoints.wiki_url = url;
        }
        if let Some(raw) = env_non_empty(ENV_MIRRORS) {
            let mirrors = split_list(&raw);
            if !mirrors.is_empty() {
                endpoints.mirrors = mirrors;
            }
        }
        endpoints
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
