//! Blocking HTTP fetcher.
//!
//! One request is in flight at a time and every request is bounded by the
//! client timeout. Network and status failures come back as non-fatal
//! [`FetchError`]s so callers can record them and move on; only a failed
//! write to the destination is fatal.

use anyhow::Context;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::error::Error as StdError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("nova-fetch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", describe_transport(.0))]
    Transport(reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: StatusCode },
    #[error("no source URLs to try")]
    NoSources,
    #[error("not found ({attempts} sources tried, last: {last})")]
    Exhausted { attempts: usize, last: Box<FetchError> },
    #[error("writing {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl FetchError {
    /// Whether the run can continue past this error.
    pub fn is_fatal(&self) -> bool {
        match self {
            FetchError::Write { .. } => true,
            FetchError::Exhausted { last, .. } => last.is_fatal(),
            FetchError::Transport(_) | FetchError::Status { .. } | FetchError::NoSources => false,
        }
    }
}

/// reqwest's own message stops at "error sending request"; the cause that
/// matters (timeout, refused connection, DNS) sits further down the chain.
fn describe_transport(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("timed out: {err}")
    } else {
        err.to_string()
    };
    let mut cause = StdError::source(err);
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }

    /// GET a URL and return the full body. Non-2xx statuses are errors.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    /// GET a URL as text, replacing invalid UTF-8.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.get_bytes(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Download `url` into `dest`, overwriting whatever is there.
    ///
    /// The body is received in full before the file is touched, so a failed
    /// request leaves an existing file intact.
    pub fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let body = self.get_bytes(url)?;
        fs::write(dest, &body).map_err(|source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(body.len() as u64)
    }

    /// Try each candidate in order and stop at the first that succeeds.
    ///
    /// Returns the URL that served the file. Fatal errors stop the trial
    /// immediately; otherwise the last failure is reported once every
    /// candidate has been tried.
    pub fn fetch_first(&self, candidates: &[String], dest: &Path) -> Result<String, FetchError> {
        let mut last = None;
        for url in candidates {
            match self.fetch(url, dest) {
                Ok(_) => return Ok(url.clone()),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    debug!(url = url.as_str(), error = %err, "candidate failed");
                    last = Some(err);
                }
            }
        }
        match last {
            None => Err(FetchError::NoSources),
            Some(err) if candidates.len() == 1 => Err(err),
            Some(err) => Err(FetchError::Exhausted {
                attempts: candidates.len(),
                last: Box::new(err),
            }),
        }
    }
}
