#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fetching and extraction layer for the donos archive.
//!
//! Provides the [`Fetch`] trait with its `reqwest`-backed implementation
//! ([`fetch::HtmlFetcher`]), a small typed view over parsed HTML
//! ([`dom`]), and the extraction steps that turn fetched pages into archive
//! input: dono link discovery ([`links`]), date label parsing ([`date`]),
//! table selection with asset link rewriting ([`table`]) and head style
//! extraction ([`styles`]).
//!
//! Nothing here knows about the final document layout; that lives in the
//! `donos_archive` crate.

pub mod date;
pub mod dom;
pub mod fetch;
pub mod links;
pub mod progress;
pub mod styles;
pub mod table;

use std::collections::BTreeMap;
use std::time::Duration;

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The server answered `404 Not Found`.
    #[error("404 Not Found: {url}")]
    NotFound {
        /// The URL that was requested.
        url: String,
    },

    /// The server answered with a non-success status other than 404.
    #[error("HTTP {status} for {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The request failed in transport (timeout, DNS, connection reset) or
    /// the body could not be read.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// The underlying `reqwest` error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// A configured request header is not a valid HTTP header.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ScrapeError {
    /// Returns `true` for [`ScrapeError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for a failed fetch that is not a 404: an error status
    /// or a transport fault.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Fetch { .. })
    }
}

/// HTTP settings shared by every request a fetcher makes.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Upper bound for a single request, connect through body.
    pub timeout: Duration,
    /// Additional HTTP headers to include in requests.
    pub headers: BTreeMap<String, String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            headers: BTreeMap::new(),
        }
    }
}

impl ScrapeConfig {
    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds an HTTP header to include in requests.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }
}

/// Retrieves the HTML body behind a URL.
///
/// Implementations issue exactly one request per call: no retries and no
/// caching. A 404 must surface as [`ScrapeError::NotFound`] so callers can
/// tell a missing page apart from a broken one.
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::NotFound`] on a 404, [`ScrapeError::Status`]
    /// for any other non-success status and [`ScrapeError::Fetch`] for
    /// transport failures.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;
}
