#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scrape-and-merge pipeline for the donos archive.
//!
//! Reads the channel index, follows every session's `donos.html` link,
//! lifts the dono table out of each page and merges them into one static
//! HTML document, newest session first. The publishers (the on-demand
//! server and the static generator) only decide what to do with the
//! resulting string.

pub mod config;
pub mod pipeline;
pub mod render;

use donos_archive_scraper::ScrapeError;

pub use config::{ArchiveConfig, SubpagePolicy};
pub use pipeline::Archive;

/// Errors that abort an archive build.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The channel index could not be fetched; nothing can be built
    /// without it.
    #[error("Failed to fetch index page: {0}")]
    Index(#[source] ScrapeError),

    /// A dono page failed with something other than a 404 while
    /// [`SubpagePolicy::Abort`] was in effect.
    #[error("Failed to fetch dono page {url}: {source}")]
    Subpage {
        /// Resolved URL of the dono page.
        url: String,
        /// The fetch failure.
        #[source]
        source: ScrapeError,
    },

    /// The fetcher could not be set up.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}

impl ArchiveError {
    /// Returns `true` when the build failed because a page could not be
    /// fetched (error status or transport fault), as opposed to a 404 or a
    /// setup problem.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        match self {
            Self::Index(source) | Self::Subpage { source, .. } => source.is_fetch_error(),
            Self::Scrape(_) => false,
        }
    }
}

/// Builds the archive document with the given settings over HTTP.
///
/// # Errors
///
/// Returns [`ArchiveError`] if the fetcher cannot be set up, the index page
/// cannot be fetched, or a dono page fails under [`SubpagePolicy::Abort`].
pub async fn build_archive(config: ArchiveConfig) -> Result<String, ArchiveError> {
    Archive::new(config)?.build().await
}
