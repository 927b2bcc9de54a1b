//! The scrape-and-merge pipeline.
//!
//! 1. Fetch the channel index (fatal on failure)
//! 2. Copy its head styling and collect the dono page links
//! 3. Fetch every dono page once, skipping 404s
//! 4. Take the first table of each page, with clip links rewritten
//! 5. Sort newest first and render the document
//!
//! Parsed HTML is never held across an `.await`: each page is parsed,
//! reduced to owned data and dropped inside a synchronous helper.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use donos_archive_models::{DonoPageRef, Section, sort_newest_first};
use donos_archive_scraper::Fetch;
use donos_archive_scraper::dom::Document;
use donos_archive_scraper::fetch::HtmlFetcher;
use donos_archive_scraper::links::extract_dono_links;
use donos_archive_scraper::progress::{PageOutcome, ProgressCallback, null_progress};
use donos_archive_scraper::styles::extract_head_styles;
use donos_archive_scraper::table::select_table;
use futures::{StreamExt as _, TryStreamExt as _, stream};

use crate::ArchiveError;
use crate::config::{ArchiveConfig, SubpagePolicy};
use crate::render::render_document;

/// Builds the archive document from a configured site.
pub struct Archive<F = HtmlFetcher> {
    config: ArchiveConfig,
    fetcher: F,
    progress: Arc<dyn ProgressCallback>,
}

impl Archive<HtmlFetcher> {
    /// Creates a pipeline that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Scrape`] if the HTTP client cannot be built
    /// from the configured headers.
    pub fn new(config: ArchiveConfig) -> Result<Self, ArchiveError> {
        let fetcher = HtmlFetcher::new(&config.scrape)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetch> Archive<F> {
    /// Creates a pipeline on top of an arbitrary [`Fetch`] implementation.
    #[must_use]
    pub fn with_fetcher(config: ArchiveConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            progress: null_progress(),
        }
    }

    /// Reports dono page progress to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the full pipeline, stamping the document with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Index`] if the index page cannot be fetched,
    /// and [`ArchiveError::Subpage`] if a dono page fails with anything
    /// other than a 404 while [`SubpagePolicy::Abort`] is in effect.
    pub async fn build(&self) -> Result<String, ArchiveError> {
        self.build_at(Utc::now()).await
    }

    /// Like [`Self::build`], with an explicit generation timestamp.
    ///
    /// # Errors
    ///
    /// See [`Self::build`].
    pub async fn build_at(&self, generated_at: DateTime<Utc>) -> Result<String, ArchiveError> {
        let index_url = &self.config.index_url;
        log::info!("Fetching index {index_url}");
        let index_html = self
            .fetcher
            .fetch(index_url)
            .await
            .map_err(ArchiveError::Index)?;

        let (head_styles, pages) = read_index(&index_html);
        log::info!("Found {} dono pages", pages.len());

        let sections = self.collect_sections(pages).await?;
        log::info!("Rendering {} sections", sections.len());

        Ok(render_document(
            &self.config,
            &head_styles,
            &sections,
            generated_at,
        ))
    }

    /// Fetches every page and returns the sections that made it, newest
    /// first.
    async fn collect_sections(&self, pages: Vec<DonoPageRef>) -> Result<Vec<Section>, ArchiveError> {
        self.progress.pages_found(pages.len() as u64);

        let fetched: Vec<Option<Section>> = stream::iter(pages)
            .map(|page| self.fetch_section(page))
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        let mut sections: Vec<Section> = fetched.into_iter().flatten().collect();
        sort_newest_first(&mut sections);

        self.progress.finished(sections.len());
        Ok(sections)
    }

    /// Turns one page reference into a section. `Ok(None)` means the page
    /// was skipped.
    async fn fetch_section(&self, page: DonoPageRef) -> Result<Option<Section>, ArchiveError> {
        let url = self.config.resolve(&page.href);

        let (section, outcome) = match self.fetcher.fetch(&url).await {
            Ok(html) => match read_section(&html, page, &self.config.asset_base) {
                Some(section) => (Some(section), PageOutcome::Added),
                None => {
                    log::info!("Skipping {url}: no table");
                    (None, PageOutcome::NoTable)
                }
            },
            Err(e) if e.is_not_found() => {
                log::info!("Skipping {url}: not found");
                (None, PageOutcome::NotFound)
            }
            Err(e) => match self.config.subpage_policy {
                SubpagePolicy::Abort => return Err(ArchiveError::Subpage { url, source: e }),
                SubpagePolicy::Skip => {
                    log::warn!("Skipping {url}: {e}");
                    (None, PageOutcome::Skipped)
                }
            },
        };

        self.progress.page_done(&url, outcome);
        Ok(section)
    }
}

fn read_index(html: &str) -> (String, Vec<DonoPageRef>) {
    let index = Document::parse(html);
    (extract_head_styles(&index), extract_dono_links(&index))
}

fn read_section(html: &str, page: DonoPageRef, asset_base: &str) -> Option<Section> {
    let mut document = Document::parse(html);
    let table = select_table(&mut document, asset_base)?;
    Some(Section::from_page(page, table))
}
