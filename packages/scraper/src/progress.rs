//! Progress reporting for archive builds.
//!
//! The pipeline reports once when the index has been read, once per dono
//! page with what became of it, and once when the sections are merged.

use std::sync::Arc;

/// What happened to a single dono page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Its table made it into the archive.
    Added,
    /// The page answered 404.
    NotFound,
    /// The page had no table.
    NoTable,
    /// The fetch failed and the page was left out.
    Skipped,
}

impl PageOutcome {
    /// Whether the page contributed a section.
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Receives dono page progress. Shared across concurrent fetches.
pub trait ProgressCallback: Send + Sync {
    /// The index listed `total` dono pages.
    fn pages_found(&self, total: u64);

    /// `url` has been handled.
    fn page_done(&self, url: &str, outcome: PageOutcome);

    /// All pages are handled and `sections` of them are in the archive.
    fn finished(&self, sections: usize);
}

/// Discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn pages_found(&self, _total: u64) {}
    fn page_done(&self, _url: &str, _outcome: PageOutcome) {}
    fn finished(&self, _sections: usize) {}
}

#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
