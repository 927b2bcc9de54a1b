//! Archive build settings.
//!
//! [`ArchiveConfig::default`] describes the production site. Tests and
//! alternative deployments point the same pipeline somewhere else with the
//! builder methods or [`ArchiveConfig::for_site`].

use std::time::Duration;

use chrono_tz::Tz;
use donos_archive_scraper::ScrapeConfig;
use donos_archive_scraper::table::ASSET_SEGMENT;

/// Channel directory that hosts the index, the dono pages and the clips.
pub const SITE_ROOT: &str = "https://ayup.cc/chans/callumfromthecorner/";

/// File name of the channel index page inside [`SITE_ROOT`].
pub const INDEX_PAGE: &str = "chan.html";

/// Browser-like user agent; the host serves bare clients inconsistently.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; Nightly-Static-Bot/1.0; +https://vercel.com/)";

/// `Accept` header sent with every request.
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Page title and top-level heading.
pub const TITLE: &str = "Ayup.cc Donos Archive";

/// Attribution line under the heading.
pub const CREDIT: &str = "Created by Ja77_Man on twitch";

/// What to do when a dono page fails with anything other than a 404.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubpagePolicy {
    /// Fail the whole build.
    #[default]
    Abort,
    /// Log the failure and leave the page out, as with a 404.
    Skip,
}

/// Settings for one archive build.
///
/// The index URL, page base and clip base all come from one site root (see
/// [`Self::for_site`]); the clip base always ends in [`ASSET_SEGMENT`], which
/// keeps clip link rewriting idempotent.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// URL of the channel index page.
    pub index_url: String,
    /// Base that relative dono page links are resolved against.
    pub base_url: String,
    /// Canonical location of dono clips; rewritten links are this plus the
    /// clip file name.
    pub(crate) asset_base: String,
    /// Document title and heading.
    pub title: String,
    /// Optional attribution line.
    pub credit: Option<String>,
    /// Timezone of the "last update" timestamp.
    pub timezone: Tz,
    /// Handling of non-404 dono page failures.
    pub subpage_policy: SubpagePolicy,
    /// Number of dono pages fetched at once.
    pub concurrency: usize,
    /// HTTP settings (timeout, headers).
    pub scrape: ScrapeConfig,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::for_site(SITE_ROOT)
    }
}

impl ArchiveConfig {
    /// Production settings, but with the index, page base and clip base all
    /// derived from `root` (which should end with `/`).
    #[must_use]
    pub fn for_site(root: &str) -> Self {
        Self {
            index_url: format!("{root}{INDEX_PAGE}"),
            base_url: root.to_owned(),
            asset_base: format!("{root}{ASSET_SEGMENT}"),
            title: TITLE.to_owned(),
            credit: Some(CREDIT.to_owned()),
            timezone: chrono_tz::Europe::Malta,
            subpage_policy: SubpagePolicy::default(),
            concurrency: 1,
            scrape: ScrapeConfig::default()
                .with_header("User-Agent", USER_AGENT)
                .with_header("Accept", ACCEPT),
        }
    }

    /// Sets the index page URL.
    #[must_use]
    pub fn with_index_url(mut self, url: &str) -> Self {
        url.clone_into(&mut self.index_url);
        self
    }

    /// Sets or clears the attribution line.
    #[must_use]
    pub fn with_credit(mut self, credit: Option<&str>) -> Self {
        self.credit = credit.map(str::to_owned);
        self
    }

    /// Sets the timezone of the "last update" timestamp.
    #[must_use]
    pub const fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the handling of non-404 dono page failures.
    #[must_use]
    pub const fn with_subpage_policy(mut self, policy: SubpagePolicy) -> Self {
        self.subpage_policy = policy;
        self
    }

    /// Sets how many dono pages are fetched at once. Zero is treated as one.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.scrape = self.scrape.with_timeout(timeout);
        self
    }

    /// Adds or replaces an HTTP request header.
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.scrape = self.scrape.with_header(key, value);
        self
    }

    /// Resolves a dono page link from the index: absolute links are kept,
    /// anything else is appended to [`Self::base_url`] without its leading
    /// slashes.
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_owned()
        } else {
            format!("{}{}", self.base_url, href.trim_start_matches('/'))
        }
    }
}
