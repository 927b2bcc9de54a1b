#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal helpers for the donos archive binaries.
//!
//! [`init_logger`] installs `pretty_env_logger` behind
//! `indicatif-log-bridge`, and [`PagesBar`] shows dono page fetching on the
//! returned [`MultiProgress`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use donos_archive_scraper::progress::{PageOutcome, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

pub use indicatif::MultiProgress;

/// Dono page progress bar.
///
/// Spins while the index is read, then counts pages and keeps a tally of
/// the ones that were left out.
pub struct PagesBar {
    bar: ProgressBar,
    skipped: AtomicU64,
}

impl PagesBar {
    /// Adds the bar to `multi`.
    #[must_use]
    pub fn new(multi: &MultiProgress) -> Arc<Self> {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} Reading channel index")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        Arc::new(Self {
            bar,
            skipped: AtomicU64::new(0),
        })
    }

    fn skipped_message(&self) -> String {
        match self.skipped.load(Ordering::Relaxed) {
            0 => String::new(),
            n => format!("{n} skipped"),
        }
    }
}

impl ProgressCallback for PagesBar {
    fn pages_found(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
        self.bar.set_style(
            ProgressStyle::with_template(
                "  Dono pages {wide_bar:.cyan/dim} {pos}/{len} [{eta}] {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
        );
    }

    fn page_done(&self, url: &str, outcome: PageOutcome) {
        if !outcome.is_added() {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            log::debug!("{url}: {outcome:?}");
        }
        self.bar.set_message(self.skipped_message());
        self.bar.inc(1);
    }

    fn finished(&self, sections: usize) {
        let skipped = self.skipped.load(Ordering::Relaxed);
        self.bar.finish_with_message(format!(
            "merged {sections} sections, {skipped} pages skipped"
        ));
    }
}

/// Installs the global logger and returns the [`MultiProgress`] that
/// progress bars must be added to.
///
/// Defaults to `info` for the archive crates and `warn` for everything
/// else; `RUST_LOG` overrides both.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Warn)
        .filter_module("donos_archive", LevelFilter::Info)
        .filter_module("donos_archive_generate", LevelFilter::Info)
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    if indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .is_err()
    {
        log::debug!("Logger already installed");
    }

    log::set_max_level(level);

    multi
}
