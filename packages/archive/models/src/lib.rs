#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data types shared between the scraping layer and the archive pipeline.
//!
//! A [`DonoPageRef`] is discovered on the channel index page and points at a
//! single session's dono page. Once that page has been fetched and its table
//! extracted, it becomes a [`Section`] of the merged archive document.

use chrono::NaiveDateTime;

/// A link to a per-session dono page, as found on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonoPageRef {
    /// Link target exactly as written in the index (relative or absolute).
    pub href: String,
    /// Raw text of the date cell next to the `Date:` label.
    pub date_label: String,
    /// `date_label` parsed into a timestamp, or `None` if it did not match
    /// the expected format.
    pub parsed_date: Option<NaiveDateTime>,
}

/// One rendered unit of the archive: a date heading plus its dono table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text, copied from [`DonoPageRef::date_label`].
    pub date_label: String,
    /// Sort key, copied from [`DonoPageRef::parsed_date`].
    pub parsed_date: Option<NaiveDateTime>,
    /// Serialized `<table>` markup with asset links already rewritten.
    pub table_html: String,
}

impl Section {
    /// Creates the section for `page` from its extracted table markup.
    #[must_use]
    pub fn from_page(page: DonoPageRef, table_html: String) -> Self {
        Self {
            date_label: page.date_label,
            parsed_date: page.parsed_date,
            table_html,
        }
    }
}

/// Sorts sections newest first.
///
/// Sections without a parsed date are treated as the oldest possible
/// timestamp and end up last. The sort is stable, so sections with equal
/// keys keep their discovery order.
pub fn sort_newest_first(sections: &mut [Section]) {
    // `None < Some(_)`, so comparing in reverse puts unparsable dates last.
    sections.sort_by(|a, b| b.parsed_date.cmp(&a.parsed_date));
}
