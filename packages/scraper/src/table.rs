//! Dono table selection and asset link rewriting.
//!
//! Dono pages link their clips relative to wherever the page was hosted,
//! e.g. `../dono-vids/clip.mp4`. Once a table is lifted into the merged
//! archive those paths no longer resolve, so every such link is pointed at
//! the canonical asset location instead.

use crate::dom::Document;

/// Path segment that identifies a link to a dono clip.
pub const ASSET_SEGMENT: &str = "dono-vids/";

/// Returns the first `<table>` of a dono page with its asset links
/// rewritten against `asset_base`, or `None` if the page has no table.
///
/// Anchors are rewritten in `page` itself.
#[must_use]
pub fn select_table(page: &mut Document, asset_base: &str) -> Option<String> {
    let rewritten = rewrite_anchors(page, asset_base);
    log::debug!("Rewrote {rewritten} asset links");
    page.find_first("table").map(|table| table.outer_html())
}

/// Applies the same rewrite as [`select_table`] to already serialized
/// table markup.
///
/// As long as `asset_base` itself ends in [`ASSET_SEGMENT`], rewriting is
/// idempotent.
#[must_use]
pub fn rewrite_asset_links(table_markup: &str, asset_base: &str) -> String {
    let mut fragment = Document::parse_fragment(table_markup);
    rewrite_anchors(&mut fragment, asset_base);
    fragment.root().inner_html()
}

/// Points every anchor into [`ASSET_SEGMENT`] at `asset_base` followed by
/// the file name.
fn rewrite_anchors(document: &mut Document, asset_base: &str) -> usize {
    document.rewrite_attribute("a", "href", |href| {
        let (_, file_name) = href.rsplit_once(ASSET_SEGMENT)?;
        Some(format!("{asset_base}{file_name}"))
    })
}
