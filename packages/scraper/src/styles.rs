//! Head-level styling carried over from the index page.

use crate::dom::Document;

/// Serializes every `<style>` and `<link>` element in the document head,
/// in document order, one per line.
///
/// Returns an empty string when the head has none.
#[must_use]
pub fn extract_head_styles(page: &Document) -> String {
    page.find_first("head")
        .map(|head| {
            head.find_all(&["style", "link"])
                .iter()
                .map(|el| el.outer_html())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
