//! Dono page discovery on the channel index page.
//!
//! Each session on the index is laid out as its own `<table>`: somewhere in
//! it there is a link to the session's `donos.html` page, and a `Date:` cell
//! whose neighbouring cell holds the session date.

use donos_archive_models::DonoPageRef;

use crate::date::parse_date_label;
use crate::dom::{Document, Element};

/// Suffix shared by every dono page link.
pub const DONO_PAGE_SUFFIX: &str = "donos.html";

/// Text marking the cell that precedes the date value.
const DATE_MARKER: &str = "Date:";

/// Collects one [`DonoPageRef`] per index table that has both a dono page
/// link and a date label, in document order.
///
/// Tables missing either one are skipped silently.
#[must_use]
pub fn extract_dono_links(index: &Document) -> Vec<DonoPageRef> {
    index
        .find_all(&["table"])
        .into_iter()
        .filter_map(|table| {
            let href = find_dono_href(table)?;
            let Some(date_label) = find_date_label(table) else {
                log::debug!("Skipping {href}: no date label in its table");
                return None;
            };
            let parsed_date = parse_date_label(&date_label);
            if parsed_date.is_none() {
                log::debug!("Unparsable date label {date_label:?} for {href}");
            }

            Some(DonoPageRef {
                href: href.to_owned(),
                date_label,
                parsed_date,
            })
        })
        .collect()
}

/// Picks the dono page link out of `table`.
///
/// Prefers an anchor whose visible text also ends with the suffix (the
/// index shows the file name as link text); otherwise takes the first
/// anchor whose target ends with it.
fn find_dono_href<'a>(table: Element<'a>) -> Option<&'a str> {
    let candidates: Vec<(Element<'a>, &'a str)> = table
        .find_all(&["a"])
        .into_iter()
        .filter_map(|a| {
            a.attribute("href")
                .filter(|href| href.ends_with(DONO_PAGE_SUFFIX))
                .map(|href| (a, href))
        })
        .collect();

    candidates
        .iter()
        .find(|(a, _)| a.text().ends_with(DONO_PAGE_SUFFIX))
        .or_else(|| candidates.first())
        .map(|(_, href)| *href)
}

/// Finds the first `Date:` cell in `table` and returns the stripped text
/// of the next cell. An empty value counts as missing.
fn find_date_label(table: Element<'_>) -> Option<String> {
    let marker = table
        .find_all(&["td"])
        .into_iter()
        .find(|td| td.text().contains(DATE_MARKER))?;

    let label = marker.next_sibling_of_same_kind()?.stripped_text();
    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_table(href: &str, link_text: &str, date: &str) -> String {
        format!(
            r#"<table>
                <tr><td>Stream</td><td><a href="{href}">{link_text}</a></td></tr>
                <tr><td><b>Date:</b></td><td>{date}</td></tr>
            </table>"#
        )
    }

    fn index(tables: &[String]) -> Document {
        Document::parse(&format!(
            "<html><head></head><body>{}</body></html>",
            tables.concat()
        ))
    }

    #[test]
    fn returns_nothing_without_tables() {
        let doc = Document::parse("<html><body><p>No sessions yet</p></body></html>");
        assert!(extract_dono_links(&doc).is_empty());
    }

    #[test]
    fn extracts_link_and_date() {
        let doc = index(&[session_table(
            "2024-01-01/donos.html",
            "donos.html",
            "Monday 01/01/2024 10:00:00",
        )]);

        let refs = extract_dono_links(&doc);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].href, "2024-01-01/donos.html");
        assert_eq!(refs[0].date_label, "Monday 01/01/2024 10:00:00");
        assert_eq!(
            refs[0].parsed_date.map(|d| d.to_string()).as_deref(),
            Some("2024-01-01 10:00:00")
        );
    }

    #[test]
    fn keeps_unparsable_dates() {
        let doc = index(&[session_table("x/donos.html", "donos.html", "sometime")]);

        let refs = extract_dono_links(&doc);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].date_label, "sometime");
        assert!(refs[0].parsed_date.is_none());
    }

    #[test]
    fn skips_table_without_dono_link() {
        let doc = index(&[
            session_table("x/chat.html", "chat.html", "Monday 01/01/2024 10:00:00"),
            session_table("y/donos.html", "donos.html", "Tuesday 02/01/2024 10:00:00"),
        ]);

        let refs = extract_dono_links(&doc);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].href, "y/donos.html");
    }

    #[test]
    fn skips_table_without_date_cell() {
        let doc = index(&[
            r#"<table><tr><td><a href="x/donos.html">donos.html</a></td></tr></table>"#
                .to_string(),
        ]);
        assert!(extract_dono_links(&doc).is_empty());
    }

    #[test]
    fn skips_date_cell_without_neighbour() {
        let doc = index(&[
            r#"<table><tr><td><a href="x/donos.html">donos.html</a></td></tr>
               <tr><td>Date:</td></tr></table>"#
                .to_string(),
        ]);
        assert!(extract_dono_links(&doc).is_empty());
    }

    #[test]
    fn skips_empty_date_value() {
        let doc = index(&[session_table("x/donos.html", "donos.html", "   ")]);
        assert!(extract_dono_links(&doc).is_empty());
    }

    #[test]
    fn prefers_anchor_whose_text_names_the_page() {
        let doc = index(&[r#"<table>
                <tr><td><a href="old/donos.html">previous</a></td></tr>
                <tr><td><a href="new/donos.html">new/donos.html</a></td></tr>
                <tr><td>Date:</td><td>Monday 01/01/2024 10:00:00</td></tr>
            </table>"#
            .to_string()]);

        let refs = extract_dono_links(&doc);

        assert_eq!(refs[0].href, "new/donos.html");
    }

    #[test]
    fn falls_back_to_first_matching_anchor() {
        let doc = index(&[r#"<table>
                <tr><td><a href="vod.html">vod</a></td></tr>
                <tr><td><a href="first/donos.html">donos</a></td></tr>
                <tr><td><a href="second/donos.html">more donos</a></td></tr>
                <tr><td>Date:</td><td>Monday 01/01/2024 10:00:00</td></tr>
            </table>"#
            .to_string()]);

        let refs = extract_dono_links(&doc);

        assert_eq!(refs[0].href, "first/donos.html");
    }

    #[test]
    fn follows_document_order() {
        let doc = index(&[
            session_table("a/donos.html", "donos.html", "Monday 01/01/2024 10:00:00"),
            session_table("b/donos.html", "donos.html", "Tuesday 02/01/2025 10:00:00"),
            session_table("c/donos.html", "donos.html", "bad date"),
        ]);

        let hrefs: Vec<String> = extract_dono_links(&doc)
            .into_iter()
            .map(|r| r.href)
            .collect();

        assert_eq!(hrefs, vec!["a/donos.html", "b/donos.html", "c/donos.html"]);
    }
}
