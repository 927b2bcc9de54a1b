//! Typed view over a parsed HTML document.
//!
//! Wraps [`scraper::Html`] so that every structural assumption the
//! extractors make (which tags to look for, which attribute to read, how
//! text is gathered) goes through a handful of methods.

use scraper::{ElementRef, Html, Node, StrTendril};

/// A parsed HTML document or fragment.
pub struct Document {
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl Document {
    /// Parses a complete HTML document. Parsing never fails; malformed
    /// markup is recovered the way a browser would.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Parses an HTML fragment such as a standalone `<table>`.
    #[must_use]
    pub fn parse_fragment(html: &str) -> Self {
        Self {
            html: Html::parse_fragment(html),
        }
    }

    /// The outermost element (`<html>`, also for fragments).
    #[must_use]
    pub fn root(&self) -> Element<'_> {
        Element::from(self.html.root_element())
    }

    /// Every element whose tag name is in `tag_names`, in document order.
    #[must_use]
    pub fn find_all(&self, tag_names: &[&str]) -> Vec<Element<'_>> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| tag_names.contains(&el.value().name()))
            .map(Element::from)
            .collect()
    }

    /// The first element named `tag_name`, in document order.
    #[must_use]
    pub fn find_first(&self, tag_name: &str) -> Option<Element<'_>> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == tag_name)
            .map(Element::from)
    }

    /// Rewrites the un-prefixed attribute `attr_name` on every `tag_name`
    /// element in place. `rewrite` gets the current value and returns
    /// `Some(new_value)` to replace it.
    ///
    /// Returns the number of attributes changed. `id` and `class` must not
    /// be rewritten this way, since elements cache them.
    pub fn rewrite_attribute<F>(&mut self, tag_name: &str, attr_name: &str, mut rewrite: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let ids: Vec<_> = self
            .html
            .tree
            .root()
            .descendants()
            .filter(|node| matches!(node.value(), Node::Element(el) if el.name() == tag_name))
            .map(|node| node.id())
            .collect();

        let mut changed = 0;
        for id in ids {
            let Some(mut node) = self.html.tree.get_mut(id) else {
                continue;
            };
            let Node::Element(element) = node.value() else {
                continue;
            };
            for (name, value) in &mut element.attrs {
                if name.prefix.is_some() || &*name.local != attr_name {
                    continue;
                }
                if let Some(rewritten) = rewrite(&**value) {
                    *value = StrTendril::from(rewritten);
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// A single element inside a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }
}

impl<'a> Element<'a> {
    /// Lower-case local tag name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// All descendant text, concatenated verbatim.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// Descendant text with every fragment trimmed and empty fragments
    /// dropped, joined without a separator.
    #[must_use]
    pub fn stripped_text(&self) -> String {
        self.inner
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Descendants (not including `self`) whose tag name is in
    /// `tag_names`, in document order.
    #[must_use]
    pub fn find_all(&self, tag_names: &[&str]) -> Vec<Self> {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| tag_names.contains(&el.value().name()))
            .map(Self::from)
            .collect()
    }

    /// The next following sibling element with the same tag name.
    #[must_use]
    pub fn next_sibling_of_same_kind(&self) -> Option<Self> {
        let name = self.name();
        self.inner
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == name)
            .map(Self::from)
    }

    /// Serializes the element and its subtree.
    #[must_use]
    pub fn outer_html(&self) -> String {
        self.inner.html()
    }

    /// Serializes the children of the element.
    #[must_use]
    pub fn inner_html(&self) -> String {
        self.inner.inner_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>t</title><style>td > a { color: red; }</style></head>
<body>
<table id="one"><tr><td>Date:</td><td> Monday <b>01/01/2024</b> </td><th>x</th><td>after</td></tr></table>
<table id="two"><tr><td><a href="a.html">A &amp; B</a></td></tr></table>
</body>
</html>"#;

    #[test]
    fn finds_elements_in_document_order() {
        let doc = Document::parse(PAGE);
        let ids: Vec<&str> = doc
            .find_all(&["table"])
            .iter()
            .filter_map(|t| t.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["one", "two"]);
    }

    #[test]
    fn finds_several_tag_names_at_once() {
        let doc = Document::parse(PAGE);
        let names: Vec<&str> = doc
            .find_all(&["title", "style"])
            .iter()
            .map(Element::name)
            .collect();
        assert_eq!(names, vec!["title", "style"]);
    }

    #[test]
    fn element_find_all_excludes_self() {
        let doc = Document::parse(PAGE);
        let table = doc.find_first("table").unwrap();
        assert!(table.find_all(&["table"]).is_empty());
        assert_eq!(table.find_all(&["td"]).len(), 3);
    }

    #[test]
    fn stripped_text_trims_each_fragment() {
        let doc = Document::parse(PAGE);
        let cells = doc.find_first("table").unwrap().find_all(&["td"]);
        assert_eq!(cells[1].text(), " Monday 01/01/2024 ");
        assert_eq!(cells[1].stripped_text(), "Monday01/01/2024");
    }

    #[test]
    fn next_sibling_skips_other_tags() {
        let doc = Document::parse(PAGE);
        let cells = doc.find_first("table").unwrap().find_all(&["td"]);

        let next = cells[0].next_sibling_of_same_kind().unwrap();
        assert_eq!(next.stripped_text(), "Monday01/01/2024");

        let after = next.next_sibling_of_same_kind().unwrap();
        assert_eq!(after.text(), "after");
        assert!(after.next_sibling_of_same_kind().is_none());
    }

    #[test]
    fn serializes_with_escaping() {
        let doc = Document::parse(PAGE);
        let anchor = doc.find_first("a").unwrap();
        assert_eq!(anchor.outer_html(), r#"<a href="a.html">A &amp; B</a>"#);
    }

    #[test]
    fn keeps_style_text_unescaped() {
        let doc = Document::parse(PAGE);
        let style = doc.find_first("style").unwrap();
        assert_eq!(
            style.outer_html(),
            "<style>td > a { color: red; }</style>"
        );
    }

    #[test]
    fn rewrites_matching_attributes_in_place() {
        let mut doc = Document::parse(PAGE);

        let changed = doc.rewrite_attribute("a", "href", |value| Some(format!("/{value}\"q")));

        assert_eq!(changed, 1);
        let anchor = doc.find_first("a").unwrap();
        assert_eq!(anchor.attribute("href"), Some("/a.html\"q"));
        assert_eq!(
            anchor.outer_html(),
            r#"<a href="/a.html&quot;q">A &amp; B</a>"#
        );
    }

    #[test]
    fn rewrite_leaves_declined_and_other_attributes_alone() {
        let mut doc = Document::parse_fragment(
            r#"<a href="keep.html" title="x">k</a><a href="swap.html">s</a><link href="swap.html">"#,
        );

        let changed = doc.rewrite_attribute("a", "href", |value| {
            (value == "swap.html").then(|| "swapped.html".to_owned())
        });

        assert_eq!(changed, 1);
        assert_eq!(
            doc.root().inner_html(),
            r#"<a href="keep.html" title="x">k</a><a href="swapped.html">s</a><link href="swap.html">"#
        );
    }

    #[test]
    fn keeps_namespaced_attributes_intact() {
        let mut doc = Document::parse_fragment(
            r##"<table><tbody><tr><td><svg><use xlink:href="../dono-vids/a.svg#i"></use></svg></td></tr></tbody></table>"##,
        );

        let changed = doc.rewrite_attribute("use", "href", |_| Some("nope".to_owned()));

        assert_eq!(changed, 0);
        assert!(
            doc.root()
                .inner_html()
                .contains(r##"<use xlink:href="../dono-vids/a.svg#i"></use>"##)
        );
    }

    #[test]
    fn serializes_fragment_children() {
        let doc = Document::parse_fragment("<!-- c --><span>hi</span>");
        assert_eq!(doc.root().inner_html(), "<!-- c --><span>hi</span>");
    }
}
