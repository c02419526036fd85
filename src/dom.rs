//! DOM Access Adapter
//!
//! Thin layer over `dom_query` giving the extractor what it needs: CSS
//! lookups that never panic, raw and rendered text, attributes, and the
//! [`PageContext`] every extraction runs against.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

use url::Url;

/// The document (or element) one extraction batch reads from.
///
/// Passed explicitly to every field lookup; two batches over different
/// documents never share one.
#[derive(Clone)]
pub struct PageContext<'a> {
    root: Selection<'a>,
    url: Option<Url>,
}

impl<'a> PageContext<'a> {
    /// Context over a whole document.
    #[must_use]
    pub fn new(doc: &'a Document) -> Self {
        Self {
            root: Selection::from(doc.root()),
            url: None,
        }
    }

    /// Context limited to one element and its descendants.
    #[must_use]
    pub fn from_selection(root: Selection<'a>) -> Self {
        Self { root, url: None }
    }

    /// Attach the page URL, used to resolve relative links.
    #[must_use]
    pub fn with_url(mut self, url: Option<Url>) -> Self {
        self.url = url;
        self
    }

    /// Root every lookup starts from.
    #[must_use]
    pub fn root(&self) -> &Selection<'a> {
        &self.root
    }

    /// Page URL, when known.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

// === Querying ===

/// First element under `root` matching a CSS selector.
///
/// Invalid selectors are treated as matching nothing.
#[must_use]
pub fn query_first<'a>(root: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    root.try_select(selector)
        .and_then(|sel| sel.nodes().first().map(|node| Selection::from(*node)))
}

/// All elements under `root` matching a CSS selector, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    root.try_select(selector)
        .map(|sel| sel.nodes().iter().map(|node| Selection::from(*node)).collect())
        .unwrap_or_default()
}

/// Next element sibling, skipping text nodes.
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

// === Attributes ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// All text of the node and its descendants, concatenated as is.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "thead", "tr", "ul",
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Text as a browser lays it out.
///
/// Whitespace runs collapse to one space, `<br>` and block boundaries become
/// line breaks, empty lines disappear and hidden elements contribute nothing.
#[must_use]
pub fn rendered_text(sel: &Selection) -> String {
    let mut buf = String::new();
    for node in sel.nodes() {
        push_rendered(node, &mut buf);
    }

    buf.lines()
        .map(|line| {
            line.split(|c: char| c.is_ascii_whitespace())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_rendered(node: &NodeRef, buf: &mut String) {
    if node.is_text() {
        buf.push_str(&node.text());
        return;
    }
    if !node.is_element() && node.first_child().is_none() {
        return;
    }

    let tag = node
        .node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default();
    if HIDDEN_TAGS.contains(&tag.as_str()) {
        return;
    }
    if tag == "br" {
        buf.push('\n');
        return;
    }

    let block = BLOCK_TAGS.contains(&tag.as_str());
    if block {
        buf.push('\n');
    }
    let mut child = node.first_child();
    while let Some(c) = child {
        push_rendered(&c, buf);
        child = c.next_sibling();
    }
    if block {
        buf.push('\n');
    }
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_first_returns_document_order() {
        let doc = parse(r#"<ul><li class="x">one</li><li class="x">two</li></ul>"#);
        let ctx = PageContext::new(&doc);
        let first = query_first(ctx.root(), "li.x").unwrap();
        assert_eq!(text_content(&first), "one".into());
        assert_eq!(query_all(ctx.root(), "li.x").len(), 2);
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = parse("<div>text</div>");
        let ctx = PageContext::new(&doc);
        assert!(query_first(ctx.root(), "div[[").is_none());
        assert!(query_all(ctx.root(), "::nope(").is_empty());
    }

    #[test]
    fn rendered_text_breaks_blocks_and_br() {
        let doc = parse("<div id=\"d\"><p>First   line</p><p>Second<br>Third</p><script>x()</script></div>");
        let ctx = PageContext::new(&doc);
        let div = query_first(ctx.root(), "#d").unwrap();
        assert_eq!(rendered_text(&div), "First line\nSecond\nThird");
        assert!(text_content(&div).to_string().starts_with("First   lineSecondThird"));
    }

    #[test]
    fn next_sibling_skips_text() {
        let doc = parse("<dl><dt>発売日</dt> <dd>2020/1/1</dd></dl>");
        let ctx = PageContext::new(&doc);
        let dt = query_first(ctx.root(), "dt").unwrap();
        let dd = next_element_sibling(&dt).unwrap();
        assert_eq!(tag_name(&dd).as_deref(), Some("dd"));
    }

    #[test]
    fn context_scoped_to_element() {
        let doc = parse(r#"<div id="a"><span>in</span></div><span>out</span>"#);
        let root = PageContext::new(&doc);
        let scoped = PageContext::from_selection(query_first(root.root(), "#a").unwrap());
        assert_eq!(query_all(scoped.root(), "span").len(), 1);
        assert_eq!(query_all(root.root(), "span").len(), 2);
    }
}
