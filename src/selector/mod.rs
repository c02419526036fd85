//! Selector Infrastructure
//!
//! Declarative element lookup for field configurations. A [`Selector`] is a
//! CSS query plus optional refinements (keyword row matching, sibling hop,
//! nested follow-up lookup). Lists of selectors are ordered fallbacks: the
//! first one that finds an element wins.

use dom_query::Selection;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dom;

/// One element lookup.
///
/// # Example
///
/// ```rust
/// use wiki_info::dom::{self, PageContext};
/// use wiki_info::selector::{find_element, Selector};
///
/// let doc = dom::parse(r#"<ul id="details"><li>出版社: 講談社</li><li>発売日: 2020/1/1</li></ul>"#);
/// let ctx = PageContext::new(&doc);
/// let selectors = [Selector::new("#missing"), Selector::new("#details").sub("li").key_word(["発売日"])];
///
/// let (el, used) = find_element(&selectors, ctx.root()).unwrap();
/// assert_eq!(dom::text_content(&el).to_string(), "発売日: 2020/1/1");
/// assert_eq!(used.key_words(), ["発売日"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    /// CSS query for the element (or for the container when `sub_selector` is set).
    #[serde(rename = "selector")]
    pub query: String,

    /// CSS query for candidate rows inside the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_selector: Option<String>,

    /// Keywords identifying the row; also stripped from the extracted text.
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub key_word: Vec<String>,

    /// Take the matched row's next element sibling instead of the row.
    #[serde(default)]
    pub sibling: bool,

    /// Follow-up lookup run inside the element found so far.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_selector: Vec<Selector>,
}

impl Selector {
    /// Selector for a plain CSS query.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Look for rows matching `sub_selector` inside the container.
    #[must_use]
    pub fn sub(mut self, sub_selector: impl Into<String>) -> Self {
        self.sub_selector = Some(sub_selector.into());
        self
    }

    /// Set the row keywords.
    #[must_use]
    pub fn key_word<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_word = words.into_iter().map(Into::into).collect();
        self
    }

    /// Hop to the row's next element sibling.
    #[must_use]
    pub fn sibling(mut self) -> Self {
        self.sibling = true;
        self
    }

    /// Continue the lookup inside the element found.
    #[must_use]
    pub fn then(mut self, next: Vec<Selector>) -> Self {
        self.next_selector = next;
        self
    }

    /// Keywords to strip from the element text.
    #[must_use]
    pub fn key_words(&self) -> &[String] {
        &self.key_word
    }

    /// Run this single lookup under `root`.
    #[must_use]
    pub fn find<'a>(&self, root: &Selection<'a>) -> Option<Selection<'a>> {
        let found = match &self.sub_selector {
            None if self.key_word.is_empty() => dom::query_first(root, &self.query)?,
            None => dom::query_all(root, &self.query)
                .into_iter()
                .find(|el| self.row_matches(el))?,
            Some(sub) => {
                let container = dom::query_first(root, &self.query)?;
                let row = dom::query_all(&container, sub)
                    .into_iter()
                    .find(|row| self.row_matches(row))?;
                if self.sibling {
                    dom::next_element_sibling(&row)?
                } else {
                    row
                }
            }
        };

        if self.next_selector.is_empty() {
            Some(found)
        } else {
            find_element(&self.next_selector, &found).map(|(el, _)| el)
        }
    }

    fn row_matches(&self, row: &Selection) -> bool {
        if self.key_word.is_empty() {
            return true;
        }
        let html = row.inner_html();
        self.key_word.iter().any(|k| !k.is_empty() && html.contains(k.as_str()))
    }
}

/// Run an ordered list of selectors; first match wins.
///
/// Returns the element together with the selector that found it, so callers
/// can use that selector's keywords.
#[must_use]
pub fn find_element<'a, 's>(
    selectors: &'s [Selector],
    root: &Selection<'a>,
) -> Option<(Selection<'a>, &'s Selector)> {
    selectors
        .iter()
        .find_map(|selector| selector.find(root).map(|el| (el, selector)))
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(word)) => vec![word],
        Some(OneOrMany::Many(words)) => words,
        None => Vec::new(),
    })
}
