//! Default category handlers.
//!
//! Used by [`SiteHooks`](crate::site::SiteHooks) when a site does not
//! override them: text cleanup per category when a field has no pipeline,
//! and cover image resolution.

use dom_query::Selection;

use crate::category::{Category, Extraction};
use crate::date;
use crate::dom::{self, PageContext};
use crate::url_utils;

/// Image attributes checked for a cover URL, most specific first.
const IMAGE_ATTRS: &[&str] = &["data-old-hires", "data-original", "data-src", "data-lazy-src", "src"];

/// Default text handler for a category.
#[must_use]
pub fn default_deal_text(category: &Category, text: &str) -> String {
    match category.extraction() {
        Extraction::Date => date::deal_date(text),
        Extraction::Website => url_utils::clean_website(text),
        Extraction::Summary => dom_summary(text),
        Extraction::Cover | Extraction::Title | Extraction::Plain => text.trim().to_string(),
    }
}

/// Summaries keep their line structure; each line is trimmed.
fn dom_summary(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default cover resolution.
///
/// Reads the image URL from the element itself when it is an `<img>`, from
/// its first `<img>` descendant otherwise, and finally from an `href` (links
/// to the full-size image). Relative URLs resolve against the page URL.
#[must_use]
pub fn default_cover(el: &Selection, ctx: &PageContext) -> Option<String> {
    let img = if dom::tag_name(el).as_deref() == Some("img") {
        Some(el.clone())
    } else {
        dom::query_first(el, "img")
    };

    let raw = img
        .as_ref()
        .and_then(image_source)
        .or_else(|| dom::get_attribute(el, "href"))?;
    url_utils::resolve_href(&raw, ctx.url())
}

fn image_source(img: &Selection) -> Option<String> {
    IMAGE_ATTRS
        .iter()
        .filter_map(|attr| dom::get_attribute(img, attr))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use url::Url;

    #[test]
    fn date_handler_normalizes() {
        assert_eq!(default_deal_text(&Category::Date, "2020/1/1"), "2020-01-01");
    }

    #[test]
    fn summary_handler_keeps_lines() {
        assert_eq!(
            default_deal_text(&Category::SubjectSummary, "  first \n\n   second  "),
            "first\nsecond"
        );
    }

    #[test]
    fn plain_handler_trims() {
        assert_eq!(default_deal_text(&Category::Creator, "  someone "), "someone");
    }

    #[test]
    fn cover_prefers_hi_res_attribute() {
        let doc = parse(r#"<div id="c"><img src="/s.jpg" data-old-hires="/l.jpg"></div>"#);
        let ctx = PageContext::new(&doc).with_url(Url::parse("https://shop.example.jp/item/1").ok());
        let el = dom::query_first(ctx.root(), "#c").unwrap();
        assert_eq!(default_cover(&el, &ctx).as_deref(), Some("https://shop.example.jp/l.jpg"));
    }

    #[test]
    fn cover_falls_back_to_link() {
        let doc = parse(r#"<a id="c" href="https://img.example.jp/full.png">view</a>"#);
        let ctx = PageContext::new(&doc);
        let el = dom::query_first(ctx.root(), "#c").unwrap();
        assert_eq!(default_cover(&el, &ctx).as_deref(), Some("https://img.example.jp/full.png"));
    }
}
