//! Amazon Japan book pages.

use dom_query::Selection;
use log::debug;

use crate::category::Category;
use crate::dom::{self, PageContext};
use crate::extractor::handlers;
use crate::patterns::TRAILING_PARENTHESIS;
use crate::selector::Selector;
use crate::site::{FieldConfig, Site, SiteConfig, SiteHooks};
use crate::text_pipe::Pipe;
use crate::url_utils;

/// Registry key.
pub const KEY: &str = "amazon_jp_book";

const DETAIL_BULLETS: &str = "#detailBullets_feature_div .detail-bullet-list";

fn detail(keywords: &[&str]) -> Vec<Selector> {
    vec![
        Selector::new(DETAIL_BULLETS).sub("li").key_word(keywords.iter().copied()),
        Selector::new("#detail_bullets_id .content").sub("li").key_word(keywords.iter().copied()),
    ]
}

/// Site model for Amazon Japan books.
#[must_use]
pub fn book_model() -> Site {
    let config = SiteConfig {
        key: KEY.to_string(),
        description: "Amazon Japan books".to_string(),
        hosts: vec!["amazon.co.jp".to_string()],
        url_rules: Vec::new(),
        kind: 1,
        subtype: 0,
        page_selectors: vec![
            Selector::new("#nav-subnav .nav-a-content").key_word(["本"]),
            Selector::new("#dp.book_mobile, #dp.book"),
        ],
        control_selector: vec![Selector::new("#title")],
        item_list: vec![
            FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("#productTitle")]),
            FieldConfig::new(
                "cover",
                Category::Cover,
                vec![
                    Selector::new("#imgBlkFront"),
                    Selector::new("#ebooksImgBlkFront"),
                    Selector::new("#landingImage"),
                ],
            ),
            FieldConfig::new("ASIN", Category::Asin, detail(&["ASIN"])),
            FieldConfig::new("ISBN", Category::Isbn, detail(&["ISBN-13"])).pipes([Pipe::Keywords, Pipe::TrimAll]),
            FieldConfig::new("发售日", Category::Date, detail(&["発売日", "出版日"])),
            FieldConfig::new("出版社", Category::Default, detail(&["出版社"])),
            FieldConfig::new("页数", Category::Default, detail(&["ページ", "単行本", "コミック"]))
                .pipes([Pipe::Keywords, Pipe::Number]),
            FieldConfig::new(
                "作者",
                Category::Creator,
                vec![Selector::new("#bylineInfo .author a"), Selector::new("#bylineInfo .author")],
            ),
            FieldConfig::new(
                "价格",
                Category::Default,
                vec![
                    Selector::new("#tmmSwatches .selected .a-color-price"),
                    Selector::new("#price"),
                ],
            ),
            FieldConfig::new(
                "内容简介",
                Category::SubjectSummary,
                vec![
                    Selector::new("#bookDescription_feature_div .a-expander-content"),
                    Selector::new("#productDescription"),
                ],
            ),
        ],
        default_infos: Vec::new(),
    };
    Site::with_hooks(config, AmazonHooks)
}

/// Amazon specific text and cover handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmazonHooks;

impl SiteHooks for AmazonHooks {
    fn deal_text(&self, category: &Category, text: &str) -> String {
        match category {
            Category::SubjectTitle => deal_title(text),
            _ => handlers::default_deal_text(category, text),
        }
    }

    fn resolve_cover(&self, el: &Selection, ctx: &PageContext) -> Option<String> {
        let img = if dom::tag_name(el).as_deref() == Some("img") {
            Some(el.clone())
        } else {
            dom::query_first(el, "img")
        };
        img.as_ref()
            .and_then(largest_dynamic_image)
            .and_then(|src| url_utils::resolve_href(&src, ctx.url()))
            .or_else(|| handlers::default_cover(el, ctx))
    }
}

/// Drop the trailing label group of a product title.
///
/// Amazon appends the imprint or series label in ASCII parentheses; a
/// trailing volume number such as `(1)` is kept.
#[must_use]
pub fn deal_title(text: &str) -> String {
    let text = text.trim();
    if let Some(caps) = TRAILING_PARENTHESIS.captures(text) {
        let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
        let numeric = !inner.is_empty() && inner.chars().all(is_digit);
        if !numeric {
            if let Some(whole) = caps.get(0) {
                return text[..whole.start()].trim().to_string();
            }
        }
    }
    text.to_string()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

/// Full-size image of an Amazon `<img>`.
///
/// `data-old-hires` when present, else the widest entry of
/// `data-a-dynamic-image` (`{"url": [width, height]}`).
fn largest_dynamic_image(img: &Selection) -> Option<String> {
    if let Some(hires) = dom::get_attribute(img, "data-old-hires").filter(|v| !v.trim().is_empty()) {
        return Some(hires);
    }

    let json = dom::get_attribute(img, "data-a-dynamic-image")?;
    let images: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&json) {
        Ok(images) => images,
        Err(err) => {
            debug!("unreadable data-a-dynamic-image: {err}");
            return None;
        }
    };
    images
        .into_iter()
        .max_by_key(|(_, size)| size.get(0).and_then(serde_json::Value::as_u64).unwrap_or(0))
        .map(|(url, _)| url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_drops_label_keeps_volume() {
        assert_eq!(deal_title("BADON (1) (ビッグガンガンコミックス)"), "BADON (1)");
        assert_eq!(deal_title("幾日 (WANIMAGAZINE COMICS SPECIAL)"), "幾日");
        assert_eq!(
            deal_title("幾日 (WANIMAGAZINE COMICS SPECIAL) (1)"),
            "幾日 (WANIMAGAZINE COMICS SPECIAL) (1)"
        );
    }

    #[test]
    fn title_is_trimmed_first() {
        assert_eq!(
            deal_title("\n                大蜘蛛ちゃんフラッシュ・バック(2) (アフタヌーンKC)\n            "),
            "大蜘蛛ちゃんフラッシュ・バック(2)"
        );
    }

    #[test]
    fn full_width_volume_survives() {
        assert_eq!(
            deal_title("動物のおしゃべり　（１） (バンブーコミックス 4コマセレクション)"),
            "動物のおしゃべり　（１）"
        );
    }

    #[test]
    fn cover_prefers_largest_dynamic_image() {
        let doc = dom::parse(
            r#"<div id="imgBlkFront"><img src="s.jpg" data-a-dynamic-image='{"https://m.media-amazon.com/a.jpg":[200,300],"https://m.media-amazon.com/b.jpg":[500,750]}'></div>"#,
        );
        let ctx = PageContext::new(&doc);
        let el = dom::query_first(ctx.root(), "#imgBlkFront").unwrap();
        assert_eq!(
            AmazonHooks.resolve_cover(&el, &ctx).as_deref(),
            Some("https://m.media-amazon.com/b.jpg")
        );
    }

    #[test]
    fn book_landmark_needs_book_nav_label() {
        use crate::wiki_data::is_subject_page;

        let site = book_model();
        let game = dom::parse(
            r#"<div id="nav-subnav"><a class="nav-a-content">ゲーム</a></div><div id="title">BADON</div>"#,
        );
        assert!(!is_subject_page(&site, &PageContext::new(&game)));

        let book = dom::parse(
            r#"<div id="nav-subnav"><a class="nav-a-content">ゲーム</a><a class="nav-a-content">本</a></div><div id="title">BADON</div>"#,
        );
        assert!(is_subject_page(&site, &PageContext::new(&book)));
    }
}
