//! Wiki data assembly: one info list per scraped page.

use log::{debug, info};

use crate::dom::{self, PageContext};
use crate::extractor::get_wiki_item;
use crate::selector::find_element;
use crate::site::Site;
use crate::subject::SingleInfo;
use crate::url_utils;

/// Extract every configured field of `site` from the page.
///
/// Output follows the order of the site's item list; missing fields are
/// skipped. The site's `after_get_wiki_data` hook may replace the list, and
/// the site's default infos are appended last.
#[must_use]
pub fn get_wiki_data(site: &Site, ctx: &PageContext) -> Vec<SingleInfo> {
    let extracted = extract_items(site, ctx);
    let mut infos = match site.hooks.after_get_wiki_data(&extracted, &site.config) {
        Some(replaced) if !replaced.is_empty() => replaced,
        _ => extracted,
    };
    infos.extend(site.config.default_infos.iter().cloned());
    infos
}

/// Character-page variant of [`get_wiki_data`].
///
/// `ctx` is usually scoped to the character's block on a page listing
/// several characters.
#[must_use]
pub fn get_chara_data(model: &Site, ctx: &PageContext) -> Vec<SingleInfo> {
    let extracted = extract_items(model, ctx);
    let mut infos = match model.hooks.after_get_chara_data(&extracted, &model.config, ctx) {
        Some(replaced) if !replaced.is_empty() => replaced,
        _ => extracted,
    };
    infos.extend(model.config.default_infos.iter().cloned());
    infos
}

/// Parse `html` and assemble its info list.
///
/// `url` is the page address, used to resolve relative links.
#[must_use]
pub fn get_wiki_data_from_html(site: &Site, html: &str, url: Option<&str>) -> Vec<SingleInfo> {
    let doc = dom::parse(html);
    let ctx = PageContext::new(&doc).with_url(url.and_then(url_utils::parse_absolute));
    get_wiki_data(site, &ctx)
}

/// Whether the page carries the site's page and control landmarks.
#[must_use]
pub fn is_subject_page(site: &Site, ctx: &PageContext) -> bool {
    let config = &site.config;
    find_element(&config.page_selectors, ctx.root()).is_some()
        && find_element(&config.control_selector, ctx.root()).is_some()
}

fn extract_items(site: &Site, ctx: &PageContext) -> Vec<SingleInfo> {
    info!("{}: extracting {} fields", site.key(), site.config.item_list.len());
    let infos: Vec<SingleInfo> = site
        .config
        .item_list
        .iter()
        .filter_map(|item| get_wiki_item(item, site, ctx))
        .collect();
    debug!("{}: {} fields found", site.key(), infos.len());
    infos
}
