//! Field extraction.
//!
//! Turns one [`FieldConfig`] into at most one [`SingleInfo`]: find the
//! element through the selector fallbacks, read its text, then dispatch on
//! the category's [`Extraction`] path. A field that cannot be found or ends
//! up empty yields `None`; that is normal, most pages miss some fields.

pub mod handlers;

use log::debug;

use crate::category::{Category, Extraction};
use crate::dom::{self, PageContext};
use crate::normalize::deal_item_text;
use crate::patterns::WHITESPACE;
use crate::selector::find_element;
use crate::site::{FieldConfig, Site};
use crate::subject::SingleInfo;
use crate::text_pipe::{run_pipeline, wants_rendered_text, PipeArgs};
use crate::url_utils;

/// Extract one field from the page.
#[must_use]
pub fn get_wiki_item(config: &FieldConfig, site: &Site, ctx: &PageContext) -> Option<SingleInfo> {
    let Some((el, selector)) = find_element(&config.selector, ctx.root()) else {
        debug!("{}: field {:?} not found", site.key(), config.name);
        return None;
    };

    let keywords = selector.key_words();
    let pipes = config.pipes.as_deref();
    let category = &config.category;
    let args = PipeArgs {
        keywords: keywords.to_vec(),
    };

    let mut text = if pipes.is_some_and(wants_rendered_text) {
        dom::rendered_text(&el)
    } else {
        dom::text_content(&el).to_string()
    };

    // Pipeline when declared, otherwise the given fallback
    let piped_or = |text: &str, fallback: &dyn Fn(&str) -> String| match pipes {
        Some(pipes) => run_pipeline(text, pipes, &args),
        None => fallback(text),
    };

    let value = match category.extraction() {
        Extraction::Cover => site.hooks.resolve_cover(&el, ctx),
        Extraction::Summary => {
            let rendered = dom::rendered_text(&el);
            if !rendered.is_empty() {
                text = rendered;
            }
            Some(piped_or(&text, &|t: &str| site.hooks.deal_text(category, t)))
        }
        Extraction::Title => Some(piped_or(&text, &|t: &str| site.hooks.deal_text(category, t))),
        Extraction::Website => dom::get_attribute(&el, "href")
            .and_then(|href| url_utils::resolve_href(&href, ctx.url()))
            .map(|href| site.hooks.deal_text(category, &href)),
        Extraction::Date => Some(piped_or(&text, &|t: &str| {
            let cleaned = deal_item_text(t, category, keywords);
            site.hooks.deal_text(category, &cleaned)
        })),
        Extraction::Plain => Some(piped_or(&text, &|t: &str| deal_item_text(t, category, keywords))),
    };

    let mut value = value?;
    if *category == Category::Creator {
        value = WHITESPACE.replace_all(&value, "").into_owned();
    }
    if value.is_empty() {
        debug!("{}: field {:?} is empty", site.key(), config.name);
        return None;
    }

    Some(SingleInfo::new(config.name.clone(), value, category.clone()))
}
