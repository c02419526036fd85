//! Fallback cleanup for field text when no pipeline is configured.

use crate::category::Category;
use crate::patterns::{LABEL_PREFIX, PARENTHESIS};
use crate::text_pipe::keyword_regex;

/// Clean one scraped field value.
///
/// Title and summary text is returned as is. Everything else loses, in
/// order: parenthetical groups, the selector keywords (with an optional
/// colon), a leading `Label:` prefix, surrounding whitespace.
#[must_use]
pub fn deal_item_text(text: &str, category: &Category, keywords: &[String]) -> String {
    if category.keeps_raw_text() {
        return text.to_string();
    }

    let without_groups = PARENTHESIS.replace_all(text, "");
    let without_keywords = match keyword_regex(keywords) {
        Some(re) => re.replace_all(&without_groups, "").into_owned(),
        None => without_groups.into_owned(),
    };
    LABEL_PREFIX.replace(&without_keywords, "").trim().to_string()
}
