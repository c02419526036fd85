//! Info list merging.
//!
//! Combines the info list of the current page with one scraped from an
//! auxiliary site. Same-named fields are merged pairwise, titles through an
//! explicit script table, everything else keeps the longer value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::patterns::{HIRAGANA, KATAKANA, LEADING_HAN};
use crate::subject::{SingleInfo, ALIAS_NAME, CHINESE_NAME, PLATFORM_NAME};

/// Names that accumulate from both lists instead of merging.
pub const MULTIPLE_VALUE_NAMES: &[&str] = &[PLATFORM_NAME, ALIAS_NAME];

/// Names whose primary value is always kept as is.
pub const SKIP_MERGE_NAMES: &[&str] = &["游戏简介", "开发", "发行"];

// =============================================================================
// Preferences
// =============================================================================

/// A set of field names, or every field.
///
/// Serialized as the string `"all"` or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NameFilterRepr", into = "NameFilterRepr")]
pub enum NameFilter {
    /// Every field.
    All,
    /// The listed fields.
    Names(Vec<String>),
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl NameFilter {
    /// Whether `name` is covered, `All` included.
    #[must_use]
    pub fn covers(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.iter().any(|n| n == name),
        }
    }

    /// Whether `name` is explicitly listed.
    #[must_use]
    pub fn lists(&self, name: &str) -> bool {
        match self {
            Self::All => false,
            Self::Names(names) => names.iter().any(|n| n == name),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NameFilterRepr {
    Keyword(String),
    Names(Vec<String>),
}

/// Rejected `NameFilter` keyword.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected \"all\" or a list of names, got {0:?}")]
pub struct InvalidNameFilter(String);

impl TryFrom<NameFilterRepr> for NameFilter {
    type Error = InvalidNameFilter;

    fn try_from(repr: NameFilterRepr) -> Result<Self, Self::Error> {
        match repr {
            NameFilterRepr::Keyword(word) if word == "all" => Ok(Self::All),
            NameFilterRepr::Keyword(word) => Err(InvalidNameFilter(word)),
            NameFilterRepr::Names(names) => Ok(Self::Names(names)),
        }
    }
}

impl From<NameFilter> for NameFilterRepr {
    fn from(filter: NameFilter) -> Self {
        match filter {
            NameFilter::All => Self::Keyword("all".to_string()),
            NameFilter::Names(names) => Self::Names(names),
        }
    }
}

/// Per-site merge preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuxPrefs {
    /// Fields whose primary value always wins.
    pub origin_names: NameFilter,
    /// Fields whose auxiliary value always wins.
    pub target_names: NameFilter,
}

// =============================================================================
// Title merge
// =============================================================================

/// Script of a title value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Leading CJK ideographs, no kana.
    Chinese,
    /// Contains Hiragana or Katakana.
    Japanese,
    /// Anything else.
    Other,
}

impl Script {
    /// Classify a value.
    #[must_use]
    pub fn of(value: &str) -> Self {
        if HIRAGANA.is_match(value) || KATAKANA.is_match(value) {
            Self::Japanese
        } else if LEADING_HAN.is_match(value) {
            Self::Chinese
        } else {
            Self::Other
        }
    }
}

/// Merge two title entries into `[title, 中文名, 别名]`.
///
/// The title keeps the primary entry's name and category. Slots with no
/// value are left empty for the final pass to drop.
#[must_use]
pub fn merge_titles(current: &SingleInfo, target: &SingleInfo) -> Vec<SingleInfo> {
    let primary = current.value.as_str();
    let secondary = target.value.as_str();
    let longest = if secondary.chars().count() > primary.chars().count() {
        secondary
    } else {
        primary
    };

    let (title, chinese, alias) = match (Script::of(primary), Script::of(secondary)) {
        (Script::Chinese, Script::Japanese | Script::Other) => (secondary, primary, ""),
        (Script::Japanese | Script::Other, Script::Chinese) => (primary, secondary, ""),
        (Script::Japanese, Script::Other) => (primary, "", secondary),
        (Script::Other, Script::Japanese) => (secondary, "", primary),
        (Script::Chinese, Script::Chinese)
        | (Script::Japanese, Script::Japanese)
        | (Script::Other, Script::Other) => (longest, "", ""),
    };

    vec![
        SingleInfo::new(current.name.clone(), title, current.category.clone()),
        SingleInfo::new(CHINESE_NAME, chinese, Category::Default),
        SingleInfo::new(ALIAS_NAME, alias, Category::Alias),
    ]
}

// =============================================================================
// List merge
// =============================================================================

/// Merge two same-named entries.
#[must_use]
pub fn combine_obj(current: &SingleInfo, target: &SingleInfo, prefs: &AuxPrefs) -> Vec<SingleInfo> {
    if prefs.origin_names.covers(&current.name) {
        return vec![current.clone()];
    }
    if prefs.target_names.covers(&target.name) {
        return vec![target.clone()];
    }
    if current.category == Category::SubjectTitle {
        return merge_titles(current, target);
    }
    if SKIP_MERGE_NAMES.contains(&current.name.as_str()) {
        return vec![current.clone()];
    }

    let value = if current.value.chars().count() < target.value.chars().count() {
        &target.value
    } else {
        &current.value
    };
    vec![SingleInfo::new(target.name.clone(), value.clone(), target.category.clone())]
}

/// Merge the primary list with an auxiliary one.
///
/// An empty list on either side returns the other unchanged. Otherwise the
/// result is cleaned: empty values dropped, repeated `(name, value)` pairs
/// removed, and aliases whose value already appears earlier removed.
#[must_use]
pub fn combine_info_list(primary: &[SingleInfo], secondary: &[SingleInfo], prefs: &AuxPrefs) -> Vec<SingleInfo> {
    if secondary.is_empty() {
        return primary.to_vec();
    }
    if primary.is_empty() {
        return secondary.to_vec();
    }

    let is_multiple = |name: &str| MULTIPLE_VALUE_NAMES.contains(&name);
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());
    let mut consumed = HashSet::new();

    for current in primary {
        if prefs.target_names.lists(&current.name) {
            continue;
        }
        if is_multiple(&current.name) {
            merged.push(current.clone());
            continue;
        }
        match secondary.iter().position(|other| other.name == current.name) {
            Some(idx) => {
                merged.extend(combine_obj(current, &secondary[idx], prefs));
                consumed.insert(idx);
            }
            None => merged.push(current.clone()),
        }
    }

    for (idx, other) in secondary.iter().enumerate() {
        if prefs.origin_names.lists(&other.name) {
            continue;
        }
        if is_multiple(&other.name) || !consumed.contains(&idx) {
            merged.push(other.clone());
        }
    }

    dedupe(merged)
}

fn dedupe(infos: Vec<SingleInfo>) -> Vec<SingleInfo> {
    let mut seen_pairs = HashSet::new();
    let mut seen_values = HashSet::new();
    let mut out = Vec::with_capacity(infos.len());

    for info in infos.into_iter().filter(|i| !i.value.is_empty()) {
        if !seen_pairs.insert((info.name.clone(), info.value.clone())) {
            continue;
        }
        let first_value = seen_values.insert(info.value.clone());
        if info.is_alias() && !first_value {
            continue;
        }
        out.push(info);
    }
    out
}
