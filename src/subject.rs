//! Subject data types shared by extraction, merging and search filtering.
//!
//! These are the shapes persisted between steps, so they all round-trip
//! through `serde_json` with the camelCase field names the wiki side expects.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Display name of the Chinese-name field produced by title merging.
pub const CHINESE_NAME: &str = "中文名";

/// Display name of alias fields.
pub const ALIAS_NAME: &str = "别名";

/// Display name of platform fields.
pub const PLATFORM_NAME: &str = "平台";

/// One normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleInfo {
    /// Display name, also the merge key.
    pub name: String,

    /// Normalized value.
    pub value: String,

    /// Category the value was extracted as.
    #[serde(default)]
    pub category: Category,
}

impl SingleInfo {
    /// Create an info entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            category,
        }
    }

    /// Whether this entry is an alias, by name or by category.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.name == ALIAS_NAME || self.category == Category::Alias
    }
}

/// Assembled wiki data for one subject, as stored between steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectWikiInfo {
    /// Wiki subject type (book, anime, music, game, real).
    #[serde(rename = "type")]
    pub kind: u32,

    /// Wiki subject subtype.
    #[serde(default)]
    pub subtype: u32,

    /// Field values.
    pub infos: Vec<SingleInfo>,
}

/// A candidate returned by a wiki search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Primary name.
    pub name: String,

    /// Alternate name shown greyed out next to the primary one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grey_name: Option<String>,

    /// Release date as displayed by the search page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Subject URL (usually a path on the wiki).
    pub url: String,

    /// Rank or score text when the search page shows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

/// Reference subject a search result is compared against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    /// Reference name.
    pub name: String,

    /// Reference release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Search keys pulled out of an info list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInfo {
    /// Subject title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Amazon product identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,

    /// Book ISBN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl QueryInfo {
    /// Reference subject for result filtering, when a name is known.
    #[must_use]
    pub fn to_subject(&self) -> Option<SubjectInfo> {
        self.name.as_ref().map(|name| SubjectInfo {
            name: name.clone(),
            release_date: self.release_date.clone(),
        })
    }
}

/// Pull the search keys out of an info list. Later entries win.
#[must_use]
pub fn get_query_info(items: &[SingleInfo]) -> QueryInfo {
    let mut info = QueryInfo::default();
    for item in items {
        match &item.category {
            Category::SubjectTitle => info.name = Some(item.value.clone()),
            Category::Date => info.release_date = Some(item.value.clone()),
            Category::Asin => info.asin = Some(item.value.clone()),
            Category::Isbn => info.isbn = Some(item.value.clone()),
            _ => {}
        }
    }
    info
}
