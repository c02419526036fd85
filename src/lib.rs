//! # wiki-info
//!
//! Scrapes subject metadata (title, dates, people, identifiers, cover,
//! summary) from catalog product pages into a flat list of wiki info
//! fields, and merges lists scraped from several sites.
//!
//! ## Quick Start
//!
//! ```rust
//! use wiki_info::selector::Selector;
//! use wiki_info::{get_wiki_data_from_html, Category, FieldConfig, Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig {
//!     key: "shop".to_string(),
//!     item_list: vec![
//!         FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("h1")]),
//!         FieldConfig::new(
//!             "发售日",
//!             Category::Date,
//!             vec![Selector::new("#detail").sub("li").key_word(["发售日"])],
//!         ),
//!     ],
//!     ..SiteConfig::default()
//! });
//!
//! let html = r#"<h1>BADON</h1><ul id="detail"><li>发售日: 2020-01-01</li></ul>"#;
//! let infos = get_wiki_data_from_html(&site, html, None);
//! assert_eq!(infos[0].value, "BADON");
//! assert_eq!(infos[1].value, "2020-01-01");
//! ```
//!
//! ## Features
//!
//! - **Field Extraction**: CSS selectors with keyword rows, sibling hops and fallbacks
//! - **Text Pipelines**: Named cleanup stages plus custom ones
//! - **Info Merging**: Combines lists from several sites, titles by script
//! - **Search Matching**: Fuzzy name matching with date and name tie-breaks
//! - **Auxiliary Fetch**: Scrape a second site with a hard timeout (`http` feature)

mod error;
mod options;
mod patterns;

/// Field categories and their extraction paths.
pub mod category;

/// Info list, search result and stored wiki data types.
pub mod subject;

/// Date parsing and comparison.
pub mod date;

/// Text pipelines.
pub mod text_pipe;

/// Item text cleanup for fields without a pipeline.
pub mod normalize;

/// DOM access over `dom_query`.
pub mod dom;

/// URL utilities for resolution, cleanup and host matching.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Declarative element lookup.
pub mod selector;

/// Site models and registry.
pub mod site;

/// Field extraction.
pub mod extractor;

/// Per-page info list assembly.
pub mod wiki_data;

/// Fuzzy name matching.
pub mod fuzzy;

/// Search result filtering.
pub mod filter;

/// Info list merging.
pub mod merge;

/// Page fetching.
pub mod fetch;

/// Auxiliary site scraping and merging.
pub mod aux_data;

/// Built-in site models.
pub mod sites;

// Public API - re-exports
pub use aux_data::{get_wiki_data_by_url, update_aux_data, update_aux_data_json, AuxSitePayload};
pub use category::Category;
pub use error::{Error, Result};
pub use extractor::get_wiki_item;
pub use fetch::{FetchOptions, Fetcher};
#[cfg(feature = "http")]
pub use fetch::UreqFetcher;
pub use filter::{filter_results, find_subject};
pub use fuzzy::FuzzyOptions;
pub use merge::{combine_info_list, AuxPrefs, NameFilter};
pub use options::{Options, AUX_FETCH_TIMEOUT, DEFAULT_USER_AGENT};
pub use site::{FieldConfig, Site, SiteConfig, SiteHooks, SiteRegistry};
pub use subject::{get_query_info, QueryInfo, SearchResult, SingleInfo, SubjectInfo, SubjectWikiInfo};
pub use text_pipe::{run_pipeline, Pipe, PipeArgs, TextPipe};
pub use wiki_data::{get_chara_data, get_wiki_data, get_wiki_data_from_html};
