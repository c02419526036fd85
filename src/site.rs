//! Site models: declarative field lists plus per-site behaviour.
//!
//! A [`SiteConfig`] says *what* to scrape from a page (one [`FieldConfig`] per
//! field). A [`SiteHooks`] implementation says *how* that site differs from
//! the defaults: category text handlers, cover resolution, post-extraction
//! fixups. [`SiteRegistry`] finds the model for a URL.

use std::fmt;

use dom_query::Selection;
use regex::Regex;

use crate::category::Category;
use crate::dom::PageContext;
use crate::extractor::handlers;
use crate::selector::Selector;
use crate::subject::SingleInfo;
use crate::text_pipe::Pipe;
use crate::url_utils;

/// How to extract one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Display name, also the merge key.
    pub name: String,
    /// Extraction semantics.
    pub category: Category,
    /// Ordered fallback lookups.
    pub selector: Vec<Selector>,
    /// Text pipeline; `None` uses the category handlers.
    pub pipes: Option<Vec<Pipe>>,
}

impl FieldConfig {
    /// Field without a pipeline.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, selector: Vec<Selector>) -> Self {
        Self {
            name: name.into(),
            category,
            selector,
            pipes: None,
        }
    }

    /// Attach a pipeline.
    #[must_use]
    pub fn pipes(mut self, pipes: impl Into<Vec<Pipe>>) -> Self {
        self.pipes = Some(pipes.into());
        self
    }
}

/// Everything scraped from one kind of page.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    /// Registry key.
    pub key: String,
    /// Human readable description, used in log lines.
    pub description: String,
    /// Hostnames served by this model, without `www.`.
    pub hosts: Vec<String>,
    /// Rules picking this model when several share a host.
    pub url_rules: Vec<Regex>,
    /// Wiki subject type.
    pub kind: u32,
    /// Wiki subject subtype.
    pub subtype: u32,
    /// Landmark proving the page is a product page.
    pub page_selectors: Vec<Selector>,
    /// Landmark next to which controls are placed; also required for scraping.
    pub control_selector: Vec<Selector>,
    /// Fields to extract, in output order.
    pub item_list: Vec<FieldConfig>,
    /// Fields appended verbatim after extraction.
    pub default_infos: Vec<SingleInfo>,
}

impl SiteConfig {
    /// Whether this model serves `host`.
    #[must_use]
    pub fn serves_host(&self, host: &str) -> bool {
        let host = url_utils::normalize_host(host);
        self.hosts.iter().any(|h| url_utils::normalize_host(h) == host)
    }

    /// Whether any URL rule matches.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        self.url_rules.iter().any(|rule| rule.is_match(url))
    }
}

/// Per-site behaviour. Every method has a default.
pub trait SiteHooks: Send + Sync {
    /// Clean text for a category when the field has no pipeline.
    fn deal_text(&self, category: &Category, text: &str) -> String {
        handlers::default_deal_text(category, text)
    }

    /// Image URL for a cover field.
    fn resolve_cover(&self, el: &Selection, ctx: &PageContext) -> Option<String> {
        handlers::default_cover(el, ctx)
    }

    /// Fix up the extracted list; a non-empty result replaces it.
    fn after_get_wiki_data(&self, _infos: &[SingleInfo], _config: &SiteConfig) -> Option<Vec<SingleInfo>> {
        None
    }

    /// Character-page variant of [`SiteHooks::after_get_wiki_data`].
    fn after_get_chara_data(
        &self,
        _infos: &[SingleInfo],
        _config: &SiteConfig,
        _ctx: &PageContext,
    ) -> Option<Vec<SingleInfo>> {
        None
    }
}

/// Hooks with every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl SiteHooks for DefaultHooks {}

/// A site model: configuration plus hooks.
pub struct Site {
    /// What to scrape.
    pub config: SiteConfig,
    /// How this site differs from the defaults.
    pub hooks: Box<dyn SiteHooks>,
}

impl Site {
    /// Model with default hooks.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self::with_hooks(config, DefaultHooks)
    }

    /// Model with custom hooks.
    #[must_use]
    pub fn with_hooks(config: SiteConfig, hooks: impl SiteHooks + 'static) -> Self {
        Self {
            config,
            hooks: Box::new(hooks),
        }
    }

    /// Registry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.config.key
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site").field("key", &self.config.key).finish_non_exhaustive()
    }
}

/// Site models by host.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in models.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for site in crate::sites::builtin() {
            registry.register(site);
        }
        registry
    }

    /// Add a model. Later registrations come after earlier ones in lookups.
    pub fn register(&mut self, site: Site) {
        self.sites.push(site);
    }

    /// Model by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.key() == key)
    }

    /// All models serving `host`, in registration order.
    #[must_use]
    pub fn find_by_host(&self, host: &str) -> Vec<&Site> {
        self.sites.iter().filter(|s| s.config.serves_host(host)).collect()
    }

    /// The model for a page URL.
    ///
    /// With several models on the host, the last one whose URL rules match
    /// wins; with none matching, the first model is used.
    #[must_use]
    pub fn find_for_url(&self, url: &str) -> Option<&Site> {
        let host = url_utils::extract_hostname(url)?;
        let models = self.find_by_host(&host);
        let first = *models.first()?;
        Some(
            models
                .iter()
                .rev()
                .find(|m| m.config.matches_url(url))
                .copied()
                .unwrap_or(first),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: &str, host: &str, rule: Option<&str>) -> SiteConfig {
        SiteConfig {
            key: key.to_string(),
            hosts: vec![host.to_string()],
            url_rules: rule.into_iter().filter_map(|r| Regex::new(r).ok()).collect(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn host_lookup_ignores_www() {
        let mut registry = SiteRegistry::new();
        registry.register(Site::new(config("a", "www.example.jp", None)));
        assert_eq!(registry.find_by_host("example.jp").len(), 1);
        assert_eq!(registry.find_by_host("WWW.EXAMPLE.JP").len(), 1);
        assert!(registry.find_by_host("other.jp").is_empty());
    }

    #[test]
    fn url_rules_pick_among_shared_host() {
        let mut registry = SiteRegistry::new();
        registry.register(Site::new(config("game", "example.jp", Some(r"/game/"))));
        registry.register(Site::new(config("book", "example.jp", Some(r"/book/"))));
        let pick = |url: &str| registry.find_for_url(url).map(Site::key).map(str::to_string);
        assert_eq!(pick("https://example.jp/book/1").as_deref(), Some("book"));
        assert_eq!(pick("https://example.jp/game/1").as_deref(), Some("game"));
        assert_eq!(pick("https://example.jp/music/1").as_deref(), Some("game"));
        assert_eq!(pick("https://nowhere.jp/"), None);
    }

    #[test]
    fn field_config_builder() {
        let field = FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("h1")])
            .pipes([Pipe::Trim, Pipe::ParenthesisNumeric]);
        assert_eq!(field.pipes.as_deref(), Some(&[Pipe::Trim, Pipe::ParenthesisNumeric][..]));
    }
}
