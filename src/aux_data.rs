//! Auxiliary site scraping.
//!
//! Fetches a page from a second catalog site, scrapes it with the model
//! registered for its host and merges the result into stored wiki data.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::dom::{self, PageContext};
use crate::error::Result;
use crate::fetch::{FetchOptions, Fetcher};
use crate::merge::{combine_info_list, AuxPrefs};
use crate::options::Options;
use crate::site::SiteRegistry;
use crate::subject::{SingleInfo, SubjectWikiInfo};
use crate::url_utils;
use crate::wiki_data::{get_wiki_data, is_subject_page};

/// An auxiliary page to merge, with its request and merge settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxSitePayload {
    /// Page URL.
    pub url: String,
    /// Request settings.
    pub opts: FetchOptions,
    /// Merge preferences.
    pub prefs: AuxPrefs,
}

/// Scrape the page at `url` with the model registered for its host.
///
/// Returns an empty list when no model serves the host or the page lacks
/// the model's landmarks. Fetch failures are errors.
pub fn get_wiki_data_by_url(
    url: &str,
    registry: &SiteRegistry,
    fetcher: &dyn Fetcher,
    fetch_opts: &FetchOptions,
    opts: &Options,
) -> Result<Vec<SingleInfo>> {
    let page_url = url::Url::parse(url)?;
    let Some(site) = registry.find_for_url(url) else {
        warn!("no site model for {}", page_url.host_str().unwrap_or(url));
        return Ok(Vec::new());
    };

    let mut request = fetch_opts.clone();
    if request.user_agent.is_none() {
        request.user_agent = Some(opts.user_agent.clone());
    }
    let raw = fetcher.fetch_text(url, &request, opts.fetch_timeout)?;

    let doc = dom::parse(&raw);
    let ctx = PageContext::new(&doc).with_url(Some(page_url));
    if !is_subject_page(site, &ctx) {
        warn!("{url} is not a {} page", site.key());
        return Ok(Vec::new());
    }
    Ok(get_wiki_data(site, &ctx))
}

/// Merge the auxiliary page described by `payload` into `wiki`.
///
/// The auxiliary list is secondary with the payload's preferences, except
/// for Steam store pages whose data takes precedence.
pub fn update_aux_data(
    wiki: SubjectWikiInfo,
    payload: &AuxSitePayload,
    registry: &SiteRegistry,
    fetcher: &dyn Fetcher,
    opts: &Options,
) -> Result<SubjectWikiInfo> {
    info!("updating aux data from {}", payload.url);
    let aux = get_wiki_data_by_url(&payload.url, registry, fetcher, &payload.opts, opts)?;
    if aux.is_empty() {
        warn!("no data scraped from {}; check the page is reachable", payload.url);
    } else {
        info!("scraped {} fields from {}", aux.len(), payload.url);
    }

    let infos = if url_utils::is_steam_store(&payload.url) {
        combine_info_list(&aux, &wiki.infos, &AuxPrefs::default())
    } else {
        combine_info_list(&wiki.infos, &aux, &payload.prefs)
    };

    Ok(SubjectWikiInfo { infos, ..wiki })
}

/// [`update_aux_data`] over stored JSON wiki data.
pub fn update_aux_data_json(
    stored: &str,
    payload: &AuxSitePayload,
    registry: &SiteRegistry,
    fetcher: &dyn Fetcher,
    opts: &Options,
) -> Result<String> {
    let wiki: SubjectWikiInfo = serde_json::from_str(stored)?;
    let updated = update_aux_data(wiki, payload, registry, fetcher, opts)?;
    Ok(serde_json::to_string(&updated)?)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::category::Category;
    use crate::error::Error;
    use crate::selector::Selector;
    use crate::site::{FieldConfig, Site, SiteConfig};

    struct Canned {
        body: std::result::Result<String, ()>,
        seen: RefCell<Vec<(String, Option<String>, Duration)>>,
    }

    impl Canned {
        fn page(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                body: Err(()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetcher for Canned {
        fn fetch_text(&self, url: &str, opts: &FetchOptions, timeout: Duration) -> Result<String> {
            self.seen
                .borrow_mut()
                .push((url.to_string(), opts.user_agent.clone(), timeout));
            self.body.clone().map_err(|()| Error::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            })
        }
    }

    fn registry() -> SiteRegistry {
        let mut registry = SiteRegistry::new();
        registry.register(Site::new(SiteConfig {
            key: "shop".to_string(),
            hosts: vec!["shop.example.jp".to_string()],
            page_selectors: vec![Selector::new("#product")],
            control_selector: vec![Selector::new("#title")],
            item_list: vec![
                FieldConfig::new("名称", Category::SubjectTitle, vec![Selector::new("#title")]),
                FieldConfig::new("作者", Category::Creator, vec![Selector::new("#author")]),
            ],
            ..SiteConfig::default()
        }));
        registry
    }

    const PAGE: &str = r#"<div id="product"><h1 id="title">BADON</h1><p id="author">オノ・ナツメ</p></div>"#;

    #[test]
    fn scrapes_with_timeout_and_user_agent() {
        let fetcher = Canned::page(PAGE);
        let infos = get_wiki_data_by_url(
            "https://shop.example.jp/item/1",
            &registry(),
            &fetcher,
            &FetchOptions::default(),
            &Options::default(),
        )
        .unwrap();
        assert_eq!(infos.len(), 2);

        let seen = fetcher.seen.borrow();
        assert_eq!(seen[0].2, Duration::from_millis(4000));
        assert!(seen[0].1.as_deref().is_some_and(|ua| ua.starts_with("wiki-info/")));
    }

    #[test]
    fn missing_landmarks_give_empty_list() {
        let fetcher = Canned::page("<h1 id=\"title\">BADON</h1>");
        let infos = get_wiki_data_by_url(
            "https://shop.example.jp/item/1",
            &registry(),
            &fetcher,
            &FetchOptions::default(),
            &Options::default(),
        )
        .unwrap();
        assert!(infos.is_empty());
    }

    #[test]
    fn unknown_host_is_not_fetched() {
        let fetcher = Canned::page(PAGE);
        let infos = get_wiki_data_by_url(
            "https://other.example.jp/",
            &registry(),
            &fetcher,
            &FetchOptions::default(),
            &Options::default(),
        )
        .unwrap();
        assert!(infos.is_empty());
        assert!(fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn fetch_failure_propagates() {
        let err = get_wiki_data_by_url(
            "https://shop.example.jp/item/1",
            &registry(),
            &Canned::failing(),
            &FetchOptions::default(),
            &Options::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[test]
    fn update_merges_into_stored_data() {
        let stored = r#"{"type":1,"subtype":0,"infos":[{"name":"名称","value":"BADON","category":"subject_title"},{"name":"页数","value":"192"}]}"#;
        let payload = AuxSitePayload {
            url: "https://shop.example.jp/item/1".to_string(),
            ..AuxSitePayload::default()
        };
        let updated = update_aux_data_json(stored, &payload, &registry(), &Canned::page(PAGE), &Options::default()).unwrap();
        let wiki: SubjectWikiInfo = serde_json::from_str(&updated).unwrap();
        assert_eq!(wiki.kind, 1);
        let names: Vec<&str> = wiki.infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["名称", "页数", "作者"]);
    }

    #[test]
    fn invalid_stored_json_is_an_error() {
        let payload = AuxSitePayload::default();
        let err = update_aux_data_json("not json", &payload, &registry(), &Canned::page(PAGE), &Options::default());
        assert!(matches!(err, Err(Error::Json(_))));
    }
}
