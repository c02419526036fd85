//! Scrape one page into wiki info JSON.
//!
//! ```text
//! wiki-info <url>
//! wiki-info <file.html> --url <page url>
//! wiki-info <file.html> --site <model key>
//! ```

use std::env;
use std::error::Error;
use std::fs;

use log::{info, LevelFilter};
use wiki_info::dom::{self, PageContext};
use wiki_info::encoding::decode_html;
use wiki_info::wiki_data::is_subject_page;
use wiki_info::{
    get_wiki_data, get_wiki_data_by_url, FetchOptions, Options, Site, SiteRegistry, SubjectWikiInfo, UreqFetcher,
};

const USAGE: &str = "usage: wiki-info <url | file> [--url <page url>] [--site <model key>]";

struct Args {
    source: String,
    page_url: Option<String>,
    site_key: Option<String>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut source = None;
    let mut page_url = None;
    let mut site_key = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => page_url = Some(args.next().ok_or(USAGE)?),
            "--site" => site_key = Some(args.next().ok_or(USAGE)?),
            "-h" | "--help" => return Err(USAGE.into()),
            _ if source.is_none() => source = Some(arg),
            _ => return Err(USAGE.into()),
        }
    }

    Ok(Args {
        source: source.ok_or(USAGE)?,
        page_url,
        site_key,
    })
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn pick_site<'a>(registry: &'a SiteRegistry, args: &Args) -> Result<&'a Site, Box<dyn Error>> {
    if let Some(key) = &args.site_key {
        return registry
            .get(key)
            .ok_or_else(|| wiki_info::Error::UnsupportedSite(key.clone()).into());
    }
    let url = args.page_url.as_deref().unwrap_or(&args.source);
    registry
        .find_for_url(url)
        .ok_or_else(|| wiki_info::Error::UnsupportedSite(url.to_string()).into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, LevelFilter::Info);
    clog.init();

    let args = parse_args()?;
    let registry = SiteRegistry::with_builtin();
    let options = Options::default();
    let site = pick_site(&registry, &args)?;

    let infos = if is_remote(&args.source) {
        let fetcher = UreqFetcher::new(options.user_agent.clone());
        get_wiki_data_by_url(&args.source, &registry, &fetcher, &FetchOptions::default(), &options)?
    } else {
        let bytes = fs::read(&args.source)?;
        let html = decode_html(&bytes, None);
        let doc = dom::parse(&html);
        let page_url = args.page_url.as_deref().and_then(wiki_info::url_utils::parse_absolute);
        let ctx = PageContext::new(&doc).with_url(page_url);
        if is_subject_page(site, &ctx) {
            get_wiki_data(site, &ctx)
        } else {
            info!("{} lacks the {} landmarks", args.source, site.key());
            Vec::new()
        }
    };

    let wiki = SubjectWikiInfo {
        kind: site.config.kind,
        subtype: site.config.subtype,
        infos,
    };
    println!("{}", serde_json::to_string_pretty(&wiki)?);
    Ok(())
}
