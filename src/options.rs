//! Configuration options for scraping and matching.
//!
//! The `Options` struct controls the auxiliary fetch and search matching.
//! Per-site settings ([`FetchOptions`](crate::FetchOptions),
//! [`AuxPrefs`](crate::AuxPrefs)) travel with each site payload instead.

use std::time::Duration;

use crate::fuzzy::FuzzyOptions;
use crate::subject::{QueryInfo, SubjectInfo};

/// Hard bound on one auxiliary page fetch.
pub const AUX_FETCH_TIMEOUT: Duration = Duration::from_millis(4000);

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("wiki-info/", env!("CARGO_PKG_VERSION"));

/// Configuration options for scraping and matching.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use wiki_info::Options;
///
/// let options = Options {
///     fetch_timeout: Duration::from_secs(2),
///     disable_date: true,
///     ..Options::default()
/// };
/// assert_eq!(options.fuzzy.threshold, 0.6);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Timeout for one auxiliary page fetch.
    ///
    /// Default: `4000 ms`
    pub fetch_timeout: Duration,

    /// User agent for fetches.
    ///
    /// Site payloads may override it per request.
    ///
    /// Default: `wiki-info/<version>`
    pub user_agent: String,

    /// Fuzzy matching used to pick search results.
    ///
    /// Default: keys `name` and `greyName`, threshold `0.6`
    pub fuzzy: FuzzyOptions,

    /// Ignore release dates when matching search results.
    ///
    /// Default: `false`
    pub disable_date: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fetch_timeout: AUX_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fuzzy: FuzzyOptions::default(),
            disable_date: false,
        }
    }
}

impl Options {
    /// Reference subject for matching search results, honoring `disable_date`.
    #[must_use]
    pub fn search_subject(&self, query: &QueryInfo) -> Option<SubjectInfo> {
        let mut subject = query.to_subject()?;
        if self.disable_date {
            subject.release_date = None;
        }
        Some(subject)
    }
}
