//! Page fetching for auxiliary sites.
//!
//! [`Fetcher`] is the seam between scraping and the network; tests plug in
//! canned pages. [`UreqFetcher`] is the blocking HTTP implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Extra request settings for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchOptions {
    /// Additional headers (cookies, referer, ...).
    pub headers: BTreeMap<String, String>,
    /// User agent overriding the client default.
    pub user_agent: Option<String>,
}

/// Fetch a page as decoded text.
pub trait Fetcher {
    /// GET `url`, failing with [`Error::Timeout`](crate::Error::Timeout)
    /// once `timeout` elapses.
    fn fetch_text(&self, url: &str, opts: &FetchOptions, timeout: Duration) -> Result<String>;
}

#[cfg(feature = "http")]
pub use self::http::UreqFetcher;

#[cfg(feature = "http")]
mod http {
    use std::io::Read;
    use std::time::{Duration, Instant};

    use log::{debug, warn};

    use super::{FetchOptions, Fetcher};
    use crate::encoding::decode_html;
    use crate::error::{Error, Result};
    use crate::options::DEFAULT_USER_AGENT;

    /// Blocking HTTP fetcher backed by `ureq`.
    #[derive(Debug, Clone)]
    pub struct UreqFetcher {
        user_agent: String,
    }

    impl Default for UreqFetcher {
        fn default() -> Self {
            Self::new(DEFAULT_USER_AGENT)
        }
    }

    impl UreqFetcher {
        /// Fetcher sending `user_agent` unless a request overrides it.
        #[must_use]
        pub fn new(user_agent: impl Into<String>) -> Self {
            Self {
                user_agent: user_agent.into(),
            }
        }

        fn agent(&self, opts: &FetchOptions, timeout: Duration) -> ureq::Agent {
            ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(opts.user_agent.as_deref().unwrap_or(&self.user_agent))
                .build()
        }
    }

    impl Fetcher for UreqFetcher {
        fn fetch_text(&self, url: &str, opts: &FetchOptions, timeout: Duration) -> Result<String> {
            let started = Instant::now();
            let mut request = self.agent(opts, timeout).get(url);
            for (name, value) in &opts.headers {
                request = request.set(name, value);
            }

            let response = request.call().map_err(|err| {
                let err = classify_failure(url, &err, started.elapsed() >= timeout, timeout);
                warn!("{err}");
                err
            })?;

            let content_type = response.header("Content-Type").map(str::to_string);
            let mut bytes = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut bytes)
                .map_err(|err| read_failure(url, &err, timeout))?;

            debug!("fetched {url}: {} bytes in {:?}", bytes.len(), started.elapsed());
            Ok(decode_html(&bytes, content_type.as_deref()))
        }
    }

    fn classify_failure(url: &str, error: &ureq::Error, elapsed: bool, timeout: Duration) -> Error {
        match error {
            ureq::Error::Status(code, _) => Error::Fetch {
                url: url.to_string(),
                message: format!("HTTP status {code}"),
            },
            ureq::Error::Transport(transport) => {
                let message = transport.to_string();
                let lowered = message.to_ascii_lowercase();
                if elapsed || lowered.contains("timed out") || lowered.contains("timeout") {
                    Error::Timeout {
                        url: url.to_string(),
                        timeout_ms: timeout.as_millis(),
                    }
                } else {
                    Error::Fetch {
                        url: url.to_string(),
                        message,
                    }
                }
            }
        }
    }

    fn read_failure(url: &str, error: &std::io::Error, timeout: Duration) -> Error {
        if matches!(
            error.kind(),
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
        ) {
            Error::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            }
        } else {
            Error::Fetch {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

}
