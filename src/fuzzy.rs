//! Approximate string matching for search results.
//!
//! Each candidate is scored per key: the best Levenshtein distance between
//! the pattern and any pattern-length window of the key's text, divided by
//! the pattern length. `0.0` is an exact substring match, `1.0` nothing in
//! common. Candidates scoring above the threshold are dropped.

use serde::{Deserialize, Serialize};

use crate::subject::SearchResult;

/// Search result fields the matcher compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FuzzyKey {
    /// Primary name.
    Name,
    /// Alternate name.
    GreyName,
}

impl FuzzyKey {
    fn text(self, item: &SearchResult) -> Option<&str> {
        match self {
            Self::Name => Some(item.name.as_str()),
            Self::GreyName => item.grey_name.as_deref(),
        }
    }
}

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuzzyOptions {
    /// Fields compared, best score wins.
    ///
    /// Default: `[name, greyName]`
    pub keys: Vec<FuzzyKey>,

    /// Highest accepted score.
    ///
    /// Default: `0.6`
    pub threshold: f64,

    /// Compare without case folding.
    ///
    /// Default: `false`
    pub is_case_sensitive: bool,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            keys: vec![FuzzyKey::Name, FuzzyKey::GreyName],
            threshold: 0.6,
            is_case_sensitive: false,
        }
    }
}

/// One accepted candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// The candidate.
    pub item: &'a SearchResult,
    /// Position in the input list.
    pub index: usize,
    /// Match score, lower is better.
    pub score: f64,
}

/// Score candidates against `pattern`, best first.
///
/// Equal scores keep input order. An empty pattern matches nothing.
#[must_use]
pub fn search<'a>(items: &'a [SearchResult], pattern: &str, opts: &FuzzyOptions) -> Vec<FuzzyMatch<'a>> {
    let pattern = fold(pattern.trim(), opts.is_case_sensitive);
    if pattern.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<FuzzyMatch<'a>> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let best = opts
                .keys
                .iter()
                .filter_map(|key| key.text(item))
                .map(|text| score(&pattern, &fold(text, opts.is_case_sensitive)))
                .min_by(f64::total_cmp)?;
            (best <= opts.threshold).then_some(FuzzyMatch {
                item,
                index,
                score: best,
            })
        })
        .collect();

    matches.sort_by(|a, b| a.score.total_cmp(&b.score));
    matches
}

/// Normalised distance of `pattern` to its best window in `text`.
#[must_use]
pub fn score(pattern: &str, text: &str) -> f64 {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    let len = pattern_chars.len();
    if len == 0 {
        return if text_chars.is_empty() { 0.0 } else { 1.0 };
    }

    let best = if text_chars.len() <= len {
        strsim::levenshtein(pattern, text)
    } else {
        text_chars
            .windows(len)
            .map(|window| strsim::levenshtein(pattern, &window.iter().collect::<String>()))
            .min()
            .unwrap_or(len)
    };

    #[allow(clippy::cast_precision_loss)]
    let normalized = best as f64 / len as f64;
    normalized.min(1.0)
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}
