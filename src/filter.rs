//! Search result filtering: pick the candidate describing the reference subject.

use log::debug;
use regex::Regex;

use crate::date::is_equal_date;
use crate::fuzzy::{self, FuzzyOptions};
use crate::options::Options;
use crate::subject::{QueryInfo, SearchResult, SubjectInfo};

/// Pick the best candidate for `subject`.
///
/// In order:
/// 1. a single candidate in a search context is returned as is;
/// 2. candidates are fuzzy-matched on name, none matching gives `None`;
/// 3. with a reference date, the first match on the same date wins;
/// 4. otherwise the first match whose name or grey name contains the
///    reference name (as a regex) wins;
/// 5. otherwise the best-scored match.
#[must_use]
pub fn filter_results(
    items: &[SearchResult],
    subject: &SubjectInfo,
    opts: &FuzzyOptions,
    is_search: bool,
) -> Option<SearchResult> {
    if items.len() == 1 && is_search {
        return items.first().cloned();
    }

    let matches = fuzzy::search(items, &subject.name, opts);
    if matches.is_empty() {
        debug!("no fuzzy match for {:?} among {} results", subject.name, items.len());
        return None;
    }

    if let Some(date) = subject.release_date.as_deref().filter(|d| !d.is_empty()) {
        let dated = matches.iter().find(|m| {
            m.item
                .release_date
                .as_deref()
                .is_some_and(|release| is_equal_date(release, date))
        });
        if let Some(m) = dated {
            debug!("{:?} matched by release date {date}", m.item.name);
            return Some(m.item.clone());
        }
    }

    let named = name_regex(&subject.name).and_then(|re| {
        matches
            .iter()
            .find(|m| re.is_match(&m.item.name) || m.item.grey_name.as_deref().is_some_and(|g| re.is_match(g)))
    });
    if let Some(m) = named {
        return Some(m.item.clone());
    }

    matches.first().map(|m| m.item.clone())
}

/// [`filter_results`] for a scraped page's query keys under `opts`.
///
/// Returns `None` when the page yielded no title. The release date is
/// ignored when `opts.disable_date` is set.
#[must_use]
pub fn find_subject(
    items: &[SearchResult],
    query: &QueryInfo,
    opts: &Options,
    is_search: bool,
) -> Option<SearchResult> {
    let subject = opts.search_subject(query)?;
    filter_results(items, &subject, &opts.fuzzy, is_search)
}

/// Regex for the trimmed reference name, or its literal when not a valid pattern.
fn name_regex(name: &str) -> Option<Regex> {
    let name = name.trim();
    Regex::new(name).or_else(|_| Regex::new(&regex::escape(name))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, date: Option<&str>) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            release_date: date.map(str::to_string),
            url: format!("https://example.org/{name}"),
            ..SearchResult::default()
        }
    }

    fn subject(name: &str, date: Option<&str>) -> SubjectInfo {
        SubjectInfo {
            name: name.to_string(),
            release_date: date.map(str::to_string),
        }
    }

    #[test]
    fn single_search_result_returned_unconditionally() {
        let items = vec![result("Totally unrelated", None)];
        let picked = filter_results(&items, &subject("BADON", None), &FuzzyOptions::default(), true);
        assert_eq!(picked, items.first().cloned());
    }

    #[test]
    fn single_result_outside_search_is_compared() {
        let items = vec![result("Totally unrelated", None)];
        assert!(filter_results(&items, &subject("BADON", None), &FuzzyOptions::default(), false).is_none());
    }

    #[test]
    fn empty_list_is_none() {
        assert!(filter_results(&[], &subject("BADON", None), &FuzzyOptions::default(), true).is_none());
    }

    #[test]
    fn release_date_decides() {
        let items = vec![
            result("BADON", Some("2019-05-01")),
            result("BADON", Some("2020-01-01")),
        ];
        let picked = filter_results(&items, &subject("BADON", Some("2020/1/1")), &FuzzyOptions::default(), true);
        assert_eq!(picked.and_then(|p| p.release_date).as_deref(), Some("2020-01-01"));
    }

    #[test]
    fn name_regex_decides_without_date_match() {
        // Both score alike; only the second matches the name as a pattern
        let items = vec![result("a.x", None), result("abc", None)];
        let picked = filter_results(&items, &subject(" a.c ", None), &FuzzyOptions::default(), true);
        assert_eq!(picked.map(|p| p.name).as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_pattern_names_match_literally() {
        let items = vec![result("Fate/stay night (", None), result("Fate/stay night [", None)];
        let picked = filter_results(&items, &subject("Fate/stay night [", None), &FuzzyOptions::default(), true);
        assert_eq!(picked.map(|p| p.name).as_deref(), Some("Fate/stay night ["));
    }
}
