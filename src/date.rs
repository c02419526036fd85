//! Release date normalization and comparison.
//!
//! Catalog pages print dates in many shapes (`2020/1/1`, `2020年1月1日`,
//! `January 1, 2020`). Normalized dates are `YYYY-MM-DD`, or `YYYY-MM` /
//! `YYYY` when the page only gives that much.

use chrono::{Datelike, NaiveDate};

use crate::patterns::{DATE_Y, DATE_YM, DATE_YMD};

/// A calendar date with optional month and day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    /// Year.
    pub year: i32,
    /// Month, 1-based.
    pub month: Option<u32>,
    /// Day of month.
    pub day: Option<u32>,
}

impl PartialDate {
    /// Canonical text form.
    #[must_use]
    pub fn to_canonical(self) -> String {
        match (self.month, self.day) {
            (Some(m), Some(d)) => format!("{:04}-{m:02}-{d:02}", self.year),
            (Some(m), None) => format!("{:04}-{m:02}", self.year),
            _ => format!("{:04}", self.year),
        }
    }

    /// Equal on every component both sides know.
    #[must_use]
    pub fn agrees_with(self, other: Self) -> bool {
        fn same(a: Option<u32>, b: Option<u32>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
        }
        self.year == other.year && same(self.month, other.month) && same(self.day, other.day)
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Some(date.month()),
            day: Some(date.day()),
        }
    }
}

/// Parse a date from free text.
#[must_use]
pub fn parse_partial_date(text: &str) -> Option<PartialDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = DATE_YMD.captures(text) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        // Reject 2020-13-45 style noise
        return NaiveDate::from_ymd_opt(year, month, day).map(PartialDate::from);
    }

    // Written-out month names
    let formats = [
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
        "%d %b %Y",  // 15 Jan 2024
        "%b. %d, %Y",
    ];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date.into());
        }
    }

    // Time-of-day suffixes
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive().into());
    }

    if let Some(caps) = DATE_YM.captures(text) {
        let year = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        if (1..=12).contains(&month) {
            return Some(PartialDate {
                year,
                month: Some(month),
                day: None,
            });
        }
    }

    if let Some(caps) = DATE_Y.captures(text) {
        return Some(PartialDate {
            year: caps[1].parse().ok()?,
            month: None,
            day: None,
        });
    }

    None
}

/// Normalize a scraped date string.
///
/// Unparseable input is returned trimmed so nothing scraped is lost.
#[must_use]
pub fn deal_date(text: &str) -> String {
    parse_partial_date(text).map_or_else(|| text.trim().to_string(), PartialDate::to_canonical)
}

/// Compare two date strings ignoring time of day and missing precision.
///
/// Returns false when either side cannot be parsed.
#[must_use]
pub fn is_equal_date(a: &str, b: &str) -> bool {
    match (parse_partial_date(a), parse_partial_date(b)) {
        (Some(a), Some(b)) => a.agrees_with(b),
        _ => false,
    }
}
