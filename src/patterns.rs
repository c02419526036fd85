//! Compiled regex patterns for text cleanup and script detection.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Parenthetical Groups
// =============================================================================

/// Any ASCII or full-width parenthetical group, matched non-greedily.
pub static PARENTHESIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(.*?\)|（.*?）").expect("PARENTHESIS regex")
});

/// Parenthetical groups without an ASCII digit inside.
///
/// Volume and issue markers such as `(1)` survive.
pub static PARENTHESIS_NO_DIGIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^0-9]*?\)|（[^0-9]*?）").expect("PARENTHESIS_NO_DIGIT regex")
});

/// A parenthetical group at the very end of a string.
pub static TRAILING_PARENTHESIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(([^()]*)\)\s*$").expect("TRAILING_PARENTHESIS regex")
});

// =============================================================================
// Label / Value Cleanup
// =============================================================================

/// Leading `Label:` or `Label：` prefix (label has no digits or ASCII colons).
pub static LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9:]+?[:：]").expect("LABEL_PREFIX regex")
});

/// First run of ASCII digits.
pub static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+").expect("FIRST_NUMBER regex")
});

/// Any whitespace character.
pub static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s").expect("WHITESPACE regex")
});

// =============================================================================
// Script Detection
// =============================================================================

/// String beginning with a CJK unified ideograph.
pub static LEADING_HAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{4e00}-\x{9fa5}]+").expect("LEADING_HAN regex")
});

/// Hiragana, including the prolonged sound mark.
pub static HIRAGANA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{3040}-\x{309F}ー]").expect("HIRAGANA regex")
});

/// Katakana.
pub static KATAKANA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{30A0}-\x{30FF}]").expect("KATAKANA regex")
});

// =============================================================================
// Dates
// =============================================================================

/// `2020-01-01`, `2020/1/1`, `2020.01.01`, `2020年1月1日`.
pub static DATE_YMD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*[-/.年]\s*(\d{1,2})\s*[-/.月]\s*(\d{1,2})").expect("DATE_YMD regex")
});

/// `2020-01`, `2020/1`, `2020年1月`.
pub static DATE_YM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*[-/.年]\s*(\d{1,2})").expect("DATE_YM regex")
});

/// Bare four-digit year followed by `年` or standing alone.
pub static DATE_Y: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})\s*年?\s*$").expect("DATE_Y regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthesis_matches_both_bracket_styles() {
        assert_eq!(PARENTHESIS.replace_all("a (b) c（d）", ""), "a  c");
    }

    #[test]
    fn parenthesis_no_digit_keeps_numbered_groups() {
        assert_eq!(PARENTHESIS_NO_DIGIT.replace_all("x (1) (abc)", ""), "x (1) ");
    }

    #[test]
    fn label_prefix_requires_colon() {
        assert!(LABEL_PREFIX.is_match("出版社：講談社"));
        assert!(!LABEL_PREFIX.is_match("2020-01-01"));
        assert!(!LABEL_PREFIX.is_match("12:30"));
    }

    #[test]
    fn kana_patterns() {
        assert!(HIRAGANA.is_match("のおしゃべり"));
        assert!(KATAKANA.is_match("ガンガン"));
        assert!(!HIRAGANA.is_match("幾日"));
        assert!(LEADING_HAN.is_match("幾日"));
    }
}
