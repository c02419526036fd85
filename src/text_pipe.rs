//! Text pipe engine.
//!
//! A pipeline is an ordered list of [`Pipe`] stages run over one scraped
//! string. Every stage reads the previous stage's output (or the raw input
//! before anything ran) and produces a fresh [`TextPipe`] snapshot.
//!
//! ```rust
//! use wiki_info::text_pipe::{run_pipeline, Pipe, PipeArgs};
//!
//! let args = PipeArgs::with_keywords(["巻数"]);
//! let out = run_pipeline("巻数： 第12巻 (完結)", &[Pipe::Keywords, Pipe::Number], &args);
//! assert_eq!(out, "12");
//! ```

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::date;
use crate::patterns::{FIRST_NUMBER, PARENTHESIS, PARENTHESIS_NO_DIGIT, WHITESPACE};

/// Snapshot of a string moving through a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPipe {
    /// Untouched input.
    pub raw_info: String,
    /// Output of the last stage, `None` before the first stage ran.
    pub out: Option<String>,
}

impl TextPipe {
    /// Fresh snapshot of a raw string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw_info: raw.into(),
            out: None,
        }
    }

    /// Current text, trimmed.
    ///
    /// An empty `out` falls back to `raw_info`.
    #[must_use]
    pub fn current(&self) -> &str {
        match self.out.as_deref() {
            Some(out) if !out.is_empty() => out.trim(),
            _ => self.raw_info.trim(),
        }
    }

    /// Next snapshot with `out` replaced.
    #[must_use]
    pub fn with_out(&self, out: impl Into<String>) -> Self {
        Self {
            raw_info: self.raw_info.clone(),
            out: Some(out.into()),
        }
    }
}

/// User supplied stage.
pub type PipeFn = fn(TextPipe) -> TextPipe;

/// One pipeline stage.
#[derive(Clone, Copy)]
pub enum Pipe {
    /// `t`: trim both ends.
    Trim,
    /// `ta`: remove every whitespace character.
    TrimAll,
    /// `ti`: trim both ends; the extractor reads rendered text for this field.
    TrimInner,
    /// `k`: remove the selector keywords, each with an optional trailing colon.
    Keywords,
    /// `p`: remove parenthetical groups.
    Parenthesis,
    /// `pn`: remove parenthetical groups that contain no digit.
    ParenthesisNumeric,
    /// `num`: keep only the first run of digits.
    Number,
    /// `date`: normalize as a date.
    Date,
    /// Custom stage.
    Custom(PipeFn),
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.key().unwrap_or("?")),
        }
    }
}

impl PartialEq for Pipe {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            (a, b) => a.key().is_some() && a.key() == b.key(),
        }
    }
}

/// Unknown stage name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pipe stage: {0}")]
pub struct UnknownPipe(pub String);

impl FromStr for Pipe {
    type Err = UnknownPipe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "t" => Self::Trim,
            "ta" => Self::TrimAll,
            "ti" => Self::TrimInner,
            "k" => Self::Keywords,
            "p" => Self::Parenthesis,
            "pn" => Self::ParenthesisNumeric,
            "num" => Self::Number,
            "date" => Self::Date,
            other => return Err(UnknownPipe(other.to_string())),
        })
    }
}

/// Arguments for stages that take them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeArgs {
    /// Keywords removed by [`Pipe::Keywords`].
    pub keywords: Vec<String>,
}

impl PipeArgs {
    /// Arguments carrying only keywords.
    #[must_use]
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl Pipe {
    /// Short name of a built-in stage.
    #[must_use]
    pub const fn key(&self) -> Option<&'static str> {
        match self {
            Self::Trim => Some("t"),
            Self::TrimAll => Some("ta"),
            Self::TrimInner => Some("ti"),
            Self::Keywords => Some("k"),
            Self::Parenthesis => Some("p"),
            Self::ParenthesisNumeric => Some("pn"),
            Self::Number => Some("num"),
            Self::Date => Some("date"),
            Self::Custom(_) => None,
        }
    }

    /// Run this stage.
    #[must_use]
    pub fn apply(&self, pipe: TextPipe, args: &PipeArgs) -> TextPipe {
        match self {
            Self::Trim | Self::TrimInner => {
                let out = pipe.current().to_string();
                pipe.with_out(out)
            }
            Self::TrimAll => {
                let out = WHITESPACE.replace_all(pipe.current(), "").into_owned();
                pipe.with_out(out)
            }
            Self::Keywords => trim_keywords(&pipe, &args.keywords),
            Self::Parenthesis => strip(&pipe, &PARENTHESIS),
            Self::ParenthesisNumeric => strip(&pipe, &PARENTHESIS_NO_DIGIT),
            Self::Number => {
                let out = FIRST_NUMBER
                    .find(pipe.current())
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                pipe.with_out(out)
            }
            Self::Date => {
                let out = date::deal_date(pipe.current());
                pipe.with_out(out)
            }
            Self::Custom(f) => f(pipe),
        }
    }
}

fn strip(pipe: &TextPipe, re: &Regex) -> TextPipe {
    let out = re.replace_all(pipe.current(), "").trim().to_string();
    pipe.with_out(out)
}

/// Remove every keyword, each optionally followed by whitespace and a colon.
#[must_use]
pub fn trim_keywords(pipe: &TextPipe, keywords: &[String]) -> TextPipe {
    match keyword_regex(keywords) {
        Some(re) => strip(pipe, &re),
        None => pipe.with_out(pipe.current()),
    }
}

/// Regex matching any of `keywords` plus an optional `:`/`：` separator.
///
/// Returns `None` when there is nothing to match.
#[must_use]
pub fn keyword_regex(keywords: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| format!(r"{}\s*[:：]?", regex::escape(k)))
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&alternatives.join("|")).ok()
}

/// Run `pipes` over `raw` in order.
///
/// An empty result falls back to the trimmed raw input.
#[must_use]
pub fn run_pipeline(raw: &str, pipes: &[Pipe], args: &PipeArgs) -> String {
    let mut current = TextPipe::new(raw);
    for pipe in pipes {
        current = pipe.apply(current, args);
    }
    match current.out {
        Some(out) if !out.is_empty() => out,
        _ => raw.trim().to_string(),
    }
}

/// Whether the pipeline asks for rendered text.
#[must_use]
pub fn wants_rendered_text(pipes: &[Pipe]) -> bool {
    pipes.contains(&Pipe::TrimInner)
}
