//! Field categories and their extraction semantics.
//!
//! A category decides how a field's element is turned into a value. The
//! mapping lives in [`Category::extraction`], an exhaustive match: adding a
//! category without deciding its extraction path is a compile error.
//!
//! Stored info lists may carry tags this crate does not interpret
//! (`crt_name`, `listItem`, ...). Those deserialize to [`Category::Other`]
//! and serialize back under the same tag.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of metadata a field carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Subject title.
    SubjectTitle,
    /// Long description of the subject.
    SubjectSummary,
    /// Alternate name.
    Alias,
    /// Release or publication date.
    Date,
    /// Subject cover image.
    Cover,
    /// Character portrait.
    CrtCover,
    /// Official website link.
    Website,
    /// Author, artist, developer and similar people fields.
    Creator,
    /// Book ISBN.
    Isbn,
    /// Amazon product identifier.
    Asin,
    /// Any other plain-text field.
    #[default]
    Default,
    /// Tag not interpreted here, kept verbatim.
    Other(String),
}

/// How a field's value is obtained once its element is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Image URL through the site's cover resolver.
    Cover,
    /// Rendered text preferred; pipeline, else site handler.
    Summary,
    /// Pipeline, else site handler.
    Title,
    /// `href` attribute through the site's URL handler.
    Website,
    /// Pipeline, else item normalizer followed by the site date handler.
    Date,
    /// Pipeline, else item normalizer.
    Plain,
}

impl Category {
    /// Extraction path for this category.
    #[must_use]
    pub const fn extraction(&self) -> Extraction {
        match self {
            Self::Cover | Self::CrtCover => Extraction::Cover,
            Self::SubjectSummary => Extraction::Summary,
            Self::SubjectTitle | Self::Alias => Extraction::Title,
            Self::Website => Extraction::Website,
            Self::Date => Extraction::Date,
            Self::Creator | Self::Isbn | Self::Asin | Self::Default | Self::Other(_) => Extraction::Plain,
        }
    }

    /// Title and summary text must not be touched by generic cleanup.
    #[must_use]
    pub const fn keeps_raw_text(&self) -> bool {
        matches!(self, Self::SubjectTitle | Self::SubjectSummary)
    }

    /// Wire tag used in persisted info lists.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SubjectTitle => "subject_title",
            Self::SubjectSummary => "subject_summary",
            Self::Alias => "alias",
            Self::Date => "date",
            Self::Cover => "cover",
            Self::CrtCover => "crt_cover",
            Self::Website => "website",
            Self::Creator => "creator",
            Self::Isbn => "ISBN",
            Self::Asin => "ASIN",
            Self::Default => "default",
            Self::Other(tag) => tag,
        }
    }

    /// Category for a wire tag. Unknown tags become [`Category::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "subject_title" => Self::SubjectTitle,
            "subject_summary" => Self::SubjectSummary,
            "alias" => Self::Alias,
            "date" => Self::Date,
            "cover" => Self::Cover,
            "crt_cover" => Self::CrtCover,
            "website" => Self::Website,
            "creator" => Self::Creator,
            "ISBN" => Self::Isbn,
            "ASIN" => Self::Asin,
            "default" => Self::Default,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tags_match_wire_names() {
        for category in [
            Category::SubjectTitle,
            Category::CrtCover,
            Category::Isbn,
            Category::Asin,
            Category::Default,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn unknown_tag_is_kept() {
        let category: Category = serde_json::from_str("\"listItem\"").unwrap();
        assert_eq!(category, Category::Other("listItem".to_string()));
        assert_eq!(category.extraction(), Extraction::Plain);
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"listItem\"");
    }

    #[test]
    fn cover_categories_share_extraction() {
        assert_eq!(Category::Cover.extraction(), Extraction::Cover);
        assert_eq!(Category::CrtCover.extraction(), Extraction::Cover);
        assert_eq!(Category::Alias.extraction(), Extraction::Title);
        assert_eq!(Category::Creator.extraction(), Extraction::Plain);
    }
}
