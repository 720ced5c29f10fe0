use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Catalog field a query is directed against.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFieldTag {
    #[default]
    Title,
    Author,
    Subject,
}

impl SearchFieldTag {
    pub const ALL: [SearchFieldTag; 3] = [Self::Title, Self::Author, Self::Subject];

    /// Query-parameter key understood by the search endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Subject => "subject",
        }
    }
}

impl Display for SearchFieldTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchFieldTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown search field: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Author".parse::<SearchFieldTag>().unwrap(), SearchFieldTag::Author);
        assert_eq!(" subject ".parse::<SearchFieldTag>().unwrap(), SearchFieldTag::Subject);
        assert!("isbn".parse::<SearchFieldTag>().is_err());
    }

    #[test]
    fn serializes_as_field_name() {
        let json = serde_json::to_string(&SearchFieldTag::Subject).unwrap();
        assert_eq!(json, "\"subject\"");
    }
}
