use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};

use crate::{config::Config, cover::CoverRef, traits::DisplayTerminal};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_YEAR: &str = "N/A";

/// Read-only projection of one catalog entry.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title:              String,
    pub authors:            Vec<String>,
    pub first_publish_year: Option<i32>,
    pub cover_id:           Option<i64>,
}

impl BookRecord {
    pub fn has_cover(&self) -> bool {
        matches!(self.cover_id, Some(id) if id > 0)
    }

    /// Authors joined for display, or `None` when the catalog lists none.
    pub fn author_line(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }

    pub fn year_label(&self) -> String {
        match self.first_publish_year {
            Some(year) => year.to_string(),
            None => UNKNOWN_YEAR.to_string(),
        }
    }
}

impl Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.title,
            self.author_line().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            self.year_label()
        )
    }
}

impl DisplayTerminal for BookRecord {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let title = config.output_title.format_str(&self.title);
        let authors = if self.authors.is_empty() {
            config.output_author.format_str(UNKNOWN_AUTHOR)
        } else {
            config.output_author.format_vec(&self.authors)
        };
        let year = config.output_year.format_str(self.year_label());
        let cover = CoverRef::resolve(self.cover_id, config);
        let cover = config.output_cover.format_str(cover.url());
        writeln!(f, "{title}")?;
        writeln!(f, "  {authors}")?;
        writeln!(f, "  {year}")?;
        write!(f, "  {cover}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_authors_have_no_author_line() {
        let record = BookRecord {
            title: "Beowulf".into(),
            ..BookRecord::default()
        };
        assert_eq!(record.author_line(), None);
        assert_eq!(record.to_string(), "Beowulf (Unknown Author, N/A)");
    }

    #[test]
    fn authors_are_joined_in_order() {
        let record = BookRecord {
            title: "Good Omens".into(),
            authors: vec!["Terry Pratchett".into(), "Neil Gaiman".into()],
            first_publish_year: Some(1990),
            cover_id: Some(240727),
        };
        assert_eq!(
            record.author_line().as_deref(),
            Some("Terry Pratchett, Neil Gaiman")
        );
        assert_eq!(record.year_label(), "1990");
        assert!(record.has_cover());
    }

    #[test]
    fn zero_cover_id_is_no_cover() {
        let record = BookRecord {
            cover_id: Some(0),
            ..BookRecord::default()
        };
        assert!(!record.has_cover());
    }
}
