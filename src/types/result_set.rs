use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::{
    config::Config,
    traits::DisplayTerminal,
    types::{book_record::BookRecord, search_field::SearchFieldTag},
};

/// Hard cap on the number of records kept from one search.
pub const MAX_RESULTS: usize = 20;

/// Ordered, capped list of records returned by a single search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    field:   SearchFieldTag,
    #[serde(rename = "books")]
    records: Vec<BookRecord>,
}

impl ResultSet {
    /// Keeps the first `limit` records in their original order. `limit` is
    /// clamped to `1..=MAX_RESULTS`.
    pub fn new(
        field: SearchFieldTag,
        records: impl IntoIterator<Item = BookRecord>,
        limit: usize,
    ) -> Self {
        let limit = limit.clamp(1, MAX_RESULTS);
        Self {
            field,
            records: records.into_iter().take(limit).collect(),
        }
    }

    pub fn field(&self) -> SearchFieldTag {
        self.field
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = BookRecord;
    type IntoIter = std::vec::IntoIter<BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a BookRecord;
    type IntoIter = std::slice::Iter<'a, BookRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl DisplayTerminal for ResultSet {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()> {
        let header = format!("{} ({})", self.field, self.records.len());
        writeln!(f, "{}", config.output_field.format_str(header))?;
        let mut i = self.records.iter().peekable();
        while let Some(record) = i.next() {
            DisplayTerminal::fmt(record, f, config)?;
            if i.peek().is_some() {
                f.push_str("\n\n");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<BookRecord> {
        (0..n)
            .map(|i| BookRecord {
                title: format!("Book {i}"),
                ..BookRecord::default()
            })
            .collect()
    }

    #[test]
    fn truncates_to_cap_keeping_order() {
        let set = ResultSet::new(SearchFieldTag::Title, numbered(35), MAX_RESULTS);
        assert_eq!(set.len(), MAX_RESULTS);
        assert_eq!(set.records()[0].title, "Book 0");
        assert_eq!(set.records()[19].title, "Book 19");
    }

    #[test]
    fn limit_never_exceeds_cap() {
        let set = ResultSet::new(SearchFieldTag::Title, numbered(35), 500);
        assert_eq!(set.len(), MAX_RESULTS);
        let set = ResultSet::new(SearchFieldTag::Title, numbered(35), 5);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn serializes_records_as_books() {
        let set = ResultSet::new(SearchFieldTag::Author, numbered(1), MAX_RESULTS);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["field"], "author");
        assert_eq!(json["books"][0]["title"], "Book 0");
        assert_eq!(json["books"][0]["cover_id"], serde_json::Value::Null);
    }
}
