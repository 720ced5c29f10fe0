use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

use crate::{
    config::Config,
    cover::CoverRef,
    types::{book_record::BookRecord, result_set::ResultSet},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(anyhow!("Unknown output format: {s}")),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Export {
    #[serde(rename = "Title")]
    title:              String,
    #[serde(rename = "Authors")]
    authors:            String,
    #[serde(rename = "First Published")]
    first_publish_year: Option<i32>,
    #[serde(rename = "Cover Id")]
    cover_id:           Option<i64>,
    #[serde(rename = "Cover")]
    cover:              String,
}

impl Export {
    pub fn new(record: &BookRecord, config: &Config) -> Self {
        Self {
            title:              record.title.clone(),
            authors:            record.authors.join("; "),
            first_publish_year: record.first_publish_year,
            cover_id:           record.cover_id,
            cover:              CoverRef::resolve(record.cover_id, config).url().to_string(),
        }
    }
}

pub fn to_csv(results: &ResultSet, config: &Config) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for record in results {
        writer.serialize(Export::new(record, config))?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow!("{}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn to_json(results: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::search_field::SearchFieldTag;
    use pretty_assertions::assert_eq;

    fn results() -> ResultSet {
        ResultSet::new(
            SearchFieldTag::Author,
            [
                BookRecord {
                    title:              "Good Omens".into(),
                    authors:            vec!["Terry Pratchett".into(), "Neil Gaiman".into()],
                    first_publish_year: Some(1990),
                    cover_id:           Some(7),
                },
                BookRecord {
                    title: "Beowulf".into(),
                    ..BookRecord::default()
                },
            ],
            20,
        )
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let csv = to_csv(&results(), &Config::default()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Title,Authors,First Published,Cover Id,Cover");
        assert_eq!(
            lines[1],
            "Good Omens,Terry Pratchett; Neil Gaiman,1990,7,https://covers.openlibrary.org/b/id/7-M.jpg"
        );
        assert_eq!(
            lines[2],
            "Beowulf,,,,https://via.placeholder.com/150x200?text=No+Cover"
        );
    }

    #[test]
    fn json_keeps_order() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&results()).unwrap()).unwrap();
        assert_eq!(json["field"], "author");
        assert_eq!(json["books"][0]["title"], "Good Omens");
        assert_eq!(json["books"][1]["title"], "Beowulf");
    }

    #[test]
    fn parses_formats() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }
}
