use serde::{Deserialize, Serialize};

use crate::types::book_record::BookRecord;

/// Body of `GET /search.json`. Fields the client does not use are ignored.
///
/// `docs` stays untyped so that only the documents a caller keeps are ever
/// checked against [`Doc`].
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "numFound")]
    pub num_found: Option<u64>,
    pub docs:      Option<Vec<serde_json::Value>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub title:              Option<String>,
    pub author_name:        Option<Vec<String>>,
    pub first_publish_year: Option<i32>,
    pub cover_i:            Option<i64>,
}

impl From<Doc> for BookRecord {
    fn from(doc: Doc) -> Self {
        Self {
            title:              doc.title.unwrap_or_default(),
            authors:            doc.author_name.unwrap_or_default(),
            first_publish_year: doc.first_publish_year,
            cover_id:           doc.cover_i,
        }
    }
}
