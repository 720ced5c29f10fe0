//! Search client for the Open Library catalog.
//!
//! One call classifies the query, issues a single `GET /search.json`, and
//! projects the returned documents into a capped [`ResultSet`]. Transport and
//! decoding failures are logged here and surface only as
//! [`SearchError::Transient`].

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    classify::classify,
    config::Config,
    error::SearchError,
    openlib_schema::search::{Doc, SearchResponse},
    types::{
        book_record::BookRecord,
        result_set::{ResultSet, MAX_RESULTS},
        search_field::SearchFieldTag,
    },
};

pub const DEFAULT_SEARCH_URL: &str = "https://openlibrary.org";
pub const SEARCH_PATH: &str = "/search.json";

/// Fetches a URL and hands back the response body.
pub trait Transport {
    async fn get(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.text().await?)
    }
}

/// `<base>/search.json?<field>=<query>` with the query percent-encoded.
pub fn search_url(base: &str, field: SearchFieldTag, query: &str) -> String {
    format!(
        "{}{SEARCH_PATH}?{}={}",
        base.trim_end_matches('/'),
        field.as_str(),
        urlencoding::encode(query)
    )
}

pub struct SearchClient<T = HttpTransport> {
    base_url:  String,
    limit:     usize,
    transport: T,
}

impl SearchClient<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.request_timeout_secs.map(Duration::from_secs))?;
        Ok(SearchClient::new(&config.search_url, transport).with_limit(config.limit))
    }
}

impl<T: Transport> SearchClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            limit: MAX_RESULTS,
            transport,
        }
    }

    /// Lowers the per-search cap. Values above [`MAX_RESULTS`] are ignored.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RESULTS);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &str) -> Result<ResultSet, SearchError> {
        self.search_with_field(query, classify(query)).await
    }

    /// Like [`search`](Self::search) but against a field chosen by the caller.
    pub async fn search_with_field(
        &self,
        query: &str,
        field: SearchFieldTag,
    ) -> Result<ResultSet, SearchError> {
        let url = search_url(&self.base_url, field, query);
        debug!("Requesting {url}");
        let body = self.transport.get(&url).await.map_err(|e| {
            warn!("Request to {url} failed: {e:#}");
            SearchError::Transient
        })?;
        let docs = decode(&body)?.docs.unwrap_or_default();
        if docs.is_empty() {
            info!("No {field} matches for {query:?}");
            return Err(SearchError::NoResults);
        }
        info!("{} {field} matches for {query:?}", docs.len());
        let records = docs
            .into_iter()
            .take(self.limit)
            .enumerate()
            .map(|(i, doc)| project(i, doc))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResultSet::new(field, records, self.limit))
    }
}

/// Types one kept document. Documents past the cap never get here.
fn project(index: usize, doc: serde_json::Value) -> Result<BookRecord, SearchError> {
    let doc: Doc = serde_path_to_error::deserialize(doc).map_err(|e| {
        warn!("Malformed document at `docs[{index}].{}`: {}", e.path(), e.inner());
        SearchError::Transient
    })?;
    Ok(doc.into())
}

fn decode(body: &str) -> Result<SearchResponse, SearchError> {
    let mut de = serde_json::Deserializer::from_str(body);
    let response: SearchResponse = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        warn!("Malformed search response at `{}`: {}", e.path(), e.inner());
        SearchError::Transient
    })?;
    de.end().map_err(|e| {
        warn!("Trailing data after search response: {e}");
        SearchError::Transient
    })?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct Canned {
        body:      Option<String>,
        requested: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(body: &str) -> Self {
            Self {
                body:      Some(body.to_string()),
                requested: Mutex::new(vec![]),
            }
        }

        fn unreachable() -> Self {
            Self {
                body:      None,
                requested: Mutex::new(vec![]),
            }
        }
    }

    impl Transport for Canned {
        async fn get(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.body.clone().ok_or_else(|| anyhow!("connection refused"))
        }
    }

    fn docs_body(n: usize) -> String {
        let docs = (0..n)
            .map(|i| format!(r#"{{"title": "Book {i}", "author_name": ["Author {i}"]}}"#))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{"numFound": {n}, "docs": [{docs}]}}"#)
    }

    #[test]
    fn url_encodes_query_value() {
        assert_eq!(
            search_url("https://openlibrary.org/", SearchFieldTag::Subject, "Romance in Paris"),
            "https://openlibrary.org/search.json?subject=Romance%20in%20Paris"
        );
        assert_eq!(
            search_url("http://h", SearchFieldTag::Title, "a&b=c?#"),
            "http://h/search.json?title=a%26b%3Dc%3F%23"
        );
    }

    #[tokio::test]
    async fn truncates_to_twenty_in_server_order() {
        let client = SearchClient::new("http://catalog", Canned::ok(&docs_body(35)));
        let set = client.search("Dune").await.unwrap();
        assert_eq!(set.len(), 20);
        let titles: Vec<_> = set.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles[0], "Book 0");
        assert_eq!(titles[19], "Book 19");
    }

    #[tokio::test]
    async fn classifies_before_requesting() {
        let client = SearchClient::new("http://catalog", Canned::ok(&docs_body(1)));
        let set = client.search("George Orwell").await.unwrap();
        assert_eq!(set.field(), SearchFieldTag::Author);
        assert_eq!(
            client.transport.requested.lock().unwrap().as_slice(),
            ["http://catalog/search.json?author=George%20Orwell"]
        );
    }

    #[tokio::test]
    async fn explicit_field_skips_classification() {
        let client = SearchClient::new("http://catalog", Canned::ok(&docs_body(1)));
        let set = client
            .search_with_field("George Orwell", SearchFieldTag::Title)
            .await
            .unwrap();
        assert_eq!(set.field(), SearchFieldTag::Title);
    }

    #[tokio::test]
    async fn empty_or_missing_docs_is_no_results() {
        for body in [r#"{"docs": []}"#, r#"{"numFound": 0}"#, r#"{"docs": null}"#] {
            let client = SearchClient::new("http://catalog", Canned::ok(body));
            assert_eq!(client.search("Dune").await, Err(SearchError::NoResults), "{body}");
        }
    }

    #[tokio::test]
    async fn malformed_bodies_are_transient() {
        for body in [
            "<html>busy</html>",
            "",
            "[1, 2]",
            r#"{"docs": [{"first_publish_year": "soon"}]}"#,
            r#"{"docs": []} trailing"#,
        ] {
            let client = SearchClient::new("http://catalog", Canned::ok(body));
            assert_eq!(client.search("Dune").await, Err(SearchError::Transient), "{body}");
        }
    }

    #[tokio::test]
    async fn bad_document_past_the_cap_is_never_read() {
        let docs = (0..35)
            .map(|i| match i {
                30 => r#"{"title": "Odd One", "first_publish_year": "c. 1890"}"#.to_string(),
                _ => format!(r#"{{"title": "Book {i}"}}"#),
            })
            .collect::<Vec<_>>()
            .join(",");
        let body = format!(r#"{{"numFound": 35, "docs": [{docs}]}}"#);
        let client = SearchClient::new("http://catalog", Canned::ok(&body));
        let set = client.search("Dune").await.unwrap();
        assert_eq!(set.len(), 20);
        assert_eq!(set.records()[19].title, "Book 19");
    }

    #[tokio::test]
    async fn bad_document_within_the_cap_is_transient() {
        let body = r#"{"docs": [{"title": "Dune"}, {"title": "Emma", "cover_i": "none"}]}"#;
        let client = SearchClient::new("http://catalog", Canned::ok(body));
        assert_eq!(client.search("Dune").await, Err(SearchError::Transient));
    }

    #[tokio::test]
    async fn transport_failure_is_transient() {
        let client = SearchClient::new("http://catalog", Canned::unreachable());
        assert_eq!(client.search("Dune").await, Err(SearchError::Transient));
    }

    #[tokio::test]
    async fn missing_fields_do_not_fail_the_search() {
        let body = r#"{"docs": [
            {"title": "Anonymous Verse", "first_publish_year": 1802},
            {"title": "Dune", "author_name": ["Frank Herbert"], "cover_i": 11481354}
        ]}"#;
        let client = SearchClient::new("http://catalog", Canned::ok(body));
        let set = client.search("verse").await.unwrap();
        assert_eq!(
            set.records(),
            [
                BookRecord {
                    title:              "Anonymous Verse".into(),
                    authors:            vec![],
                    first_publish_year: Some(1802),
                    cover_id:           None,
                },
                BookRecord {
                    title:              "Dune".into(),
                    authors:            vec!["Frank Herbert".into()],
                    first_publish_year: None,
                    cover_id:           Some(11481354),
                },
            ]
        );
    }

    #[tokio::test]
    async fn configured_limit_lowers_cap() {
        let client = SearchClient::new("http://catalog", Canned::ok(&docs_body(35))).with_limit(3);
        assert_eq!(client.search("Dune").await.unwrap().len(), 3);
    }
}
