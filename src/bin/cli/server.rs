use anyhow::Result;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, routing::get, Json, Router};
use local_ip_address::local_ip;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

use bookfinder::{
    classify::classify,
    config::Config,
    cover::CoverRef,
    error::SearchError,
    openlibrary::SearchClient,
    types::{book_record::BookRecord, query, search_field::SearchFieldTag},
};

pub struct TheStateOfAffairs {
    client: SearchClient,
    config: Config,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q:     Option<String>,
    field: Option<String>,
}

#[derive(Serialize)]
struct BookView<'a> {
    #[serde(flatten)]
    record: &'a BookRecord,
    cover:  CoverRef,
}

fn router(state: Arc<TheStateOfAffairs>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/classify", get(classify_query))
        .with_state(state)
}

pub async fn start(config: Config, port: u16) -> Result<()> {
    let client = SearchClient::from_config(&config)?;
    let state = Arc::new(TheStateOfAffairs { client, config });

    let ip = local_ip().unwrap_or_else(|e| {
        warn!("Couldn't get local ip address ({e}), using loopback.");
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    });
    let addr = SocketAddr::from((ip, port));
    info!("Listening on {ip}:{port}.");
    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await?;
    Ok(())
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn submitted_query(params: &SearchParams) -> Option<query::Query> {
    params
        .q
        .as_deref()
        .map(query::Query::from)
        .filter(query::Query::is_submittable)
}

async fn search(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> Response {
    let Some(query) = submitted_query(&params) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing search query.");
    };
    let field = match params.field.as_deref().map(str::parse::<SearchFieldTag>) {
        None => None,
        Some(Ok(field)) => Some(field),
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    info!("Received {query:?}.");
    let outcome = match field {
        Some(field) => state.client.search_with_field(query.as_str(), field).await,
        None => state.client.search(query.as_str()).await,
    };
    match outcome {
        Ok(results) => {
            let books = results
                .iter()
                .map(|record| BookView {
                    record,
                    cover: CoverRef::resolve(record.cover_id, &state.config),
                })
                .collect::<Vec<_>>();
            Json(json!({ "field": results.field(), "books": books })).into_response()
        }
        Err(e @ SearchError::NoResults) => error_response(StatusCode::NOT_FOUND, e.message()),
        Err(e @ SearchError::Transient) => error_response(StatusCode::BAD_GATEWAY, e.message()),
    }
}

async fn classify_query(Query(params): Query<SearchParams>) -> Response {
    let q = params.q.unwrap_or_default();
    Json(json!({ "query": q, "field": classify(&q) })).into_response()
}
