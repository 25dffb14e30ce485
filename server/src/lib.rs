use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use boolsearch_core::corpus::index_directory;
use boolsearch_core::tokenizer::tokenize;
use boolsearch_core::{InvertedIndex, QueryError, QueryResult, SharedIndex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<QueryResult>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

#[derive(Deserialize)]
pub struct NewDocument {
    pub path: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct DocumentAdded {
    pub path: String,
    pub num_docs: u32,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub index: SharedIndex,
    pub admin_token: Option<String>,
}

/// Index every file under `corpus_dir` and serve it. Without an
/// `admin_token` the document upload endpoint refuses every request.
pub fn build_app(corpus_dir: &Path, admin_token: Option<String>) -> Result<Router> {
    let index = index_directory(corpus_dir)?;
    Ok(router(index, admin_token))
}

pub fn router(index: InvertedIndex, admin_token: Option<String>) -> Router {
    let app_state = AppState { index: index.into_shared(), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let origins: Vec<_> = std::env::var("CORS_ALLOW_ORIGIN")
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/documents", post(add_document_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let results = state.index.read().query_str(&params.q).map_err(query_error)?;

    let total_hits = results.len();
    let k = params.k.clamp(1, 100);
    let results = results.into_iter().take(k).collect();
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, total_hits, took_s, "search");
    Ok(Json(SearchResponse { query: params.q, took_s, total_hits, results }))
}

fn query_error(err: QueryError) -> ApiError {
    let status = match &err {
        QueryError::Syntax { .. } => StatusCode::BAD_REQUEST,
        QueryError::UnknownTerm(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(ErrorResponse { error: err.to_string(), kind: err.kind() }))
}

async fn add_document_handler(State(state): State<AppState>, headers: HeaderMap, Json(doc): Json<NewDocument>) -> Result<Json<DocumentAdded>, ApiError> {
    authorize(&state, &headers)?;
    let tokens = tokenize(&doc.text);
    let mut index = state.index.write();
    if index.has_document(&doc.path) {
        return Err(api_error(StatusCode::CONFLICT, "conflict", format!("{} is already indexed", doc.path)));
    }
    index.add_document(doc.path.clone(), tokens);
    tracing::info!(path = %doc.path, num_docs = index.num_docs(), "document added");
    Ok(Json(DocumentAdded { path: doc.path, num_docs: index.num_docs() }))
}

fn api_error(status: StatusCode, kind: &'static str, error: String) -> ApiError {
    (status, Json(ErrorResponse { error, kind }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(api_error(StatusCode::UNAUTHORIZED, "unauthorized", "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid admin token".into()))
    }
}
