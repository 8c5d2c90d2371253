//! JSON HTTP API (`docsift serve`).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/health` | Health check (returns version) |
//! | `GET`    | `/documents` | List documents, optionally `?category=` |
//! | `GET`    | `/documents/{id}` | One document |
//! | `DELETE` | `/documents/{id}` | Remove a document |
//! | `POST`   | `/search` | Substring search with highlighting |
//! | `POST`   | `/search/advanced` | Include/exclude/category/type filter |
//! | `POST`   | `/similar` | Jaccard similarity to a document or text |
//! | `GET`    | `/suggest?q=&max=` | Word completions from the collection |
//! | `POST`   | `/classify` | Category and per-category confidence for text |
//! | `GET`    | `/categories` | Known categories with keyword counts |
//! | `POST`   | `/categories/{name}/keywords` | Add keywords to a category |
//! | `GET`    | `/stats` | Collection statistics |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "search query cannot be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use docsift_core::analytics::{category_analysis, generate_statistics};
use docsift_core::query::validate_query;
use docsift_core::search::suggest;
use docsift_core::{
    AdvancedQuery, CategoryScore, Classifier, Document, DocumentStore, Scope, SearchEngine,
    SearchHit, SimilarDocument,
};

use crate::classify::build_classifier;
use crate::config::Config;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DocumentStore>,
    /// One classifier for every request, so keyword updates are seen by
    /// later classifications.
    pub classifier: Arc<dyn Classifier>,
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn DocumentStore>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        let engine = SearchEngine::new(config.search.excerpt_limits());
        Self {
            config: Arc::new(config),
            store,
            classifier,
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/documents", get(handle_list_documents))
        .route(
            "/documents/{id}",
            get(handle_get_document).delete(handle_delete_document),
        )
        .route("/search", post(handle_search))
        .route("/search/advanced", post(handle_advanced_search))
        .route("/similar", post(handle_similar))
        .route("/suggest", get(handle_suggest))
        .route("/classify", post(handle_classify))
        .route("/categories", get(handle_categories))
        .route("/categories/{name}/keywords", post(handle_add_keywords))
        .route("/stats", get(handle_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Starts the HTTP server on `[server].bind` and runs until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let store = SqliteStore::open(config).await?;
    let classifier = build_classifier(config)?;
    tracing::info!(strategy = classifier.name(), "classifier ready");

    let app = router(AppState::new(config.clone(), Arc::new(store), classifier));

    println!("docsift API listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(err: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %err, "request failed");
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: err.to_string(),
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| bad_request(format!("invalid document id: '{}'", raw)))
}

async fn snapshot(state: &AppState) -> Result<Vec<Document>, AppError> {
    state.store.list_all().await.map_err(internal)
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ /documents ============

#[derive(Deserialize)]
struct ListParams {
    category: Option<String>,
}

async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = match params.category.as_deref() {
        Some(c) => state.store.list_by_category(c).await.map_err(internal)?,
        None => snapshot(&state).await?,
    };
    Ok(Json(documents))
}

async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let id = parse_id(&id)?;
    match state.store.get(id).await.map_err(internal)? {
        Some(doc) => Ok(Json(doc)),
        None => Err(not_found(format!("document not found: {}", id))),
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    deleted: i64,
}

async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(&id)?;
    if state.store.delete(id).await.map_err(internal)? {
        tracing::info!(id, "document deleted");
        Ok(Json(DeleteResponse { deleted: id }))
    } else {
        Err(not_found(format!("document not found: {}", id)))
    }
}

// ============ POST /search, /search/advanced ============

#[derive(Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default)]
    scope: Scope,
    #[serde(default)]
    case_sensitive: bool,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse {
    total: usize,
    results: Vec<SearchHit>,
}

async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = validate_query(&req.query).map_err(|e| bad_request(e.to_string()))?;
    let documents = snapshot(&state).await?;

    let mut results = state
        .engine
        .search(&documents, &query, req.scope, req.case_sensitive);
    let total = results.len();
    results.truncate(req.limit.unwrap_or(state.config.search.limit));

    Ok(Json(SearchResponse { total, results }))
}

async fn handle_advanced_search(
    State(state): State<AppState>,
    Json(query): Json<AdvancedQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let documents = snapshot(&state).await?;
    let mut results = state.engine.advanced_search(&documents, &query);
    let total = results.len();
    results.truncate(state.config.search.limit);
    Ok(Json(SearchResponse { total, results }))
}

// ============ POST /similar ============

#[derive(Deserialize)]
struct SimilarRequest {
    id: Option<i64>,
    text: Option<String>,
    threshold: Option<f64>,
}

#[derive(Serialize)]
struct SimilarResponse {
    results: Vec<SimilarDocument>,
}

async fn handle_similar(
    State(state): State<AppState>,
    Json(req): Json<SimilarRequest>,
) -> Result<Json<SimilarResponse>, AppError> {
    let threshold = req
        .threshold
        .unwrap_or(state.config.search.similarity_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(bad_request("threshold must be in [0.0, 1.0]"));
    }

    let documents = snapshot(&state).await?;
    let (reference, exclude) = match (req.id, req.text) {
        (_, Some(text)) => (text, None),
        (Some(id), None) => match documents.iter().find(|d| d.id == id) {
            Some(doc) => (doc.content.clone(), Some(id)),
            None => return Err(not_found(format!("document not found: {}", id))),
        },
        (None, None) => return Err(bad_request("provide either id or text")),
    };

    let mut results: Vec<SimilarDocument> = state
        .engine
        .find_similar(&documents, &reference, threshold)
        .into_iter()
        .filter(|s| Some(s.hit.id) != exclude)
        .collect();
    results.truncate(state.config.search.limit);
    Ok(Json(SimilarResponse { results }))
}

// ============ GET /suggest ============

#[derive(Deserialize)]
struct SuggestParams {
    #[serde(default)]
    q: String,
    max: Option<usize>,
}

#[derive(Serialize)]
struct SuggestResponse {
    suggestions: Vec<String>,
}

async fn handle_suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, AppError> {
    let documents = snapshot(&state).await?;
    let max = params.max.unwrap_or(state.config.search.max_suggestions);
    Ok(Json(SuggestResponse {
        suggestions: suggest(&documents, &params.q, max),
    }))
}

// ============ POST /classify ============

#[derive(Deserialize)]
struct ClassifyRequest {
    text: String,
}

#[derive(Serialize)]
struct ClassifyResponse {
    category: String,
    strategy: &'static str,
    confidence: Vec<CategoryScore>,
}

async fn handle_classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let category = state.classifier.classify(&req.text).map_err(internal)?;
    let confidence = state
        .classifier
        .classification_confidence(&req.text)
        .map_err(internal)?;
    Ok(Json(ClassifyResponse {
        category,
        strategy: state.classifier.name(),
        confidence,
    }))
}

// ============ /categories ============

#[derive(Serialize)]
struct CategoryInfo {
    name: String,
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<CategoryInfo>,
}

async fn handle_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let keywords = state.classifier.keywords();
    let categories = keywords
        .categories()
        .map_err(internal)?
        .into_iter()
        .map(|name| {
            let words = keywords.category_keywords(&name)?;
            Ok(CategoryInfo {
                name,
                keywords: words,
            })
        })
        .collect::<docsift_core::error::Result<Vec<_>>>()
        .map_err(internal)?;
    Ok(Json(CategoriesResponse { categories }))
}

#[derive(Deserialize)]
struct AddKeywordsRequest {
    keywords: Vec<String>,
}

#[derive(Serialize)]
struct AddKeywordsResponse {
    category: String,
    added: usize,
    keywords: Vec<String>,
}

async fn handle_add_keywords(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<AddKeywordsRequest>,
) -> Result<Json<AddKeywordsResponse>, AppError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(bad_request("category name must not be empty"));
    }
    if req.keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(bad_request("keywords must not be empty"));
    }

    let keywords = state.classifier.keywords();
    let added = keywords
        .add_category_keywords(&name, &req.keywords)
        .map_err(internal)?;
    let current = keywords.category_keywords(&name).map_err(internal)?;
    Ok(Json(AddKeywordsResponse {
        category: name,
        added,
        keywords: current,
    }))
}

// ============ GET /stats ============

async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let documents = snapshot(&state).await?;
    Ok(Json(serde_json::json!({
        "statistics": generate_statistics(&documents),
        "categories": category_analysis(&documents),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use docsift_core::{InMemoryStore, KeywordClassifier, NewDocument};
    use tower::ServiceExt;

    fn test_config() -> Config {
        toml::from_str("[db]\npath = \"unused.sqlite\"\n").unwrap()
    }

    async fn app_with_docs(docs: &[(&str, &str)]) -> (Router, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        for (title, content) in docs {
            store
                .add(NewDocument {
                    filename: format!("{title}.txt"),
                    title: title.to_string(),
                    content: content.to_string(),
                    size: content.len() as i64,
                    media_type: "text/plain".to_string(),
                    category: None,
                    processing_seconds: Some(0.01),
                    raw: None,
                })
                .await
                .unwrap();
        }
        let state = AppState::new(
            test_config(),
            store.clone(),
            Arc::new(KeywordClassifier::default()),
        );
        (router(state), store)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (app, _) = app_with_docs(&[]).await;
        let (status, json) = send(&app, get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn search_highlights_and_validates() {
        let (app, _) = app_with_docs(&[
            ("fox", "The quick brown fox jumps."),
            ("dog", "A lazy dog sleeps."),
        ])
        .await;

        let (status, json) = send(&app, post_json("/search", serde_json::json!({"query": "fox"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(
            json["results"][0]["excerpt"],
            "The quick brown <mark>fox</mark> jumps."
        );

        let (status, json) = send(&app, post_json("/search", serde_json::json!({"query": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn missing_and_malformed_ids() {
        let (app, _) = app_with_docs(&[("one", "content")]).await;

        let (status, json) = send(&app, get_req("/documents/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");

        let (status, _) = send(&app, get_req("/documents/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = send(&app, get_req("/documents/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "one");
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let (app, store) = app_with_docs(&[("one", "content")]).await;
        let req = Request::builder()
            .method("DELETE")
            .uri("/documents/1")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["deleted"], 1);
        assert!(store.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn added_keywords_affect_classification() {
        let (app, _) = app_with_docs(&[]).await;
        let text = "kubernetes helm chart rollout";

        let (_, json) = send(&app, post_json("/classify", serde_json::json!({"text": text}))).await;
        assert_eq!(json["category"], "Other");

        let (status, json) = send(
            &app,
            post_json(
                "/categories/Platform/keywords",
                serde_json::json!({"keywords": ["Kubernetes", "helm", "rollout"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["added"], 3);

        let (_, json) = send(&app, post_json("/classify", serde_json::json!({"text": text}))).await;
        assert_eq!(json["category"], "Platform");
        assert_eq!(json["strategy"], "keyword");
    }

    #[tokio::test]
    async fn similar_excludes_reference_document() {
        let (app, _) = app_with_docs(&[
            ("a", "solar panels convert sunlight into power"),
            ("b", "solar panels convert sunlight into electricity"),
            ("c", "medieval castles had thick stone walls"),
        ])
        .await;

        let (status, json) = send(&app, post_json("/similar", serde_json::json!({"id": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn suggest_and_stats() {
        let (app, _) = app_with_docs(&[("t", "testing telemetry tests")]).await;

        let (_, json) = send(&app, get_req("/suggest?q=te&max=2")).await;
        assert_eq!(json["suggestions"], serde_json::json!(["telemetry", "testing"]));

        let (status, json) = send(&app, get_req("/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["statistics"]["total_documents"], 1);
    }
}
