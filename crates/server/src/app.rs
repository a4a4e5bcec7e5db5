//! HTTP surface: routes, handlers and shared state

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Html,
    routing::{get, post},
};
use news_relay_domain::{
    NewsSource, PostRequest, Publisher, Summarizer,
    usecases::{PublishUseCase, SearchUseCase, SummarizeUseCase},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Immutable state shared by every request
#[derive(Clone)]
pub struct AppState {
    search: Arc<SearchUseCase>,
    summarize: Arc<SummarizeUseCase>,
    publish: Arc<PublishUseCase>,
}

impl AppState {
    pub fn new(
        news: Arc<dyn NewsSource>,
        summarizer: Arc<dyn Summarizer>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            search: Arc::new(SearchUseCase::new(news)),
            summarize: Arc::new(SummarizeUseCase::new(summarizer)),
            publish: Arc::new(PublishUseCase::new(publisher)),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/news", get(news_handler))
        .route("/api/summarize", post(summarize_handler))
        .route("/api/post_to_x", post(post_to_x_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    #[serde(default)]
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    #[serde(default)]
    text: String,
    /// Persona id
    #[serde(default)]
    character: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    summary: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    success: bool,
    tweet_id: String,
    tweet_url: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn news_handler(
    State(state): State<AppState>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let payload = state.search.search(&params.query).await?;
    Ok(Json(payload.into_inner()))
}

async fn summarize_handler(
    State(state): State<AppState>,
    body: Result<Json<SummarizeBody>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(body) = body?;

    let summary = state
        .summarize
        .summarize(&body.text, body.character.as_deref())
        .await?;

    Ok(Json(SummarizeResponse {
        summary: summary.text,
    }))
}

async fn post_to_x_handler(
    State(state): State<AppState>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ApiError> {
    let Json(request) = body?;

    let result = state.publish.publish(&request).await?;

    Ok(Json(PostResponse {
        success: true,
        tweet_id: result.id,
        tweet_url: result.url,
    }))
}
