// crates/server/src/routes/searches.rs
//! Recent and favorite search endpoints.
//!
//! - GET    /jira/searches/recent           - Recent searches, newest first
//! - POST   /jira/searches/recent           - Record a search
//! - DELETE /jira/searches/recent           - Clear recent searches
//! - DELETE /jira/searches/recent/{id}      - Forget one recent search
//! - GET    /jira/searches/favorites        - Favorites in insertion order
//! - POST   /jira/searches/favorites        - Save a named favorite
//! - DELETE /jira/searches/favorites/{id}   - Remove a favorite

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use jira_nlq_store::SearchHistory;
use jira_nlq_types::{FavoriteSearch, RecentSearch};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecentRequest {
    pub natural_query: String,
    pub query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFavoriteRequest {
    pub name: String,
    pub natural_query: String,
    pub query: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/jira/searches/recent",
            get(list_recent).post(save_recent).delete(clear_recent),
        )
        .route("/jira/searches/recent/{id}", delete(remove_recent))
        .route(
            "/jira/searches/favorites",
            get(list_favorites).post(save_favorite),
        )
        .route("/jira/searches/favorites/{id}", delete(remove_favorite))
}

/// Run a history operation off the async runtime; the file store does
/// blocking IO.
async fn with_history<T, F>(state: Arc<AppState>, op: F) -> ApiResult<T>
where
    F: FnOnce(&SearchHistory) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&state.history))
        .await
        .map_err(|e| ApiError::Internal(format!("Search store task failed: {e}")))
}

fn require_non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

async fn list_recent(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RecentSearch>>> {
    with_history(state, |h| h.get_recent_searches()).await.map(Json)
}

async fn save_recent(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRecentRequest>,
) -> ApiResult<Json<RecentSearch>> {
    require_non_blank("naturalQuery", &request.natural_query)?;
    with_history(state, move |h| {
        h.save_recent_search(&request.natural_query, &request.query)
    })
    .await
    .map(Json)
}

async fn clear_recent(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    with_history(state, |h| h.clear_recent_searches()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_recent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    with_history(state, move |h| h.remove_recent_search(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_favorites(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FavoriteSearch>>> {
    with_history(state, |h| h.get_favorite_searches()).await.map(Json)
}

async fn save_favorite(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveFavoriteRequest>,
) -> ApiResult<Json<FavoriteSearch>> {
    require_non_blank("name", &request.name)?;
    require_non_blank("naturalQuery", &request.natural_query)?;
    with_history(state, move |h| {
        h.save_favorite_search(request.name.trim(), &request.natural_query, &request.query)
    })
    .await
    .map(Json)
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    with_history(state, move |h| h.remove_favorite_search(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
