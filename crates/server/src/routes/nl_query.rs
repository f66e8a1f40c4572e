// crates/server/src/routes/nl_query.rs
//! Natural-language query translation.
//!
//! - POST /jira/nl-query - Translate free text into a JQL query and describe it

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use jira_nlq_core::{describe, Translator};
use jira_nlq_types::NlQueryResponse;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlQueryRequest {
    pub query: String,
    /// Overrides the server-wide project allow-list for this request.
    #[serde(default)]
    pub project_keys: Option<Vec<String>>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/jira/nl-query", post(nl_query_handler))
}

/// POST /api/jira/nl-query
async fn nl_query_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NlQueryRequest>,
) -> ApiResult<Json<NlQueryResponse>> {
    let input = request.query.trim();
    if input.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let result = match request.project_keys {
        Some(keys) => Translator::with_project_keys(keys).translate(input),
        None => state.translator.translate(input),
    };
    let description = describe(&result.parts);

    tracing::info!(
        parts = result.parts.len(),
        confidence = result.confidence,
        "Translated natural-language query"
    );

    Ok(Json(NlQueryResponse {
        result,
        description,
    }))
}
