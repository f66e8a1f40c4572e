// crates/server/src/routes/mod.rs
//! API route handlers for the jira-nlq server.

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod nl_query;
pub mod searches;

/// Create the API router with all routes.
///
/// Routes:
/// - GET    /api/health                       - Health check
/// - POST   /api/jira/nl-query                - Translate free text to JQL
/// - GET    /api/jira/searches/recent         - List recent searches
/// - POST   /api/jira/searches/recent         - Record a recent search
/// - DELETE /api/jira/searches/recent         - Clear recent searches
/// - DELETE /api/jira/searches/recent/{id}    - Remove one recent search
/// - GET    /api/jira/searches/favorites      - List favorites
/// - POST   /api/jira/searches/favorites      - Save a favorite
/// - DELETE /api/jira/searches/favorites/{id} - Remove a favorite
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", nl_query::router())
        .nest("/api", searches::router())
        .with_state(state)
}
