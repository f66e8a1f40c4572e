// crates/server/src/main.rs
//! jira-nlq server binary.

use anyhow::{Context, Result};
use jira_nlq_server::{create_app, ServerConfig, StoreLocation};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,jira_nlq_server=info,jira_nlq_store=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    match &config.store {
        StoreLocation::File(path) => info!(path = %path.display(), "Using file search store"),
        StoreLocation::Memory => {
            tracing::warn!("Using in-memory search store; searches are lost on restart")
        }
    }
    if !config.project_keys.is_empty() {
        info!(project_keys = ?config.project_keys, "Project allow-list configured");
    }

    let app = create_app(config.build_state());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("jira-nlq server listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
