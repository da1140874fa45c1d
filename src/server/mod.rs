mod docs;
pub mod handlers;
mod types;

pub use docs::ALLOWED_DOCS;
pub use types::*;

use crate::{config::Config, llm::OpenAiClient, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/ask", post(handlers::ask))
        .route("/api/docs", get(handlers::serve_doc))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(config: Config) -> Result<()> {
    let client = OpenAiClient::new(config.llm.clone())?;
    info!("Using model {} via {}", client.model(), config.llm.provider);

    let app_state = AppState {
        client: Arc::new(client),
        docs_dir: config.docs.directory.clone(),
        system_prompt: config.llm.system_prompt.clone(),
    };

    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
