use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod handlers;
pub mod render;
pub mod state;
pub mod view;

pub use config::ServerConfig;
pub use state::AppState;
pub use view::{filter_articles, SectionFilter, ViewState};

/// API routes plus static files from `static_dir`, falling back to its
/// `index.html` for any other path.
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/api/news/cards", get(handlers::get_news_cards))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub async fn serve(config: &ServerConfig, state: AppState) -> hl_core::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        static_dir = %config.static_dir.display(),
        "Headlines server running at http://localhost:{}",
        config.port
    );
    axum::serve(listener, create_app(state, &config.static_dir)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{AppState, ServerConfig};
    pub use hl_core::{Article, Error, Result};
}
