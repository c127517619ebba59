pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::processors::QueryDispatcher;

pub fn app_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/:metric", get(handlers::metric))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until Ctrl-C, then release the aggregation engine
pub async fn serve(config: &DashboardConfig, dispatcher: Arc<QueryDispatcher>) -> Result<()> {
    let app = app_router(AppState::new(dispatcher.clone()), &config.static_dir);

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(
        address = %bind_addr,
        engine = %dispatcher.selected_engine(),
        data_file = %dispatcher.data_file().display(),
        "Weather dashboard listening (visit http://{})",
        bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dispatcher.shutdown();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
