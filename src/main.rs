//! Physics Chunker Service - Main Entry Point
//!
//! A physics-aware chunking service for RAG pipelines.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use physics_chunker::api::handlers::{self, AppState};
use physics_chunker::batch::BatchConfig;
use physics_chunker::chunker::PhysicsChunker;
use physics_chunker::types::ChunkerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "physics_chunker=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = ChunkerConfig::from_env();

    info!("Starting Physics Chunker Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Chunk size: {} chars, overlap: {} chars",
        config.chunk_size, config.overlap
    );

    let state = Arc::new(AppState {
        chunker: Arc::new(PhysicsChunker::new(config)),
        batch_config: BatchConfig::default(),
    });

    // Build HTTP routes
    let app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Chunking
        .route("/chunk", post(handlers::chunk_documents))
        .route("/chunk/config", get(handlers::get_config))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3021);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
