//! HTTP request handlers for the chunking service.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::batch::{BatchConfig, BatchProcessor};
use crate::chunker::PhysicsChunker;
use crate::types::{Chunk, ChunkerConfig, Document};

/// Application state shared across handlers.
pub struct AppState {
    pub chunker: Arc<PhysicsChunker>,
    pub batch_config: BatchConfig,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Request to chunk a batch of documents.
///
/// Each entry may be a fully structured document or a sparse mapping
/// with just `content` and friends; both are normalized on entry.
#[derive(Debug, Deserialize)]
pub struct ChunkRequest {
    pub documents: Vec<serde_json::Value>,
}

/// Response carrying the produced chunks.
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub document_count: usize,
    pub chunk_count: usize,
    pub failed_documents: usize,
    pub chunks: Vec<Chunk>,
}

/// Chunk the submitted documents and return the results in input order.
pub async fn chunk_documents(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChunkRequest>,
) -> Result<Json<ChunkResponse>, StatusCode> {
    let mut documents = Vec::with_capacity(request.documents.len());
    for value in request.documents {
        match Document::from_value(value) {
            Ok(document) => documents.push(document),
            Err(e) => {
                warn!(error = %e, "rejecting malformed document");
                return Err(StatusCode::UNPROCESSABLE_ENTITY);
            }
        }
    }

    info!(documents = documents.len(), "received chunk request");

    let processor = BatchProcessor::new(Arc::clone(&state.chunker), state.batch_config.clone());
    let (chunks, result) = processor
        .process_batch(documents)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ChunkResponse {
        document_count: result.total_documents,
        chunk_count: result.total_chunks,
        failed_documents: result.failed_documents,
        chunks,
    }))
}

/// Active chunker configuration.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ChunkerConfig> {
    Json(state.chunker.config().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            chunker: Arc::new(PhysicsChunker::default()),
            batch_config: BatchConfig::default(),
        })
    }

    #[tokio::test]
    async fn test_chunk_endpoint_accepts_mappings() {
        let request = ChunkRequest {
            documents: vec![serde_json::json!({
                "id": "doc_1",
                "content": "Muon reconstruction in the tracker.",
                "source": "doc.md",
            })],
        };
        let response = chunk_documents(State(state()), Json(request)).await.unwrap();
        assert_eq!(response.0.document_count, 1);
        assert_eq!(response.0.chunk_count, 1);
        assert_eq!(response.0.chunks[0].metadata.source_id, "doc_1");
    }

    #[tokio::test]
    async fn test_chunk_endpoint_rejects_missing_content() {
        let request = ChunkRequest {
            documents: vec![serde_json::json!({ "id": "doc_1" })],
        };
        let status = chunk_documents(State(state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_health() {
        let response = health_check().await;
        assert_eq!(response.0.status, "healthy");
    }
}
