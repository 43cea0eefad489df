//! Batch processing utilities for chunking many documents.
//!
//! Documents are fully independent once inside the chunker, so the
//! batch layer fans them out over blocking worker tasks and stitches
//! the results back together in input order.

use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::chunker::PhysicsChunker;
use crate::types::{Chunk, Document};

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum documents chunked concurrently
    pub concurrency: usize,
    /// Whether to continue on individual document failures
    pub continue_on_error: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            continue_on_error: true,
        }
    }
}

/// Result of batch processing.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub total_documents: usize,
    pub processed_documents: usize,
    pub failed_documents: usize,
    pub total_chunks: usize,
    pub errors: Vec<BatchError>,
}

/// Error during batch processing.
#[derive(Debug, Clone)]
pub struct BatchError {
    pub document_id: String,
    pub error: String,
}

/// Batch processor mapping documents to chunk lists.
pub struct BatchProcessor {
    chunker: Arc<PhysicsChunker>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(chunker: Arc<PhysicsChunker>, config: BatchConfig) -> Self {
        Self { chunker, config }
    }

    /// Chunk a batch of documents and return all chunks, concatenated
    /// in input order regardless of completion order.
    pub async fn process_batch(
        &self,
        documents: Vec<Document>,
    ) -> Result<(Vec<Chunk>, BatchResult)> {
        let total_documents = documents.len();
        info!(total_documents, "starting batch chunking");

        // buffered() preserves input order while letting up to
        // `concurrency` documents chunk at once.
        let outcomes: Vec<(String, Result<Vec<Chunk>>)> = stream::iter(documents)
            .map(|document| {
                let chunker = Arc::clone(&self.chunker);
                async move {
                    let document_id = document.id.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        chunker.chunk_document(&document)
                    })
                    .await
                    .map_err(anyhow::Error::from)
                    .and_then(|chunks| chunks);
                    (document_id, result)
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut all_chunks = Vec::new();
        let mut processed_documents = 0;
        let mut failed_documents = 0;
        let mut errors = Vec::new();

        for (document_id, outcome) in outcomes {
            match outcome {
                Ok(chunks) => {
                    all_chunks.extend(chunks);
                    processed_documents += 1;
                }
                Err(e) => {
                    failed_documents += 1;
                    warn!(document_id = %document_id, error = %e, "failed to chunk document");
                    errors.push(BatchError {
                        document_id,
                        error: e.to_string(),
                    });
                    if !self.config.continue_on_error {
                        return Err(e);
                    }
                }
            }
        }

        let result = BatchResult {
            total_documents,
            processed_documents,
            failed_documents,
            total_chunks: all_chunks.len(),
            errors,
        };

        info!(
            processed = result.processed_documents,
            failed = result.failed_documents,
            chunks = result.total_chunks,
            "batch chunking complete"
        );

        Ok((all_chunks, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkerConfig;
    use pretty_assertions::assert_eq;

    fn processor() -> BatchProcessor {
        let chunker = Arc::new(PhysicsChunker::new(ChunkerConfig::default()));
        BatchProcessor::new(chunker, BatchConfig::default())
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let documents = vec![
            Document::new("doc_1", "Alpha decay rates in heavy nuclei.", "a.md"),
            Document::new("doc_2", "Beta spectra and the neutrino hypothesis.", "b.md"),
            Document::new("doc_3", "Gamma ray calorimetry at colliders.", "c.md"),
        ];
        let (chunks, result) = processor().process_batch(documents).await.unwrap();

        let source_ids: Vec<&str> = chunks.iter().map(|c| c.metadata.source_id.as_str()).collect();
        assert_eq!(source_ids, vec!["doc_1", "doc_2", "doc_3"]);
        assert_eq!(result.processed_documents, 3);
        assert_eq!(result.failed_documents, 0);
        assert_eq!(result.total_chunks, 3);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (chunks, result) = processor().process_batch(Vec::new()).await.unwrap();
        assert!(chunks.is_empty());
        assert_eq!(result.total_documents, 0);
    }

    #[tokio::test]
    async fn test_empty_document_counts_as_processed() {
        let documents = vec![Document::new("doc_empty", "   ", "empty.md")];
        let (chunks, result) = processor().process_batch(documents).await.unwrap();
        assert!(chunks.is_empty());
        assert_eq!(result.processed_documents, 1);
    }
}
