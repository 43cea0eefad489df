//! Physics Chunker Library
//!
//! A physics-aware document chunking service for RAG pipelines.
//! Splits long-form physics literature into retrieval-sized chunks
//! without severing LaTeX math or code listings, and enriches each
//! chunk with domain metadata for retrieval and ranking.

pub mod api;
pub mod batch;
pub mod chunker;
pub mod export;
pub mod types;

pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use chunker::PhysicsChunker;
pub use types::{Chunk, ChunkMetadata, ChunkType, ChunkerConfig, Document, DocumentMetadata};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::*;
    pub use crate::chunker::PhysicsChunker;
    pub use crate::types::*;
}

/// Default target chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Default minimum chunk size in characters; smaller tails are merged
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 200;
