//! Core types for the chunking service.

mod chunk;
mod config;
mod document;

pub use chunk::{
    generate_chunk_id, validate_chunk, Chunk, ChunkMetadata, ChunkType, ChunkValidationError,
    IdMethod, MIN_VALID_CHUNK_CHARS,
};
pub use config::ChunkerConfig;
pub use document::{Document, DocumentMetadata};
