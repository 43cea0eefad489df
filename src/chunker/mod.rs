//! Physics-aware document chunking.
//!
//! Splits long-form physics documents into retrieval-sized chunks
//! without ever severing a math expression or code listing, and attaches
//! the domain metadata downstream retrieval and ranking consume.

mod enrich;
pub mod lexicon;
mod protected;
mod sections;
mod splitter;

use anyhow::Result;
use tracing::{debug, warn};

use crate::types::{Chunk, ChunkerConfig, Document};

pub use protected::{find_protected_blocks, BlockKind, ProtectedBlock};
pub use sections::{split_by_sections, Section};

/// Chunks documents while preserving LaTeX expressions and code blocks.
///
/// The pipeline per document: section split, protected-block scan over
/// the whole content, boundary-safe window walk per section, then
/// metadata enrichment per produced chunk. One instance is immutable
/// and safe to share across threads.
pub struct PhysicsChunker {
    config: ChunkerConfig,
}

impl PhysicsChunker {
    /// Create a chunker with the given configuration.
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk a single document.
    ///
    /// Empty or whitespace-only content yields an empty list with a
    /// diagnostic, not an error; the operation is total over arbitrary
    /// string input.
    pub fn chunk_document(&self, document: &Document) -> Result<Vec<Chunk>> {
        let content = document.content.as_str();
        if content.trim().is_empty() {
            warn!(
                source = %document.source,
                source_id = %document.id,
                "document content is empty, nothing to chunk"
            );
            return Ok(Vec::new());
        }

        // Blocks are found once over the whole document; sections index
        // into the same offset space.
        let blocks = find_protected_blocks(content);

        let sections = if self.config.respect_sections {
            split_by_sections(content)
        } else {
            vec![Section::untitled(content, 0)]
        };

        let mut chunks = Vec::new();
        for section in &sections {
            let raw_chunks =
                splitter::split_section(&section.text, section.start_offset, &blocks, &self.config);
            for raw in raw_chunks {
                let chunk_index = chunks.len();
                chunks.push(enrich::build_chunk(raw, &section.title, document, chunk_index));
            }
        }

        debug!(
            source_id = %document.id,
            sections = sections.len(),
            chunks = chunks.len(),
            "chunked document"
        );

        Ok(chunks)
    }

    /// Chunk several documents sequentially, concatenating results in
    /// input order.
    pub fn chunk_documents(&self, documents: &[Document]) -> Result<Vec<Chunk>> {
        let mut all_chunks = Vec::new();
        for document in documents {
            all_chunks.extend(self.chunk_document(document)?);
        }
        Ok(all_chunks)
    }
}

impl Default for PhysicsChunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}
