//! Configuration types for chunking.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE};

/// Chunker configuration.
///
/// All sizes are character counts; there is no tokenizer anywhere in the
/// sizing path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Target characters per chunk
    pub chunk_size: usize,

    /// Characters re-included at the start of the next window
    pub overlap: usize,

    /// Threshold below which a tail fragment is merged into the
    /// previous chunk rather than emitted
    pub min_chunk_size: usize,

    /// Whether markdown headers gate chunking
    pub respect_sections: bool,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            respect_sections: true,
        }
    }
}

impl ChunkerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            min_chunk_size: std::env::var("MIN_CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MIN_CHUNK_SIZE),
            respect_sections: std::env::var("RESPECT_SECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Create a config with the given chunk size.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            ..Default::default()
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the minimum chunk size.
    pub fn with_min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.min_chunk_size = min_chunk_size;
        self
    }

    /// Set whether sections gate chunking.
    pub fn with_respect_sections(mut self, respect_sections: bool) -> Self {
        self.respect_sections = respect_sections;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChunkerConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.overlap, 100);
        assert_eq!(config.min_chunk_size, 200);
        assert!(config.respect_sections);
    }

    #[test]
    fn test_builders() {
        let config = ChunkerConfig::with_size(512)
            .with_overlap(50)
            .with_min_chunk_size(100)
            .with_respect_sections(false);
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.overlap, 50);
        assert_eq!(config.min_chunk_size, 100);
        assert!(!config.respect_sections);
    }
}
