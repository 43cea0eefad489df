//! Chunk type definitions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Minimum chunk text length accepted by [`validate_chunk`].
pub const MIN_VALID_CHUNK_CHARS: usize = 10;

/// Content classification for a chunk.
///
/// Serialized as its snake_case string form at the external boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Prose explaining physics concepts
    Theory,
    /// Code listings
    Code,
    /// Equation-dense derivations
    Equation,
    /// Worked numeric calculations
    Calculation,
    /// Detector hardware descriptions
    Detector,
    /// Analysis procedures
    Analysis,
    /// Step-by-step instructional content
    Tutorial,
    /// Experiment and hardware reference material
    Reference,
    /// Both equations and code present
    Mixed,
    /// Anything that fits no other category
    General,
}

impl ChunkType {
    /// The string form used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Theory => "theory",
            ChunkType::Code => "code",
            ChunkType::Equation => "equation",
            ChunkType::Calculation => "calculation",
            ChunkType::Detector => "detector",
            ChunkType::Analysis => "analysis",
            ChunkType::Tutorial => "tutorial",
            ChunkType::Reference => "reference",
            ChunkType::Mixed => "mixed",
            ChunkType::General => "general",
        }
    }
}

impl Default for ChunkType {
    fn default() -> Self {
        ChunkType::General
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata associated with a chunk.
///
/// A fixed-shape record: every field the downstream retrieval layer
/// consumes is enumerated here, with no arbitrary-key maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Original document source path or identifier
    pub source: String,

    /// ID of the source document
    pub source_id: String,

    /// Section heading this chunk belongs to (empty if untitled)
    pub section: String,

    /// Order of this chunk within its source document (0-indexed)
    pub chunk_index: usize,

    /// Content classification
    #[serde(default)]
    pub chunk_type: ChunkType,

    /// Deduplicated physics tags, at most 8
    pub tags: Vec<String>,

    /// Whether the chunk contains LaTeX math
    pub has_latex: bool,

    /// Whether the chunk contains fenced code
    pub has_code: bool,

    /// Language tag of the first code fence, if any
    pub code_language: Option<String>,

    /// Offset where this chunk's window starts in the source content
    pub start_char: usize,

    /// Offset where this chunk's window ends in the source content
    pub end_char: usize,

    /// Detected physics terms, deduplicated, at most 10
    pub physics_terms: Vec<String>,

    /// Detector mentions in lexicon order, at most 8
    pub detector_mentions: Vec<String>,

    /// Detected particle names, deduplicated, at most 10
    pub particle_mentions: Vec<String>,
}

/// A retrieval-sized text fragment with physics-domain metadata.
///
/// Chunks are immutable value records once created. The `embedding` and
/// `score` fields are populated only by downstream components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier for this chunk
    pub id: String,

    /// The actual text content of the chunk
    pub text: String,

    /// Associated metadata
    pub metadata: ChunkMetadata,

    /// Embedding vector (populated by the embedding service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Relevance score (populated during retrieval)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Chunk {
    /// Create a new chunk. An empty `id` is backfilled from the text
    /// and source with the default hash method.
    pub fn new(id: String, text: String, metadata: ChunkMetadata) -> Self {
        let id = if id.is_empty() {
            generate_chunk_id(&text, &metadata.source, IdMethod::Hash)
        } else {
            id
        };
        Self {
            id,
            text,
            metadata,
            embedding: None,
            score: None,
        }
    }

    /// Length of the chunk text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the chunk text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// How chunk identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMethod {
    /// Deterministic: SHA-256 over source and text prefix, first 16 hex chars
    Hash,
    /// A fresh random v4 UUID on every call
    Uuid,
}

/// Generate an identifier for a chunk.
///
/// The hash method is a pure function of `(source, first 100 chars of
/// text)`; two chunks sharing that prefix and source intentionally
/// collide. The uuid method differs across repeated calls.
pub fn generate_chunk_id(text: &str, source: &str, method: IdMethod) -> String {
    match method {
        IdMethod::Uuid => Uuid::new_v4().to_string(),
        IdMethod::Hash => {
            let prefix: String = text.chars().take(100).collect();
            let mut hasher = Sha256::new();
            hasher.update(source.as_bytes());
            hasher.update(b":");
            hasher.update(prefix.as_bytes());
            let digest = hex::encode(hasher.finalize());
            digest[..16].to_string()
        }
    }
}

/// Why a chunk failed downstream validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkValidationError {
    #[error("chunk id is required")]
    MissingId,
    #[error("chunk text is empty")]
    EmptyText,
    #[error("chunk text is too short (minimum {MIN_VALID_CHUNK_CHARS} characters)")]
    TooShort,
    #[error("invalid chunk_type: {0}")]
    UnknownType(String),
}

/// Chunk types accepted by the validation contract.
const VALID_TYPES: [ChunkType; 7] = [
    ChunkType::Theory,
    ChunkType::Code,
    ChunkType::Equation,
    ChunkType::Mixed,
    ChunkType::General,
    ChunkType::Tutorial,
    ChunkType::Reference,
];

/// Validate a chunk against the downstream data contract.
///
/// A merged tail chunk from a very short sectioned document can
/// legitimately fail the minimum-length check; that is the caller's
/// edge case to handle, not a reason to loosen the contract.
pub fn validate_chunk(chunk: &Chunk) -> Result<(), ChunkValidationError> {
    if chunk.id.is_empty() {
        return Err(ChunkValidationError::MissingId);
    }
    if chunk.text.trim().is_empty() {
        return Err(ChunkValidationError::EmptyText);
    }
    if chunk.text.len() < MIN_VALID_CHUNK_CHARS {
        return Err(ChunkValidationError::TooShort);
    }
    if !VALID_TYPES.contains(&chunk.metadata.chunk_type) {
        return Err(ChunkValidationError::UnknownType(
            chunk.metadata.chunk_type.as_str().to_string(),
        ));
    }
    Ok(())
}
