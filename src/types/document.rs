//! Document types and boundary normalization.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_doc_type() -> String {
    "general".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_source() -> String {
    "unknown".to_string()
}

/// Metadata associated with a source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    #[serde(default)]
    pub title: String,

    /// Section within a larger document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Descriptive tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Document type ("theory", "tutorial", "reference", "code", ...)
    #[serde(default = "default_doc_type")]
    pub doc_type: String,

    /// When the document was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Document author, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Source URL or file path, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Primary language
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            section: None,
            tags: Vec::new(),
            doc_type: default_doc_type(),
            created_at: Utc::now(),
            author: None,
            source: None,
            language: default_language(),
        }
    }
}

/// A document entering the chunking pipeline.
///
/// The boundary accepts either this structured record or an equivalent
/// JSON mapping; both normalize to this one canonical value via
/// [`Document::from_value`] before any chunking happens, so the pipeline
/// never branches on input shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier
    #[serde(default)]
    pub id: String,

    /// Full text content
    pub content: String,

    /// Original file path or source identifier
    #[serde(default = "default_source")]
    pub source: String,

    /// Associated metadata
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document. An empty `id` is replaced with a fresh UUID.
    pub fn new(id: &str, content: &str, source: &str) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            source: source.to_string(),
            metadata: DocumentMetadata::default(),
        }
        .normalize()
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Normalize a JSON mapping into the canonical document value.
    ///
    /// Missing optional fields take their defaults; `content` is the
    /// only required key.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: Document =
            serde_json::from_value(value).context("document mapping is missing required fields")?;
        Ok(document.normalize())
    }

    /// Backfill a generated id when the input left it empty.
    pub fn normalize(mut self) -> Self {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        self
    }

    /// Content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sparse_mapping_normalizes() {
        let doc = Document::from_value(serde_json::json!({
            "id": "doc_dict",
            "content": "Physics content about quarks and leptons.",
            "source": "dict.md",
        }))
        .unwrap();

        assert_eq!(doc.id, "doc_dict");
        assert_eq!(doc.source, "dict.md");
        assert_eq!(doc.metadata.doc_type, "general");
        assert_eq!(doc.metadata.language, "en");
    }

    #[test]
    fn test_missing_id_is_backfilled() {
        let doc = Document::from_value(serde_json::json!({
            "content": "Some content.",
        }))
        .unwrap();

        assert!(!doc.id.is_empty());
        assert_eq!(doc.source, "unknown");
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let result = Document::from_value(serde_json::json!({
            "id": "doc_1",
            "source": "broken.md",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_structured_metadata_round_trip() {
        let doc = Document::from_value(serde_json::json!({
            "id": "doc_meta",
            "content": "Content.",
            "source": "meta.md",
            "metadata": {
                "title": "The Higgs Boson",
                "tags": ["higgs", "physics"],
                "doc_type": "theory",
            },
        }))
        .unwrap();

        assert_eq!(doc.metadata.title, "The Higgs Boson");
        assert_eq!(doc.metadata.doc_type, "theory");
        assert_eq!(doc.metadata.tags.len(), 2);
    }
}
