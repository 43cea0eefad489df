//! JSON-Lines serialization of chunk output.
//!
//! The downstream indexing collaborator consumes one chunk per line
//! with the exact metadata field set of [`crate::types::ChunkMetadata`].
//! Embedding and score are present only once populated downstream.

use std::io::Write;

use anyhow::Result;

use crate::types::Chunk;

/// Write chunks as JSON-Lines to `writer`.
pub fn write_jsonl<W: Write>(chunks: &[Chunk], mut writer: W) -> Result<()> {
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Serialize chunks to a JSON-Lines string.
pub fn to_jsonl_string(chunks: &[Chunk]) -> Result<String> {
    let mut buffer = Vec::new();
    write_jsonl(chunks, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::PhysicsChunker;
    use crate::types::Document;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_one_line_per_chunk() {
        let chunker = PhysicsChunker::default();
        let document = Document::new(
            "doc_x",
            "# A\n\nFirst section body.\n\n# B\n\nSecond section body.",
            "x.md",
        );
        let chunks = chunker.chunk_document(&document).unwrap();
        assert_eq!(chunks.len(), 2);

        let jsonl = to_jsonl_string(&chunks).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        for (line, chunk) in lines.iter().zip(&chunks) {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["id"], chunk.id.as_str());
            assert_eq!(value["metadata"]["source_id"], "doc_x");
            // The null language is serialized, not dropped: the line
            // format carries a fixed field set.
            assert!(value["metadata"].get("code_language").is_some());
            assert!(value.get("embedding").is_none());
            assert!(value.get("score").is_none());
        }
    }

    #[test]
    fn test_empty_chunk_list() {
        assert_eq!(to_jsonl_string(&[]).unwrap(), "");
    }
}
