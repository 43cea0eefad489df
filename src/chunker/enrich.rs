//! Metadata enrichment for finished chunks.
//!
//! Works purely on the chunk's own text: math and code patterns are
//! recomputed locally rather than inherited from the document-level
//! block list, so a chunk's flags describe exactly what it carries.

use crate::chunker::lexicon::{CONCEPTS, DETECTORS, PARTICLES, VARIABLES};
use crate::chunker::protected::{find_protected_blocks, first_code_language, BlockKind};
use crate::chunker::splitter::RawChunk;
use crate::types::{generate_chunk_id, Chunk, ChunkMetadata, ChunkType, Document, IdMethod};

/// More math matches than this makes a latex-only chunk an equation
/// chunk rather than theory.
const EQUATION_THRESHOLD: usize = 3;

/// Caps on the detected-term lists.
const MAX_PHYSICS_TERMS: usize = 10;
const MAX_DETECTOR_MENTIONS: usize = 8;
const MAX_PARTICLE_MENTIONS: usize = 10;
const MAX_TAGS: usize = 8;

/// Keywords that mark instructional prose.
const TUTORIAL_MARKERS: [&str; 4] = ["tutorial", "example", "step", "how to"];

/// Keywords that mark experiment reference material.
const REFERENCE_MARKERS: [&str; 5] = ["detector", "atlas", "cms", "tracker", "calorimeter"];

/// Turn a raw split fragment into a finished chunk with metadata.
pub(crate) fn build_chunk(
    raw: RawChunk,
    section_title: &str,
    document: &Document,
    chunk_index: usize,
) -> Chunk {
    let blocks = find_protected_blocks(&raw.text);
    let math_matches = blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::DisplayMath | BlockKind::InlineMath))
        .count();
    let has_latex = math_matches > 0;
    let has_code = blocks.iter().any(|b| b.kind == BlockKind::Code);
    let code_language = if has_code {
        first_code_language(&raw.text)
    } else {
        None
    };

    let physics_terms = detect_physics_terms(&raw.text);
    let detector_mentions = detect_detectors(&raw.text);
    let particle_mentions = detect_particles(&raw.text);

    let chunk_type = classify(&raw.text, has_latex, has_code, math_matches);
    let tags = build_tags(
        has_latex,
        has_code,
        &physics_terms,
        &detector_mentions,
        &particle_mentions,
    );

    let metadata = ChunkMetadata {
        source: document.source.clone(),
        source_id: document.id.clone(),
        section: section_title.to_string(),
        chunk_index,
        chunk_type,
        tags,
        has_latex,
        has_code,
        code_language,
        start_char: raw.start,
        end_char: raw.end,
        physics_terms,
        detector_mentions,
        particle_mentions,
    };

    let id = generate_chunk_id(&raw.text, &document.source, IdMethod::Hash);
    Chunk::new(id, raw.text, metadata)
}

/// Concepts plus variables found in the text, deduplicated, capped.
///
/// Variables get an extra case-sensitive check so that Greek letters
/// and mixed-case symbols still match after lowercasing mangles them.
pub(crate) fn detect_physics_terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut terms: Vec<String> = Vec::new();

    for concept in CONCEPTS {
        if lower.contains(&concept.to_lowercase()) {
            push_unique(&mut terms, concept);
        }
    }
    for variable in VARIABLES {
        if lower.contains(&variable.to_lowercase()) || text.contains(variable) {
            push_unique(&mut terms, variable);
        }
    }

    terms.truncate(MAX_PHYSICS_TERMS);
    terms
}

/// Detector names found in the text, in lexicon order.
///
/// Only the leading lexicon entries participate, by contract with the
/// downstream metadata schema.
pub(crate) fn detect_detectors(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    DETECTORS
        .iter()
        .take(MAX_DETECTOR_MENTIONS)
        .filter(|detector| lower.contains(&detector.to_lowercase()))
        .map(|detector| detector.to_string())
        .collect()
}

/// Particle names found in the text, deduplicated, capped.
pub(crate) fn detect_particles(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut particles: Vec<String> = Vec::new();
    for particle in PARTICLES {
        if lower.contains(&particle.to_lowercase()) {
            push_unique(&mut particles, particle);
        }
    }
    particles.truncate(MAX_PARTICLE_MENTIONS);
    particles
}

/// Classify a chunk by its content.
///
/// The precedence is deliberate and load-bearing: code wins over
/// tutorial-flavored prose, and `Mixed` ignores the equation-count
/// threshold entirely.
pub(crate) fn classify(
    text: &str,
    has_latex: bool,
    has_code: bool,
    math_matches: usize,
) -> ChunkType {
    if has_latex && has_code {
        return ChunkType::Mixed;
    }
    if has_code {
        return ChunkType::Code;
    }
    if has_latex {
        return if math_matches > EQUATION_THRESHOLD {
            ChunkType::Equation
        } else {
            ChunkType::Theory
        };
    }

    let lower = text.to_lowercase();
    if TUTORIAL_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return ChunkType::Tutorial;
    }
    if REFERENCE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return ChunkType::Reference;
    }
    ChunkType::Theory
}

/// Assemble the tag list: content markers, leading physics terms and
/// detectors, particle flags. Deduplicated and capped.
pub(crate) fn build_tags(
    has_latex: bool,
    has_code: bool,
    physics_terms: &[String],
    detector_mentions: &[String],
    particle_mentions: &[String],
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if has_latex {
        push_unique(&mut tags, "equations");
    }
    if has_code {
        push_unique(&mut tags, "code-example");
    }
    for term in physics_terms.iter().take(3) {
        push_unique(&mut tags, term);
    }
    for detector in detector_mentions.iter().take(2) {
        push_unique(&mut tags, detector);
    }
    if !particle_mentions.is_empty() {
        push_unique(&mut tags, "particles");
        if particle_mentions
            .iter()
            .any(|p| p.eq_ignore_ascii_case("higgs"))
        {
            push_unique(&mut tags, "higgs");
        }
    }

    tags.truncate(MAX_TAGS);
    tags
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
