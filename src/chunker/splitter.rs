//! Boundary-safe sliding-window splitting for one section.
//!
//! A target-size window moves across the section text. Each window end
//! is first forced out of any protected block it landed in, then nudged
//! backward onto a natural break when one exists nearby. Tail fragments
//! below the minimum size are absorbed into the previous chunk.

use crate::chunker::protected::ProtectedBlock;
use crate::types::ChunkerConfig;

/// How far back from a target split point the boundary search looks
/// for a natural break.
const SEARCH_WINDOW: usize = 200;

/// Sentence terminators accepted as split points.
const SENTENCE_ENDS: [&str; 6] = [". ", ".\n", "? ", "?\n", "! ", "!\n"];

/// A split fragment before enrichment.
///
/// `start`/`end` are absolute offsets of the untrimmed window in the
/// original document; `text` is the trimmed window content, with
/// absorbed tails joined by blank lines.
#[derive(Debug, Clone)]
pub struct RawChunk {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Split one section's text into raw chunks.
///
/// A section that fits the target size is emitted whole, regardless of
/// the minimum size. Otherwise the window walk below guarantees at
/// least one chunk, keeps window starts non-decreasing, and leaves no
/// gap between consecutive windows.
pub fn split_section(
    text: &str,
    section_offset: usize,
    blocks: &[ProtectedBlock],
    config: &ChunkerConfig,
) -> Vec<RawChunk> {
    if text.is_empty() {
        return Vec::new();
    }

    if text.len() <= config.chunk_size {
        return vec![RawChunk {
            text: text.to_string(),
            start: section_offset,
            end: section_offset + text.len(),
        }];
    }

    let mut chunks: Vec<RawChunk> = Vec::new();
    let mut pos = 0usize;
    // Section-relative start of the most recently emitted chunk, for
    // the non-progress guard.
    let mut last_start = 0usize;

    loop {
        let mut target_end = ceil_char_boundary(text, (pos + config.chunk_size).min(text.len()));
        if target_end < text.len() {
            target_end = find_safe_boundary(text, pos, target_end, blocks, section_offset);
        }

        let candidate = text[pos..target_end].trim();

        if candidate.len() >= config.min_chunk_size || chunks.is_empty() {
            chunks.push(RawChunk {
                text: candidate.to_string(),
                start: section_offset + pos,
                end: section_offset + target_end,
            });
            last_start = pos;
        } else if let Some(previous) = chunks.last_mut() {
            // Absorb the short tail: extend the previous chunk's window
            // instead of consuming a new index.
            previous.text.push_str("\n\n");
            previous.text.push_str(candidate);
            previous.end = section_offset + target_end;
        }

        if target_end >= text.len() {
            break;
        }

        let mut next = floor_char_boundary(text, target_end.saturating_sub(config.overlap));
        if next <= last_start {
            // The overlap rewind would stall or move backward.
            next = target_end;
        }
        pos = next;
    }

    chunks
}

/// Resolve a tentative window end to a safe split point.
///
/// The block snap is a hard constraint: an end landing strictly inside a
/// protected block moves to that block's end (first containing block
/// only, and only if the snapped end still fits the section). The
/// backward search is a readability heuristic on top; a break that
/// would itself land inside a protected block is never chosen.
pub(crate) fn find_safe_boundary(
    text: &str,
    pos: usize,
    target_end: usize,
    blocks: &[ProtectedBlock],
    section_offset: usize,
) -> usize {
    let mut end = target_end;

    if let Some(block) = blocks
        .iter()
        .find(|b| b.contains_strictly(section_offset + end))
    {
        let snapped = block.end - section_offset;
        if snapped <= text.len() {
            end = snapped;
        }
    }

    let window_start = floor_char_boundary(text, end.saturating_sub(SEARCH_WINDOW).max(pos));
    let window = &text[window_start..end];

    let in_block = |window_idx: usize, delim_len: usize| {
        let abs = section_offset + window_start + window_idx + delim_len;
        blocks.iter().any(|b| b.contains_strictly(abs))
    };

    // Paragraph break, only past the window midpoint.
    if let Some(idx) = window
        .rmatch_indices("\n\n")
        .map(|(i, _)| i)
        .find(|&i| i > window.len() / 2 && !in_block(i, 2))
    {
        return window_start + idx + 2;
    }

    // Sentence end, only past one third of the window.
    if let Some(idx) = SENTENCE_ENDS
        .iter()
        .filter_map(|delim| {
            window
                .rmatch_indices(delim)
                .map(|(i, _)| i)
                .find(|&i| i > window.len() / 3 && !in_block(i, 2))
        })
        .max()
    {
        return window_start + idx + 2;
    }

    // Any line break, only past one third of the window.
    if let Some(idx) = window
        .rmatch_indices('\n')
        .map(|(i, _)| i)
        .find(|&i| i > window.len() / 3 && !in_block(i, 1))
    {
        return window_start + idx + 1;
    }

    // No natural break nearby; cut at the (possibly snapped) target,
    // even mid-word.
    end
}

/// Largest char boundary not past `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary not before `index`.
fn ceil_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
