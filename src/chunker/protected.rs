//! Protected-block extraction.
//!
//! Finds the spans of a document that must never be split across a chunk
//! boundary: display math (`$$...$$`), inline math (`$...$`), and fenced
//! code blocks. Patterns are scanned over the whole document once; the
//! resulting block list is read-only for the rest of the pipeline.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Display math: two-dollar delimiters, content without a dollar
    /// sign, newlines allowed.
    static ref DISPLAY_MATH: Regex = Regex::new(r"\$\$[^$]+\$\$").unwrap();

    /// Inline math candidate: single-dollar delimiters, content without
    /// dollars or newlines. Adjacency to another dollar is rejected in
    /// code, since that would fire inside display delimiters.
    static ref INLINE_MATH: Regex = Regex::new(r"\$[^$\n]+\$").unwrap();

    /// Fenced code with an optional bare language word after the
    /// opening fence.
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```(\w+)?\n.*?```").unwrap();
}

/// What kind of span a protected block covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    DisplayMath,
    InlineMath,
    Code,
}

/// A span of text that must stay whole during splitting.
///
/// Offsets are byte positions into the scanned text, always on
/// character boundaries since they come from regex matches.
#[derive(Debug, Clone)]
pub struct ProtectedBlock {
    pub start: usize,
    pub end: usize,
    pub kind: BlockKind,
    pub content: String,
}

impl ProtectedBlock {
    /// Whether `offset` falls strictly inside this block.
    pub fn contains_strictly(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }
}

/// Find every protected span in `text`, sorted by start offset.
///
/// The three pattern classes are matched independently; no overlap
/// resolution is performed. A `$` inside a code fence will produce both
/// a code block and a math block over the same region, and callers must
/// tolerate that.
pub fn find_protected_blocks(text: &str) -> Vec<ProtectedBlock> {
    let mut blocks = Vec::new();

    for m in DISPLAY_MATH.find_iter(text) {
        blocks.push(ProtectedBlock {
            start: m.start(),
            end: m.end(),
            kind: BlockKind::DisplayMath,
            content: m.as_str().to_string(),
        });
    }

    for m in INLINE_MATH.find_iter(text) {
        let preceded = text[..m.start()].as_bytes().last() == Some(&b'$');
        let followed = text[m.end()..].as_bytes().first() == Some(&b'$');
        if preceded || followed {
            continue;
        }
        blocks.push(ProtectedBlock {
            start: m.start(),
            end: m.end(),
            kind: BlockKind::InlineMath,
            content: m.as_str().to_string(),
        });
    }

    for m in CODE_FENCE.find_iter(text) {
        blocks.push(ProtectedBlock {
            start: m.start(),
            end: m.end(),
            kind: BlockKind::Code,
            content: m.as_str().to_string(),
        });
    }

    blocks.sort_by_key(|b| b.start);
    blocks
}

/// Language tag of the first code fence in `text`, if it carries one.
pub fn first_code_language(text: &str) -> Option<String> {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_math_spans_lines() {
        let text = "Before\n$$E = mc^2\n+ pc$$\nAfter";
        let blocks = find_protected_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::DisplayMath);
        assert_eq!(blocks[0].content, "$$E = mc^2\n+ pc$$");
    }

    #[test]
    fn test_inline_math_skips_display_delimiters() {
        let text = "The mass $m_H = 125$ GeV and $$H \\to ZZ$$ channel.";
        let blocks = find_protected_blocks(text);

        let inline: Vec<_> = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::InlineMath)
            .collect();
        assert_eq!(inline.len(), 1);
        assert_eq!(inline[0].content, "$m_H = 125$");

        let display: Vec<_> = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::DisplayMath)
            .collect();
        assert_eq!(display.len(), 1);
    }

    #[test]
    fn test_inline_math_stops_at_newline() {
        let text = "A lone $ here\nand another $ there";
        let blocks = find_protected_blocks(text);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_code_fence_with_language() {
        let text = "Intro\n```python\nprint('hi')\n```\nOutro";
        let blocks = find_protected_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Code);
        assert!(blocks[0].content.starts_with("```python"));
        assert_eq!(first_code_language(text), Some("python".to_string()));
    }

    #[test]
    fn test_code_fence_without_language() {
        let text = "```\nplain block\n```";
        let blocks = find_protected_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(first_code_language(text), None);
    }

    #[test]
    fn test_overlapping_classes_all_reported() {
        // A dollar pair inside a fence: both the fence and the math span
        // are reported, unresolved.
        let text = "```\ncost is $5 or $6 today\n```";
        let blocks = find_protected_blocks(text);
        assert!(blocks.iter().any(|b| b.kind == BlockKind::Code));
        assert!(blocks.iter().any(|b| b.kind == BlockKind::InlineMath));
    }

    #[test]
    fn test_blocks_sorted_by_start() {
        let text = "$a$ text $$b$$ more ```\ncode\n```";
        let blocks = find_protected_blocks(text);
        let starts: Vec<usize> = blocks.iter().map(|b| b.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_empty_text() {
        assert!(find_protected_blocks("").is_empty());
    }
}
