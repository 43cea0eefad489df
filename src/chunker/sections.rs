//! Section splitting at markdown headers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Markdown header: 1-6 hashes, whitespace, title text, at a line start.
    static ref HEADER: Regex = Regex::new(r"(?m)^#{1,6}[ \t]+(.+)$").unwrap();
}

/// A contiguous region of a document delimited by markdown headers.
#[derive(Debug, Clone)]
pub struct Section {
    /// Header title, empty for untitled regions
    pub title: String,
    /// Region text, trimmed of surrounding whitespace
    pub text: String,
    /// Offset of `text[0]` in the document
    pub start_offset: usize,
}

impl Section {
    /// Build an untitled section covering `region`.
    ///
    /// The offset points at the first kept character, so positions in
    /// the trimmed text map back to the document by plain addition.
    pub(crate) fn untitled(region: &str, region_start: usize) -> Self {
        let leading = region.len() - region.trim_start().len();
        Self {
            title: String::new(),
            text: region.trim().to_string(),
            start_offset: region_start + leading,
        }
    }
}

/// Partition `text` into ordered sections at markdown headers.
///
/// A headerless document is a single untitled section at offset 0, as is
/// any non-empty text preceding the first header. Each header's section
/// runs from the header line itself to the next header or end of
/// document; the text is trimmed but `start_offset` keeps the untrimmed
/// position.
pub fn split_by_sections(text: &str) -> Vec<Section> {
    let headers: Vec<(usize, String)> = HEADER
        .captures_iter(text)
        .map(|caps| {
            let m = caps.get(0).unwrap();
            let title = caps.get(1).map(|t| t.as_str().trim()).unwrap_or("");
            (m.start(), title.to_string())
        })
        .collect();

    if headers.is_empty() {
        return vec![Section::untitled(text, 0)];
    }

    let mut sections = Vec::new();

    let leading = &text[..headers[0].0];
    if !leading.trim().is_empty() {
        sections.push(Section::untitled(leading, 0));
    }

    for (i, (start, title)) in headers.iter().enumerate() {
        let end = headers.get(i + 1).map(|h| h.0).unwrap_or(text.len());
        sections.push(Section {
            title: title.clone(),
            text: text[*start..end].trim().to_string(),
            start_offset: *start,
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_sections_with_header_lines() {
        let sections = split_by_sections("# T\n\nPara1.\n\n## S\n\nPara2.");
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].title, "T");
        assert_eq!(sections[0].text, "# T\n\nPara1.");
        assert_eq!(sections[0].start_offset, 0);

        assert_eq!(sections[1].title, "S");
        assert_eq!(sections[1].text, "## S\n\nPara2.");
        assert_eq!(sections[1].start_offset, 13);
    }

    #[test]
    fn test_headerless_document_is_one_section() {
        let sections = split_by_sections("Just a plain paragraph.\nNo headers here.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "");
        assert_eq!(sections[0].start_offset, 0);
        assert_eq!(sections[0].text, "Just a plain paragraph.\nNo headers here.");
    }

    #[test]
    fn test_leading_text_becomes_untitled_section() {
        let sections = split_by_sections("Preamble text.\n\n# First\n\nBody.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "");
        assert_eq!(sections[0].text, "Preamble text.");
        assert_eq!(sections[1].title, "First");
        assert_eq!(sections[1].start_offset, 16);
    }

    #[test]
    fn test_untitled_offset_skips_leading_whitespace() {
        let sections = split_by_sections("\n\n  Padded preamble.\n\n# H\n\nBody.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "Padded preamble.");
        // Offsets map trimmed text positions straight back into the
        // document.
        assert_eq!(sections[0].start_offset, 4);
        assert_eq!(sections[1].title, "H");
    }

    #[test]
    fn test_hashes_without_title_are_not_headers() {
        let sections = split_by_sections("######\n\nPlain text after a bare fence of hashes.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "");
    }

    #[test]
    fn test_seventh_hash_is_not_a_header() {
        let sections = split_by_sections("####### too deep\n\n# Real\n\nBody.");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "");
        assert_eq!(sections[0].text, "####### too deep");
        assert_eq!(sections[1].title, "Real");
    }

    #[test]
    fn test_deep_header_levels() {
        let sections = split_by_sections("###### Deep\n\nBody.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Deep");
    }
}
