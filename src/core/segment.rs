//! Bounded-window text segmentation
//!
//! The segmenter splits extracted text into ordered, bounded, overlapping
//! chunks sized for the classification backend's input limit. It accumulates
//! whole paragraphs and never cuts inside one: a single paragraph longer than
//! the configured chunk size is emitted as its own oversized chunk rather
//! than being split mid-sentence.

use crate::domain::{Result, TextChunk, VigilError};
use regex::Regex;

/// Paragraph-accumulating segmenter with word-boundary-aware overlap
///
/// Chunk boundaries fall on paragraph boundaries. When a chunk closes, the
/// next buffer is seeded with a suffix of the closed chunk (at most `overlap`
/// characters, realigned forward to a word boundary) so context is not lost
/// across the cut.
pub struct Segmenter {
    chunk_size: usize,
    overlap: usize,
    paragraph_break: Regex,
}

impl Segmenter {
    /// Create a segmenter
    ///
    /// # Errors
    ///
    /// Returns a validation error if `chunk_size` is zero or `overlap` is not
    /// strictly smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(VigilError::Validation(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(VigilError::Validation(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
            paragraph_break: Regex::new(r"\n\s*\n").expect("static paragraph regex"),
        })
    }

    /// Split text into ordered, bounded, overlapping chunks
    ///
    /// Empty or whitespace-only input yields an empty sequence. Offsets are
    /// positions in the normalized text stream where consecutive chunks share
    /// their overlap region, so `start_char` of chunk *i+1* equals
    /// `end_char` of chunk *i* minus the seeded overlap length.
    pub fn segment(&self, text: &str, source_file: &str) -> Vec<TextChunk> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let paragraphs = self.split_paragraphs(text);

        let mut chunks: Vec<TextChunk> = Vec::new();
        let mut buffer = String::new();
        let mut chunk_start = 0usize;

        for paragraph in paragraphs {
            let buffer_chars = char_len(&buffer);
            if buffer_chars + char_len(&paragraph) > self.chunk_size && !buffer.is_empty() {
                chunks.push(TextChunk::new(
                    chunks.len(),
                    buffer.trim(),
                    chunk_start,
                    chunk_start + buffer_chars,
                    source_file,
                ));

                // Seed the next buffer with the closed chunk's overlap suffix
                let seed = self.overlap_suffix(&buffer);
                chunk_start += buffer_chars - char_len(seed);
                buffer = format!("{seed}{paragraph}");
            } else {
                buffer.push_str(&paragraph);
            }
        }

        if !buffer.trim().is_empty() {
            let buffer_chars = char_len(&buffer);
            chunks.push(TextChunk::new(
                chunks.len(),
                buffer.trim(),
                chunk_start,
                chunk_start + buffer_chars,
                source_file,
            ));
        }

        tracing::debug!(
            source_file = %source_file,
            chunk_count = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.overlap,
            "Segmented text"
        );

        chunks
    }

    /// Split text on blank-line boundaries, keeping the paragraph separator
    fn split_paragraphs(&self, text: &str) -> Vec<String> {
        self.paragraph_break
            .split(text)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("{p}\n\n"))
            .collect()
    }

    /// Word-boundary-aligned suffix of at most `overlap` characters
    ///
    /// Takes the trailing `overlap` characters and, if the window starts
    /// mid-word, drops through the first space so only whole words remain.
    fn overlap_suffix<'a>(&self, text: &'a str) -> &'a str {
        if self.overlap == 0 {
            return "";
        }
        if char_len(text) <= self.overlap {
            return text;
        }

        let window_start = text
            .char_indices()
            .rev()
            .nth(self.overlap - 1)
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let window = &text[window_start..];

        match window.find(' ') {
            Some(space_idx) if space_idx + 1 < window.len() => &window[space_idx + 1..],
            Some(_) => "",
            None => window,
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn paragraph(word: &str, words: usize) -> String {
        vec![word; words].join(" ")
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Segmenter::new(0, 0).is_err());
        assert!(Segmenter::new(100, 100).is_err());
        assert!(Segmenter::new(100, 150).is_err());
        assert!(Segmenter::new(100, 99).is_ok());
    }

    #[test_case("" ; "empty input")]
    #[test_case("   \n\t  \n\n  " ; "whitespace only input")]
    fn test_blank_input_yields_no_chunks(text: &str) {
        let segmenter = Segmenter::new(1000, 200).unwrap();
        assert!(segmenter.segment(text, "f.txt").is_empty());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let segmenter = Segmenter::new(1000, 200).unwrap();
        let chunks = segmenter.segment("Contact me at jane@example.com for details.", "f.txt");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_id, 0);
        assert_eq!(
            chunks[0].content,
            "Contact me at jane@example.com for details."
        );
        assert_eq!(chunks[0].source_file, "f.txt");
    }

    #[test]
    fn test_two_paragraphs_roll_over_into_two_chunks() {
        // 600 and 700 character paragraphs with chunk_size 1000 must split
        let first = paragraph("alpha", 100); // 599 chars
        let second = paragraph("bravo", 117); // 701 chars
        let text = format!("{first}\n\n{second}");

        let segmenter = Segmenter::new(1000, 100).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].content.starts_with("alpha"));
        assert!(chunks[1].content.ends_with("bravo"));
    }

    #[test]
    fn test_overlap_seed_is_word_aligned_suffix_of_previous_chunk() {
        let first = paragraph("alpha", 100);
        let second = paragraph("bravo", 117);
        let text = format!("{first}\n\n{second}");

        let overlap = 100;
        let segmenter = Segmenter::new(1000, overlap).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");
        assert_eq!(chunks.len(), 2);

        // The second chunk starts with the seed, which runs up to the first
        // paragraph boundary inside it
        let seed = chunks[1]
            .content
            .split("\n\n")
            .next()
            .expect("seed before paragraph break");

        assert!(!seed.is_empty());
        assert!(seed.chars().count() <= overlap);
        assert!(chunks[0].content.ends_with(seed.trim_end()));
        // Word-aligned: the seed does not begin mid-word
        assert!(seed.starts_with("alpha"));
    }

    #[test]
    fn test_zero_overlap_disables_seeding() {
        let first = paragraph("alpha", 100);
        let second = paragraph("bravo", 117);
        let text = format!("{first}\n\n{second}");

        let segmenter = Segmenter::new(1000, 0).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].content.starts_with("bravo"));
    }

    #[test]
    fn test_oversized_paragraph_emitted_unsplit() {
        let huge = paragraph("word", 300); // ~1499 chars, well over chunk_size
        let text = format!("intro paragraph\n\n{huge}\n\nclosing paragraph");

        let segmenter = Segmenter::new(100, 20).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        // The oversized paragraph must appear whole inside exactly one chunk
        let containing: Vec<_> = chunks
            .iter()
            .filter(|c| c.content.contains(&huge))
            .collect();
        assert_eq!(containing.len(), 1);
        assert!(containing[0].metadata.char_count > 100);
    }

    #[test]
    fn test_chunk_ids_contiguous_and_increasing() {
        let text = (0..20)
            .map(|i| paragraph(&format!("w{i}"), 30))
            .collect::<Vec<_>>()
            .join("\n\n");
        let segmenter = Segmenter::new(200, 50).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        assert!(chunks.len() > 1);
        for (expected, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, expected);
        }
    }

    #[test]
    fn test_chunks_bounded_unless_oversized_paragraph() {
        let text = (0..20)
            .map(|i| paragraph(&format!("w{i}"), 30))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunk_size = 400;
        let segmenter = Segmenter::new(chunk_size, 80).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        // No paragraph exceeds chunk_size here, so every chunk content stays
        // within chunk_size plus one paragraph's overflow
        let max_paragraph = text.split("\n\n").map(char_len).max().unwrap();
        for chunk in &chunks {
            assert!(chunk.metadata.char_count <= chunk_size + max_paragraph + 2);
        }
    }

    #[test]
    fn test_segmentation_is_idempotent() {
        let text = (0..10)
            .map(|i| paragraph(&format!("word{i}"), 40))
            .collect::<Vec<_>>()
            .join("\n\n");
        let segmenter = Segmenter::new(300, 60).unwrap();

        let first_pass = segmenter.segment(&text, "f.txt");
        let second_pass = segmenter.segment(&text, "f.txt");
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_offsets_consistent_across_chunks() {
        let text = (0..10)
            .map(|i| paragraph(&format!("word{i}"), 40))
            .collect::<Vec<_>>()
            .join("\n\n");
        let segmenter = Segmenter::new(300, 60).unwrap();
        let chunks = segmenter.segment(&text, "f.txt");

        assert!(chunks.len() > 1);
        for window in chunks.windows(2) {
            assert!(window[0].start_char < window[0].end_char);
            // Next chunk starts inside or at the end of the previous one
            // (the shared region is the seeded overlap)
            assert!(window[1].start_char <= window[0].end_char);
            assert!(window[1].start_char > window[0].start_char);
        }
    }

    #[test]
    fn test_multibyte_text_does_not_split_characters() {
        let para = vec!["héllo wörld"; 30].join(" ");
        let text = format!("{para}\n\n{para}\n\n{para}");
        let segmenter = Segmenter::new(300, 50).unwrap();

        // Must not panic on char boundaries, and content stays valid UTF-8
        let chunks = segmenter.segment(&text, "f.txt");
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.content.contains("héllo"));
        }
    }

    #[test]
    fn test_overlap_suffix_shorter_than_window_when_mid_word() {
        let segmenter = Segmenter::new(1000, 10).unwrap();
        // Window of 10 chars lands mid-word; suffix drops the partial word
        let suffix = segmenter.overlap_suffix("aaaa bbbb cccc dddd");
        assert!(suffix.chars().count() <= 10);
        assert!(suffix.starts_with("dddd") || suffix.starts_with("cccc"));
        assert!(!suffix.starts_with(' '));
    }

    #[test]
    fn test_overlap_suffix_whole_text_when_short() {
        let segmenter = Segmenter::new(1000, 50).unwrap();
        assert_eq!(segmenter.overlap_suffix("short text"), "short text");
    }
}
