//! Text chunk domain model
//!
//! A chunk is a bounded slice of a document's extracted text, sized for the
//! classification backend's practical input limit.

use serde::{Deserialize, Serialize};

/// Derived metadata about a chunk's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Number of whitespace-separated words in the chunk
    pub word_count: usize,

    /// Number of characters in the chunk
    pub char_count: usize,
}

/// A bounded, possibly overlapping slice of a document's extracted text
///
/// Chunk IDs are contiguous and increasing within one source file, starting
/// at 0. `start_char`/`end_char` are offsets into the chunk-buffer stream:
/// consecutive chunks share their overlap region, so `start_char` of chunk
/// *i+1* equals `end_char` of chunk *i* minus the seeded overlap length.
/// Offsets are internally consistent but not identical to original-text
/// offsets, since paragraph separators are normalized before chunking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Ordinal of this chunk within its source file, starting at 0
    pub chunk_id: usize,

    /// Chunk text content (never empty)
    pub content: String,

    /// Offset of the chunk start in the chunk-buffer stream
    pub start_char: usize,

    /// Offset of the chunk end in the chunk-buffer stream
    pub end_char: usize,

    /// Identifier of the file this chunk was cut from
    pub source_file: String,

    /// Derived content metadata
    pub metadata: ChunkMetadata,
}

impl TextChunk {
    /// Create a new chunk, deriving word/char metadata from the content
    pub fn new(
        chunk_id: usize,
        content: impl Into<String>,
        start_char: usize,
        end_char: usize,
        source_file: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let metadata = ChunkMetadata {
            word_count: content.split_whitespace().count(),
            char_count: content.chars().count(),
        };

        Self {
            chunk_id,
            content,
            start_char,
            end_char,
            source_file: source_file.into(),
            metadata,
        }
    }
}
