//! Extracted document record
//!
//! The upstream extraction collaborator hands the core a sequence of these.
//! Documents with empty or whitespace-only text are excluded before they
//! reach the segmenter.

use serde::{Deserialize, Serialize};

/// A document's extracted text, ready for scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// File identifier (typically the source path)
    pub file_id: String,

    /// Extracted text content
    pub text: String,

    /// Reference back to the original source (URL or descriptive label)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source: Option<String>,
}

impl ExtractedDocument {
    /// Create a new extracted document record
    pub fn new(file_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            text: text.into(),
            original_source: None,
        }
    }

    /// Set the original-source reference
    pub fn with_original_source(mut self, source: impl Into<String>) -> Self {
        self.original_source = Some(source.into());
        self
    }

    /// Whether the document carries any scannable text
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// File-name hint for the classifier prompt, derived from the file id
    pub fn file_name(&self) -> &str {
        self.file_id
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_text() {
        assert!(ExtractedDocument::new("a.txt", "content").has_text());
        assert!(!ExtractedDocument::new("a.txt", "   \n\t ").has_text());
        assert!(!ExtractedDocument::new("a.txt", "").has_text());
    }

    #[test]
    fn test_file_name_from_path() {
        let doc = ExtractedDocument::new("data/downloads/report.pdf.txt", "x");
        assert_eq!(doc.file_name(), "report.pdf.txt");

        let doc = ExtractedDocument::new("plain.txt", "x");
        assert_eq!(doc.file_name(), "plain.txt");
    }

    #[test]
    fn test_with_original_source() {
        let doc = ExtractedDocument::new("a.txt", "x")
            .with_original_source("https://example.com/a.pdf");
        assert_eq!(
            doc.original_source.as_deref(),
            Some("https://example.com/a.pdf")
        );
    }
}
