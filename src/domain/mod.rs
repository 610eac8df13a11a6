//! Domain models and types for Vigil.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Chunk model** ([`TextChunk`]) — bounded slices of extracted text
//! - **Verdict models** ([`SegmentVerdict`], [`FileVerdict`], [`RiskTier`])
//! - **Extraction record** ([`ExtractedDocument`])
//! - **Error types** ([`VigilError`], [`ClassifierError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VigilError>`]:
//!
//! ```rust
//! use vigil::domain::{Result, VigilError};
//!
//! fn example() -> Result<()> {
//!     let config = vigil::config::load_config("vigil.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! Classifier failures are the deliberate exception: providers never return
//! errors from `analyze()`, they degrade into a [`SegmentVerdict`] with
//! `backend_error` set so every file still appears in the report.

pub mod chunk;
pub mod document;
pub mod errors;
pub mod result;
pub mod verdict;

// Re-export commonly used types for convenience
pub use chunk::{ChunkMetadata, TextChunk};
pub use document::ExtractedDocument;
pub use errors::{ClassifierError, VigilError};
pub use result::Result;
pub use verdict::{clamp_confidence, clamp_score, FileVerdict, RiskTier, SegmentVerdict};
