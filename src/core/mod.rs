//! Core analysis logic for Vigil.
//!
//! This module contains the document analysis stages and their orchestration.
//!
//! # Modules
//!
//! - [`segment`] - Paragraph-aware text segmentation with overlap
//! - [`heuristics`] - Deterministic pattern scanning for common identifiers
//! - [`merge`] - Combining backend verdicts with heuristic findings
//! - [`aggregate`] - Folding segment verdicts into a file verdict
//! - [`pipeline`] - Scan orchestration and reporting
//!
//! # Analysis Workflow
//!
//! The typical flow for one document:
//!
//! 1. **Segment**: Split the text into overlapping paragraph-aligned chunks
//! 2. **Classify**: Send each chunk to the classifier backend
//! 3. **Scan**: Run the pattern heuristics over the same chunk
//! 4. **Merge**: Boost low backend scores when patterns were found
//! 5. **Aggregate**: Fold segment verdicts into one file verdict
//!
//! # Example
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//! use vigil::core::pipeline::ScanPipeline;
//! use vigil::domain::ExtractedDocument;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vigil.toml")?;
//! let pipeline = ScanPipeline::new(&config)?;
//!
//! let document = ExtractedDocument::new("notes.txt", "Quarterly planning notes.");
//! let verdict = pipeline.scan_document(&document).await;
//!
//! println!("{}: {}/10", verdict.file_id, verdict.max_score);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod heuristics;
pub mod merge;
pub mod pipeline;
pub mod segment;
