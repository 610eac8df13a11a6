// Vigil - Document Sensitivity Scanner
// Copyright (c) 2025 Vigil Contributors
// Licensed under the MIT License

//! # Vigil - Document Sensitivity Scanner
//!
//! Vigil analyzes documents for sensitive content by combining a local AI
//! classifier with deterministic pattern heuristics, producing a per-file
//! sensitivity verdict on a 1-10 scale.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Segmenting** documents into overlapping, paragraph-aligned chunks
//! - **Classifying** each chunk with a local model server (Ollama-compatible)
//! - **Scanning** text for common identifiers (emails, phone numbers, SSNs, card numbers)
//! - **Merging** heuristic findings into backend verdicts with score boosting
//! - **Aggregating** segment verdicts into one verdict per file
//!
//! ## Architecture
//!
//! Vigil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Analysis logic (segmentation, heuristics, merging, aggregation, pipeline)
//! - [`adapters`] - External integrations (classifier backends)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vigil::config::load_config;
//! use vigil::core::pipeline::ScanPipeline;
//! use vigil::domain::ExtractedDocument;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vigil.toml")?;
//!     let pipeline = ScanPipeline::new(&config)?;
//!
//!     let document = ExtractedDocument::new(
//!         "hr/offboarding.txt",
//!         "Employee SSN 123-45-6789 must be archived.",
//!     );
//!     let verdict = pipeline.scan_document(&document).await;
//!
//!     println!("{}: {}/10 ({})", verdict.file_id, verdict.max_score, verdict.risk_tier());
//!     Ok(())
//! }
//! ```
//!
//! ## Degraded Operation
//!
//! Classifier failures never abort a scan. A segment whose backend call fails
//! gets a degraded verdict (score 1, confidence 0) carrying the error, and
//! the pattern heuristics still run over it, so a file full of SSNs is
//! flagged even when the model server is down.
//!
//! ## Error Handling
//!
//! Vigil uses the [`domain::VigilError`] type for all errors:
//!
//! ```rust
//! use vigil::domain::{Result, VigilError};
//!
//! fn load_something() -> Result<()> {
//!     Err(VigilError::Configuration("missing base_url".to_string()))
//! }
//!
//! assert!(load_something().is_err());
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
