//! Scan orchestration
//!
//! The pipeline wires the core stages together: segmentation, heuristic
//! scanning, backend classification, verdict merging, and file aggregation.

pub mod scanner;
pub mod summary;

pub use scanner::{BatchOutcome, ScanPipeline};
pub use summary::ScanSummary;
