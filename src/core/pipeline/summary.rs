//! Scan summary and reporting
//!
//! This module defines structures for tracking and reporting scan results.

use crate::domain::verdict::{FileVerdict, RiskTier};
use serde::Serialize;
use std::time::Duration;

/// Summary of a scan run
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Total number of files scanned
    pub total_files: usize,

    /// Number of files skipped (no extractable text)
    pub skipped_files: usize,

    /// Number of files in the high-sensitivity tier
    pub high_sensitivity_files: usize,

    /// Number of files whose backend analysis degraded for at least one segment
    pub degraded_files: usize,

    /// Average of the per-file maximum scores
    pub avg_max_score: f64,

    /// Wall-clock duration of the scan
    #[serde(skip)]
    pub duration: Duration,
}

impl ScanSummary {
    /// Build a summary from the finished file verdicts
    pub fn from_verdicts(verdicts: &[FileVerdict], skipped_files: usize, duration: Duration) -> Self {
        let total_files = verdicts.len();

        let high_sensitivity_files = verdicts
            .iter()
            .filter(|v| v.risk_tier() == RiskTier::High)
            .count();

        let degraded_files = verdicts
            .iter()
            .filter(|v| v.segment_verdicts.iter().any(|s| s.is_degraded()))
            .count();

        let avg_max_score = if total_files == 0 {
            0.0
        } else {
            verdicts.iter().map(|v| v.max_score as f64).sum::<f64>() / total_files as f64
        };

        Self {
            total_files,
            skipped_files,
            high_sensitivity_files,
            degraded_files,
            avg_max_score,
            duration,
        }
    }

    /// Render a human-readable report block
    pub fn render(&self) -> String {
        format!(
            "Scan summary\n\
             ============\n\
             Files scanned:            {}\n\
             Files skipped (no text):  {}\n\
             High sensitivity files:   {}\n\
             Files with degraded AI:   {}\n\
             Average max score:        {:.1}\n\
             Duration:                 {:.1}s\n",
            self.total_files,
            self.skipped_files,
            self.high_sensitivity_files,
            self.degraded_files,
            self.avg_max_score,
            self.duration.as_secs_f64(),
        )
    }
}
