//! Sensitivity verdict domain models
//!
//! A verdict is the structured output of classifying one unit of text, either
//! a single segment or a whole file. Verdicts have no failure variant: a
//! backend that fails in any way still produces a degraded [`SegmentVerdict`]
//! with `backend_error` set and zero confidence, so reporting stays complete.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lowest valid sensitivity score
pub const MIN_SCORE: u8 = 1;

/// Highest valid sensitivity score
pub const MAX_SCORE: u8 = 10;

/// Clamp a raw score into the valid 1-10 range
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

/// Clamp a raw confidence into the valid 0.0-1.0 range
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

/// Risk tier banding of a file's max segment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Max score below 5
    Low,
    /// Max score 5-7
    Medium,
    /// Max score 8-10
    High,
}

impl RiskTier {
    /// Band a max score into a risk tier
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 8 => RiskTier::High,
            s if s >= 5 => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// Verdict for one text segment
///
/// Produced by a classifier provider, then merged with heuristic findings.
/// Scores are always clamped to [1, 10] and confidence to [0.0, 1.0] at
/// construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentVerdict {
    /// Sensitivity rating, 1 (benign) to 10 (extremely sensitive)
    pub sensitivity_score: u8,

    /// Backend confidence in the rating, 0.0 to 1.0
    pub confidence: f64,

    /// Sensitive-data category labels (PII, Financial, Credentials, ...)
    pub categories: BTreeSet<String>,

    /// Detected pattern labels (backend-reported plus heuristic findings)
    pub patterns: BTreeSet<String>,

    /// Why the score was assigned
    pub explanation: String,

    /// Suggested follow-up actions, in backend order
    pub recommendations: Vec<String>,

    /// Name of the backend that produced this verdict
    pub backend_name: String,

    /// Model identifier used by the backend
    pub backend_model: String,

    /// Set when the backend failed and this verdict is a degraded fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_error: Option<String>,
}

impl SegmentVerdict {
    /// Create a verdict, clamping score and confidence into their valid ranges
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sensitivity_score: i64,
        confidence: f64,
        categories: BTreeSet<String>,
        patterns: BTreeSet<String>,
        explanation: impl Into<String>,
        recommendations: Vec<String>,
        backend_name: impl Into<String>,
        backend_model: impl Into<String>,
    ) -> Self {
        Self {
            sensitivity_score: clamp_score(sensitivity_score),
            confidence: clamp_confidence(confidence),
            categories,
            patterns,
            explanation: explanation.into(),
            recommendations,
            backend_name: backend_name.into(),
            backend_model: backend_model.into(),
            backend_error: None,
        }
    }

    /// Create the degraded fallback verdict for a failed backend call
    ///
    /// Score 1, zero confidence, empty collections, `backend_error` set.
    pub fn degraded(
        backend_name: impl Into<String>,
        backend_model: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self {
            sensitivity_score: MIN_SCORE,
            confidence: 0.0,
            categories: BTreeSet::new(),
            patterns: BTreeSet::new(),
            explanation: format!("Error occurred during analysis: {error}"),
            recommendations: Vec::new(),
            backend_name: backend_name.into(),
            backend_model: backend_model.into(),
            backend_error: Some(error),
        }
    }

    /// Whether this verdict is a degraded fallback
    pub fn is_degraded(&self) -> bool {
        self.backend_error.is_some()
    }
}

/// Aggregated verdict for one file
///
/// Created once per file after all its segment verdicts are merged, and
/// immutable thereafter. `segment_verdicts` retains original chunk order even
/// when classification calls completed out of order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileVerdict {
    /// Identifier of the scanned file
    pub file_id: String,

    /// Maximum segment score; drives the risk tier
    pub max_score: u8,

    /// Arithmetic mean of segment scores
    pub avg_score: f64,

    /// Confidence of the whole-file classification pass
    pub confidence: f64,

    /// Union of segment category labels
    pub categories: BTreeSet<String>,

    /// Union of segment pattern labels
    pub patterns: BTreeSet<String>,

    /// Synthesized narrative explanation
    pub explanation: String,

    /// Union of segment recommendations, first occurrence order
    pub recommendations: Vec<String>,

    /// Per-segment verdicts in original chunk order
    pub segment_verdicts: Vec<SegmentVerdict>,
}

impl FileVerdict {
    /// Risk tier banding of this file's max score
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.max_score)
    }
}
