//! Verdict merging
//!
//! Combines one backend verdict with heuristic findings for the same segment.
//! Heuristic evidence is one-directional: it can raise an assessed score but
//! never lower it.

use crate::domain::verdict::{clamp_score, SegmentVerdict};
use std::collections::BTreeSet;

/// Tunable score-boost policy
///
/// When heuristics find at least one pattern and the backend score is below
/// `threshold`, the score is boosted by `boost` (clamped to 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostPolicy {
    /// Backend scores below this value are eligible for boosting
    pub threshold: u8,

    /// Amount added to an eligible score
    pub boost: u8,
}

impl Default for BoostPolicy {
    fn default() -> Self {
        Self {
            threshold: 5,
            boost: 2,
        }
    }
}

/// Merge heuristic findings into a backend verdict
///
/// The pattern set becomes the union of backend-reported and heuristic
/// labels. When the boost applies, the explanation gains a deterministic
/// suffix naming the heuristic labels; a verdict with no backend explanation
/// gets `"Patterns detected: {labels}"` instead.
pub fn merge(
    mut verdict: SegmentVerdict,
    heuristics: &BTreeSet<String>,
    policy: &BoostPolicy,
) -> SegmentVerdict {
    verdict.patterns.extend(heuristics.iter().cloned());

    if heuristics.is_empty() || verdict.sensitivity_score >= policy.threshold {
        return verdict;
    }

    verdict.sensitivity_score = clamp_score(
        verdict.sensitivity_score as i64 + policy.boost as i64,
    );

    let labels = heuristics
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if verdict.explanation.is_empty() {
        verdict.explanation = format!("Patterns detected: {labels}");
    } else {
        verdict
            .explanation
            .push_str(&format!(" Score boosted due to detected patterns: {labels}"));
    }

    tracing::debug!(
        score = verdict.sensitivity_score,
        patterns = %labels,
        "Boosted segment score for heuristic findings"
    );

    verdict
}
