//! File-level verdict aggregation
//!
//! Reduces all per-segment verdicts for one file into a single [`FileVerdict`]
//! with a deterministic, reproducible explanation. Max/avg/union operators
//! are commutative over the segment set, so aggregation is insensitive to
//! classification completion order; callers restore chunk order before
//! handing segments in so the explanation digest and the detailed report read
//! in document order.

use crate::domain::verdict::{clamp_confidence, FileVerdict, RiskTier, SegmentVerdict};
use std::collections::BTreeSet;

/// Maximum number of distinct segment explanations quoted verbatim
const DIGEST_VERBATIM_LIMIT: usize = 3;

/// Reduce segment verdicts into one file verdict
///
/// `whole_file_verdict` is the verdict computed over the full concatenated
/// text in a single pass; its confidence becomes the file confidence.
/// `segment_verdicts` must be in original chunk order.
///
/// # Panics
///
/// Panics if `segment_verdicts` is empty. Every file reaching aggregation has
/// at least one verdict by pipeline invariant; callers without per-segment
/// verdicts supply the whole-file verdict as a one-element fallback.
pub fn aggregate(
    file_id: impl Into<String>,
    whole_file_verdict: &SegmentVerdict,
    segment_verdicts: Vec<SegmentVerdict>,
) -> FileVerdict {
    assert!(
        !segment_verdicts.is_empty(),
        "aggregate requires at least one segment verdict"
    );

    let file_id = file_id.into();

    let max_score = segment_verdicts
        .iter()
        .map(|v| v.sensitivity_score)
        .max()
        .expect("non-empty segment verdicts");

    let avg_score = segment_verdicts
        .iter()
        .map(|v| v.sensitivity_score as f64)
        .sum::<f64>()
        / segment_verdicts.len() as f64;

    let categories: BTreeSet<String> = segment_verdicts
        .iter()
        .flat_map(|v| v.categories.iter().cloned())
        .collect();

    let patterns: BTreeSet<String> = segment_verdicts
        .iter()
        .flat_map(|v| v.patterns.iter().cloned())
        .collect();

    let mut recommendations: Vec<String> = Vec::new();
    for verdict in &segment_verdicts {
        for recommendation in &verdict.recommendations {
            if !recommendations.contains(recommendation) {
                recommendations.push(recommendation.clone());
            }
        }
    }

    let explanation = synthesize_explanation(max_score, &categories, &patterns, &segment_verdicts);

    FileVerdict {
        file_id,
        max_score,
        avg_score,
        confidence: clamp_confidence(whole_file_verdict.confidence),
        categories,
        patterns,
        explanation,
        recommendations,
        segment_verdicts,
    }
}

/// Build the deterministic file-level narrative
fn synthesize_explanation(
    max_score: u8,
    categories: &BTreeSet<String>,
    patterns: &BTreeSet<String>,
    segment_verdicts: &[SegmentVerdict],
) -> String {
    let mut parts = Vec::new();

    let tier_sentence = match RiskTier::from_score(max_score) {
        RiskTier::High => format!(
            "This file contains highly sensitive content (max segment score {max_score}/10)."
        ),
        RiskTier::Medium => format!(
            "This file contains moderately sensitive content (max segment score {max_score}/10)."
        ),
        RiskTier::Low => {
            format!("This file has low sensitivity (max segment score {max_score}/10).")
        }
    };
    parts.push(tier_sentence);

    if !categories.is_empty() {
        let listing = categories.iter().cloned().collect::<Vec<_>>().join(", ");
        parts.push(format!("Sensitive categories: {listing}."));
    }

    if !patterns.is_empty() {
        let listing = patterns.iter().cloned().collect::<Vec<_>>().join(", ");
        parts.push(format!("Detected patterns: {listing}."));
    }

    // Condensed digest of unique segment explanations, document order
    let mut unique: Vec<&str> = Vec::new();
    for verdict in segment_verdicts {
        let explanation = verdict.explanation.trim();
        if !explanation.is_empty() && !unique.contains(&explanation) {
            unique.push(explanation);
        }
    }

    if unique.len() <= DIGEST_VERBATIM_LIMIT {
        parts.extend(unique.iter().map(|s| s.to_string()));
    } else {
        parts.push(unique[0].to_string());
        parts.push(format!(
            "{} additional insights from other segments.",
            unique.len() - 1
        ));
    }

    parts.join(" ")
}
