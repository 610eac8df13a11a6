//! Scan pipeline - main orchestrator for document analysis
//!
//! This module coordinates the full analysis of a document: segmentation,
//! per-segment classification with heuristic merging, a whole-file pass, and
//! final aggregation into one file verdict.

use crate::adapters::classifier::{create_provider, ClassifierProvider};
use crate::config::VigilConfig;
use crate::core::aggregate::aggregate;
use crate::core::heuristics::PatternScanner;
use crate::core::merge::{merge, BoostPolicy};
use crate::core::pipeline::summary::ScanSummary;
use crate::core::segment::Segmenter;
use crate::domain::{ExtractedDocument, FileVerdict, Result, SegmentVerdict};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Scan pipeline
pub struct ScanPipeline {
    segmenter: Segmenter,
    scanner: PatternScanner,
    provider: Arc<dyn ClassifierProvider>,
    boost_policy: BoostPolicy,
    parallelism: usize,
}

/// Result of scanning a batch of documents
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-file verdicts, in input order
    pub verdicts: Vec<FileVerdict>,

    /// Run-level summary
    pub summary: ScanSummary,
}

impl ScanPipeline {
    /// Create a pipeline from the configuration
    pub fn new(config: &VigilConfig) -> Result<Self> {
        let provider = create_provider(&config.classifier)?;
        Self::with_provider(config, provider)
    }

    /// Create a pipeline with an explicit provider
    ///
    /// Lets tests inject an in-process backend instead of an HTTP one.
    pub fn with_provider(
        config: &VigilConfig,
        provider: Arc<dyn ClassifierProvider>,
    ) -> Result<Self> {
        let segmenter = Segmenter::new(config.chunking.chunk_size, config.chunking.overlap)?;
        let boost_policy = BoostPolicy {
            threshold: config.scoring.boost_threshold,
            boost: config.scoring.boost_amount,
        };

        Ok(Self {
            segmenter,
            scanner: PatternScanner::new(),
            provider,
            boost_policy,
            parallelism: config.scan.parallelism.max(1),
        })
    }

    /// Analyze one document end to end
    ///
    /// Segments the text, classifies every segment (merged with heuristic
    /// findings), runs one whole-file pass for the aggregate explanation and
    /// confidence, and folds everything into a [`FileVerdict`].
    pub async fn scan_document(&self, document: &ExtractedDocument) -> FileVerdict {
        let started = Instant::now();
        let chunks = self.segmenter.segment(&document.text, &document.file_id);

        tracing::info!(
            file = %document.file_id,
            chunks = chunks.len(),
            "Analyzing document"
        );

        let file_name = document.file_name();

        // Segments are classified concurrently up to the configured
        // parallelism; completion order is arbitrary, so results carry their
        // chunk_id and are re-sorted before aggregation.
        let mut segment_verdicts: Vec<(usize, SegmentVerdict)> = stream::iter(&chunks)
            .map(|chunk| {
                let file_name = file_name;
                async move {
                    let heuristics = self.scanner.scan(&chunk.content);
                    let verdict = self.provider.analyze(&chunk.content, Some(file_name)).await;
                    (chunk.chunk_id, merge(verdict, &heuristics, &self.boost_policy))
                }
            })
            .buffer_unordered(self.parallelism)
            .collect()
            .await;
        segment_verdicts.sort_by_key(|(chunk_id, _)| *chunk_id);

        let heuristics = self.scanner.scan(&document.text);
        let whole_file_verdict = merge(
            self.provider.analyze(&document.text, Some(file_name)).await,
            &heuristics,
            &self.boost_policy,
        );

        let segment_verdicts: Vec<SegmentVerdict> = if segment_verdicts.is_empty() {
            // Degenerate input that produced no chunks still yields a verdict.
            vec![whole_file_verdict.clone()]
        } else {
            segment_verdicts.into_iter().map(|(_, v)| v).collect()
        };

        let verdict = aggregate(&document.file_id, &whole_file_verdict, segment_verdicts);

        tracing::info!(
            file = %document.file_id,
            max_score = verdict.max_score,
            tier = %verdict.risk_tier(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Document analyzed"
        );

        verdict
    }

    /// Scan a batch of documents
    ///
    /// Documents with no extractable text are skipped with a log line and
    /// counted in the summary. Files run sequentially; parallelism applies
    /// within each file's segments.
    pub async fn scan_batch(&self, documents: &[ExtractedDocument]) -> BatchOutcome {
        let started = Instant::now();
        let mut verdicts = Vec::with_capacity(documents.len());
        let mut skipped = 0usize;

        for document in documents {
            if !document.has_text() {
                tracing::warn!(file = %document.file_id, "Skipping file with no extractable text");
                skipped += 1;
                continue;
            }
            verdicts.push(self.scan_document(document).await);
        }

        let summary = ScanSummary::from_verdicts(&verdicts, skipped, started.elapsed());

        tracing::info!(
            total = summary.total_files,
            skipped = summary.skipped_files,
            high = summary.high_sensitivity_files,
            "Scan complete"
        );

        BatchOutcome { verdicts, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeSet;
    use std::sync::Mutex;

    /// In-process backend returning scripted scores per call, in order
    struct ScriptedProvider {
        scores: Mutex<Vec<i64>>,
    }

    impl ScriptedProvider {
        fn new(scores: Vec<i64>) -> Self {
            Self {
                scores: Mutex::new(scores),
            }
        }
    }

    #[async_trait]
    impl ClassifierProvider for ScriptedProvider {
        async fn analyze(&self, _text: &str, _file_name: Option<&str>) -> SegmentVerdict {
            let score = self.scores.lock().unwrap().remove(0);
            SegmentVerdict::new(
                score,
                0.9,
                BTreeSet::new(),
                BTreeSet::new(),
                "scripted",
                vec![],
                "fake",
                "fake-model",
            )
        }

        fn name(&self) -> &str {
            "fake"
        }

        fn model(&self) -> &str {
            "fake-model"
        }
    }

    fn small_chunk_config() -> VigilConfig {
        let mut config = VigilConfig::default();
        config.chunking.chunk_size = 40;
        config.chunking.overlap = 0;
        config
    }

    #[tokio::test]
    async fn test_scan_document_aggregates_segments_in_order() {
        // Three paragraphs that each overflow a 40-char buffer, plus one
        // whole-file call at the end.
        let text = "First paragraph with enough characters here.\n\n\
                    Second paragraph with enough characters too.\n\n\
                    Third paragraph rounding out the document.";
        let document = ExtractedDocument::new("report.txt", text);

        let provider = Arc::new(ScriptedProvider::new(vec![2, 9, 4, 6]));
        let pipeline = ScanPipeline::with_provider(&small_chunk_config(), provider).unwrap();

        let verdict = pipeline.scan_document(&document).await;

        assert_eq!(verdict.segment_verdicts.len(), 3);
        assert_eq!(verdict.max_score, 9);
        assert!((verdict.avg_score - 5.0).abs() < 1e-9);
        assert_eq!(verdict.confidence, 0.9);
    }

    #[tokio::test]
    async fn test_scan_document_heuristic_boost_applies_per_segment() {
        let text = "Contact the desk at alice@example.com for access.";
        let document = ExtractedDocument::new("contacts.txt", text);

        // Backend says 3 for the segment and the whole file; the email
        // pattern boosts both to 5.
        let provider = Arc::new(ScriptedProvider::new(vec![3, 3]));
        let pipeline =
            ScanPipeline::with_provider(&VigilConfig::default(), provider).unwrap();

        let verdict = pipeline.scan_document(&document).await;

        assert_eq!(verdict.max_score, 5);
        assert!(verdict.patterns.contains("email_address"));
        assert!(verdict.segment_verdicts[0]
            .explanation
            .contains("Score boosted due to detected patterns: email_address"));
    }

    #[tokio::test]
    async fn test_scan_batch_skips_empty_documents() {
        let documents = vec![
            ExtractedDocument::new("empty.txt", "   "),
            ExtractedDocument::new("real.txt", "Plain weather notes."),
        ];

        let provider = Arc::new(ScriptedProvider::new(vec![2, 2]));
        let pipeline =
            ScanPipeline::with_provider(&VigilConfig::default(), provider).unwrap();

        let outcome = pipeline.scan_batch(&documents).await;

        assert_eq!(outcome.verdicts.len(), 1);
        assert_eq!(outcome.summary.total_files, 1);
        assert_eq!(outcome.summary.skipped_files, 1);
        assert_eq!(outcome.verdicts[0].file_id, "real.txt");
    }
}
