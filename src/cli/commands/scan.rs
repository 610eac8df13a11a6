//! Scan command implementation
//!
//! This module implements the `scan` command for analyzing files and
//! writing the verdict report.

use crate::config::load_config;
use crate::core::pipeline::ScanPipeline;
use crate::domain::ExtractedDocument;
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Override chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Override chunk overlap in characters
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Override the classifier model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the classifier provider (ollama or vision)
    #[arg(long)]
    pub provider: Option<String>,

    /// Override the report output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting scan command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(chunk_size) = self.chunk_size {
            tracing::info!(chunk_size, "Overriding chunk size from CLI");
            config.chunking.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            tracing::info!(overlap, "Overriding chunk overlap from CLI");
            config.chunking.overlap = overlap;
        }
        if let Some(model) = &self.model {
            tracing::info!(model = %model, "Overriding classifier model from CLI");
            config.classifier.model = model.clone();
        }
        if let Some(provider) = &self.provider {
            tracing::info!(provider = %provider, "Overriding classifier provider from CLI");
            config.classifier.provider = provider.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.scan.output_dir = output_dir.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Collect input files before touching the backend
        let files = match collect_input_files(&self.inputs) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, "Failed to collect input files");
                eprintln!("Failed to read inputs: {e}");
                return Ok(3); // Input error exit code
            }
        };

        if files.is_empty() {
            eprintln!("No files to scan.");
            return Ok(3);
        }

        let documents = match read_documents(&files) {
            Ok(d) => d,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input files");
                eprintln!("Failed to read inputs: {e}");
                return Ok(3);
            }
        };

        let pipeline = match ScanPipeline::new(&config) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scan pipeline");
                eprintln!("Failed to initialize scan: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        println!("🔍 Scanning {} file(s)...", documents.len());
        println!();

        let outcome = pipeline.scan_batch(&documents).await;

        // Display summary
        println!();
        println!("📊 Scan Summary:");
        println!("  Files scanned: {}", outcome.summary.total_files);
        println!("  Files skipped: {}", outcome.summary.skipped_files);
        println!(
            "  High sensitivity: {}",
            outcome.summary.high_sensitivity_files
        );
        println!("  Degraded: {}", outcome.summary.degraded_files);
        println!("  Average max score: {:.1}", outcome.summary.avg_max_score);
        println!(
            "  Duration: {:.2}s",
            outcome.summary.duration.as_secs_f64()
        );
        println!();

        for verdict in &outcome.verdicts {
            println!(
                "  {} — {}/10 ({})",
                verdict.file_id,
                verdict.max_score,
                verdict.risk_tier()
            );
        }
        println!();

        // Write reports
        if let Err(e) = write_reports(&config.scan.output_dir, &outcome) {
            tracing::error!(error = %e, "Failed to write reports");
            eprintln!("Failed to write reports: {e}");
            return Ok(5); // Fatal error exit code
        }

        println!("✅ Reports written to {}", config.scan.output_dir);

        Ok(0)
    }
}

/// Expand the input arguments into a flat list of files
///
/// Directory inputs contribute their immediate regular files; nested
/// directories are not traversed.
fn collect_input_files(inputs: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|p| p.is_file())
                .collect();
            entries.sort();
            files.extend(entries);
        } else if path.is_file() {
            files.push(path.to_path_buf());
        } else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file or directory: {input}"),
            ));
        }
    }

    Ok(files)
}

fn read_documents(files: &[PathBuf]) -> std::io::Result<Vec<ExtractedDocument>> {
    files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)?;
            Ok(ExtractedDocument::new(path.to_string_lossy(), text))
        })
        .collect()
}

/// Write the JSON results and the text summary into the output directory
fn write_reports(
    output_dir: &str,
    outcome: &crate::core::pipeline::scanner::BatchOutcome,
) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)?;

    let results_path = Path::new(output_dir).join("scan_results.json");
    let json = serde_json::to_string_pretty(&outcome.verdicts)?;
    fs::write(&results_path, json)?;

    let summary_path = Path::new(output_dir).join("summary.txt");
    let report = format!(
        "Generated: {}\n\n{}",
        Utc::now().to_rfc3339(),
        outcome.summary.render()
    );
    fs::write(&summary_path, report)?;

    tracing::info!(
        results = %results_path.display(),
        summary = %summary_path.display(),
        "Reports written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_input_files_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "two").unwrap();
        fs::write(dir.path().join("a.txt"), "one").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "three").unwrap();

        let files =
            collect_input_files(&[dir.path().to_string_lossy().to_string()]).unwrap();

        // Sorted, and the nested directory is not traversed
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
    }

    #[test]
    fn test_collect_input_files_missing_path() {
        let result = collect_input_files(&["definitely/not/here.txt".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memo.txt");
        fs::write(&path, "Budget memo body.").unwrap();

        let documents = read_documents(&[path.clone()]).unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].text, "Budget memo body.");
        assert_eq!(documents[0].file_name(), "memo.txt");
    }
}
