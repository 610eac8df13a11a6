//! Deterministic pattern heuristics
//!
//! A stateless regex scanner for structurally-recognizable sensitive data.
//! Detection is binary per label with no confidence score, and fast enough to
//! run synchronously on every segment. Heuristic findings can only raise an
//! assessed score during merging, never lower it.

use regex::Regex;
use std::collections::BTreeSet;

/// Pattern label for email addresses
pub const LABEL_EMAIL: &str = "email_address";

/// Pattern label for NANP-style phone numbers
pub const LABEL_PHONE: &str = "phone_number";

/// Pattern label for US social-security-number-shaped sequences
pub const LABEL_SSN: &str = "ssn";

/// Pattern label for payment-card-number-shaped digit sequences
pub const LABEL_CREDIT_CARD: &str = "credit_card";

/// Compiled regex detectors for the built-in sensitive patterns
pub struct PatternScanner {
    patterns: Vec<(&'static str, Regex)>,
}

impl PatternScanner {
    /// Compile the built-in pattern set
    pub fn new() -> Self {
        let patterns = vec![
            (
                LABEL_EMAIL,
                Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                    .expect("static email regex"),
            ),
            (
                LABEL_PHONE,
                Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("static phone regex"),
            ),
            (
                LABEL_SSN,
                Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("static ssn regex"),
            ),
            (
                LABEL_CREDIT_CARD,
                Regex::new(r"\b\d{4}[- ]?\d{4}[- ]?\d{4}[- ]?\d{4}\b")
                    .expect("static card regex"),
            ),
        ];

        Self { patterns }
    }

    /// Scan text for sensitive patterns, returning the set of matched labels
    ///
    /// Pure and deterministic; each pattern is detected independently so
    /// multiple labels may coexist.
    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(label, _)| (*label).to_string())
            .collect()
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Contact me at jane@example.com for details.", LABEL_EMAIL ; "email")]
    #[test_case("Call 555-123-4567 any time.", LABEL_PHONE ; "dashed phone")]
    #[test_case("Call 555.123.4567 any time.", LABEL_PHONE ; "dotted phone")]
    #[test_case("SSN on file: 078-05-1120.", LABEL_SSN ; "ssn")]
    #[test_case("Card: 4111 1111 1111 1111", LABEL_CREDIT_CARD ; "spaced card")]
    #[test_case("Card: 4111-1111-1111-1111", LABEL_CREDIT_CARD ; "dashed card")]
    fn test_single_pattern_detected(text: &str, expected: &str) {
        let scanner = PatternScanner::new();
        let labels = scanner.scan(text);
        assert!(labels.contains(expected), "missing {expected} in {labels:?}");
    }

    #[test]
    fn test_clean_text_yields_no_labels() {
        let scanner = PatternScanner::new();
        assert!(scanner
            .scan("A quarterly report about rainfall totals.")
            .is_empty());
    }

    #[test]
    fn test_multiple_patterns_coexist() {
        let scanner = PatternScanner::new();
        let labels = scanner.scan("Email jane@example.com or call 555-123-4567. SSN 078-05-1120.");

        assert!(labels.contains(LABEL_EMAIL));
        assert!(labels.contains(LABEL_PHONE));
        assert!(labels.contains(LABEL_SSN));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let scanner = PatternScanner::new();
        let text = "jane@example.com 4111 1111 1111 1111";
        assert_eq!(scanner.scan(text), scanner.scan(text));
    }

    #[test]
    fn test_labels_are_sorted() {
        let scanner = PatternScanner::new();
        let labels: Vec<String> = scanner
            .scan("jane@example.com and card 4111-1111-1111-1111")
            .into_iter()
            .collect();
        assert_eq!(labels, vec!["credit_card", "email_address"]);
    }

    #[test]
    fn test_ssn_shape_not_mistaken_for_phone() {
        // A 3-2-4 digit sequence is not a 3-3-4 phone number
        let scanner = PatternScanner::new();
        let labels = scanner.scan("078-05-1120");
        assert!(labels.contains(LABEL_SSN));
        assert!(!labels.contains(LABEL_PHONE));
    }
}
