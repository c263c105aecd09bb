//! Run accounting - per-source outcomes and aggregate statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::document::Document;

/// Terminal classification for one processed source.
///
/// Exactly one outcome is recorded per source the control loop
/// touches; the variants are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceOutcome {
    /// Fetched, cleaned, scored above threshold, and persisted
    Accepted,
    /// robots.txt rules deny the configured agent; no fetch attempted
    RobotsDenied,
    /// URL already present in the persisted corpus; no fetch attempted
    Duplicate,
    /// Fetch failed (timeout, network, or HTTP status)
    FetchFailed,
    /// Fetched and cleaned but scored below the quality threshold
    QualityRejected,
    /// Accepted by the filter but artifact writes failed
    PersistFailed,
}

/// Mutable accumulator for one harvest run.
///
/// Owned and mutated only by the orchestrator; finalized into a
/// [`RunSummary`] when the run ends.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Sources the loop classified (any outcome)
    pub processed: usize,

    /// Per-outcome counters
    pub accepted: usize,
    pub robots_denied: usize,
    pub duplicates: usize,
    pub fetch_failed: usize,
    pub quality_rejected: usize,
    pub persist_failed: usize,

    /// Clean-text bytes of accepted documents
    pub accepted_bytes: u64,

    /// Word total across accepted documents
    pub total_words: u64,

    /// Sum of accepted quality scores, for averaging
    quality_sum: f64,

    /// Accepted documents per category
    pub per_category: HashMap<String, usize>,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl RunStats {
    /// Create a fresh accumulator stamped with the current time.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            ..Default::default()
        }
    }

    /// Record a non-accepted terminal outcome for one source.
    pub fn record(&mut self, outcome: SourceOutcome) {
        self.processed += 1;
        match outcome {
            SourceOutcome::Accepted => self.accepted += 1,
            SourceOutcome::RobotsDenied => self.robots_denied += 1,
            SourceOutcome::Duplicate => self.duplicates += 1,
            SourceOutcome::FetchFailed => self.fetch_failed += 1,
            SourceOutcome::QualityRejected => self.quality_rejected += 1,
            SourceOutcome::PersistFailed => self.persist_failed += 1,
        }
    }

    /// Record an accepted document, updating the aggregate totals.
    pub fn record_accepted(&mut self, document: &Document) {
        self.record(SourceOutcome::Accepted);
        self.accepted_bytes += document.clean_len() as u64;
        self.total_words += document.word_count as u64;
        self.quality_sum += document.quality_score;
        *self
            .per_category
            .entry(document.source.category.clone())
            .or_insert(0) += 1;
    }

    /// Mean quality score of accepted documents (0 when none).
    pub fn average_quality(&self) -> f64 {
        if self.accepted == 0 {
            0.0
        } else {
            self.quality_sum / self.accepted as f64
        }
    }

    /// Finalize into a serializable summary record.
    pub fn finalize(&self, corpus_bytes: u64, target_bytes: u64) -> RunSummary {
        let completion = if target_bytes == 0 {
            1.0
        } else {
            (corpus_bytes as f64 / target_bytes as f64).min(1.0)
        };

        RunSummary {
            sources_processed: self.processed,
            documents_accepted: self.accepted,
            robots_denied: self.robots_denied,
            duplicates_skipped: self.duplicates,
            fetch_failures: self.fetch_failed,
            quality_rejected: self.quality_rejected,
            persist_failures: self.persist_failed,
            total_words: self.total_words,
            average_quality: self.average_quality(),
            per_category: self.per_category.clone(),
            corpus_bytes,
            target_bytes,
            completion,
            robots_compliant: true,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

/// End-of-run aggregate statistics, written to the corpus root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub sources_processed: usize,
    pub documents_accepted: usize,
    pub robots_denied: usize,
    pub duplicates_skipped: usize,
    pub fetch_failures: usize,
    pub quality_rejected: usize,
    pub persist_failures: usize,
    pub total_words: u64,
    pub average_quality: f64,
    pub per_category: HashMap<String, usize>,
    pub corpus_bytes: u64,
    pub target_bytes: u64,
    /// Fraction of the size budget filled, capped at 1.0
    pub completion: f64,
    /// Every fetched source passed a robots check first
    pub robots_compliant: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::source::SourceEntry;

    fn accepted_doc(category: &str, words: usize, score: f64) -> Document {
        let text = vec!["word"; words].join(" ");
        Document::new(
            SourceEntry::new("https://example.com/a", category, "sub", "T"),
            "",
            text,
            score,
            Utc::now(),
        )
    }

    #[test]
    fn test_outcome_counters() {
        let mut stats = RunStats::new();
        stats.record(SourceOutcome::RobotsDenied);
        stats.record(SourceOutcome::Duplicate);
        stats.record(SourceOutcome::FetchFailed);
        stats.record(SourceOutcome::QualityRejected);

        assert_eq!(stats.processed, 4);
        assert_eq!(stats.robots_denied, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.fetch_failed, 1);
        assert_eq!(stats.quality_rejected, 1);
        assert_eq!(stats.accepted, 0);
    }

    #[test]
    fn test_accepted_totals() {
        let mut stats = RunStats::new();
        stats.record_accepted(&accepted_doc("science", 10, 0.8));
        stats.record_accepted(&accepted_doc("science", 20, 0.6));
        stats.record_accepted(&accepted_doc("history", 5, 0.7));

        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.total_words, 35);
        assert_eq!(stats.per_category.get("science"), Some(&2));
        assert_eq!(stats.per_category.get("history"), Some(&1));
        assert!((stats.average_quality() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_completion_fraction() {
        let stats = RunStats::new();
        let summary = stats.finalize(500, 1000);
        assert!((summary.completion - 0.5).abs() < 1e-9);

        // Over-full corpora cap at 1.0
        let summary = stats.finalize(2000, 1000);
        assert_eq!(summary.completion, 1.0);

        // A zero target is already satisfied
        let summary = stats.finalize(0, 0);
        assert_eq!(summary.completion, 1.0);
    }
}
