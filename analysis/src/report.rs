//! Structured reporting for an analysis run.

use explore_fixtures_core::FixtureSuggestion;
use serde::{Deserialize, Serialize};

/// A log file that contributed nothing because it could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLog {
    pub path: String,
    pub reason: String,
}

/// Outcome of analyzing a set of exploration logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Merged suggestions, highest priority and frequency first.
    pub suggestions: Vec<FixtureSuggestion>,
    pub min_confidence: f64,
    /// Log files parsed successfully.
    pub files_analyzed: usize,
    /// Log files that were skipped, with the reason.
    pub skipped: Vec<SkippedLog>,
    /// Text-entry steps considered against the threshold.
    pub steps_examined: usize,
    /// Steps that were not usable text entries.
    pub steps_ignored: usize,
}

impl AnalysisReport {
    pub fn has_skipped_files(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Total occurrences behind all suggestions.
    pub fn total_occurrences(&self) -> u32 {
        self.suggestions.iter().map(|s| s.frequency).sum()
    }
}
