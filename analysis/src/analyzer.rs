//! Mining exploration logs for fixture suggestions.
//!
//! Every text-entry step whose value came from a low-confidence source
//! (see [`confidence`](crate::confidence)) becomes a raw suggestion. Raw
//! suggestions are merged by field id and ranked before being returned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use explore_fixtures_core::{FixtureSuggestion, PatternKey, SemanticType, has_reserved_prefix};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::confidence::{is_below_threshold, source_priority};
use crate::files::collect_log_paths;
use crate::log::ExplorationLog;
use crate::merge::{merge_suggestions, rank_suggestions};
use crate::report::{AnalysisReport, SkippedLog};

/// Failures that stop an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The log directory exists but could not be listed.
    #[error("failed to read log directory '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("min confidence must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),
}

/// Proposes a pattern key for a field id.
///
/// Confirmation fields (`confirm`, `repeat`) stay exact so they can be
/// matched independently of the field they confirm. Otherwise the first
/// semantic keyword found in the id yields `semantic:<type>`, falling back
/// to the id itself.
///
/// # Examples
///
/// ```
/// use explore_fixtures_analysis::analyzer::suggest_pattern;
///
/// assert_eq!(suggest_pattern("userEmail"), "semantic:email");
/// assert_eq!(suggest_pattern("confirmEmail"), "confirmEmail");
/// assert_eq!(suggest_pattern("favoriteColor"), "favoriteColor");
/// ```
pub fn suggest_pattern(field_id: &str) -> String {
    let lower = field_id.to_lowercase();
    if lower.contains("confirm") || lower.contains("repeat") {
        return exact_key(field_id);
    }

    match SemanticType::infer(field_id) {
        Some(ty) => PatternKey::Semantic(ty).to_key(),
        None => exact_key(field_id),
    }
}

// Ids that collide with grammar prefixes become anchored regex keys.
fn exact_key(field_id: &str) -> String {
    if has_reserved_prefix(field_id) {
        format!("pattern:regex:^{}$", regex::escape(field_id))
    } else {
        field_id.to_string()
    }
}

/// Raw (unmerged) suggestions for one log.
pub fn raw_suggestions(log: &ExplorationLog, min_confidence: f64) -> Vec<FixtureSuggestion> {
    log.typed_inputs()
        .filter(|input| is_below_threshold(input.source, min_confidence))
        .map(|input| {
            debug!(
                field = input.element_id,
                source = %input.source,
                "low-confidence value"
            );
            FixtureSuggestion {
                field_id: input.element_id.to_string(),
                value: input.value.to_string(),
                pattern_suggestion: suggest_pattern(input.element_id),
                priority: source_priority(input.source),
                source: input.source.clone(),
                screen_type: input.screen_type.map(String::from),
                frequency: 1,
            }
        })
        .collect()
}

/// Analyzes parsed logs: collect, merge by field id, rank.
///
/// # Examples
///
/// ```
/// use explore_fixtures_analysis::analyzer::analyze_logs;
/// use explore_fixtures_analysis::log::ExplorationLog;
/// use explore_fixtures_core::Priority;
///
/// let log = ExplorationLog::from_json(r#"{"steps": [
///     {"action": {"type": "type", "elementId": "apartmentNumber", "value": "12B",
///                 "valueSource": {"type": "fallback"}}}
/// ]}"#).unwrap();
///
/// let suggestions = analyze_logs(&[log], 0.7);
/// assert_eq!(suggestions.len(), 1);
/// assert_eq!(suggestions[0].priority, Priority::High);
/// assert_eq!(suggestions[0].pattern_suggestion, "semantic:number");
/// ```
pub fn analyze_logs(logs: &[ExplorationLog], min_confidence: f64) -> Vec<FixtureSuggestion> {
    let raw = logs
        .iter()
        .flat_map(|log| raw_suggestions(log, min_confidence))
        .collect();
    let mut merged = merge_suggestions(raw);
    rank_suggestions(&mut merged);
    merged
}

/// Analyzes log files, skipping any file that cannot be read or parsed.
pub fn analyze_log_files(paths: &[PathBuf], min_confidence: f64) -> AnalysisReport {
    let mut report = AnalysisReport {
        min_confidence,
        ..AnalysisReport::default()
    };
    let mut raw = Vec::new();

    for path in paths {
        let parsed = fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|content| ExplorationLog::from_json(&content).map_err(|err| err.to_string()));

        let log = match parsed {
            Ok(log) => log,
            Err(reason) => {
                warn!(path = %path.display(), %reason, "skipping exploration log");
                report.skipped.push(SkippedLog {
                    path: path.display().to_string(),
                    reason,
                });
                continue;
            }
        };

        let usable = log.typed_inputs().count();
        report.files_analyzed += 1;
        report.steps_examined += usable;
        report.steps_ignored += log.malformed_steps + (log.steps.len() - usable);
        debug!(path = %path.display(), steps = log.steps.len(), usable, "parsed exploration log");

        raw.extend(raw_suggestions(&log, min_confidence));
    }

    let mut merged = merge_suggestions(raw);
    rank_suggestions(&mut merged);
    report.suggestions = merged;
    report
}

/// Analyzes every `.json` log in `dir`.
///
/// A missing directory yields an empty report.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidThreshold`] when `min_confidence` is
/// outside `0.0..=1.0`, and [`AnalysisError::Io`] when the directory exists
/// but cannot be listed.
pub fn analyze_log_dir(dir: &Path, min_confidence: f64) -> Result<AnalysisReport, AnalysisError> {
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err(AnalysisError::InvalidThreshold(min_confidence));
    }

    let paths = match collect_log_paths(dir) {
        Ok(paths) => paths,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(dir = %dir.display(), "log directory does not exist; nothing to analyze");
            return Ok(AnalysisReport {
                min_confidence,
                ..AnalysisReport::default()
            });
        }
        Err(source) => {
            return Err(AnalysisError::Io {
                path: dir.display().to_string(),
                source,
            });
        }
    };

    let report = analyze_log_files(&paths, min_confidence);
    info!(
        files = report.files_analyzed,
        skipped = report.skipped.len(),
        suggestions = report.suggestions.len(),
        "analysis complete"
    );
    Ok(report)
}
