//! Output formatting for suggestions and validation results.

use explore_fixtures_core::{FixtureSuggestion, Priority, ValidationResult};
use serde::Serialize;

use crate::report::SkippedLog;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Text,
    Json,
}

/// Display caps per priority group in the interactive summary.
const HIGH_LIMIT: usize = 10;
const MEDIUM_LIMIT: usize = 10;
const LOW_LIMIT: usize = 5;

/// Message shown when there is nothing to suggest.
pub const NO_SUGGESTIONS_MESSAGE: &str =
    "All recorded values came from high-confidence sources. No fixture suggestions.";

/// Renders suggestions as a priority-grouped summary.
///
/// Groups are truncated for display (high and medium to 10 entries, low to
/// 5); [`format_as_json`] always carries the full list.
///
/// # Examples
///
/// ```
/// use explore_fixtures_analysis::output::format_interactive_summary;
/// use explore_fixtures_core::*;
///
/// let suggestion = FixtureSuggestion {
///     field_id: "zip".into(),
///     value: "12345".into(),
///     pattern_suggestion: "semantic:zipCode".into(),
///     priority: Priority::High,
///     source: ValueSource::Fallback,
///     screen_type: Some("checkout".into()),
///     frequency: 3,
/// };
/// let text = format_interactive_summary(&[suggestion]);
/// assert!(text.contains("High priority (1)"));
/// assert!(text.contains("zip [checkout] -> semantic:zipCode (seen 3 times)"));
/// ```
pub fn format_interactive_summary(suggestions: &[FixtureSuggestion]) -> String {
    if suggestions.is_empty() {
        return format!("{NO_SUGGESTIONS_MESSAGE}\n");
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Found {} field(s) that would benefit from fixture entries.\n",
        suggestions.len()
    ));

    for (priority, title, limit) in [
        (Priority::High, "High priority", HIGH_LIMIT),
        (Priority::Medium, "Medium priority", MEDIUM_LIMIT),
        (Priority::Low, "Low priority", LOW_LIMIT),
    ] {
        let group: Vec<&FixtureSuggestion> = suggestions
            .iter()
            .filter(|s| s.priority == priority)
            .collect();
        if group.is_empty() {
            continue;
        }

        out.push_str(&format!("\n{title} ({}):\n", group.len()));
        for suggestion in group.iter().take(limit) {
            out.push_str(&format_suggestion_line(suggestion));
        }
        if group.len() > limit {
            out.push_str(&format!("  ... and {} more\n", group.len() - limit));
        }
    }

    out.push_str("\nUse --format json for the complete list.\n");
    out
}

fn format_suggestion_line(suggestion: &FixtureSuggestion) -> String {
    let mut line = format!("  - {}", suggestion.field_id);
    if let Some(ref screen) = suggestion.screen_type {
        line.push_str(&format!(" [{screen}]"));
    }
    line.push_str(&format!(" -> {}", suggestion.pattern_suggestion));
    if suggestion.frequency > 1 {
        line.push_str(&format!(" (seen {} times)", suggestion.frequency));
    }
    line.push('\n');
    line
}

#[derive(Serialize)]
struct SuggestionsEnvelope<'a> {
    suggestions: &'a [FixtureSuggestion],
}

/// Renders suggestions as pretty-printed JSON with sorted keys.
///
/// The output is `{"suggestions": [...]}` and is lossless: it parses back
/// into the same suggestions.
pub fn format_as_json(suggestions: &[FixtureSuggestion]) -> Result<String, serde_json::Error> {
    // Going through `Value` sorts object keys.
    let value = serde_json::to_value(SuggestionsEnvelope { suggestions })?;
    serde_json::to_string_pretty(&value)
}

/// Renders a validation result for humans: numbered errors, numbered
/// warnings, or a single all-clear line.
pub fn format_validation_report(result: &ValidationResult) -> String {
    if result.errors.is_empty() && result.warnings.is_empty() {
        return "Fixture is valid. No errors or warnings.\n".to_string();
    }

    let mut out = String::new();

    if !result.errors.is_empty() {
        out.push_str(&format!("Errors ({}):\n", result.errors.len()));
        for (i, error) in result.errors.iter().enumerate() {
            out.push_str(&format!("  {}. {error}\n", i + 1));
        }
    }

    if !result.warnings.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Warnings ({}):\n", result.warnings.len()));
        for (i, warning) in result.warnings.iter().enumerate() {
            out.push_str(&format!("  {}. {warning}\n", i + 1));
        }
    }

    out.push('\n');
    if result.is_valid() {
        out.push_str("Fixture is valid.\n");
    } else if result.errors.is_empty() {
        out.push_str("Fixture is invalid in strict mode (warnings are treated as errors).\n");
    } else {
        out.push_str("Fixture is invalid.\n");
    }
    out
}

#[derive(Serialize)]
struct ValidationOutput {
    valid: bool,
    strict: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Renders a validation result as pretty-printed JSON.
pub fn format_validation_json(result: &ValidationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ValidationOutput {
        valid: result.is_valid(),
        strict: result.strict,
        errors: result.error_messages(),
        warnings: result.warning_messages(),
    })
}

/// One line per skipped log file.
pub fn format_skipped_logs(skipped: &[SkippedLog]) -> String {
    let mut out = format!("Skipped {} log file(s):\n", skipped.len());
    for entry in skipped {
        out.push_str(&format!("  - {}: {}\n", entry.path, entry.reason));
    }
    out
}

#[cfg(test)]
mod tests {
    use explore_fixtures_core::{ValidationError, ValidationWarning, ValueSource};

    use super::*;

    fn suggestion(field_id: &str, priority: Priority, frequency: u32) -> FixtureSuggestion {
        FixtureSuggestion {
            field_id: field_id.to_string(),
            value: format!("{field_id}-value"),
            pattern_suggestion: field_id.to_string(),
            priority,
            source: ValueSource::AiGenerated,
            screen_type: None,
            frequency,
        }
    }

    #[test]
    fn test_summary_empty_input() {
        assert_eq!(
            format_interactive_summary(&[]),
            format!("{NO_SUGGESTIONS_MESSAGE}\n")
        );
    }

    #[test]
    fn test_summary_groups_in_priority_order() {
        let text = format_interactive_summary(&[
            suggestion("lowField", Priority::Low, 1),
            suggestion("highField", Priority::High, 1),
            suggestion("midField", Priority::Medium, 2),
        ]);
        let high = text.find("High priority").unwrap();
        let medium = text.find("Medium priority").unwrap();
        let low = text.find("Low priority").unwrap();
        assert!(high < medium && medium < low);
        assert!(text.contains("midField -> midField (seen 2 times)"));
        assert!(!text.contains("highField -> highField (seen"));
    }

    #[test]
    fn test_summary_truncates_groups() {
        let mut suggestions: Vec<_> = (0..12)
            .map(|i| suggestion(&format!("high{i}"), Priority::High, 1))
            .collect();
        suggestions.extend((0..7).map(|i| suggestion(&format!("low{i}"), Priority::Low, 1)));

        let text = format_interactive_summary(&suggestions);
        assert!(text.contains("High priority (12)"));
        assert!(text.contains("high9 "));
        assert!(!text.contains("high10 "));
        assert!(text.contains("... and 2 more"));
        assert!(text.contains("low4 "));
        assert!(!text.contains("low5 "));
    }

    #[test]
    fn test_json_is_lossless_and_sorted() {
        let mut with_screen = suggestion("email", Priority::High, 4);
        with_screen.screen_type = Some("login".to_string());
        let suggestions: Vec<_> = (0..15)
            .map(|i| suggestion(&format!("f{i}"), Priority::Low, 1))
            .chain(std::iter::once(with_screen))
            .collect();

        let json = format_as_json(&suggestions).unwrap();
        let pattern = json.find("\"patternSuggestion\"").unwrap();
        let value = json.find("\"value\"").unwrap();
        assert!(pattern < value, "keys should be sorted alphabetically");

        #[derive(serde::Deserialize)]
        struct Envelope {
            suggestions: Vec<FixtureSuggestion>,
        }
        let parsed: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.suggestions, suggestions);
    }

    #[test]
    fn test_validation_report_all_clear() {
        let report = format_validation_report(&ValidationResult::default());
        assert_eq!(report.lines().count(), 1);
        assert!(report.contains("valid"));
    }

    #[test]
    fn test_validation_report_numbers_entries() {
        let result = ValidationResult {
            errors: vec![ValidationError::MissingPatterns],
            warnings: vec![
                ValidationWarning::MissingVersion,
                ValidationWarning::MissingDefaults,
            ],
            strict: false,
        };
        let report = format_validation_report(&result);
        assert!(report.contains("Errors (1):\n  1. missing required field 'patterns'"));
        assert!(report.contains("  2. missing 'defaults' field"));
        assert!(report.ends_with("Fixture is invalid.\n"));
    }

    #[test]
    fn test_validation_report_strict_failure_message() {
        let result = ValidationResult {
            errors: Vec::new(),
            warnings: vec![ValidationWarning::MissingVersion],
            strict: true,
        };
        assert!(format_validation_report(&result).contains("strict mode"));
    }

    #[test]
    fn test_validation_json_shape() {
        let result = ValidationResult {
            errors: Vec::new(),
            warnings: vec![ValidationWarning::EmptyPatterns],
            strict: false,
        };
        let value: serde_json::Value =
            serde_json::from_str(&format_validation_json(&result).unwrap()).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
    }
}
