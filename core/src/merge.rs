//! Compiling suggestions into fixture documents.
//!
//! [`generate_fixture`] builds a fresh document from a ranked suggestion
//! list. [`merge_into_fixture`] folds suggestions into an existing document
//! without ever replacing an entry the document already has.
//!
//! # Example
//!
//! ```
//! use explore_fixtures_core::*;
//!
//! let suggestion = FixtureSuggestion {
//!     field_id: "userEmail".into(),
//!     value: "qa@example.com".into(),
//!     pattern_suggestion: "semantic:email".into(),
//!     priority: Priority::High,
//!     source: ValueSource::Fallback,
//!     screen_type: None,
//!     frequency: 2,
//! };
//!
//! let doc = generate_fixture(&[suggestion], "login");
//! assert_eq!(doc.patterns["semantic:email"], "qa@example.com");
//! assert_eq!(doc.defaults["email"], "qa@example.com");
//! assert_eq!(doc.fallback_mode, FallbackMode::AiGenerated);
//! ```

use crate::pattern::SEMANTIC_PREFIX;
use crate::{FallbackMode, FixtureDocument, FixtureSuggestion};

/// Builds a fixture document from suggestions.
///
/// Each suggestion's pattern key becomes a `patterns` entry; `semantic:`
/// keys also populate `defaults` under the bare type name. When two
/// suggestions produce the same key the later one wins.
pub fn generate_fixture(suggestions: &[FixtureSuggestion], name: &str) -> FixtureDocument {
    let mut doc = FixtureDocument::new(name);
    doc.description = Some(format!(
        "Generated from {} exploration suggestion(s)",
        suggestions.len()
    ));
    doc.fallback_mode = FallbackMode::AiGenerated;

    for suggestion in suggestions {
        doc.patterns.insert(
            suggestion.pattern_suggestion.clone(),
            suggestion.value.clone(),
        );
        if let Some(ty) = suggestion.pattern_suggestion.strip_prefix(SEMANTIC_PREFIX) {
            doc.defaults
                .insert(ty.to_string(), suggestion.value.clone());
        }
    }

    doc
}

/// Adds suggestions to an existing fixture document.
///
/// Keys already present in `patterns` or `defaults` keep their values;
/// only missing keys are added. Metadata and `fallbackMode` are untouched.
///
/// # Examples
///
/// ```
/// use explore_fixtures_core::*;
///
/// let existing = FixtureDocument::new("login").with_pattern("semantic:email", "keep@example.com");
/// let suggestion = FixtureSuggestion {
///     field_id: "email".into(),
///     value: "new@example.com".into(),
///     pattern_suggestion: "semantic:email".into(),
///     priority: Priority::Medium,
///     source: ValueSource::AiGenerated,
///     screen_type: None,
///     frequency: 1,
/// };
///
/// let merged = merge_into_fixture(existing, &[suggestion]);
/// assert_eq!(merged.patterns["semantic:email"], "keep@example.com");
/// assert_eq!(merged.defaults["email"], "new@example.com");
/// ```
pub fn merge_into_fixture(
    mut existing: FixtureDocument,
    suggestions: &[FixtureSuggestion],
) -> FixtureDocument {
    for suggestion in suggestions {
        existing
            .patterns
            .entry(suggestion.pattern_suggestion.clone())
            .or_insert_with(|| suggestion.value.clone());
        if let Some(ty) = suggestion.pattern_suggestion.strip_prefix(SEMANTIC_PREFIX) {
            existing
                .defaults
                .entry(ty.to_string())
                .or_insert_with(|| suggestion.value.clone());
        }
    }

    existing
}
