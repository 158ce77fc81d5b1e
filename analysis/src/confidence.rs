//! Provenance confidence and suggestion priority tables.

use explore_fixtures_core::{Priority, ValueSource};

/// Default threshold: values whose source confidence is below it are
/// suggested for promotion into a fixture.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Confidence assigned to a value by its provenance alone.
pub fn source_confidence(source: &ValueSource) -> f64 {
    match source {
        ValueSource::FixtureExact | ValueSource::EnvironmentVariable => 1.0,
        ValueSource::FixturePattern | ValueSource::FixtureContext => 0.9,
        ValueSource::FixtureSemantic => 0.8,
        ValueSource::FixtureDefault => 0.7,
        ValueSource::AiGenerated => 0.6,
        ValueSource::Fallback => 0.4,
        ValueSource::Unrecognized(_) => 0.5,
    }
}

/// Priority of a suggestion triggered by a value of the given provenance.
pub fn source_priority(source: &ValueSource) -> Priority {
    match source {
        ValueSource::Fallback => Priority::High,
        ValueSource::AiGenerated => Priority::Medium,
        ValueSource::FixtureDefault => Priority::Low,
        ValueSource::FixtureExact
        | ValueSource::EnvironmentVariable
        | ValueSource::FixturePattern
        | ValueSource::FixtureContext
        | ValueSource::FixtureSemantic
        | ValueSource::Unrecognized(_) => Priority::Low,
    }
}

/// Returns `true` when a value of this provenance should become a suggestion.
pub fn is_below_threshold(source: &ValueSource, min_confidence: f64) -> bool {
    source_confidence(source) < min_confidence
}
